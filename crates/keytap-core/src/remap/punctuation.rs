// Keytap Shifted Punctuation
// Plain punctuation keys whose output depends on live modifier state

use indexmap::IndexMap;
use strum_macros::{Display, EnumIter, EnumString};

use crate::binding::Binding;
use crate::keycode::Keycode;
use crate::modifier::{ModKind, ModifierSnapshot, Mods};

use super::RemapError;

/// Punctuation keys that always type through the remapper
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum PunctKey {
    Comma,
    Period,
    Slash,
}

impl PunctKey {
    pub const ALL: [PunctKey; 3] = [PunctKey::Comma, PunctKey::Period, PunctKey::Slash];

    pub fn keycode(self) -> Keycode {
        match self {
            PunctKey::Comma => Keycode::Comma,
            PunctKey::Period => Keycode::Dot,
            PunctKey::Slash => Keycode::Slash,
        }
    }

    pub fn from_keycode(code: Keycode) -> Option<PunctKey> {
        PunctKey::ALL.into_iter().find(|key| key.keycode() == code)
    }

    /// Slash types `?` bare and `!` shifted in this layout
    pub fn default_outputs(self) -> PunctOutputs {
        match self {
            PunctKey::Comma => PunctOutputs::new(',', ':', Some(';')),
            PunctKey::Period => PunctOutputs::new('.', '>', Some(':')),
            PunctKey::Slash => PunctOutputs::new('?', '!', None),
        }
    }
}

/// Characters a punctuation key types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PunctOutputs {
    /// No Shift
    pub bare: char,
    /// Shift
    pub shifted: char,
    /// Ctrl+Shift+Alt+GUI, typed with Shift lifted
    pub extended: Option<char>,
}

impl PunctOutputs {
    pub const fn new(bare: char, shifted: char, extended: Option<char>) -> Self {
        Self {
            bare,
            shifted,
            extended,
        }
    }

    /// Pick the character for this snapshot, and the modifiers to lift while
    /// typing it
    pub fn select(&self, snapshot: &ModifierSnapshot) -> (char, Mods) {
        if !snapshot.has(ModKind::Shift) {
            return (self.bare, Mods::empty());
        }
        match self.extended {
            Some(extended) if snapshot.has_all_kinds() => {
                (extended, snapshot.active() & Mods::SHIFT)
            }
            _ => (self.shifted, Mods::empty()),
        }
    }
}

/// A punctuation key as bound in this keymap
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PunctBinding {
    pub key: PunctKey,
    pub binding: Binding,
    pub outputs: PunctOutputs,
}

impl PunctBinding {
    pub fn default_for(key: PunctKey) -> Self {
        Self {
            key,
            binding: Binding::Key(key.keycode()),
            outputs: key.default_outputs(),
        }
    }
}

/// Punctuation bindings by trigger binding, in declaration order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PunctuationTable {
    entries: IndexMap<Binding, PunctBinding>,
}

impl PunctuationTable {
    pub fn empty() -> Self {
        Self {
            entries: IndexMap::new(),
        }
    }

    pub fn new(entries: impl IntoIterator<Item = PunctBinding>) -> Result<Self, RemapError> {
        let mut table = Self::empty();
        for entry in entries {
            if table.entries.contains_key(&entry.binding) {
                return Err(RemapError::DuplicateBinding(entry.binding));
            }
            table.entries.insert(entry.binding, entry);
        }
        Ok(table)
    }

    pub fn get(&self, binding: &Binding) -> Option<&PunctBinding> {
        self.entries.get(binding)
    }

    pub fn iter(&self) -> impl Iterator<Item = &PunctBinding> {
        self.entries.values()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for PunctuationTable {
    fn default() -> Self {
        let entries = PunctKey::ALL
            .into_iter()
            .map(PunctBinding::default_for)
            .map(|entry| (entry.binding, entry))
            .collect();
        Self { entries }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn all_four() -> ModifierSnapshot {
        ModifierSnapshot::real(Mods::LCTRL | Mods::LSHIFT | Mods::LALT | Mods::LGUI)
    }

    #[test]
    fn test_comma_outputs() {
        let outputs = PunctKey::Comma.default_outputs();
        assert_eq!(outputs.select(&ModifierSnapshot::EMPTY), (',', Mods::empty()));
        assert_eq!(
            outputs.select(&ModifierSnapshot::real(Mods::LSHIFT)),
            (':', Mods::empty())
        );
        assert_eq!(outputs.select(&all_four()), (';', Mods::LSHIFT));
    }

    #[test]
    fn test_partial_combo_is_plain_shift() {
        let outputs = PunctKey::Period.default_outputs();
        let snapshot = ModifierSnapshot::real(Mods::LSHIFT | Mods::LCTRL | Mods::LALT);
        assert_eq!(outputs.select(&snapshot), ('>', Mods::empty()));
    }

    #[test]
    fn test_extended_lifts_both_shift_hands() {
        let outputs = PunctKey::Period.default_outputs();
        let snapshot = ModifierSnapshot::new(Mods::CSAG | Mods::RSHIFT, Mods::empty());
        assert_eq!(outputs.select(&snapshot), (':', Mods::SHIFT));
    }

    #[test]
    fn test_oneshot_shift_counts() {
        let outputs = PunctKey::Slash.default_outputs();
        assert_eq!(
            outputs.select(&ModifierSnapshot::oneshot(Mods::RSHIFT)),
            ('!', Mods::empty())
        );
    }

    #[test]
    fn test_slash_has_no_extended() {
        let outputs = PunctKey::Slash.default_outputs();
        assert_eq!(outputs.select(&ModifierSnapshot::EMPTY), ('?', Mods::empty()));
        assert_eq!(outputs.select(&all_four()), ('!', Mods::empty()));
    }

    #[test]
    fn test_default_table() {
        let table = PunctuationTable::default();
        assert_eq!(table.len(), 3);
        let entry = table.get(&Binding::Key(Keycode::Dot)).unwrap();
        assert_eq!(entry.key, PunctKey::Period);
        assert!(table.get(&Binding::Key(Keycode::Semicolon)).is_none());
    }

    #[test]
    fn test_from_keycode() {
        assert_eq!(PunctKey::from_keycode(Keycode::Slash), Some(PunctKey::Slash));
        assert_eq!(PunctKey::from_keycode(Keycode::Minus), None);
    }
}
