// Keytap Dual-Role Keys
// Mod-tap keys whose tap sends a shifted symbol

use indexmap::IndexMap;
use strum_macros::{Display, EnumIter, EnumString};

use crate::binding::Binding;
use crate::keycode::Keycode;
use crate::modifier::Mods;

use super::RemapError;

/// The dual-role keys the remapper knows about.
///
/// A mod-tap key can only tap a basic keycode, so a mod-tap declared with a
/// shifted symbol would tap the unshifted key. These keys get their tap
/// typed as a literal instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum DualRoleKey {
    Underscore,
    LeftParen,
    RightParen,
    Plus,
    Percent,
}

impl DualRoleKey {
    pub const ALL: [DualRoleKey; 5] = [
        DualRoleKey::Underscore,
        DualRoleKey::LeftParen,
        DualRoleKey::RightParen,
        DualRoleKey::Plus,
        DualRoleKey::Percent,
    ];

    /// Where this key lives on the symbols layer
    pub fn default_binding(self) -> Binding {
        match self {
            DualRoleKey::Underscore => Binding::mod_tap(Mods::LCTRL, Keycode::Underscore),
            DualRoleKey::LeftParen => Binding::mod_tap(Mods::LALT, Keycode::LeftParen),
            DualRoleKey::RightParen => Binding::mod_tap(Mods::LGUI, Keycode::RightParen),
            DualRoleKey::Plus => Binding::mod_tap(Mods::RALT, Keycode::Plus),
            DualRoleKey::Percent => Binding::mod_tap(Mods::RSHIFT, Keycode::Percent),
        }
    }

    pub fn default_tap(self) -> char {
        match self {
            DualRoleKey::Underscore => '_',
            DualRoleKey::LeftParen => '(',
            DualRoleKey::RightParen => ')',
            DualRoleKey::Plus => '+',
            DualRoleKey::Percent => '%',
        }
    }
}

/// A dual-role key as bound in this keymap
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DualRoleBinding {
    pub key: DualRoleKey,
    pub binding: Binding,
    pub tap: char,
}

impl DualRoleBinding {
    /// Build a binding; `binding` must be a mod-tap
    pub fn new(key: DualRoleKey, binding: Binding, tap: char) -> Result<Self, RemapError> {
        if !matches!(binding, Binding::ModTap { .. }) {
            return Err(RemapError::NotModTap(binding));
        }
        Ok(Self { key, binding, tap })
    }

    pub fn default_for(key: DualRoleKey) -> Self {
        Self {
            key,
            binding: key.default_binding(),
            tap: key.default_tap(),
        }
    }

    /// Modifier applied while held
    pub fn hold(&self) -> Mods {
        match self.binding {
            Binding::ModTap { hold, .. } => hold,
            _ => Mods::empty(),
        }
    }
}

/// Dual-role bindings by trigger binding, in declaration order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DualRoleTable {
    entries: IndexMap<Binding, DualRoleBinding>,
}

impl DualRoleTable {
    pub fn empty() -> Self {
        Self {
            entries: IndexMap::new(),
        }
    }

    /// Build a table, rejecting two entries for the same binding
    pub fn new(entries: impl IntoIterator<Item = DualRoleBinding>) -> Result<Self, RemapError> {
        let mut table = Self::empty();
        for entry in entries {
            table.insert(entry)?;
        }
        Ok(table)
    }

    fn insert(&mut self, entry: DualRoleBinding) -> Result<(), RemapError> {
        if self.entries.contains_key(&entry.binding) {
            return Err(RemapError::DuplicateBinding(entry.binding));
        }
        self.entries.insert(entry.binding, entry);
        Ok(())
    }

    pub fn get(&self, binding: &Binding) -> Option<&DualRoleBinding> {
        self.entries.get(binding)
    }

    pub fn iter(&self) -> impl Iterator<Item = &DualRoleBinding> {
        self.entries.values()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for DualRoleTable {
    fn default() -> Self {
        let entries = DualRoleKey::ALL
            .into_iter()
            .map(|key| (key.default_binding(), DualRoleBinding::default_for(key)))
            .collect();
        Self { entries }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_table_has_all_keys() {
        let table = DualRoleTable::default();
        assert_eq!(table.len(), 5);
        let taps: String = table.iter().map(|entry| entry.tap).collect();
        assert_eq!(taps, "_()+%");
    }

    #[test]
    fn test_lookup_by_binding() {
        let table = DualRoleTable::default();
        let entry = table
            .get(&Binding::mod_tap(Mods::RALT, Keycode::Plus))
            .unwrap();
        assert_eq!(entry.key, DualRoleKey::Plus);
        assert_eq!(entry.hold(), Mods::RALT);
        assert!(table
            .get(&Binding::mod_tap(Mods::LSHIFT, Keycode::Plus))
            .is_none());
    }

    #[test]
    fn test_rejects_non_mod_tap() {
        let result = DualRoleBinding::new(DualRoleKey::Plus, Binding::Key(Keycode::Plus), '+');
        assert_eq!(
            result,
            Err(RemapError::NotModTap(Binding::Key(Keycode::Plus)))
        );
    }

    #[test]
    fn test_rejects_duplicate_binding() {
        let binding = Binding::mod_tap(Mods::LCTRL, Keycode::Underscore);
        let result = DualRoleTable::new([
            DualRoleBinding::new(DualRoleKey::Underscore, binding, '_').unwrap(),
            DualRoleBinding::new(DualRoleKey::Plus, binding, '+').unwrap(),
        ]);
        assert_eq!(result, Err(RemapError::DuplicateBinding(binding)));
    }

    #[test]
    fn test_key_names() {
        assert_eq!(DualRoleKey::LeftParen.to_string(), "left_paren");
        assert_eq!("Percent".parse::<DualRoleKey>(), Ok(DualRoleKey::Percent));
    }
}
