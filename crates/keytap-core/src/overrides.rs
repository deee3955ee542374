// Keytap Key Overrides
// Substitute one keycode for another while a modifier is held

use std::fmt;

use crate::binding::{Binding, CustomKey};
use crate::keycode::Keycode;
use crate::modifier::{ModifierSnapshot, Mods};

/// A basic key override: while any of `trigger_mods` is active, pressing
/// `trigger` sends `replacement` instead, with the triggering modifiers
/// lifted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyOverride {
    pub trigger: Binding,
    pub trigger_mods: Mods,
    pub replacement: Keycode,
}

/// Result of a firing override
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OverrideHit {
    pub replacement: Keycode,
    /// Active modifiers the host must lift while sending the replacement
    pub suppressed_mods: Mods,
}

impl KeyOverride {
    pub fn new(trigger: impl Into<Binding>, trigger_mods: Mods, replacement: Keycode) -> Self {
        Self {
            trigger: trigger.into(),
            trigger_mods,
            replacement,
        }
    }

    pub fn matches(&self, binding: &Binding, snapshot: &ModifierSnapshot) -> bool {
        self.trigger == *binding && snapshot.active().intersects(self.trigger_mods)
    }

    pub fn evaluate(&self, binding: &Binding, snapshot: &ModifierSnapshot) -> Option<OverrideHit> {
        if !self.matches(binding, snapshot) {
            return None;
        }
        Some(OverrideHit {
            replacement: self.replacement,
            suppressed_mods: snapshot.active() & self.trigger_mods,
        })
    }
}

impl fmt::Display for KeyOverride {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} + {} -> {}",
            self.trigger_mods, self.trigger, self.replacement
        )
    }
}

/// Ordered override list; the first matching entry wins
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct KeyOverrides {
    overrides: Vec<KeyOverride>,
}

impl KeyOverrides {
    pub fn new(overrides: Vec<KeyOverride>) -> Self {
        Self { overrides }
    }

    /// The keymap's shift overrides for its custom punctuation keycodes
    pub fn ratiu5_3x5() -> Self {
        Self::new(vec![
            KeyOverride::new(CustomKey::CommaSemicolon, Mods::SHIFT, Keycode::Semicolon),
            KeyOverride::new(CustomKey::PeriodColon, Mods::SHIFT, Keycode::Colon),
            KeyOverride::new(CustomKey::SlashExclaim, Mods::SHIFT, Keycode::Exclaim),
        ])
    }

    pub fn first_match(
        &self,
        binding: &Binding,
        snapshot: &ModifierSnapshot,
    ) -> Option<OverrideHit> {
        self.overrides
            .iter()
            .find_map(|entry| entry.evaluate(binding, snapshot))
    }

    pub fn iter(&self) -> impl Iterator<Item = &KeyOverride> {
        self.overrides.iter()
    }

    pub fn len(&self) -> usize {
        self.overrides.len()
    }

    pub fn is_empty(&self) -> bool {
        self.overrides.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shift_comma_override() {
        let overrides = KeyOverrides::ratiu5_3x5();
        let binding = Binding::Custom(CustomKey::CommaSemicolon);
        let hit = overrides
            .first_match(&binding, &ModifierSnapshot::real(Mods::RSHIFT | Mods::LCTRL))
            .unwrap();
        assert_eq!(hit.replacement, Keycode::Semicolon);
        assert_eq!(hit.suppressed_mods, Mods::RSHIFT);
    }

    #[test]
    fn test_no_shift_no_hit() {
        let overrides = KeyOverrides::ratiu5_3x5();
        let binding = Binding::Custom(CustomKey::PeriodColon);
        assert_eq!(
            overrides.first_match(&binding, &ModifierSnapshot::real(Mods::LCTRL)),
            None
        );
    }

    #[test]
    fn test_oneshot_shift_triggers() {
        let overrides = KeyOverrides::ratiu5_3x5();
        let binding = Binding::Custom(CustomKey::SlashExclaim);
        let hit = overrides
            .first_match(&binding, &ModifierSnapshot::oneshot(Mods::LSHIFT))
            .unwrap();
        assert_eq!(hit.replacement, Keycode::Exclaim);
    }

    #[test]
    fn test_unrelated_binding() {
        let overrides = KeyOverrides::ratiu5_3x5();
        let binding = Binding::Key(Keycode::Comma);
        assert_eq!(
            overrides.first_match(&binding, &ModifierSnapshot::real(Mods::LSHIFT)),
            None
        );
    }

    #[test]
    fn test_first_match_wins() {
        let trigger = Binding::Key(Keycode::Q);
        let overrides = KeyOverrides::new(vec![
            KeyOverride::new(trigger, Mods::CTRL, Keycode::W),
            KeyOverride::new(trigger, Mods::CTRL | Mods::ALT, Keycode::E),
        ]);
        let hit = overrides
            .first_match(&trigger, &ModifierSnapshot::real(Mods::LCTRL | Mods::LALT))
            .unwrap();
        assert_eq!(hit.replacement, Keycode::W);
    }

    #[test]
    fn test_display() {
        let entry = KeyOverride::new(CustomKey::CommaSemicolon, Mods::SHIFT, Keycode::Semicolon);
        assert_eq!(entry.to_string(), "LSHIFT+RSHIFT + CS_COMA -> KC_SCLN");
    }
}
