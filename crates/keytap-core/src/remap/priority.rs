// Keytap Escape Priority
// Which held modifier prefixes a dual-role tap with modifier+Escape

use crate::keycode::Keycode;
use crate::modifier::{ModKind, ModifierSnapshot};
use crate::output::OutputStep;

use super::RemapError;

/// Ordered list of modifier kinds checked top to bottom when a dual-role key
/// is tapped with modifiers held. The first active kind sends its left-hand
/// modifier + Escape before the literal; later kinds are ignored.
///
/// Default order is Ctrl, Alt, Gui. Shift never takes part: a shifted tap
/// just types the literal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EscapePriority {
    order: Vec<ModKind>,
}

impl EscapePriority {
    pub fn new(order: impl IntoIterator<Item = ModKind>) -> Result<Self, RemapError> {
        let mut seen = Vec::new();
        for kind in order {
            if kind == ModKind::Shift {
                return Err(RemapError::ShiftInEscapePriority);
            }
            if seen.contains(&kind) {
                return Err(RemapError::DuplicatePriority(kind));
            }
            seen.push(kind);
        }
        Ok(Self { order: seen })
    }

    /// No escape prefix at all
    pub fn disabled() -> Self {
        Self { order: Vec::new() }
    }

    pub fn order(&self) -> &[ModKind] {
        &self.order
    }

    /// First kind in the list that is active in `snapshot`
    pub fn first_active(&self, snapshot: &ModifierSnapshot) -> Option<ModKind> {
        self.order
            .iter()
            .copied()
            .find(|kind| snapshot.has(*kind))
    }

    /// The modifier+Escape step for `snapshot`, if any listed kind is held
    pub fn escape_step(&self, snapshot: &ModifierSnapshot) -> Option<OutputStep> {
        self.first_active(snapshot).map(|kind| OutputStep::Chord {
            mods: kind.left(),
            key: Keycode::Escape,
        })
    }
}

impl Default for EscapePriority {
    fn default() -> Self {
        Self {
            order: vec![ModKind::Ctrl, ModKind::Alt, ModKind::Gui],
        }
    }
}
