// Keytap Remap Module
// Tap-hold punctuation remapping

pub mod dual_role;
pub mod priority;
pub mod punctuation;
pub mod remapper;

pub use dual_role::{DualRoleBinding, DualRoleKey, DualRoleTable};
pub use priority::EscapePriority;
pub use punctuation::{PunctBinding, PunctKey, PunctOutputs, PunctuationTable};
pub use remapper::{RemapKey, Remapper};

use crate::binding::Binding;
use crate::modifier::ModKind;

/// Errors raised while building remapper tables
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RemapError {
    #[error("dual-role binding must be a mod-tap, got {0}")]
    NotModTap(Binding),

    #[error("binding {0} is declared more than once")]
    DuplicateBinding(Binding),

    #[error("binding {0} is both a dual-role key and a punctuation key")]
    OverlappingBinding(Binding),

    #[error("shift cannot appear in the escape priority")]
    ShiftInEscapePriority,

    #[error("{0} appears more than once in the escape priority")]
    DuplicatePriority(ModKind),
}
