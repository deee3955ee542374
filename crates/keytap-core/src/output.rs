// Keytap Output
// What the remapper asks the host to do for one event

use std::fmt;

use smallvec::SmallVec;

use crate::keycode::Keycode;
use crate::modifier::{ModifierSnapshot, Mods};

/// One thing to type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutputStep {
    /// Tap `key` with `mods` held, e.g. Ctrl+Escape
    Chord { mods: Mods, key: Keycode },
    /// Type a literal character
    Char(char),
}

impl fmt::Display for OutputStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputStep::Chord { mods, key } => write!(f, "{}+{}", mods, key),
            OutputStep::Char(c) => write!(f, "{:?}", c),
        }
    }
}

/// Steps for one event. Never more than a shortcut and a character.
pub type OutputSteps = SmallVec<[OutputStep; 2]>;

/// Outcome of handling one key event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    /// Default handling must not run. Lift `clear`, type `steps`, then put
    /// the modifiers back to `restore`.
    Suppress {
        clear: ModifierSnapshot,
        steps: OutputSteps,
        restore: ModifierSnapshot,
    },
    /// Default tap/hold resolution proceeds unmodified
    Passthrough,
}

impl Decision {
    pub fn is_passthrough(&self) -> bool {
        matches!(self, Decision::Passthrough)
    }

    /// Steps to type; empty for passthrough
    pub fn steps(&self) -> &[OutputStep] {
        match self {
            Decision::Suppress { steps, .. } => steps.as_slice(),
            Decision::Passthrough => &[],
        }
    }

    /// Literal characters among the steps, as a string
    pub fn text(&self) -> String {
        self.steps()
            .iter()
            .filter_map(|step| match step {
                OutputStep::Char(c) => Some(*c),
                OutputStep::Chord { .. } => None,
            })
            .collect()
    }

    /// Modifier state observable by the next event once this decision has
    /// been carried out
    pub fn apply_to(&self, before: &ModifierSnapshot) -> ModifierSnapshot {
        match self {
            Decision::Suppress { restore, .. } => *restore,
            Decision::Passthrough => *before,
        }
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Decision::Passthrough => write!(f, "passthrough"),
            Decision::Suppress { clear, steps, .. } => {
                write!(f, "suppress")?;
                if !clear.is_empty() {
                    write!(f, " [clear {}]", clear)?;
                }
                for step in steps {
                    write!(f, " {}", step)?;
                }
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use smallvec::smallvec;

    #[test]
    fn test_text_skips_chords() {
        let decision = Decision::Suppress {
            clear: ModifierSnapshot::EMPTY,
            steps: smallvec![
                OutputStep::Chord {
                    mods: Mods::LCTRL,
                    key: Keycode::Escape
                },
                OutputStep::Char('_'),
            ],
            restore: ModifierSnapshot::EMPTY,
        };
        assert_eq!(decision.text(), "_");
        assert_eq!(decision.steps().len(), 2);
    }

    #[test]
    fn test_apply_to() {
        let before = ModifierSnapshot::real(Mods::LCTRL);
        assert_eq!(Decision::Passthrough.apply_to(&before), before);

        let decision = Decision::Suppress {
            clear: before,
            steps: smallvec![OutputStep::Char('(')],
            restore: before,
        };
        assert_eq!(decision.apply_to(&ModifierSnapshot::EMPTY), before);
    }

    #[test]
    fn test_display() {
        assert_eq!(Decision::Passthrough.to_string(), "passthrough");
        let decision = Decision::Suppress {
            clear: ModifierSnapshot::EMPTY,
            steps: smallvec![OutputStep::Char(',')],
            restore: ModifierSnapshot::EMPTY,
        };
        assert_eq!(decision.to_string(), "suppress ','");
    }
}
