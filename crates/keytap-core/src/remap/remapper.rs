// Keytap Remapper
// Per-event decision for dual-role and shifted-punctuation keys
//
// Two policies live here:
// - dual-role keys suppress only on a clean tap and otherwise leave the
//   native mod-tap to resolve;
// - punctuation keys always suppress, press or release.

use smallvec::smallvec;

use crate::binding::Binding;
use crate::event::KeyEvent;
use crate::modifier::{ModifierSnapshot, Mods};
use crate::output::{Decision, OutputStep, OutputSteps};

use super::{
    DualRoleKey, DualRoleTable, EscapePriority, PunctKey, PunctOutputs, PunctuationTable,
    RemapError,
};

/// A key the remapper acts on, with the payload it types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemapKey {
    DualRole { key: DualRoleKey, tap: char },
    Punctuation { key: PunctKey, outputs: PunctOutputs },
}

/// Decides what to type for dual-role and punctuation keys.
///
/// Immutable once built. Every call reads the modifier snapshot it is given
/// and describes any modifier changes in the returned [`Decision`]; nothing
/// carries over from one event to the next.
#[derive(Debug, Clone, Default)]
pub struct Remapper {
    dual_roles: DualRoleTable,
    punctuation: PunctuationTable,
    escape: EscapePriority,
}

impl Remapper {
    /// Build a remapper. A binding may not be both a dual-role key and a
    /// punctuation key.
    pub fn new(
        dual_roles: DualRoleTable,
        punctuation: PunctuationTable,
        escape: EscapePriority,
    ) -> Result<Self, RemapError> {
        if let Some(overlap) = dual_roles
            .iter()
            .find(|entry| punctuation.get(&entry.binding).is_some())
        {
            return Err(RemapError::OverlappingBinding(overlap.binding));
        }
        Ok(Self {
            dual_roles,
            punctuation,
            escape,
        })
    }

    pub fn dual_roles(&self) -> &DualRoleTable {
        &self.dual_roles
    }

    pub fn punctuation(&self) -> &PunctuationTable {
        &self.punctuation
    }

    pub fn escape_priority(&self) -> &EscapePriority {
        &self.escape
    }

    /// Which remapped key, if any, `binding` is
    pub fn classify(&self, binding: &Binding) -> Option<RemapKey> {
        if let Some(entry) = self.dual_roles.get(binding) {
            return Some(RemapKey::DualRole {
                key: entry.key,
                tap: entry.tap,
            });
        }
        self.punctuation
            .get(binding)
            .map(|entry| RemapKey::Punctuation {
                key: entry.key,
                outputs: entry.outputs,
            })
    }

    /// Decide what to do with one event given the modifiers active right now
    pub fn handle_event(&self, event: &KeyEvent, snapshot: ModifierSnapshot) -> Decision {
        let decision = match self.classify(&event.binding) {
            Some(RemapKey::DualRole { tap, .. }) => self.dual_role(event, tap, snapshot),
            Some(RemapKey::Punctuation { outputs, .. }) => punctuation(event, &outputs, snapshot),
            None => Decision::Passthrough,
        };

        match &decision {
            Decision::Passthrough => log::trace!("{} -> passthrough", event),
            Decision::Suppress { .. } => {
                log::debug!("{} with {} -> {}", event, snapshot, decision)
            }
        }
        decision
    }

    fn dual_role(&self, event: &KeyEvent, tap: char, snapshot: ModifierSnapshot) -> Decision {
        if !event.pressed || !event.tap.is_clean_tap() {
            return Decision::Passthrough;
        }

        let mut steps = OutputSteps::new();
        if let Some(escape) = self.escape.escape_step(&snapshot) {
            steps.push(escape);
        }
        steps.push(OutputStep::Char(tap));

        Decision::Suppress {
            clear: snapshot,
            steps,
            restore: snapshot,
        }
    }
}

fn punctuation(event: &KeyEvent, outputs: &PunctOutputs, snapshot: ModifierSnapshot) -> Decision {
    if !event.pressed {
        return Decision::Suppress {
            clear: ModifierSnapshot::EMPTY,
            steps: OutputSteps::new(),
            restore: snapshot,
        };
    }

    let (c, lift) = outputs.select(&snapshot);
    Decision::Suppress {
        clear: lifted(&snapshot, lift),
        steps: smallvec![OutputStep::Char(c)],
        restore: snapshot,
    }
}

/// The part of `snapshot` covered by `lift`
fn lifted(snapshot: &ModifierSnapshot, lift: Mods) -> ModifierSnapshot {
    ModifierSnapshot::new(snapshot.real & lift, snapshot.oneshot & lift)
}
