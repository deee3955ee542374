// Keytap Host Seam
// The framework side of the contract: modifier registers and typed output

use std::ops::{Deref, DerefMut};

use crate::event::KeyEvent;
use crate::keycode::Keycode;
use crate::modifier::{ModifierSnapshot, Mods};
use crate::output::{Decision, OutputStep};
use crate::remap::Remapper;

/// What the remapper needs from the firmware it runs inside
pub trait Host {
    /// Real modifiers currently held
    fn mods(&self) -> Mods;

    /// One-shot modifiers waiting for the next key
    fn oneshot_mods(&self) -> Mods;

    fn set_mods(&mut self, mods: Mods);

    fn set_oneshot_mods(&mut self, mods: Mods);

    /// Tap `key` with `mods` held on top of whatever is active
    fn tap_chord(&mut self, mods: Mods, key: Keycode);

    /// Type one literal character
    fn send_char(&mut self, c: char);

    fn snapshot(&self) -> ModifierSnapshot {
        ModifierSnapshot::new(self.mods(), self.oneshot_mods())
    }
}

/// Scoped hold on the host's modifier registers.
///
/// Acquiring lifts the requested modifiers; dropping writes the saved
/// snapshot back, whatever path the holder leaves by.
pub struct ModifierGuard<'a, H: Host + ?Sized> {
    host: &'a mut H,
    restore: ModifierSnapshot,
}

impl<'a, H: Host + ?Sized> ModifierGuard<'a, H> {
    pub fn acquire(host: &'a mut H, clear: ModifierSnapshot, restore: ModifierSnapshot) -> Self {
        if !clear.is_empty() {
            let real = host.mods() - clear.real;
            let oneshot = host.oneshot_mods() - clear.oneshot;
            host.set_mods(real);
            host.set_oneshot_mods(oneshot);
        }
        Self { host, restore }
    }
}

impl<H: Host + ?Sized> Deref for ModifierGuard<'_, H> {
    type Target = H;

    fn deref(&self) -> &H {
        self.host
    }
}

impl<H: Host + ?Sized> DerefMut for ModifierGuard<'_, H> {
    fn deref_mut(&mut self) -> &mut H {
        self.host
    }
}

impl<H: Host + ?Sized> Drop for ModifierGuard<'_, H> {
    fn drop(&mut self) {
        self.host.set_mods(self.restore.real);
        self.host.set_oneshot_mods(self.restore.oneshot);
    }
}

/// Run one event through the remapper against a live host.
///
/// Returns `false` when the event was fully handled and default resolution
/// must not run, `true` when the host should resolve the key itself.
pub fn process_record<H: Host + ?Sized>(remapper: &Remapper, host: &mut H, event: &KeyEvent) -> bool {
    let snapshot = host.snapshot();
    match remapper.handle_event(event, snapshot) {
        Decision::Passthrough => true,
        Decision::Suppress {
            clear,
            steps,
            restore,
        } => {
            let mut guard = ModifierGuard::acquire(host, clear, restore);
            for step in steps {
                match step {
                    OutputStep::Chord { mods, key } => guard.tap_chord(mods, key),
                    OutputStep::Char(c) => guard.send_char(c),
                }
            }
            false
        }
    }
}

/// Something a [`SimulatedHost`] was asked to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostAction {
    SetMods(Mods),
    SetOneshotMods(Mods),
    /// An emitted step, with the real and one-shot modifiers active at the
    /// time it was typed
    Emit { step: OutputStep, held: Mods },
}

/// In-memory host that records everything it is asked to do
#[derive(Debug, Clone, Default)]
pub struct SimulatedHost {
    real: Mods,
    oneshot: Mods,
    actions: Vec<HostAction>,
}

impl SimulatedHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_snapshot(snapshot: ModifierSnapshot) -> Self {
        Self {
            real: snapshot.real,
            oneshot: snapshot.oneshot,
            actions: Vec::new(),
        }
    }

    pub fn actions(&self) -> &[HostAction] {
        &self.actions
    }

    /// Emitted steps in order
    pub fn emitted(&self) -> Vec<OutputStep> {
        self.emissions().map(|(step, _)| step).collect()
    }

    /// Emitted steps with the modifiers active when each was typed
    pub fn emissions(&self) -> impl Iterator<Item = (OutputStep, Mods)> + '_ {
        self.actions.iter().filter_map(|action| match *action {
            HostAction::Emit { step, held } => Some((step, held)),
            _ => None,
        })
    }

    /// Literal characters typed so far
    pub fn typed(&self) -> String {
        self.emitted()
            .into_iter()
            .filter_map(|step| match step {
                OutputStep::Char(c) => Some(c),
                OutputStep::Chord { .. } => None,
            })
            .collect()
    }

    /// Forget recorded actions, keep modifier state
    pub fn clear_log(&mut self) {
        self.actions.clear();
    }

    fn emit(&mut self, step: OutputStep) {
        let held = self.real | self.oneshot;
        self.actions.push(HostAction::Emit { step, held });
    }
}

impl Host for SimulatedHost {
    fn mods(&self) -> Mods {
        self.real
    }

    fn oneshot_mods(&self) -> Mods {
        self.oneshot
    }

    fn set_mods(&mut self, mods: Mods) {
        self.real = mods;
        self.actions.push(HostAction::SetMods(mods));
    }

    fn set_oneshot_mods(&mut self, mods: Mods) {
        self.oneshot = mods;
        self.actions.push(HostAction::SetOneshotMods(mods));
    }

    fn tap_chord(&mut self, mods: Mods, key: Keycode) {
        self.emit(OutputStep::Chord { mods, key });
    }

    fn send_char(&mut self, c: char) {
        self.emit(OutputStep::Char(c));
    }
}
