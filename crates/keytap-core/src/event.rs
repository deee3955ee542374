// Keytap Key Events
// One event per physical key transition, as delivered by the host

use std::fmt;

use crate::binding::Binding;

/// Tap/hold resolution the host attached to an event.
///
/// `count` is the number of completed taps; zero means the key resolved as a
/// hold. `interrupted` is set when another key went down before the hold
/// threshold resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct TapState {
    pub count: u8,
    pub interrupted: bool,
}

impl TapState {
    /// A single isolated tap
    pub const TAP: TapState = TapState {
        count: 1,
        interrupted: false,
    };

    /// Held past the threshold
    pub const HOLD: TapState = TapState {
        count: 0,
        interrupted: false,
    };

    /// Another key went down first
    pub const INTERRUPTED: TapState = TapState {
        count: 1,
        interrupted: true,
    };

    pub fn new(count: u8, interrupted: bool) -> Self {
        Self { count, interrupted }
    }

    /// True when the key resolved as a genuine isolated tap
    pub fn is_clean_tap(&self) -> bool {
        self.count >= 1 && !self.interrupted
    }
}

/// A key transition for a bound key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyEvent {
    pub binding: Binding,
    pub pressed: bool,
    pub tap: TapState,
}

impl KeyEvent {
    pub fn new(binding: Binding, pressed: bool, tap: TapState) -> Self {
        Self {
            binding,
            pressed,
            tap,
        }
    }

    /// Press that resolved as a clean tap
    pub fn tap(binding: impl Into<Binding>) -> Self {
        Self::new(binding.into(), true, TapState::TAP)
    }

    /// Press that resolved as a hold
    pub fn hold(binding: impl Into<Binding>) -> Self {
        Self::new(binding.into(), true, TapState::HOLD)
    }

    pub fn press(binding: impl Into<Binding>) -> Self {
        Self::new(binding.into(), true, TapState::default())
    }

    pub fn release(binding: impl Into<Binding>) -> Self {
        Self::new(binding.into(), false, TapState::default())
    }
}

impl fmt::Display for KeyEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let action = if self.pressed { "press" } else { "release" };
        write!(
            f,
            "{} {} (taps={}{})",
            action,
            self.binding,
            self.tap.count,
            if self.tap.interrupted { ", interrupted" } else { "" }
        )
    }
}
