// Keytap Modifier Model
// HID modifier bits, modifier kinds, and the per-event modifier snapshot

use std::fmt;
use std::str::FromStr;

bitflags::bitflags! {
    /// Modifier bits in HID report order.
    ///
    /// Left-hand modifiers occupy the low nibble, right-hand modifiers the
    /// high nibble, matching the byte a keyboard sends in its boot report.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Mods: u8 {
        const LCTRL  = 0x01;
        const LSHIFT = 0x02;
        const LALT   = 0x04;
        const LGUI   = 0x08;
        const RCTRL  = 0x10;
        const RSHIFT = 0x20;
        const RALT   = 0x40;
        const RGUI   = 0x80;

        const CTRL  = Self::LCTRL.bits() | Self::RCTRL.bits();
        const SHIFT = Self::LSHIFT.bits() | Self::RSHIFT.bits();
        const ALT   = Self::LALT.bits() | Self::RALT.bits();
        const GUI   = Self::LGUI.bits() | Self::RGUI.bits();
    }
}

impl Mods {
    /// One bit of each kind, left hand. A snapshot "has all of CSAG" when
    /// every kind is present on either hand, see [`ModifierSnapshot::has_all_kinds`].
    pub const CSAG: Mods = Mods::LCTRL
        .union(Mods::LSHIFT)
        .union(Mods::LALT)
        .union(Mods::LGUI);

    /// Parse a comma separated modifier list such as `"ctrl,rshift"`.
    pub fn parse_list(list: &str) -> Result<Mods, ModParseError> {
        let mut mods = Mods::empty();
        for part in list.split(',') {
            let part = part.trim();
            if part.is_empty() {
                continue;
            }
            mods |= parse_mod_name(part)?;
        }
        Ok(mods)
    }
}

impl fmt::Display for Mods {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "none");
        }
        let names: Vec<&str> = self.iter_names().map(|(name, _)| name).collect();
        write!(f, "{}", names.join("+"))
    }
}

/// Modifier kind, ignoring which hand it came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModKind {
    Ctrl,
    Shift,
    Alt,
    Gui,
}

impl ModKind {
    pub const ALL: [ModKind; 4] = [ModKind::Ctrl, ModKind::Shift, ModKind::Alt, ModKind::Gui];

    /// Both hands of this kind
    pub fn mask(self) -> Mods {
        match self {
            ModKind::Ctrl => Mods::CTRL,
            ModKind::Shift => Mods::SHIFT,
            ModKind::Alt => Mods::ALT,
            ModKind::Gui => Mods::GUI,
        }
    }

    pub fn left(self) -> Mods {
        match self {
            ModKind::Ctrl => Mods::LCTRL,
            ModKind::Shift => Mods::LSHIFT,
            ModKind::Alt => Mods::LALT,
            ModKind::Gui => Mods::LGUI,
        }
    }

    pub fn right(self) -> Mods {
        match self {
            ModKind::Ctrl => Mods::RCTRL,
            ModKind::Shift => Mods::RSHIFT,
            ModKind::Alt => Mods::RALT,
            ModKind::Gui => Mods::RGUI,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ModKind::Ctrl => "ctrl",
            ModKind::Shift => "shift",
            ModKind::Alt => "alt",
            ModKind::Gui => "gui",
        }
    }
}

impl fmt::Display for ModKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for ModKind {
    type Err = ModParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ctrl" | "control" | "ctl" => Ok(ModKind::Ctrl),
            "shift" | "sft" => Ok(ModKind::Shift),
            "alt" | "opt" | "option" => Ok(ModKind::Alt),
            "gui" | "cmd" | "command" | "super" | "meta" | "win" => Ok(ModKind::Gui),
            _ => Err(ModParseError(s.to_string())),
        }
    }
}

/// Unknown modifier name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModParseError(pub String);

impl fmt::Display for ModParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown modifier: '{}'", self.0)
    }
}

impl std::error::Error for ModParseError {}

/// Parse one modifier name. Plain kind names (`ctrl`) mean both hands,
/// `l`/`r` prefixes (`lctrl`, `rgui`) pick one hand.
fn parse_mod_name(name: &str) -> Result<Mods, ModParseError> {
    let lower = name.to_ascii_lowercase();
    if let Ok(kind) = lower.parse::<ModKind>() {
        return Ok(kind.mask());
    }
    let unknown = || ModParseError(name.to_string());
    if let Some(rest) = lower.strip_prefix('l') {
        return rest.parse::<ModKind>().map(ModKind::left).map_err(|_| unknown());
    }
    if let Some(rest) = lower.strip_prefix('r') {
        return rest.parse::<ModKind>().map(ModKind::right).map_err(|_| unknown());
    }
    Err(unknown())
}

/// Real and one-shot modifiers as seen at the instant an event is processed.
///
/// The remapper only ever reads a snapshot by value. It is never stored
/// between events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ModifierSnapshot {
    pub real: Mods,
    pub oneshot: Mods,
}

impl ModifierSnapshot {
    pub const EMPTY: ModifierSnapshot = ModifierSnapshot {
        real: Mods::empty(),
        oneshot: Mods::empty(),
    };

    pub fn new(real: Mods, oneshot: Mods) -> Self {
        Self { real, oneshot }
    }

    pub fn real(real: Mods) -> Self {
        Self::new(real, Mods::empty())
    }

    pub fn oneshot(oneshot: Mods) -> Self {
        Self::new(Mods::empty(), oneshot)
    }

    /// Union of real and one-shot modifiers
    pub fn active(&self) -> Mods {
        self.real | self.oneshot
    }

    pub fn has(&self, kind: ModKind) -> bool {
        self.active().intersects(kind.mask())
    }

    /// True when every kind is active on at least one hand
    pub fn has_all_kinds(&self) -> bool {
        ModKind::ALL.into_iter().all(|kind| self.has(kind))
    }

    pub fn is_empty(&self) -> bool {
        self.real.is_empty() && self.oneshot.is_empty()
    }

    /// This snapshot with `mods` removed from both the real and one-shot sets
    pub fn without(&self, mods: Mods) -> Self {
        Self::new(self.real - mods, self.oneshot - mods)
    }
}

impl fmt::Display for ModifierSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "real={} oneshot={}", self.real, self.oneshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hid_bit_layout() {
        assert_eq!(Mods::LCTRL.bits(), 0x01);
        assert_eq!(Mods::RGUI.bits(), 0x80);
        assert_eq!(Mods::SHIFT.bits(), 0x22);
        assert_eq!(Mods::CSAG.bits(), 0x0F);
    }

    #[test]
    fn test_kind_masks_cover_both_hands() {
        for kind in ModKind::ALL {
            assert_eq!(kind.left() | kind.right(), kind.mask());
        }
    }

    #[test]
    fn test_parse_list() {
        assert_eq!(Mods::parse_list("ctrl").unwrap(), Mods::CTRL);
        assert_eq!(
            Mods::parse_list("lctrl, rshift").unwrap(),
            Mods::LCTRL | Mods::RSHIFT
        );
        assert_eq!(Mods::parse_list("Cmd").unwrap(), Mods::GUI);
        assert_eq!(Mods::parse_list("").unwrap(), Mods::empty());
        assert!(Mods::parse_list("hyper").is_err());
        assert!(Mods::parse_list("xctrl").is_err());
    }

    #[test]
    fn test_snapshot_merges_oneshot() {
        let snapshot = ModifierSnapshot::new(Mods::LCTRL, Mods::LSHIFT);
        assert!(snapshot.has(ModKind::Ctrl));
        assert!(snapshot.has(ModKind::Shift));
        assert!(!snapshot.has(ModKind::Alt));
        assert_eq!(snapshot.active(), Mods::LCTRL | Mods::LSHIFT);
    }

    #[test]
    fn test_has_all_kinds_accepts_mixed_hands() {
        let snapshot = ModifierSnapshot::new(Mods::RCTRL | Mods::LSHIFT, Mods::RALT | Mods::LGUI);
        assert!(snapshot.has_all_kinds());
        let partial = ModifierSnapshot::real(Mods::CTRL | Mods::SHIFT | Mods::ALT);
        assert!(!partial.has_all_kinds());
    }

    #[test]
    fn test_without() {
        let snapshot = ModifierSnapshot::new(Mods::LSHIFT | Mods::LCTRL, Mods::RSHIFT);
        let cleared = snapshot.without(Mods::SHIFT);
        assert_eq!(cleared, ModifierSnapshot::real(Mods::LCTRL));
    }

    #[test]
    fn test_display() {
        assert_eq!(Mods::empty().to_string(), "none");
        assert_eq!((Mods::LCTRL | Mods::LSHIFT).to_string(), "LCTRL+LSHIFT");
    }
}
