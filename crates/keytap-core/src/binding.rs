// Keytap Bindings
// What a key position is bound to, and a parser for QMK-style binding strings

use std::fmt;
use std::str::FromStr;

use strum_macros::{Display, EnumIter, EnumString, IntoStaticStr};

use crate::keycode::Keycode;
use crate::layer::Layer;
use crate::modifier::Mods;

/// Keycodes defined by this keymap above QMK's safe range.
///
/// They carry no behavior of their own: key overrides give them meaning.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter, IntoStaticStr,
)]
pub enum CustomKey {
    #[strum(serialize = "CS_COMA")]
    CommaSemicolon,
    #[strum(serialize = "CS_PERI")]
    PeriodColon,
    #[strum(serialize = "CS_SLSH")]
    SlashExclaim,
}

/// The behavior bound to one key position on one layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Binding {
    /// Plain keycode
    Key(Keycode),
    /// Tap for `tap`, hold for the `hold` modifier
    ModTap { hold: Mods, tap: Keycode },
    /// Tap for `tap`, hold to activate `layer`
    LayerTap { layer: Layer, tap: Keycode },
    /// Keycode sent with modifiers, e.g. `LGUI(KC_Z)`
    Chord { mods: Mods, key: Keycode },
    Custom(CustomKey),
    /// Falls through to the next active layer
    Transparent,
    /// Does nothing
    NoOp,
}

impl Binding {
    pub const fn key(code: Keycode) -> Self {
        Binding::Key(code)
    }

    pub const fn mod_tap(hold: Mods, tap: Keycode) -> Self {
        Binding::ModTap { hold, tap }
    }

    pub const fn layer_tap(layer: Layer, tap: Keycode) -> Self {
        Binding::LayerTap { layer, tap }
    }

    pub const fn chord(mods: Mods, key: Keycode) -> Self {
        Binding::Chord { mods, key }
    }

    /// Short legend for keymap rendering
    pub fn legend(&self) -> String {
        match self {
            Binding::Key(code) => code.legend(),
            Binding::ModTap { tap, .. } | Binding::LayerTap { tap, .. } => tap.legend(),
            Binding::Chord { key, .. } => format!("^{}", key.legend()),
            Binding::Custom(CustomKey::CommaSemicolon) => ",".to_string(),
            Binding::Custom(CustomKey::PeriodColon) => ".".to_string(),
            Binding::Custom(CustomKey::SlashExclaim) => "/".to_string(),
            Binding::Transparent => "".to_string(),
            Binding::NoOp => "".to_string(),
        }
    }
}

impl From<Keycode> for Binding {
    fn from(code: Keycode) -> Self {
        Binding::Key(code)
    }
}

impl From<CustomKey> for Binding {
    fn from(key: CustomKey) -> Self {
        Binding::Custom(key)
    }
}

/// Mod-tap wrappers (`LCTL_T`) and chord wrappers (`LCTL`) share these
/// prefixes, in HID bit order.
const MOD_FUNCTIONS: &[(&str, Mods)] = &[
    ("LCTL", Mods::LCTRL),
    ("LSFT", Mods::LSHIFT),
    ("LALT", Mods::LALT),
    ("LGUI", Mods::LGUI),
    ("RCTL", Mods::RCTRL),
    ("RSFT", Mods::RSHIFT),
    ("RALT", Mods::RALT),
    ("RGUI", Mods::RGUI),
];

/// Chord-only shorthands
const CHORD_SHORTHANDS: &[(&str, Mods)] = &[
    ("C", Mods::LCTRL),
    ("S", Mods::LSHIFT),
    ("A", Mods::LALT),
    ("G", Mods::LGUI),
    ("LSG", Mods::LSHIFT.union(Mods::LGUI)),
    ("LCS", Mods::LCTRL.union(Mods::LSHIFT)),
    ("LCA", Mods::LCTRL.union(Mods::LALT)),
    ("LSA", Mods::LSHIFT.union(Mods::LALT)),
];

impl fmt::Display for Binding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Binding::Key(code) => write!(f, "{}", code),
            Binding::ModTap { hold, tap } => match mod_function_name(hold) {
                Some(name) => write!(f, "{}_T({})", name, tap),
                None => write!(f, "MT({}, {})", hold.bits(), tap),
            },
            Binding::LayerTap { layer, tap } => write!(f, "LT({}, {})", layer.index(), tap),
            Binding::Chord { mods, key } => write_chord(f, mods, key),
            Binding::Custom(key) => write!(f, "{}", key),
            Binding::Transparent => write!(f, "KC_TRNS"),
            Binding::NoOp => write!(f, "KC_NO"),
        }
    }
}

fn mod_function_name(mods: Mods) -> Option<&'static str> {
    MOD_FUNCTIONS
        .iter()
        .find(|(_, m)| *m == mods)
        .map(|(name, _)| *name)
}

/// Chords nest one wrapper per modifier bit: `LSFT(LGUI(KC_Z))`
fn write_chord(f: &mut fmt::Formatter<'_>, mods: Mods, key: Keycode) -> fmt::Result {
    let wrappers: Vec<&str> = MOD_FUNCTIONS
        .iter()
        .filter(|(_, m)| mods.contains(*m))
        .map(|(name, _)| *name)
        .collect();
    for name in &wrappers {
        write!(f, "{}(", name)?;
    }
    write!(f, "{}", key)?;
    for _ in &wrappers {
        write!(f, ")")?;
    }
    Ok(())
}

/// Errors that can occur while parsing a binding string
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BindingParseError {
    /// Empty input string
    EmptyInput,
    /// Keycode name not recognized
    UnknownKeycode(String),
    /// Wrapper function name not recognized
    UnknownFunction(String),
    /// Layer name or index not recognized
    UnknownLayer(String),
    /// Unbalanced parentheses or wrong argument count
    Malformed(String),
}

impl fmt::Display for BindingParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BindingParseError::EmptyInput => write!(f, "binding string cannot be empty"),
            BindingParseError::UnknownKeycode(name) => write!(f, "unknown keycode: '{}'", name),
            BindingParseError::UnknownFunction(name) => {
                write!(f, "unknown binding function: '{}'", name)
            }
            BindingParseError::UnknownLayer(name) => write!(f, "unknown layer: '{}'", name),
            BindingParseError::Malformed(exp) => write!(f, "malformed binding: '{}'", exp),
        }
    }
}

impl std::error::Error for BindingParseError {}

impl FromStr for Binding {
    type Err = BindingParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_binding(s)
    }
}

/// Parse a QMK-style binding expression.
///
/// Accepted forms:
/// - `KC_A`, `A` (plain keycode; `KC_TRNS`/`_______` and `KC_NO`/`XXXXXXX` too)
/// - `CS_COMA` (custom keycode)
/// - `LCTL_T(KC_UNDS)` (mod-tap)
/// - `LT(_SYMBOLS, KC_SPC)` or `LT(5, KC_SPC)` (layer-tap)
/// - `LGUI(KC_Z)`, `LSG(KC_Z)`, `LSFT(LGUI(KC_Z))` (chord)
///
/// # Examples
/// ```
/// use keytap_core::{Binding, Keycode, Mods};
/// let binding: Binding = "LCTL_T(KC_UNDS)".parse().unwrap();
/// assert_eq!(binding, Binding::mod_tap(Mods::LCTRL, Keycode::Underscore));
/// ```
pub fn parse_binding(exp: &str) -> Result<Binding, BindingParseError> {
    let trimmed = exp.trim();
    if trimmed.is_empty() {
        return Err(BindingParseError::EmptyInput);
    }

    let Some(open) = trimmed.find('(') else {
        return parse_atom(trimmed);
    };
    if !trimmed.ends_with(')') {
        return Err(BindingParseError::Malformed(trimmed.to_string()));
    }

    let function = trimmed[..open].trim().to_ascii_uppercase();
    let inner = &trimmed[open + 1..trimmed.len() - 1];

    if function == "LT" {
        let (layer, tap) = split_args(inner, trimmed)?;
        let layer = Layer::from_name(layer)
            .ok_or_else(|| BindingParseError::UnknownLayer(layer.trim().to_string()))?;
        return Ok(Binding::LayerTap {
            layer,
            tap: parse_keycode(tap)?,
        });
    }

    if let Some(name) = function.strip_suffix("_T") {
        let hold = lookup_mods(MOD_FUNCTIONS, name)
            .ok_or_else(|| BindingParseError::UnknownFunction(function.clone()))?;
        return Ok(Binding::ModTap {
            hold,
            tap: parse_keycode(inner)?,
        });
    }

    let mods = lookup_mods(MOD_FUNCTIONS, &function)
        .or_else(|| lookup_mods(CHORD_SHORTHANDS, &function))
        .ok_or_else(|| BindingParseError::UnknownFunction(function.clone()))?;

    match parse_binding(inner)? {
        Binding::Key(key) => Ok(Binding::Chord { mods, key }),
        Binding::Chord {
            mods: inner_mods,
            key,
        } => Ok(Binding::Chord {
            mods: mods | inner_mods,
            key,
        }),
        _ => Err(BindingParseError::Malformed(trimmed.to_string())),
    }
}

fn parse_atom(atom: &str) -> Result<Binding, BindingParseError> {
    let upper = atom.to_ascii_uppercase();
    match upper.as_str() {
        "KC_TRNS" | "KC_TRANSPARENT" | "_______" | "VVV" => return Ok(Binding::Transparent),
        "KC_NO" | "XXXXXXX" | "XXX" => return Ok(Binding::NoOp),
        _ => {}
    }
    if let Ok(custom) = upper.parse::<CustomKey>() {
        return Ok(Binding::Custom(custom));
    }
    parse_keycode(atom).map(Binding::Key)
}

fn parse_keycode(name: &str) -> Result<Keycode, BindingParseError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(BindingParseError::EmptyInput);
    }
    Keycode::from_name(name).ok_or_else(|| BindingParseError::UnknownKeycode(name.to_string()))
}

fn split_args<'a>(inner: &'a str, whole: &str) -> Result<(&'a str, &'a str), BindingParseError> {
    let mut parts = inner.splitn(2, ',');
    match (parts.next(), parts.next()) {
        (Some(first), Some(second)) if !second.contains(',') => Ok((first, second)),
        _ => Err(BindingParseError::Malformed(whole.to_string())),
    }
}

fn lookup_mods(table: &[(&str, Mods)], name: &str) -> Option<Mods> {
    table
        .iter()
        .find(|(candidate, _)| *candidate == name)
        .map(|(_, mods)| *mods)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_keycode() {
        assert_eq!(parse_binding("KC_A").unwrap(), Binding::Key(Keycode::A));
        assert_eq!(parse_binding("  comm ").unwrap(), Binding::Key(Keycode::Comma));
    }

    #[test]
    fn test_parse_transparent_and_noop() {
        assert_eq!(parse_binding("KC_TRNS").unwrap(), Binding::Transparent);
        assert_eq!(parse_binding("_______").unwrap(), Binding::Transparent);
        assert_eq!(parse_binding("XXXXXXX").unwrap(), Binding::NoOp);
    }

    #[test]
    fn test_parse_custom() {
        assert_eq!(
            parse_binding("CS_COMA").unwrap(),
            Binding::Custom(CustomKey::CommaSemicolon)
        );
    }

    #[test]
    fn test_parse_mod_tap() {
        assert_eq!(
            parse_binding("LCTL_T(KC_UNDS)").unwrap(),
            Binding::mod_tap(Mods::LCTRL, Keycode::Underscore)
        );
        assert_eq!(
            parse_binding("rsft_t(KC_PERC)").unwrap(),
            Binding::mod_tap(Mods::RSHIFT, Keycode::Percent)
        );
    }

    #[test]
    fn test_parse_layer_tap() {
        let expected = Binding::layer_tap(Layer::Symbols, Keycode::Space);
        assert_eq!(parse_binding("LT(5, KC_SPC)").unwrap(), expected);
        assert_eq!(parse_binding("LT(_SYMBOLS, KC_SPC)").unwrap(), expected);
        assert_eq!(
            parse_binding("LT(9, KC_SPC)"),
            Err(BindingParseError::UnknownLayer("9".to_string()))
        );
    }

    #[test]
    fn test_parse_chords() {
        assert_eq!(
            parse_binding("LGUI(KC_Z)").unwrap(),
            Binding::chord(Mods::LGUI, Keycode::Z)
        );
        assert_eq!(
            parse_binding("LSG(KC_Z)").unwrap(),
            Binding::chord(Mods::LSHIFT | Mods::LGUI, Keycode::Z)
        );
        assert_eq!(
            parse_binding("LSFT(LGUI(KC_Z))").unwrap(),
            Binding::chord(Mods::LSHIFT | Mods::LGUI, Keycode::Z)
        );
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(parse_binding("  "), Err(BindingParseError::EmptyInput));
        assert!(matches!(
            parse_binding("KC_NOPE"),
            Err(BindingParseError::UnknownKeycode(_))
        ));
        assert!(matches!(
            parse_binding("HYPR_T(KC_A)"),
            Err(BindingParseError::UnknownFunction(_))
        ));
        assert!(matches!(
            parse_binding("LCTL(KC_A"),
            Err(BindingParseError::Malformed(_))
        ));
        assert!(matches!(
            parse_binding("LT(1)"),
            Err(BindingParseError::Malformed(_))
        ));
        assert!(matches!(
            parse_binding("LCTL(CS_COMA)"),
            Err(BindingParseError::Malformed(_))
        ));
    }

    #[test]
    fn test_display_parses_back() {
        let bindings = [
            Binding::Key(Keycode::Comma),
            Binding::mod_tap(Mods::RALT, Keycode::Plus),
            Binding::layer_tap(Layer::Numpad, Keycode::Tab),
            Binding::chord(Mods::LSHIFT | Mods::LGUI, Keycode::Z),
            Binding::Custom(CustomKey::SlashExclaim),
            Binding::Transparent,
            Binding::NoOp,
        ];
        for binding in bindings {
            let text = binding.to_string();
            assert_eq!(parse_binding(&text).unwrap(), binding, "{text}");
        }
    }

    #[test]
    fn test_display_forms() {
        assert_eq!(
            Binding::mod_tap(Mods::LCTRL, Keycode::Underscore).to_string(),
            "LCTL_T(KC_UNDS)"
        );
        assert_eq!(
            Binding::chord(Mods::LSHIFT | Mods::LGUI, Keycode::Z).to_string(),
            "LSFT(LGUI(KC_Z))"
        );
    }
}
