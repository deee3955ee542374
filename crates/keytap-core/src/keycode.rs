// Keytap Keycodes
// The closed set of basic keycodes the keymap binds, with QMK names

use strum_macros::{Display, EnumIter, EnumString, IntoStaticStr};

/// A basic keycode.
///
/// Names follow the QMK `KC_*` spelling. Where QMK has a long and a short
/// alias both parse, and the short one is canonical.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display, EnumString, EnumIter,
    IntoStaticStr,
)]
pub enum Keycode {
    #[strum(serialize = "KC_A")]
    A,
    #[strum(serialize = "KC_B")]
    B,
    #[strum(serialize = "KC_C")]
    C,
    #[strum(serialize = "KC_D")]
    D,
    #[strum(serialize = "KC_E")]
    E,
    #[strum(serialize = "KC_F")]
    F,
    #[strum(serialize = "KC_G")]
    G,
    #[strum(serialize = "KC_H")]
    H,
    #[strum(serialize = "KC_I")]
    I,
    #[strum(serialize = "KC_J")]
    J,
    #[strum(serialize = "KC_K")]
    K,
    #[strum(serialize = "KC_L")]
    L,
    #[strum(serialize = "KC_M")]
    M,
    #[strum(serialize = "KC_N")]
    N,
    #[strum(serialize = "KC_O")]
    O,
    #[strum(serialize = "KC_P")]
    P,
    #[strum(serialize = "KC_Q")]
    Q,
    #[strum(serialize = "KC_R")]
    R,
    #[strum(serialize = "KC_S")]
    S,
    #[strum(serialize = "KC_T")]
    T,
    #[strum(serialize = "KC_U")]
    U,
    #[strum(serialize = "KC_V")]
    V,
    #[strum(serialize = "KC_W")]
    W,
    #[strum(serialize = "KC_X")]
    X,
    #[strum(serialize = "KC_Y")]
    Y,
    #[strum(serialize = "KC_Z")]
    Z,

    #[strum(serialize = "KC_1")]
    Num1,
    #[strum(serialize = "KC_2")]
    Num2,
    #[strum(serialize = "KC_3")]
    Num3,
    #[strum(serialize = "KC_4")]
    Num4,
    #[strum(serialize = "KC_5")]
    Num5,
    #[strum(serialize = "KC_6")]
    Num6,
    #[strum(serialize = "KC_7")]
    Num7,
    #[strum(serialize = "KC_8")]
    Num8,
    #[strum(serialize = "KC_9")]
    Num9,
    #[strum(serialize = "KC_0")]
    Num0,

    #[strum(to_string = "KC_QUOT", serialize = "KC_QUOTE")]
    Quote,
    #[strum(to_string = "KC_COMM", serialize = "KC_COMMA")]
    Comma,
    #[strum(serialize = "KC_DOT")]
    Dot,
    #[strum(to_string = "KC_SLSH", serialize = "KC_SLASH")]
    Slash,
    #[strum(to_string = "KC_MINS", serialize = "KC_MINUS")]
    Minus,
    #[strum(to_string = "KC_EQL", serialize = "KC_EQUAL")]
    Equal,
    #[strum(to_string = "KC_GRV", serialize = "KC_GRAVE")]
    Grave,
    #[strum(serialize = "KC_LBRC")]
    LeftBracket,
    #[strum(serialize = "KC_RBRC")]
    RightBracket,
    #[strum(to_string = "KC_BSLS", serialize = "KC_BACKSLASH")]
    Backslash,
    #[strum(to_string = "KC_SCLN", serialize = "KC_SEMICOLON")]
    Semicolon,

    // Shifted symbols
    #[strum(to_string = "KC_UNDS", serialize = "KC_UNDERSCORE")]
    Underscore,
    #[strum(serialize = "KC_LPRN")]
    LeftParen,
    #[strum(serialize = "KC_RPRN")]
    RightParen,
    #[strum(serialize = "KC_PLUS")]
    Plus,
    #[strum(serialize = "KC_PERC")]
    Percent,
    #[strum(serialize = "KC_AMPR")]
    Ampersand,
    #[strum(serialize = "KC_ASTR")]
    Asterisk,
    #[strum(serialize = "KC_CIRC")]
    Circumflex,
    #[strum(serialize = "KC_LT")]
    LessThan,
    #[strum(serialize = "KC_GT")]
    GreaterThan,
    #[strum(serialize = "KC_DLR")]
    Dollar,
    #[strum(to_string = "KC_DQT", serialize = "KC_DQUO")]
    DoubleQuote,
    #[strum(serialize = "KC_TILD")]
    Tilde,
    #[strum(serialize = "KC_AT")]
    At,
    #[strum(serialize = "KC_PIPE")]
    Pipe,
    #[strum(serialize = "KC_LCBR")]
    LeftCurly,
    #[strum(serialize = "KC_RCBR")]
    RightCurly,
    #[strum(serialize = "KC_HASH")]
    Hash,
    #[strum(serialize = "KC_COLN")]
    Colon,
    #[strum(serialize = "KC_EXLM")]
    Exclaim,
    #[strum(serialize = "KC_QUES")]
    Question,

    #[strum(to_string = "KC_ESC", serialize = "KC_ESCAPE")]
    Escape,
    #[strum(to_string = "KC_BSPC", serialize = "KC_BACKSPACE")]
    Backspace,
    #[strum(to_string = "KC_DEL", serialize = "KC_DELETE")]
    Delete,
    #[strum(to_string = "KC_ENT", serialize = "KC_ENTER")]
    Enter,
    #[strum(to_string = "KC_SPC", serialize = "KC_SPACE")]
    Space,
    #[strum(serialize = "KC_TAB")]
    Tab,
    #[strum(serialize = "KC_CAPS")]
    CapsLock,
    #[strum(serialize = "KC_INS")]
    Insert,
    #[strum(serialize = "KC_HOME")]
    Home,
    #[strum(serialize = "KC_END")]
    End,
    #[strum(serialize = "KC_PGUP")]
    PageUp,
    #[strum(serialize = "KC_PGDN")]
    PageDown,
    #[strum(serialize = "KC_LEFT")]
    Left,
    #[strum(to_string = "KC_RGHT", serialize = "KC_RIGHT")]
    Right,
    #[strum(serialize = "KC_UP")]
    Up,
    #[strum(serialize = "KC_DOWN")]
    Down,

    #[strum(serialize = "KC_LCTL")]
    LeftCtrl,
    #[strum(serialize = "KC_LSFT")]
    LeftShift,
    #[strum(serialize = "KC_LALT")]
    LeftAlt,
    #[strum(serialize = "KC_LGUI")]
    LeftGui,
    #[strum(serialize = "KC_RCTL")]
    RightCtrl,
    #[strum(serialize = "KC_RSFT")]
    RightShift,
    #[strum(serialize = "KC_RALT")]
    RightAlt,
    #[strum(serialize = "KC_RGUI")]
    RightGui,

    #[strum(serialize = "KC_MPRV")]
    MediaPrev,
    #[strum(serialize = "KC_MNXT")]
    MediaNext,
    #[strum(serialize = "KC_VOLD")]
    VolumeDown,
    #[strum(serialize = "KC_VOLU")]
    VolumeUp,
    #[strum(serialize = "KC_BRID")]
    BrightnessDown,
    #[strum(serialize = "KC_BRIU")]
    BrightnessUp,
    #[strum(serialize = "KC_PWR")]
    Power,
    #[strum(serialize = "KC_MCTL")]
    MissionControl,

    #[strum(serialize = "KC_MS_L")]
    MouseLeft,
    #[strum(serialize = "KC_MS_D")]
    MouseDown,
    #[strum(serialize = "KC_MS_U")]
    MouseUp,
    #[strum(serialize = "KC_MS_R")]
    MouseRight,
    #[strum(serialize = "KC_WH_L")]
    WheelLeft,
    #[strum(serialize = "KC_WH_D")]
    WheelDown,
    #[strum(serialize = "KC_WH_U")]
    WheelUp,
    #[strum(serialize = "KC_WH_R")]
    WheelRight,
    #[strum(serialize = "KC_BTN1")]
    MouseButton1,
    #[strum(serialize = "KC_BTN2")]
    MouseButton2,
    #[strum(serialize = "KC_BTN3")]
    MouseButton3,

    #[strum(serialize = "KC_F1")]
    F1,
    #[strum(serialize = "KC_F2")]
    F2,
    #[strum(serialize = "KC_F3")]
    F3,
    #[strum(serialize = "KC_F4")]
    F4,
    #[strum(serialize = "KC_F5")]
    F5,
    #[strum(serialize = "KC_F6")]
    F6,
    #[strum(serialize = "KC_F7")]
    F7,
    #[strum(serialize = "KC_F8")]
    F8,
    #[strum(serialize = "KC_F9")]
    F9,
    #[strum(serialize = "KC_F10")]
    F10,
    #[strum(serialize = "KC_F11")]
    F11,
    #[strum(serialize = "KC_F12")]
    F12,
    #[strum(serialize = "KC_PSCR")]
    PrintScreen,
    #[strum(serialize = "KC_SCRL")]
    ScrollLock,
    #[strum(to_string = "KC_PAUS", serialize = "KC_PAUSE")]
    Pause,

    #[strum(serialize = "KC_PSLS")]
    KeypadSlash,
    #[strum(serialize = "KC_PAST")]
    KeypadAsterisk,
    #[strum(serialize = "KC_PMNS")]
    KeypadMinus,
    #[strum(serialize = "KC_PPLS")]
    KeypadPlus,
    #[strum(serialize = "KC_PEQL")]
    KeypadEqual,
    #[strum(serialize = "KC_PDOT")]
    KeypadDot,
}

impl Keycode {
    /// Canonical QMK name
    pub fn name(self) -> &'static str {
        self.into()
    }

    /// Look a keycode up by name. Case-insensitive, and the `KC_` prefix is
    /// optional.
    pub fn from_name(name: &str) -> Option<Keycode> {
        let upper = name.trim().to_ascii_uppercase();
        if let Ok(code) = upper.parse() {
            return Some(code);
        }
        format!("KC_{upper}").parse().ok()
    }

    /// The character this keycode types with no modifiers held (US layout).
    /// Shifted symbols report their shifted character.
    pub fn typed_char(self) -> Option<char> {
        use Keycode::*;
        let c = match self {
            A => 'a',
            B => 'b',
            C => 'c',
            D => 'd',
            E => 'e',
            F => 'f',
            G => 'g',
            H => 'h',
            I => 'i',
            J => 'j',
            K => 'k',
            L => 'l',
            M => 'm',
            N => 'n',
            O => 'o',
            P => 'p',
            Q => 'q',
            R => 'r',
            S => 's',
            T => 't',
            U => 'u',
            V => 'v',
            W => 'w',
            X => 'x',
            Y => 'y',
            Z => 'z',
            Num1 => '1',
            Num2 => '2',
            Num3 => '3',
            Num4 => '4',
            Num5 => '5',
            Num6 => '6',
            Num7 => '7',
            Num8 => '8',
            Num9 => '9',
            Num0 => '0',
            Quote => '\'',
            Comma => ',',
            Dot => '.',
            Slash => '/',
            Minus => '-',
            Equal => '=',
            Grave => '`',
            LeftBracket => '[',
            RightBracket => ']',
            Backslash => '\\',
            Semicolon => ';',
            Underscore => '_',
            LeftParen => '(',
            RightParen => ')',
            Plus => '+',
            Percent => '%',
            Ampersand => '&',
            Asterisk => '*',
            Circumflex => '^',
            LessThan => '<',
            GreaterThan => '>',
            Dollar => '$',
            DoubleQuote => '"',
            Tilde => '~',
            At => '@',
            Pipe => '|',
            LeftCurly => '{',
            RightCurly => '}',
            Hash => '#',
            Colon => ':',
            Exclaim => '!',
            Question => '?',
            Space => ' ',
            KeypadSlash => '/',
            KeypadAsterisk => '*',
            KeypadMinus => '-',
            KeypadPlus => '+',
            KeypadEqual => '=',
            KeypadDot => '.',
            _ => return None,
        };
        Some(c)
    }

    /// Short legend used when rendering the keymap grid
    pub fn legend(self) -> String {
        if let Some(c) = self.typed_char() {
            return match c {
                ' ' => "Spc".to_string(),
                c if c.is_ascii_lowercase() => c.to_ascii_uppercase().to_string(),
                c => c.to_string(),
            };
        }
        let name = self.name().trim_start_matches("KC_");
        let mut legend: String = name.chars().take(3).collect();
        if let Some(rest) = legend.get(1..) {
            legend = format!("{}{}", &legend[..1], rest.to_ascii_lowercase());
        }
        legend
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_canonical_names() {
        assert_eq!(Keycode::Comma.name(), "KC_COMM");
        assert_eq!(Keycode::Slash.to_string(), "KC_SLSH");
        assert_eq!(Keycode::Num0.name(), "KC_0");
        assert_eq!(Keycode::Right.name(), "KC_RGHT");
    }

    #[test]
    fn test_from_name_accepts_aliases_and_short_forms() {
        assert_eq!(Keycode::from_name("KC_SLASH"), Some(Keycode::Slash));
        assert_eq!(Keycode::from_name("kc_slsh"), Some(Keycode::Slash));
        assert_eq!(Keycode::from_name("comm"), Some(Keycode::Comma));
        assert_eq!(Keycode::from_name("KC_QUOTE"), Some(Keycode::Quote));
        assert_eq!(Keycode::from_name("KC_NOPE"), None);
    }

    #[test]
    fn test_names_round_trip() {
        for code in Keycode::iter() {
            assert_eq!(Keycode::from_name(code.name()), Some(code), "{code:?}");
        }
    }

    #[test]
    fn test_typed_chars() {
        assert_eq!(Keycode::Underscore.typed_char(), Some('_'));
        assert_eq!(Keycode::Slash.typed_char(), Some('/'));
        assert_eq!(Keycode::Escape.typed_char(), None);
    }

    #[test]
    fn test_legend() {
        assert_eq!(Keycode::A.legend(), "A");
        assert_eq!(Keycode::Space.legend(), "Spc");
        assert_eq!(Keycode::Escape.legend(), "Esc");
        assert_eq!(Keycode::Percent.legend(), "%");
    }
}
