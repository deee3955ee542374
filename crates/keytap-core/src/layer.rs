// Keytap Layers
// Names and indices of the seven keymap layers

use strum_macros::{Display, EnumIter, EnumString, IntoStaticStr};

/// A keymap layer.
///
/// Layers are declared here only so bindings and tables can name them.
/// Which layers are active is the host's business.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display, EnumString, EnumIter,
    IntoStaticStr,
)]
#[strum(ascii_case_insensitive)]
pub enum Layer {
    #[strum(to_string = "_COLEMAK", serialize = "colemak")]
    Colemak = 0,
    #[strum(to_string = "_MEDIA", serialize = "media")]
    Media = 1,
    #[strum(to_string = "_NAVIGATION", serialize = "navigation", serialize = "nav")]
    Navigation = 2,
    #[strum(to_string = "_MOUSYS", serialize = "mousys", serialize = "mouse")]
    Mousys = 3,
    #[strum(to_string = "_FUNCTION", serialize = "function", serialize = "fn")]
    Function = 4,
    #[strum(to_string = "_SYMBOLS", serialize = "symbols", serialize = "sym")]
    Symbols = 5,
    #[strum(to_string = "_NUMPAD", serialize = "numpad", serialize = "num")]
    Numpad = 6,
}

impl Layer {
    pub const COUNT: usize = 7;

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<Layer> {
        match index {
            0 => Some(Layer::Colemak),
            1 => Some(Layer::Media),
            2 => Some(Layer::Navigation),
            3 => Some(Layer::Mousys),
            4 => Some(Layer::Function),
            5 => Some(Layer::Symbols),
            6 => Some(Layer::Numpad),
            _ => None,
        }
    }

    /// Parse a layer given either by QMK name (`_SYMBOLS`), short name
    /// (`sym`) or index (`5`).
    pub fn from_name(name: &str) -> Option<Layer> {
        let name = name.trim();
        if let Ok(index) = name.parse::<usize>() {
            return Layer::from_index(index);
        }
        name.parse().ok()
    }

    pub fn name(self) -> &'static str {
        self.into()
    }
}
