// Keytap Static Keymap
// Seven layers of bindings for a split 3x5+3 board

use std::fmt;

use strum::IntoEnumIterator;

use crate::binding::Binding;
use crate::keycode::Keycode;
use crate::layer::Layer;
use crate::modifier::Mods;

/// Keys per half-row on the alpha block
pub const COLS: usize = 10;
/// Alpha rows, not counting the thumb row
pub const ALPHA_ROWS: usize = 3;
pub const THUMB_KEYS: usize = 6;
pub const KEY_COUNT: usize = COLS * ALPHA_ROWS + THUMB_KEYS;

/// Row 3 is the thumb cluster, columns 0..6 left to right
pub const THUMB_ROW: usize = ALPHA_ROWS;

/// A key position in layout order. Only valid positions can be built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    row: usize,
    col: usize,
}

impl Position {
    pub fn new(row: usize, col: usize) -> Option<Position> {
        let valid = match row {
            r if r < ALPHA_ROWS => col < COLS,
            THUMB_ROW => col < THUMB_KEYS,
            _ => false,
        };
        valid.then_some(Position { row, col })
    }

    pub fn from_index(index: usize) -> Option<Position> {
        if index >= KEY_COUNT {
            return None;
        }
        Some(Position {
            row: index / COLS,
            col: index % COLS,
        })
    }

    pub fn row(self) -> usize {
        self.row
    }

    pub fn col(self) -> usize {
        self.col
    }

    pub fn index(self) -> usize {
        self.row * COLS + self.col
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "r{}c{}", self.row, self.col)
    }
}

/// Bindings for every layer, in layout order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Keymap {
    layers: [[Binding; KEY_COUNT]; Layer::COUNT],
}

impl Keymap {
    fn new(layers: [[Binding; KEY_COUNT]; Layer::COUNT]) -> Self {
        Self { layers }
    }

    pub fn layer(&self, layer: Layer) -> &[Binding; KEY_COUNT] {
        &self.layers[layer.index()]
    }

    pub fn binding(&self, layer: Layer, position: Position) -> Option<Binding> {
        self.layers[layer.index()].get(position.index()).copied()
    }

    /// Every place `binding` appears
    pub fn find(&self, binding: &Binding) -> Vec<(Layer, Position)> {
        let mut found = Vec::new();
        for layer in Layer::iter() {
            for (index, candidate) in self.layer(layer).iter().enumerate() {
                if candidate == binding {
                    if let Some(position) = Position::from_index(index) {
                        found.push((layer, position));
                    }
                }
            }
        }
        found
    }

    /// Text grid of one layer: three alpha rows split in halves, then the
    /// thumb row centred underneath
    pub fn render(&self, layer: Layer) -> String {
        let keys = self.layer(layer);
        let cell = |binding: &Binding| format!("{:^5}", binding.legend());
        let mut out = format!("{}\n", layer);
        for row in 0..ALPHA_ROWS {
            let start = row * COLS;
            let left: Vec<String> = keys[start..start + 5].iter().map(cell).collect();
            let right: Vec<String> = keys[start + 5..start + COLS].iter().map(cell).collect();
            out.push_str(&format!("|{}|   |{}|\n", left.join("|"), right.join("|")));
        }
        let thumbs_start = ALPHA_ROWS * COLS;
        let left: Vec<String> = keys[thumbs_start..thumbs_start + 3]
            .iter()
            .map(cell)
            .collect();
        let right: Vec<String> = keys[thumbs_start + 3..KEY_COUNT]
            .iter()
            .map(cell)
            .collect();
        out.push_str(&format!(
            "{:18}|{}|   |{}|\n",
            "",
            left.join("|"),
            right.join("|")
        ));
        out
    }

    /// The ratiu5_3x5 Colemak keymap
    pub fn ratiu5_3x5() -> Self {
        Self::new([
            colemak(),
            media(),
            navigation(),
            mousys(),
            function(),
            symbols(),
            numpad(),
        ])
    }
}

impl Default for Keymap {
    fn default() -> Self {
        Self::ratiu5_3x5()
    }
}

const XXX: Binding = Binding::NoOp;
const VVV: Binding = Binding::Transparent;

const fn k(code: Keycode) -> Binding {
    Binding::Key(code)
}

const fn mt(hold: Mods, tap: Keycode) -> Binding {
    Binding::mod_tap(hold, tap)
}

const fn lt(layer: Layer, tap: Keycode) -> Binding {
    Binding::layer_tap(layer, tap)
}

const fn ch(mods: Mods, key: Keycode) -> Binding {
    Binding::chord(mods, key)
}

/// Home-row modifiers on the left half of every non-base layer
const LEFT_HOME_MODS: [Binding; 5] = [
    k(Keycode::LeftShift),
    k(Keycode::LeftCtrl),
    k(Keycode::LeftAlt),
    k(Keycode::LeftGui),
    XXX,
];

const NO_ROW: [Binding; 5] = [XXX; 5];
const TRANSPARENT_THUMBS: [Binding; THUMB_KEYS] = [VVV; THUMB_KEYS];

fn assemble(rows: [[Binding; COLS]; ALPHA_ROWS], thumbs: [Binding; THUMB_KEYS]) -> [Binding; KEY_COUNT] {
    let mut keys = [XXX; KEY_COUNT];
    for (row, bindings) in rows.iter().enumerate() {
        keys[row * COLS..(row + 1) * COLS].copy_from_slice(bindings);
    }
    keys[ALPHA_ROWS * COLS..].copy_from_slice(&thumbs);
    keys
}

fn halves(left: [Binding; 5], right: [Binding; 5]) -> [Binding; COLS] {
    let mut row = [XXX; COLS];
    row[..5].copy_from_slice(&left);
    row[5..].copy_from_slice(&right);
    row
}

fn colemak() -> [Binding; KEY_COUNT] {
    use Keycode::*;
    assemble(
        [
            halves([k(Q), k(W), k(F), k(P), k(B)], [k(J), k(L), k(U), k(Y), k(Quote)]),
            halves(
                [
                    mt(Mods::LSHIFT, A),
                    mt(Mods::LCTRL, R),
                    mt(Mods::LALT, S),
                    mt(Mods::LGUI, T),
                    k(G),
                ],
                [
                    k(M),
                    mt(Mods::RGUI, N),
                    mt(Mods::RALT, E),
                    mt(Mods::RCTRL, I),
                    mt(Mods::RSHIFT, O),
                ],
            ),
            halves([k(Z), k(X), k(C), k(D), k(V)], [k(K), k(H), k(Comma), k(Dot), k(Slash)]),
        ],
        [
            lt(Layer::Media, Escape),
            lt(Layer::Navigation, Backspace),
            lt(Layer::Mousys, Delete),
            lt(Layer::Function, Enter),
            lt(Layer::Symbols, Space),
            lt(Layer::Numpad, Tab),
        ],
    )
}

fn media() -> [Binding; KEY_COUNT] {
    use Keycode::*;
    assemble(
        [
            halves(NO_ROW, NO_ROW),
            halves(
                LEFT_HOME_MODS,
                [XXX, k(MediaPrev), k(VolumeDown), k(VolumeUp), k(MediaNext)],
            ),
            halves(NO_ROW, [XXX, XXX, k(BrightnessDown), k(BrightnessUp), XXX]),
        ],
        TRANSPARENT_THUMBS,
    )
}

fn navigation() -> [Binding; KEY_COUNT] {
    use Keycode::*;
    assemble(
        [
            halves(
                NO_ROW,
                [
                    ch(Mods::LSHIFT.union(Mods::LGUI), Z),
                    ch(Mods::LGUI, C),
                    ch(Mods::LGUI, V),
                    ch(Mods::LGUI, X),
                    ch(Mods::LGUI, Z),
                ],
            ),
            halves(LEFT_HOME_MODS, [k(CapsLock), k(Left), k(Down), k(Up), k(Right)]),
            halves(NO_ROW, [k(Insert), k(Home), k(PageDown), k(PageUp), k(End)]),
        ],
        TRANSPARENT_THUMBS,
    )
}

fn mousys() -> [Binding; KEY_COUNT] {
    use Keycode::*;
    assemble(
        [
            halves(
                NO_ROW,
                [
                    k(Power),
                    ch(Mods::LCTRL, Left),
                    ch(Mods::LGUI, Space),
                    k(MissionControl),
                    ch(Mods::LCTRL, Right),
                ],
            ),
            halves(
                LEFT_HOME_MODS,
                [XXX, k(MouseLeft), k(MouseDown), k(MouseUp), k(MouseRight)],
            ),
            halves(
                NO_ROW,
                [XXX, k(WheelLeft), k(WheelDown), k(WheelUp), k(WheelRight)],
            ),
        ],
        [
            VVV,
            VVV,
            VVV,
            k(MouseButton3),
            k(MouseButton1),
            k(MouseButton2),
        ],
    )
}

fn function() -> [Binding; KEY_COUNT] {
    use Keycode::*;
    assemble(
        [
            halves([k(F12), k(F7), k(F8), k(F9), k(PrintScreen)], NO_ROW),
            halves([k(F11), k(F4), k(F5), k(F6), k(ScrollLock)], NO_ROW),
            halves([k(F10), k(F1), k(F2), k(F3), k(Pause)], NO_ROW),
        ],
        TRANSPARENT_THUMBS,
    )
}

fn symbols() -> [Binding; KEY_COUNT] {
    use Keycode::*;
    assemble(
        [
            halves(
                [k(Grave), k(Ampersand), k(LeftBracket), k(RightBracket), k(Asterisk)],
                [k(Circumflex), k(LessThan), k(GreaterThan), k(Dollar), k(DoubleQuote)],
            ),
            halves(
                [
                    mt(Mods::LSHIFT, Slash),
                    mt(Mods::LCTRL, Underscore),
                    mt(Mods::LALT, LeftParen),
                    mt(Mods::LGUI, RightParen),
                    k(Backslash),
                ],
                [
                    k(Tilde),
                    mt(Mods::RGUI, Equal),
                    mt(Mods::RALT, Plus),
                    mt(Mods::RCTRL, Minus),
                    mt(Mods::RSHIFT, Percent),
                ],
            ),
            halves(
                [k(At), k(Pipe), k(LeftCurly), k(RightCurly), XXX],
                [XXX, k(Hash), k(Semicolon), k(Colon), k(Exclaim)],
            ),
        ],
        TRANSPARENT_THUMBS,
    )
}

fn numpad() -> [Binding; KEY_COUNT] {
    use Keycode::*;
    assemble(
        [
            halves(
                [k(KeypadSlash), k(Num7), k(Num8), k(Num9), k(KeypadAsterisk)],
                NO_ROW,
            ),
            halves(
                [k(F11), k(Num4), k(Num5), k(Num6), k(KeypadMinus)],
                [XXX, k(RightGui), k(RightAlt), k(RightCtrl), k(RightShift)],
            ),
            halves(
                [k(KeypadEqual), k(Num1), k(Num2), k(Num3), k(KeypadPlus)],
                NO_ROW,
            ),
        ],
        [k(KeypadDot), k(Comma), VVV, VVV, VVV, VVV],
    )
}
