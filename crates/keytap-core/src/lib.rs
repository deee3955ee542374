// Keytap Core Library
// Dual-role and punctuation remapping for a 36-key split keymap

pub mod binding;
pub mod config;
pub mod event;
pub mod host;
pub mod keycode;
pub mod keymap;
pub mod layer;
pub mod modifier;
pub mod output;
pub mod overrides;
pub mod remap;

pub use binding::{parse_binding, Binding, BindingParseError, CustomKey};
pub use config::{Config, ConfigError};
pub use event::{KeyEvent, TapState};
pub use host::{process_record, Host, HostAction, ModifierGuard, SimulatedHost};
pub use keycode::Keycode;
pub use keymap::{Keymap, Position};
pub use layer::Layer;
pub use modifier::{ModKind, ModParseError, ModifierSnapshot, Mods};
pub use output::{Decision, OutputStep, OutputSteps};
pub use overrides::{KeyOverride, KeyOverrides, OverrideHit};
pub use remap::{
    DualRoleBinding, DualRoleKey, DualRoleTable, EscapePriority, PunctBinding, PunctKey,
    PunctOutputs, PunctuationTable, RemapError, RemapKey, Remapper,
};
