// Keytap Config
// TOML configuration for the remapper tables and key overrides

pub mod parser;

pub use parser::{Config, ConfigError, ConfigToml};
