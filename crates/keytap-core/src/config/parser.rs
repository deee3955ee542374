// Keytap Config Parser - TOML with Serde
// Builds remapper tables and key overrides from a TOML file

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::binding::{parse_binding, Binding};
use crate::keycode::Keycode;
use crate::keymap::Keymap;
use crate::modifier::{ModKind, Mods};
use crate::overrides::{KeyOverride, KeyOverrides};
use crate::remap::{
    DualRoleBinding, DualRoleKey, DualRoleTable, EscapePriority, PunctBinding, PunctKey,
    PunctOutputs, PunctuationTable, RemapError, Remapper,
};

/// Configuration parser errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(String),

    #[error("Invalid binding '{binding}': {reason}")]
    InvalidBinding { binding: String, reason: String },

    #[error("Invalid character '{0}': expected exactly one character")]
    InvalidChar(String),

    #[error("Invalid modifier: {0}")]
    InvalidModifier(String),

    #[error("Unknown dual-role key: {0}")]
    UnknownDualRole(String),

    #[error("Unsupported punctuation key: {0} (expected KC_COMM, KC_DOT or KC_SLSH)")]
    UnsupportedPunctuation(String),

    #[error("Invalid keycode: {0}")]
    InvalidKeycode(String),

    #[error(transparent)]
    Remap(#[from] RemapError),
}

/// Root TOML table
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct ConfigToml {
    #[serde(default)]
    pub remapper: Option<RemapperToml>,

    /// Replaces the default dual-role table when present
    #[serde(default)]
    pub dual_role: Option<Vec<DualRoleToml>>,

    /// Replaces the default punctuation table when present
    #[serde(default)]
    pub punctuation: Option<Vec<PunctuationToml>>,

    /// Replaces the default key overrides when present
    #[serde(default, rename = "override")]
    pub overrides: Option<Vec<OverrideToml>>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RemapperToml {
    /// Modifier kinds checked in order for the escape prefix
    pub escape_priority: Option<Vec<String>>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DualRoleToml {
    /// Which dual-role key this is; inferred from `tap` when omitted
    pub key: Option<String>,
    /// Mod-tap binding, e.g. `LCTL_T(KC_UNDS)`
    pub binding: String,
    /// Character typed on a clean tap
    pub tap: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PunctuationToml {
    /// `KC_COMM`, `KC_DOT` or `KC_SLSH`
    pub key: String,
    pub bare: String,
    pub shifted: String,
    pub extended: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OverrideToml {
    pub trigger: String,
    pub mods: Vec<String>,
    pub replacement: String,
}

/// Loaded configuration
#[derive(Debug, Clone)]
pub struct Config {
    remapper: Remapper,
    overrides: KeyOverrides,
    source_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            remapper: Remapper::default(),
            overrides: KeyOverrides::ratiu5_3x5(),
            source_path: None,
        }
    }
}

impl Config {
    /// Parse a TOML configuration file
    pub fn from_toml_path<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(&path)?;
        let mut config = Self::from_toml(&content)?;
        config.source_path = Some(path.as_ref().to_path_buf());
        Ok(config)
    }

    /// Parse configuration from TOML string
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let toml_config: ConfigToml =
            toml::from_str(content).map_err(|e| ConfigError::TomlParse(e.to_string()))?;
        toml_config.to_config()
    }

    /// `~/.config/keytap/config.toml` on Linux
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("keytap").join("config.toml"))
    }

    /// Load from the default location, or built-in defaults if there is no
    /// file there
    pub fn load_default() -> Result<Self, ConfigError> {
        if let Some(path) = Self::default_path() {
            if path.exists() {
                return Self::from_toml_path(path);
            }
        }
        log::debug!("no config file found, using built-in tables");
        Ok(Self::default())
    }

    pub fn remapper(&self) -> &Remapper {
        &self.remapper
    }

    pub fn overrides(&self) -> &KeyOverrides {
        &self.overrides
    }

    pub fn source_path(&self) -> Option<&Path> {
        self.source_path.as_deref()
    }
}

impl ConfigToml {
    /// Convert parsed TOML to internal Config structure
    fn to_config(&self) -> Result<Config, ConfigError> {
        let escape = match self
            .remapper
            .as_ref()
            .and_then(|r| r.escape_priority.as_ref())
        {
            Some(names) if names.is_empty() => EscapePriority::disabled(),
            Some(names) => {
                let kinds = names
                    .iter()
                    .map(|name| {
                        name.parse::<ModKind>()
                            .map_err(|_| ConfigError::InvalidModifier(name.clone()))
                    })
                    .collect::<Result<Vec<_>, _>>()?;
                EscapePriority::new(kinds)?
            }
            None => EscapePriority::default(),
        };

        let dual_roles = match &self.dual_role {
            Some(entries) => {
                let parsed = entries
                    .iter()
                    .map(DualRoleToml::to_binding)
                    .collect::<Result<Vec<_>, _>>()?;
                DualRoleTable::new(parsed)?
            }
            None => DualRoleTable::default(),
        };

        let punctuation = match &self.punctuation {
            Some(entries) => {
                let parsed = entries
                    .iter()
                    .map(PunctuationToml::to_binding)
                    .collect::<Result<Vec<_>, _>>()?;
                PunctuationTable::new(parsed)?
            }
            None => PunctuationTable::default(),
        };

        let overrides = match &self.overrides {
            Some(entries) => KeyOverrides::new(
                entries
                    .iter()
                    .map(OverrideToml::to_override)
                    .collect::<Result<Vec<_>, _>>()?,
            ),
            None => KeyOverrides::ratiu5_3x5(),
        };

        warn_unbound(&dual_roles);

        let remapper = Remapper::new(dual_roles, punctuation, escape)?;
        log::debug!(
            "config: {} dual-role keys, {} punctuation keys, {} overrides",
            remapper.dual_roles().len(),
            remapper.punctuation().len(),
            overrides.len()
        );

        Ok(Config {
            remapper,
            overrides,
            source_path: None,
        })
    }
}

impl DualRoleToml {
    fn to_binding(&self) -> Result<DualRoleBinding, ConfigError> {
        let binding = parse_binding_field(&self.binding)?;
        let tap = parse_char(&self.tap)?;
        let key = match &self.key {
            Some(name) => name
                .parse::<DualRoleKey>()
                .map_err(|_| ConfigError::UnknownDualRole(name.clone()))?,
            None => DualRoleKey::ALL
                .into_iter()
                .find(|key| key.default_tap() == tap)
                .ok_or_else(|| ConfigError::UnknownDualRole(self.tap.clone()))?,
        };
        Ok(DualRoleBinding::new(key, binding, tap)?)
    }
}

impl PunctuationToml {
    fn to_binding(&self) -> Result<PunctBinding, ConfigError> {
        let key = Keycode::from_name(&self.key)
            .and_then(PunctKey::from_keycode)
            .ok_or_else(|| ConfigError::UnsupportedPunctuation(self.key.clone()))?;
        let extended = self.extended.as_deref().map(parse_char).transpose()?;
        Ok(PunctBinding {
            key,
            binding: Binding::Key(key.keycode()),
            outputs: PunctOutputs::new(parse_char(&self.bare)?, parse_char(&self.shifted)?, extended),
        })
    }
}

impl OverrideToml {
    fn to_override(&self) -> Result<KeyOverride, ConfigError> {
        let trigger = parse_binding_field(&self.trigger)?;
        let mut mods = Mods::empty();
        for name in &self.mods {
            mods |= Mods::parse_list(name).map_err(|_| ConfigError::InvalidModifier(name.clone()))?;
        }
        if mods.is_empty() {
            return Err(ConfigError::InvalidModifier(
                "override needs at least one modifier".to_string(),
            ));
        }
        let replacement = Keycode::from_name(&self.replacement)
            .ok_or_else(|| ConfigError::InvalidKeycode(self.replacement.clone()))?;
        Ok(KeyOverride::new(trigger, mods, replacement))
    }
}

fn parse_binding_field(text: &str) -> Result<Binding, ConfigError> {
    parse_binding(text).map_err(|e| ConfigError::InvalidBinding {
        binding: text.to_string(),
        reason: e.to_string(),
    })
}

fn parse_char(text: &str) -> Result<char, ConfigError> {
    let mut chars = text.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(c),
        _ => Err(ConfigError::InvalidChar(text.to_string())),
    }
}

/// Dual-role bindings that never appear in the keymap can't fire
fn warn_unbound(dual_roles: &DualRoleTable) {
    let keymap = Keymap::ratiu5_3x5();
    for entry in dual_roles.iter() {
        if keymap.find(&entry.binding).is_empty() {
            log::warn!(
                "dual-role key {} is bound to {}, which is not on any layer",
                entry.key,
                entry.binding
            );
        }
    }
}
