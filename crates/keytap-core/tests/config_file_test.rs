// Keytap Config File Tests
//
// Loads configuration from files on disk and checks that the built-in
// tables can be written out as TOML and read back unchanged.

use std::io::Write;

use keytap_core::{
    Binding, Config, ConfigError, CustomKey, DualRoleTable, EscapePriority, KeyOverrides, Keycode,
    ModifierSnapshot, Mods, PunctuationTable, RemapError,
};
use tempfile::NamedTempFile;

/// The built-in tables spelled out in full
const DEFAULTS_TOML: &str = r#"
[remapper]
escape_priority = ["ctrl", "alt", "gui"]

[[dual_role]]
key = "underscore"
binding = "LCTL_T(KC_UNDS)"
tap = "_"

[[dual_role]]
key = "left_paren"
binding = "LALT_T(KC_LPRN)"
tap = "("

[[dual_role]]
key = "right_paren"
binding = "LGUI_T(KC_RPRN)"
tap = ")"

[[dual_role]]
key = "plus"
binding = "RALT_T(KC_PLUS)"
tap = "+"

[[dual_role]]
key = "percent"
binding = "RSFT_T(KC_PERC)"
tap = "%"

[[punctuation]]
key = "KC_COMM"
bare = ","
shifted = ":"
extended = ";"

[[punctuation]]
key = "KC_DOT"
bare = "."
shifted = ">"
extended = ":"

[[punctuation]]
key = "KC_SLSH"
bare = "?"
shifted = "!"

[[override]]
trigger = "CS_COMA"
mods = ["shift"]
replacement = "KC_SCLN"

[[override]]
trigger = "CS_PERI"
mods = ["shift"]
replacement = "KC_COLN"

[[override]]
trigger = "CS_SLSH"
mods = ["shift"]
replacement = "KC_EXLM"
"#;

fn write_config(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn test_defaults_round_trip_through_file() {
    let file = write_config(DEFAULTS_TOML);
    let config = Config::from_toml_path(file.path()).unwrap();

    assert_eq!(config.source_path(), Some(file.path()));
    assert_eq!(config.remapper().dual_roles(), &DualRoleTable::default());
    assert_eq!(config.remapper().punctuation(), &PunctuationTable::default());
    assert_eq!(config.remapper().escape_priority(), &EscapePriority::default());
    assert_eq!(config.overrides(), &KeyOverrides::ratiu5_3x5());
}

#[test]
fn test_missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let result = Config::from_toml_path(dir.path().join("absent.toml"));
    assert!(matches!(result, Err(ConfigError::Io(_))));
}

#[test]
fn test_partial_file_keeps_other_defaults() {
    let file = write_config(
        r#"
[remapper]
escape_priority = []
"#,
    );
    let config = Config::from_toml_path(file.path()).unwrap();

    assert!(config.remapper().escape_priority().order().is_empty());
    assert_eq!(config.remapper().dual_roles(), &DualRoleTable::default());

    // with no escape kinds a Ctrl-held tap types the bare literal
    let event = keytap_core::KeyEvent::tap(Binding::mod_tap(Mods::LCTRL, Keycode::Underscore));
    let decision = config
        .remapper()
        .handle_event(&event, ModifierSnapshot::real(Mods::LCTRL));
    assert_eq!(decision.text(), "_");
    assert_eq!(decision.steps().len(), 1);
}

#[test]
fn test_table_validation_from_file() {
    let file = write_config(
        r#"
[[dual_role]]
key = "underscore"
binding = "LCTL_T(KC_COMM)"
tap = "_"

[[punctuation]]
key = "KC_COMM"
bare = ","
shifted = ":"
"#,
    );
    // the dual-role binding is a mod-tap, so it doesn't collide with KC_COMM
    assert!(Config::from_toml_path(file.path()).is_ok());

    let file = write_config(
        r#"
[remapper]
escape_priority = ["ctrl", "ctrl"]
"#,
    );
    assert!(matches!(
        Config::from_toml_path(file.path()),
        Err(ConfigError::Remap(RemapError::DuplicatePriority(_)))
    ));
}

#[test]
fn test_override_for_custom_key() {
    let file = write_config(
        r#"
[[override]]
trigger = "CS_PERI"
mods = ["lalt", "rgui"]
replacement = "KC_DOT"
"#,
    );
    let config = Config::from_toml_path(file.path()).unwrap();
    let trigger = Binding::Custom(CustomKey::PeriodColon);

    let hit = config
        .overrides()
        .first_match(&trigger, &ModifierSnapshot::real(Mods::RGUI | Mods::LSHIFT))
        .unwrap();
    assert_eq!(hit.replacement, Keycode::Dot);
    assert_eq!(hit.suppressed_mods, Mods::RGUI);

    assert!(config
        .overrides()
        .first_match(&trigger, &ModifierSnapshot::real(Mods::LSHIFT))
        .is_none());
}
