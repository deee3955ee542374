// Keytap CLI
// Inspect remapper decisions, replay event scripts and render the keymap

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use serde::Deserialize;
use strum::IntoEnumIterator;

use keytap_core::{
    parse_binding, process_record, Config, Decision, Host, KeyEvent, Keymap, Layer,
    ModifierSnapshot, Mods, SimulatedHost, TapState,
};

/// Dual-role and punctuation remapper for the ratiu5 3x5 keymap
#[derive(Parser, Debug)]
#[command(name = "keytap")]
#[command(version)]
#[command(about = "Dual-role and punctuation key remapper", long_about = None)]
struct Args {
    /// TOML configuration file
    #[arg(short, long, value_name = "CONFIG", global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Decide what a single key event does
    Decide {
        /// Binding as written in the keymap, e.g. `LCTL_T(KC_UNDS)`
        binding: String,

        /// Real modifiers held, e.g. `ctrl,lshift`
        #[arg(long, value_name = "MODS")]
        mods: Option<String>,

        /// One-shot modifiers pending
        #[arg(long, value_name = "MODS")]
        oneshot: Option<String>,

        /// Tap count reported for the event
        #[arg(long, default_value_t = 1)]
        count: u8,

        /// Another key was pressed while this one was down
        #[arg(long)]
        interrupted: bool,

        /// Decide the release instead of the press
        #[arg(long)]
        release: bool,
    },

    /// Run a TOML event script through a simulated host
    Replay {
        /// Script with `[[event]]` entries
        file: PathBuf,
    },

    /// Render the keymap
    Layers {
        /// Only this layer (name or index)
        #[arg(long)]
        layer: Option<String>,
    },

    /// Validate config and print the resulting tables
    CheckConfig,
}

/// Replay script file
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ReplayScript {
    #[serde(default)]
    event: Vec<ReplayEvent>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ReplayEvent {
    binding: String,
    #[serde(default = "default_pressed")]
    pressed: bool,
    #[serde(default = "default_count")]
    count: u8,
    #[serde(default)]
    interrupted: bool,
    #[serde(default)]
    mods: Vec<String>,
    #[serde(default)]
    oneshot: Vec<String>,
}

fn default_pressed() -> bool {
    true
}

fn default_count() -> u8 {
    1
}

fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => Config::from_toml_path(path)
            .with_context(|| format!("failed to load config from {}", path.display())),
        None => Config::load_default().context("failed to load default config"),
    }
}

fn parse_mods<S: AsRef<str>>(lists: &[S]) -> Result<Mods> {
    lists.iter().try_fold(Mods::empty(), |acc, list| {
        let mods = Mods::parse_list(list.as_ref())
            .with_context(|| format!("invalid modifier list '{}'", list.as_ref()))?;
        Ok(acc | mods)
    })
}

fn decide(
    config: &Config,
    binding: &str,
    snapshot: ModifierSnapshot,
    tap: TapState,
    pressed: bool,
) -> Result<()> {
    let binding = parse_binding(binding).with_context(|| format!("invalid binding '{binding}'"))?;
    let event = KeyEvent::new(binding, pressed, tap);
    let decision = config.remapper().handle_event(&event, snapshot);

    println!("event:    {event}");
    println!("mods:     {snapshot}");
    println!("decision: {decision}");
    for step in decision.steps() {
        println!("  emit {step}");
    }
    if let Decision::Suppress { clear, .. } = &decision {
        if !clear.is_empty() {
            println!("  lifted {clear}");
        }
    }
    if decision.is_passthrough() && pressed {
        if let Some(hit) = config.overrides().first_match(&binding, &snapshot) {
            println!(
                "override: {} (lifting {})",
                hit.replacement, hit.suppressed_mods
            );
        }
    }
    println!("after:    {}", decision.apply_to(&snapshot));
    Ok(())
}

fn replay(config: &Config, file: &Path) -> Result<String> {
    let content = fs::read_to_string(file)
        .with_context(|| format!("failed to read script {}", file.display()))?;
    let script: ReplayScript = toml::from_str(&content)
        .with_context(|| format!("failed to parse script {}", file.display()))?;
    run_script(config, &script)
}

fn run_script(config: &Config, script: &ReplayScript) -> Result<String> {
    let mut host = SimulatedHost::new();
    let mut typed = String::new();

    for (index, entry) in script.event.iter().enumerate() {
        let binding = parse_binding(&entry.binding)
            .with_context(|| format!("event {}: invalid binding '{}'", index + 1, entry.binding))?;
        let event = KeyEvent::new(
            binding,
            entry.pressed,
            TapState::new(entry.count, entry.interrupted),
        );
        host.set_mods(parse_mods(entry.mods.as_slice())?);
        host.set_oneshot_mods(parse_mods(entry.oneshot.as_slice())?);
        host.clear_log();

        let snapshot = host.snapshot();
        if process_record(config.remapper(), &mut host, &event) {
            match config.overrides().first_match(&binding, &snapshot) {
                Some(hit) if entry.pressed => {
                    println!("{:>3}  {event} -> override {}", index + 1, hit.replacement)
                }
                _ => println!("{:>3}  {event} -> passthrough", index + 1),
            }
        } else {
            let steps: Vec<String> = host.emitted().iter().map(|s| s.to_string()).collect();
            println!("{:>3}  {event} -> [{}]", index + 1, steps.join(", "));
            typed.push_str(&host.typed());
        }
        if host.snapshot() != snapshot {
            return Err(anyhow!(
                "event {}: modifiers not restored ({} became {})",
                index + 1,
                snapshot,
                host.snapshot()
            ));
        }
    }
    Ok(typed)
}

fn layers(layer: Option<&str>) -> Result<()> {
    let keymap = Keymap::ratiu5_3x5();
    match layer {
        Some(name) => {
            let layer = Layer::from_name(name).ok_or_else(|| anyhow!("unknown layer '{name}'"))?;
            println!("{}", keymap.render(layer));
        }
        None => {
            for layer in Layer::iter() {
                println!("{}\n", keymap.render(layer));
            }
        }
    }
    Ok(())
}

fn check_config(config: &Config) {
    match config.source_path() {
        Some(path) => println!("Configuration {} is valid", path.display()),
        None => println!("No config file, using built-in tables"),
    }

    let remapper = config.remapper();
    let priority: Vec<&str> = remapper
        .escape_priority()
        .order()
        .iter()
        .map(|kind| kind.name())
        .collect();
    if priority.is_empty() {
        println!("escape priority: disabled");
    } else {
        println!("escape priority: {}", priority.join(" > "));
    }

    println!("dual-role keys ({}):", remapper.dual_roles().len());
    for entry in remapper.dual_roles().iter() {
        println!(
            "  {:<12} {:<18} tap {:?} hold {}",
            entry.key,
            entry.binding.to_string(),
            entry.tap,
            entry.hold()
        );
    }

    println!("punctuation keys ({}):", remapper.punctuation().len());
    for entry in remapper.punctuation().iter() {
        let outputs = entry.outputs;
        match outputs.extended {
            Some(extended) => println!(
                "  {:<8} {:?} shift {:?} all mods {:?}",
                entry.binding.to_string(), outputs.bare, outputs.shifted, extended
            ),
            None => println!(
                "  {:<8} {:?} shift {:?}",
                entry.binding.to_string(), outputs.bare, outputs.shifted
            ),
        }
    }

    println!("key overrides ({}):", config.overrides().len());
    for entry in config.overrides().iter() {
        println!("  {entry}");
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    // Rendering the keymap doesn't need a config
    if let Command::Layers { layer } = &args.command {
        return layers(layer.as_deref());
    }

    let config = load_config(args.config.as_deref())?;
    log::debug!(
        "loaded config from {}",
        config
            .source_path()
            .map_or_else(|| "built-in defaults".to_string(), |p| p.display().to_string())
    );

    match &args.command {
        Command::Decide {
            binding,
            mods,
            oneshot,
            count,
            interrupted,
            release,
        } => {
            let snapshot = ModifierSnapshot::new(
                parse_mods(mods.as_slice())?,
                parse_mods(oneshot.as_slice())?,
            );
            decide(
                &config,
                binding,
                snapshot,
                TapState::new(*count, *interrupted),
                !release,
            )
        }
        Command::Replay { file } => {
            let typed = replay(&config, file)?;
            println!("typed: {typed:?}");
            Ok(())
        }
        Command::CheckConfig => {
            check_config(&config);
            Ok(())
        }
        Command::Layers { .. } => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_decide() {
        let args = Args::parse_from([
            "keytap",
            "decide",
            "LCTL_T(KC_UNDS)",
            "--mods",
            "ctrl",
            "--interrupted",
        ]);

        assert!(!args.verbose);
        assert_eq!(args.config, None);
        match args.command {
            Command::Decide {
                binding,
                mods,
                oneshot,
                count,
                interrupted,
                release,
            } => {
                assert_eq!(binding, "LCTL_T(KC_UNDS)");
                assert_eq!(mods.as_deref(), Some("ctrl"));
                assert_eq!(oneshot, None);
                assert_eq!(count, 1);
                assert!(interrupted);
                assert!(!release);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_args_global_flags_after_subcommand() {
        let args = Args::parse_from([
            "keytap",
            "check-config",
            "--config",
            "/tmp/keytap.toml",
            "--verbose",
        ]);

        assert!(args.verbose);
        assert_eq!(args.config, Some(PathBuf::from("/tmp/keytap.toml")));
        assert!(matches!(args.command, Command::CheckConfig));
    }

    #[test]
    fn test_args_layers() {
        let args = Args::parse_from(["keytap", "layers", "--layer", "symbols"]);
        match args.command {
            Command::Layers { layer } => assert_eq!(layer.as_deref(), Some("symbols")),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_mods_merges_lists() {
        let mods = parse_mods(&["ctrl", "lshift,gui"]).unwrap();
        assert_eq!(mods, Mods::LCTRL | Mods::LSHIFT | Mods::LGUI);
        assert!(parse_mods(&["hyper"]).is_err());
    }

    #[test]
    fn test_run_script() {
        let script: ReplayScript = toml::from_str(
            r#"
[[event]]
binding = "LCTL_T(KC_UNDS)"

[[event]]
binding = "KC_COMM"
mods = ["lshift"]

[[event]]
binding = "KC_COMM"
pressed = false
mods = ["lshift"]

[[event]]
binding = "RALT_T(KC_PLUS)"
interrupted = true
"#,
        )
        .unwrap();

        let typed = run_script(&Config::default(), &script).unwrap();
        assert_eq!(typed, "_:");
    }

    #[test]
    fn test_script_rejects_unknown_fields() {
        let result = toml::from_str::<ReplayScript>(
            r#"
[[event]]
binding = "KC_A"
held_ms = 300
"#,
        );
        assert!(result.is_err());
    }
}
