//! Config command implementation.
//!
//! View and create configuration settings.
//! Config file is located at ~/.config/lev/config.toml.

use std::env;
use std::fs;
use std::path::PathBuf;

use directories::BaseDirs;
use logical_eval::{EvalOptions, DEFAULT_MAX_DEPTH};
use serde::{Deserialize, Serialize};

use super::{CommandContext, CommandError, Outcome, Result};

/// Environment variable that overrides the config file location.
pub const CONFIG_ENV: &str = "LEV_CONFIG";

/// Current config file version. Increment when making breaking changes to schema.
const CONFIG_VERSION: u32 = 1;

/// Largest accepted `eval.max_depth`. Parsing and evaluation recurse once per
/// level, so the cap keeps deep input from exhausting the stack.
pub const MAX_DEPTH_LIMIT: usize = 4096;

/// Default config file contents.
const DEFAULT_CONFIG: &str = r#"# lev - logical expression evaluator configuration

# Config schema version (do not modify)
version = 1

# Expression settings
[eval]
# max_depth = 256           # Deepest allowed nesting of parentheses and AND/OR (1-4096)

# Output preferences
[output]
# color = true              # Enable colors (respects NO_COLOR env)

# Logging (overridden by --log-level, LEV_LOG and --verbose)
[log]
# level = "warn"            # e.g. "debug" or "logical_eval=trace"
"#;

/// Configuration file structure.
#[derive(Debug, Serialize, Deserialize)]
pub struct Config {
    /// Config schema version.
    /// Defaults to current version when not present in file.
    #[serde(default = "default_version")]
    pub version: u32,

    /// Expression settings.
    #[serde(default)]
    pub eval: EvalConfig,

    /// Output settings.
    #[serde(default)]
    pub output: OutputConfig,

    /// Logging settings.
    #[serde(default)]
    pub log: LogConfig,
}

/// Returns the current config version (used by serde default).
fn default_version() -> u32 {
    CONFIG_VERSION
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            eval: EvalConfig::default(),
            output: OutputConfig::default(),
            log: LogConfig::default(),
        }
    }
}

impl Config {
    /// Parser options derived from the `[eval]` section.
    pub fn eval_options(&self) -> EvalOptions {
        let options = EvalOptions::default();
        match self.eval.max_depth {
            Some(depth) => options.with_max_depth(depth),
            None => options,
        }
    }

    fn validate(&self) -> Result<()> {
        if self.version > CONFIG_VERSION {
            return Err(CommandError::Config(format!(
                "config version {} is newer than supported version {}",
                self.version, CONFIG_VERSION
            )));
        }
        match self.eval.max_depth {
            Some(0) => {
                return Err(CommandError::Config(
                    "eval.max_depth must be at least 1".to_string(),
                ));
            }
            Some(depth) if depth > MAX_DEPTH_LIMIT => {
                return Err(CommandError::Config(format!(
                    "eval.max_depth must be at most {MAX_DEPTH_LIMIT}, got {depth}"
                )));
            }
            _ => {}
        }
        Ok(())
    }
}

/// Expression configuration.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct EvalConfig {
    /// Nesting limit for parentheses and AND/OR chains.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_depth: Option<usize>,
}

/// Output configuration.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Enable colors.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<bool>,
}

/// Logging configuration.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct LogConfig {
    /// `tracing` filter directive.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<String>,
}

/// Gets the config file path.
///
/// Uses XDG-style paths: ~/.config/lev/config.toml on all platforms.
pub fn get_config_path() -> Result<PathBuf> {
    if let Ok(path) = env::var(CONFIG_ENV) {
        return Ok(PathBuf::from(path));
    }

    if let Ok(xdg_config) = env::var("XDG_CONFIG_HOME") {
        return Ok(PathBuf::from(xdg_config).join("lev").join("config.toml"));
    }

    BaseDirs::new()
        .map(|dirs| dirs.home_dir().join(".config").join("lev").join("config.toml"))
        .ok_or_else(|| CommandError::Config("Could not determine config directory".to_string()))
}

/// Loads the configuration from disk. A missing file yields the defaults.
pub fn load_config() -> Result<Config> {
    let path = get_config_path()?;

    if !path.exists() {
        return Ok(Config::default());
    }

    let content = fs::read_to_string(&path)
        .map_err(|e| CommandError::Config(format!("Failed to read config: {}", e)))?;

    let config: Config = toml::from_str(&content)
        .map_err(|e| CommandError::Config(format!("Failed to parse config: {}", e)))?;

    config.validate()?;
    tracing::debug!(path = %path.display(), "loaded config");
    Ok(config)
}

/// Executes the config show command.
pub fn execute_show(ctx: &CommandContext) -> Result<Outcome> {
    let config = load_config()?;
    let path = get_config_path()?;

    if ctx.json_output {
        let output = serde_json::json!({
            "path": path.display().to_string(),
            "exists": path.exists(),
            "config": config,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else if !ctx.quiet {
        use owo_colors::OwoColorize;

        let header = "Configuration";
        if ctx.use_colors {
            println!("{}\n", header.green().bold());
        } else {
            println!("{}\n", header);
        }

        println!("File: {}", path.display());
        println!("Exists: {}\n", path.exists());

        let options = config.eval_options();
        println!("[eval]");
        println!(
            "  max_depth: {}{}",
            options.max_depth,
            default_marker(config.eval.max_depth.is_none())
        );

        println!("\n[output]");
        println!(
            "  color: {}{}",
            config.output.color.unwrap_or(true),
            default_marker(config.output.color.is_none())
        );

        println!("\n[log]");
        match config.log.level {
            Some(ref level) => println!("  level: {}", level),
            None => println!("  level: warn (default)"),
        }

        if !path.exists() {
            println!("\n(No config file exists. Run 'lev config init' to create one.)");
        }
    }

    Ok(Outcome::Success)
}

fn default_marker(is_default: bool) -> &'static str {
    if is_default {
        " (default)"
    } else {
        ""
    }
}

/// Executes the config path command.
pub fn execute_path(ctx: &CommandContext) -> Result<Outcome> {
    let path = get_config_path()?;

    if ctx.json_output {
        let output = serde_json::json!({
            "path": path.display().to_string(),
            "exists": path.exists(),
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!("{}", path.display());
    }

    Ok(Outcome::Success)
}

/// Executes the config init command.
///
/// Refuses to replace an existing file unless `force` is set.
pub fn execute_init(ctx: &CommandContext, force: bool) -> Result<Outcome> {
    let path = write_default_config(force)?;

    if ctx.json_output {
        let output = serde_json::json!({
            "status": "success",
            "path": path.display().to_string(),
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else if !ctx.quiet {
        println!("Created config at: {}", path.display());
    }

    Ok(Outcome::Success)
}

fn write_default_config(force: bool) -> Result<PathBuf> {
    let path = get_config_path()?;

    if path.exists() && !force {
        return Err(CommandError::Config(format!(
            "{} already exists (use --force to overwrite)",
            path.display()
        )));
    }

    // Ensure directory exists
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .map_err(|e| CommandError::Config(format!("Failed to create config directory: {}", e)))?;
    }

    fs::write(&path, DEFAULT_CONFIG)
        .map_err(|e| CommandError::Config(format!("Failed to write config: {}", e)))?;

    Ok(path)
}
