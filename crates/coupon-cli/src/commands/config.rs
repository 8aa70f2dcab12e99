//! Config command implementation.
//!
//! Manages persisted CLI settings. The file lives at
//! `<config dir>/coupon/config.json` unless `COUPON_CONFIG` names another path.

use anyhow::Result;
use clap::{Args, Subcommand, ValueEnum};
use coupon_math::solvers::{SolverConfig, DEFAULT_MAX_ITERATIONS, DEFAULT_TOLERANCE};
use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::cli::{Context, OutputFormat};
use crate::error::{CliError, CliResult};
use crate::output::{print_header, print_info, print_success, print_warning, KeyValue};

/// Environment variable overriding the config file location.
pub const CONFIG_ENV: &str = "COUPON_CONFIG";

/// Arguments for the config command.
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

/// Config subcommands.
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Show current configuration
    Show,

    /// Get a configuration value
    Get(GetArgs),

    /// Set a configuration value
    Set(SetArgs),

    /// List available configuration keys
    List,

    /// Reset configuration to defaults
    Reset(ResetArgs),

    /// Show configuration file location
    Path,
}

/// Arguments for get subcommand.
#[derive(Args, Debug)]
pub struct GetArgs {
    /// Configuration key
    pub key: String,
}

/// Arguments for set subcommand.
#[derive(Args, Debug)]
pub struct SetArgs {
    /// Configuration key
    pub key: String,

    /// Configuration value
    #[arg(allow_hyphen_values = true)]
    pub value: String,
}

/// Arguments for reset subcommand.
#[derive(Args, Debug)]
pub struct ResetArgs {
    /// Reset all settings (not just one)
    #[arg(long)]
    pub all: bool,

    /// Specific key to reset (optional)
    pub key: Option<String>,
}

/// CLI configuration keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigKey {
    /// Default output format
    DefaultFormat,
    /// Newton tolerance
    Tolerance,
    /// Newton iteration cap
    MaxIterations,
    /// Decimal places for amounts and rates
    DecimalPlaces,
    /// Whether to use colors
    UseColors,
}

impl ConfigKey {
    fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "default_format" | "format" => Some(Self::DefaultFormat),
            "tolerance" | "epsilon" => Some(Self::Tolerance),
            "max_iterations" | "iterations" => Some(Self::MaxIterations),
            "decimal_places" | "precision" => Some(Self::DecimalPlaces),
            "use_colors" | "colors" => Some(Self::UseColors),
            _ => None,
        }
    }

    fn as_str(self) -> &'static str {
        match self {
            Self::DefaultFormat => "default_format",
            Self::Tolerance => "tolerance",
            Self::MaxIterations => "max_iterations",
            Self::DecimalPlaces => "decimal_places",
            Self::UseColors => "use_colors",
        }
    }

    fn description(self) -> &'static str {
        match self {
            Self::DefaultFormat => "Default output format (table, json, csv, minimal)",
            Self::Tolerance => "Newton stopping tolerance on step and residual (positive)",
            Self::MaxIterations => "Newton iteration cap (1-10000)",
            Self::DecimalPlaces => "Number of decimal places for output (0-12)",
            Self::UseColors => "Enable colored output (true, false)",
        }
    }

    fn default_value(self) -> String {
        match self {
            Self::DefaultFormat => "table".to_string(),
            Self::Tolerance => DEFAULT_TOLERANCE.to_string(),
            Self::MaxIterations => DEFAULT_MAX_ITERATIONS.to_string(),
            Self::DecimalPlaces => "6".to_string(),
            Self::UseColors => "true".to_string(),
        }
    }

    fn all() -> &'static [Self] {
        &[
            Self::DefaultFormat,
            Self::Tolerance,
            Self::MaxIterations,
            Self::DecimalPlaces,
            Self::UseColors,
        ]
    }

    fn lookup(s: &str) -> CliResult<Self> {
        Self::parse(s).ok_or_else(|| CliError::Config(format!("Unknown configuration key: {s}")))
    }
}

/// Persisted key/value settings.
#[derive(Debug, Default, serde::Serialize, serde::Deserialize)]
pub struct Config {
    #[serde(flatten)]
    values: BTreeMap<String, String>,
}

impl Config {
    /// Loads the config file, or an empty config if it does not exist.
    pub fn load() -> CliResult<Self> {
        let path = config_path()?;
        if path.exists() {
            let content = std::fs::read_to_string(&path)?;
            Ok(serde_json::from_str(&content)?)
        } else {
            Ok(Self::default())
        }
    }

    fn save(&self) -> CliResult<()> {
        let path = config_path()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(&path, content)?;
        Ok(())
    }

    fn value(&self, key: ConfigKey) -> String {
        self.values
            .get(key.as_str())
            .cloned()
            .unwrap_or_else(|| key.default_value())
    }

    fn set(&mut self, key: ConfigKey, value: String) {
        self.values.insert(key.as_str().to_string(), value);
    }

    fn remove(&mut self, key: ConfigKey) {
        self.values.remove(key.as_str());
    }

    fn clear(&mut self) {
        self.values.clear();
    }

    /// Configured output format.
    pub fn default_format(&self) -> CliResult<OutputFormat> {
        OutputFormat::from_str(&self.value(ConfigKey::DefaultFormat), true)
            .map_err(|e| CliError::Config(format!("default_format: {e}")))
    }

    /// Configured solver tolerance and iteration cap.
    pub fn solver(&self) -> CliResult<SolverConfig> {
        let tolerance = parse_tolerance(&self.value(ConfigKey::Tolerance))?;
        let max_iterations = parse_max_iterations(&self.value(ConfigKey::MaxIterations))?;
        Ok(SolverConfig::new(tolerance, max_iterations))
    }

    /// Configured decimal places.
    pub fn decimal_places(&self) -> CliResult<u32> {
        parse_decimal_places(&self.value(ConfigKey::DecimalPlaces))
    }

    /// Whether colored output is enabled.
    pub fn use_colors(&self) -> CliResult<bool> {
        parse_bool(&self.value(ConfigKey::UseColors))
    }
}

/// Get the config file path.
pub fn config_path() -> CliResult<PathBuf> {
    if let Some(path) = std::env::var_os(CONFIG_ENV) {
        return Ok(PathBuf::from(path));
    }
    let home = dirs::config_dir()
        .or_else(dirs::home_dir)
        .ok_or_else(|| CliError::Config("Could not determine config directory".to_string()))?;
    Ok(home.join("coupon").join("config.json"))
}

/// Execute the config command.
pub fn execute(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => execute_show(ctx.format),
        ConfigCommand::Get(get_args) => execute_get(get_args, ctx.format),
        ConfigCommand::Set(set_args) => execute_set(set_args),
        ConfigCommand::List => execute_list(ctx.format),
        ConfigCommand::Reset(reset_args) => execute_reset(reset_args),
        ConfigCommand::Path => execute_path(),
    }
}

/// Show current configuration.
fn execute_show(format: OutputFormat) -> Result<()> {
    let config = Config::load()?;

    match format {
        OutputFormat::Table | OutputFormat::Csv => {
            let results: Vec<_> = ConfigKey::all()
                .iter()
                .map(|&key| KeyValue::new(key.as_str(), config.value(key)))
                .collect();
            if format == OutputFormat::Table {
                print_header("Current Configuration");
            }
            crate::output::print_output(&results, format)?;
        }
        OutputFormat::Json => {
            let output: BTreeMap<_, _> = ConfigKey::all()
                .iter()
                .map(|&key| (key.as_str(), config.value(key)))
                .collect();
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Minimal => {
            for &key in ConfigKey::all() {
                println!("{}={}", key.as_str(), config.value(key));
            }
        }
    }

    Ok(())
}

/// Get a configuration value.
fn execute_get(args: GetArgs, format: OutputFormat) -> Result<()> {
    let config = Config::load()?;
    let key = ConfigKey::lookup(&args.key)?;
    let value = config.value(key);

    match format {
        OutputFormat::Table | OutputFormat::Csv => {
            println!("{}: {}", key.as_str(), value);
        }
        OutputFormat::Json => {
            let output = serde_json::json!({
                "key": key.as_str(),
                "value": value
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Minimal => {
            println!("{}", value);
        }
    }

    Ok(())
}

/// Set a configuration value.
fn execute_set(args: SetArgs) -> Result<()> {
    let key = ConfigKey::lookup(&args.key)?;
    validate_config_value(key, &args.value)?;

    let mut config = Config::load()?;
    config.set(key, args.value.clone());
    config.save()?;
    tracing::debug!("wrote {} to {}", key.as_str(), config_path()?.display());

    print_success(&format!("Set {} = {}", key.as_str(), args.value));
    Ok(())
}

/// List available configuration keys.
fn execute_list(format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Table => {
            let results: Vec<_> = ConfigKey::all()
                .iter()
                .map(|&key| {
                    KeyValue::new(
                        key.as_str(),
                        format!("{} (default: {})", key.description(), key.default_value()),
                    )
                })
                .collect();
            print_header("Available Configuration Keys");
            crate::output::print_output(&results, format)?;
        }
        OutputFormat::Json => {
            let output: Vec<_> = ConfigKey::all()
                .iter()
                .map(|&key| {
                    serde_json::json!({
                        "key": key.as_str(),
                        "description": key.description(),
                        "default": key.default_value()
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Csv => {
            let mut wtr = csv::Writer::from_writer(std::io::stdout());
            wtr.write_record(["key", "description", "default"])?;
            for &key in ConfigKey::all() {
                wtr.write_record([key.as_str(), key.description(), key.default_value().as_str()])?;
            }
            wtr.flush()?;
        }
        OutputFormat::Minimal => {
            for key in ConfigKey::all() {
                println!("{}", key.as_str());
            }
        }
    }

    Ok(())
}

/// Reset configuration.
fn execute_reset(args: ResetArgs) -> Result<()> {
    let mut config = Config::load()?;

    if args.all {
        config.clear();
        config.save()?;
        print_success("Reset all configuration to defaults");
    } else if let Some(key_str) = args.key {
        let key = ConfigKey::lookup(&key_str)?;
        config.remove(key);
        config.save()?;
        print_success(&format!(
            "Reset {} to default ({})",
            key.as_str(),
            key.default_value()
        ));
    } else {
        print_warning("Use --all to reset all settings, or specify a key to reset");
    }

    Ok(())
}

/// Show configuration file path.
fn execute_path() -> Result<()> {
    let path = config_path()?;
    print_info(&format!("Config file: {}", path.display()));
    if path.exists() {
        print_info("Status: exists");
    } else {
        print_info("Status: not created yet (using defaults)");
    }
    Ok(())
}

fn parse_tolerance(value: &str) -> CliResult<f64> {
    match value.parse::<f64>() {
        Ok(tolerance) if tolerance.is_finite() && tolerance > 0.0 => Ok(tolerance),
        _ => Err(CliError::Config(format!(
            "Invalid tolerance: {value}. Must be a positive number."
        ))),
    }
}

fn parse_max_iterations(value: &str) -> CliResult<u32> {
    match value.parse::<u32>() {
        Ok(n) if (1..=10_000).contains(&n) => Ok(n),
        _ => Err(CliError::Config(format!(
            "Invalid max_iterations: {value}. Must be between 1 and 10000."
        ))),
    }
}

fn parse_decimal_places(value: &str) -> CliResult<u32> {
    match value.parse::<u32>() {
        Ok(n) if n <= 12 => Ok(n),
        _ => Err(CliError::Config(format!(
            "Invalid decimal_places: {value}. Must be between 0 and 12."
        ))),
    }
}

fn parse_bool(value: &str) -> CliResult<bool> {
    match value.to_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" => Ok(false),
        _ => Err(CliError::Config(format!(
            "Invalid boolean: {value}. Use true or false."
        ))),
    }
}

/// Validate a configuration value.
fn validate_config_value(key: ConfigKey, value: &str) -> CliResult<()> {
    match key {
        ConfigKey::DefaultFormat => {
            OutputFormat::from_str(value, true).map_err(|_| {
                CliError::Config(format!(
                    "Invalid format: {value}. Use table, json, csv, or minimal."
                ))
            })?;
        }
        ConfigKey::Tolerance => {
            parse_tolerance(value)?;
        }
        ConfigKey::MaxIterations => {
            parse_max_iterations(value)?;
        }
        ConfigKey::DecimalPlaces => {
            parse_decimal_places(value)?;
        }
        ConfigKey::UseColors => {
            parse_bool(value)?;
        }
    }
    Ok(())
}
