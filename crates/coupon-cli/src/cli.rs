//! CLI argument definitions.

use clap::{Parser, Subcommand, ValueEnum};
use coupon_math::solvers::SolverConfig;
use serde::{Deserialize, Serialize};

use crate::commands::{
    BondArgs, BootstrapArgs, ConfigArgs, CurveArgs, DemoArgs, LatticeArgs, SignArgs, SwapArgs,
    SweepArgs, YtmArgs, ZeroArgs,
};

/// Coupon - bond pricing and yield-to-maturity from the command line
#[derive(Parser)]
#[command(name = "coupon")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format (defaults to the configured `default_format`)
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<OutputFormat>,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Log solver progress to stderr (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Price a zero-coupon bond at a discrete or continuous yield
    Zero(ZeroArgs),

    /// Price a zero-coupon bond under a humped, time-varying yield
    Curve(CurveArgs),

    /// Price a coupon bond, with per-period present values and duration
    Bond(BondArgs),

    /// Solve for yield to maturity from cash flows and a price
    Ytm(YtmArgs),

    /// Run the yield solver from a range of initial guesses
    Sweep(SweepArgs),

    /// Find where the present value of parameterised cash flows is positive
    Sign(SignArgs),

    /// Bootstrap spot and forward rates from coupon bond prices
    Bootstrap(BootstrapArgs),

    /// Value a fixed-for-floating swap on a bootstrapped curve
    Swap(SwapArgs),

    /// Price a zero-coupon bond on a binomial short-rate lattice
    Lattice(LatticeArgs),

    /// Walk through every calculation with worked examples
    Demo(DemoArgs),

    /// Manage configuration
    Config(ConfigArgs),
}

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable table format
    #[default]
    Table,
    /// JSON format
    Json,
    /// CSV format
    Csv,
    /// Minimal output (just the value)
    Minimal,
}

/// Settings resolved from the command line and the configuration file.
#[derive(Debug, Clone, Copy)]
pub struct Context {
    /// Output format.
    pub format: OutputFormat,
    /// Suppress headers and notes.
    pub quiet: bool,
    /// Decimal places for amounts and rates.
    pub decimal_places: u32,
    /// Solver defaults for commands that do not override them.
    pub solver: SolverConfig,
}

impl Context {
    /// Solver settings with any per-command overrides applied.
    pub fn solver(&self, tolerance: Option<f64>, max_iterations: Option<u32>) -> SolverConfig {
        let mut config = self.solver;
        if let Some(tolerance) = tolerance {
            config = config.with_tolerance(tolerance);
        }
        if let Some(max_iterations) = max_iterations {
            config = config.with_max_iterations(max_iterations);
        }
        config
    }

    /// Whether section headers should be printed.
    pub fn show_headers(&self) -> bool {
        !self.quiet && self.format == OutputFormat::Table
    }
}
