//! Coupon CLI - Command-line interface for bond valuation.
//!
//! # Usage
//!
//! ```bash
//! # Price a zero-coupon bond
//! coupon zero --face 10000 --maturity 20 --yield 0.08
//!
//! # Price a coupon bond with per-period present values
//! coupon bond --face 100000 --maturity 3 --coupon 0.08 --yield 0.09 --periods
//!
//! # Solve for yield to maturity and show every Newton update
//! coupon ytm --flows 2.3,2.9,3.0,3.2,4.0,3.8,4.2,4.8,5.5,105 --price 100 --continuous --trace
//!
//! # Value a swap on a curve bootstrapped from three bond prices
//! coupon swap --prices 101,101.5,101.2 --coupon 0.05 --fixed-rate 0.045 --periods
//!
//! # Walk through every calculation
//! coupon demo
//! ```

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;
mod error;
mod output;

use cli::{Cli, Commands, Context, OutputFormat};
use commands::config::Config;
use coupon_math::solvers::SolverConfig;
use error::CliResult;
use output::{print_error, print_warning};

/// Installs the log subscriber; `RUST_LOG` wins over `--verbose`.
fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(verbose)
        .init();
}

/// Falls back to `default` when a configured value cannot be used.
fn configured<T>(value: CliResult<T>, default: T) -> T {
    value.unwrap_or_else(|err| {
        print_warning(&format!("{err}; using the default"));
        default
    })
}

/// Resolves command-line flags against the configuration file.
fn context(cli: &Cli) -> Context {
    let config = configured(Config::load(), Config::default());

    if !configured(config.use_colors(), true) {
        colored::control::set_override(false);
    }

    Context {
        format: cli
            .format
            .unwrap_or_else(|| configured(config.default_format(), OutputFormat::Table)),
        quiet: cli.quiet,
        decimal_places: configured(config.decimal_places(), 6),
        solver: configured(config.solver(), SolverConfig::default()),
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let ctx = context(&cli);
    tracing::debug!(?ctx, "resolved settings");

    match cli.command {
        Commands::Zero(args) => commands::zero::execute(args, &ctx)?,
        Commands::Curve(args) => commands::curve::execute(args, &ctx)?,
        Commands::Bond(args) => commands::bond::execute(args, &ctx)?,
        Commands::Ytm(args) => commands::ytm::execute(args, &ctx)?,
        Commands::Sweep(args) => commands::sweep::execute(args, &ctx)?,
        Commands::Sign(args) => commands::sign::execute(args, &ctx)?,
        Commands::Bootstrap(args) => commands::bootstrap::execute(args, &ctx)?,
        Commands::Swap(args) => commands::swap::execute(args, &ctx)?,
        Commands::Lattice(args) => commands::lattice::execute(args, &ctx)?,
        Commands::Demo(args) => commands::demo::execute(args, &ctx)?,
        Commands::Config(args) => commands::config::execute(args, &ctx)?,
    }

    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            print_error(&format!("{err:#}"));
            ExitCode::FAILURE
        }
    }
}
