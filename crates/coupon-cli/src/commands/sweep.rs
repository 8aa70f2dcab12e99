//! Sweep command implementation.
//!
//! Runs the yield solver from a grid of initial guesses and reports where
//! each run ends up.

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use coupon_bonds::yields::{initial_guess_sweep, GuessOutcome};

use crate::cli::Context;
use crate::commands::ytm::ScheduleArgs;
use crate::commands::{parse_list, validate_price};
use crate::error::CliError;
use crate::output::{format_scientific, print_header, print_output};

/// Arguments for the sweep command.
#[derive(Args, Debug)]
pub struct SweepArgs {
    #[command(flatten)]
    pub schedule: ScheduleArgs,

    /// Market price the yield must reproduce
    #[arg(short, long, allow_hyphen_values = true)]
    pub price: f64,

    /// First guess of the grid
    #[arg(long, default_value = "0.05", allow_hyphen_values = true)]
    pub start: f64,

    /// Number of guesses in the grid
    #[arg(long, default_value = "20")]
    pub count: u32,

    /// Spacing between guesses
    #[arg(long, default_value = "0.01")]
    pub step: f64,

    /// Explicit comma-separated guesses (replaces the grid)
    #[arg(long, allow_hyphen_values = true)]
    pub guesses: Option<String>,

    /// Stopping tolerance (defaults to the configured `tolerance`)
    #[arg(short, long)]
    pub tolerance: Option<f64>,

    /// Iteration cap (defaults to the configured `max_iterations`)
    #[arg(long)]
    pub max_iterations: Option<u32>,
}

/// Outcome of one initial guess.
#[derive(Debug, Serialize, Tabled)]
pub struct SweepRow {
    #[tabled(rename = "Guess")]
    pub guess: String,
    #[tabled(rename = "Outcome")]
    pub outcome: String,
    #[tabled(rename = "Iterations")]
    pub iterations: String,
    #[tabled(rename = "Estimate")]
    pub estimate: String,
    #[tabled(rename = "Residual")]
    pub residual: String,
}

impl SweepRow {
    fn from_outcome(outcome: &GuessOutcome) -> Self {
        let guess = format!("{:.4}", outcome.initial_guess);
        match &outcome.result {
            Ok(solution) => Self {
                guess,
                outcome: solution.status.to_string(),
                iterations: solution.iterations.to_string(),
                estimate: format!("{:.12}", solution.estimate),
                residual: format_scientific(solution.residual),
            },
            Err(err) => Self {
                guess,
                outcome: "diverged".to_string(),
                iterations: "-".to_string(),
                estimate: "-".to_string(),
                residual: err.to_string(),
            },
        }
    }
}

/// Builds the list of initial guesses from the arguments.
fn guesses(args: &SweepArgs) -> Result<Vec<f64>> {
    if let Some(list) = &args.guesses {
        return Ok(parse_list(list)?);
    }
    if args.count == 0 {
        return Err(CliError::InvalidList {
            input: args.count.to_string(),
            reason: "the grid needs at least one guess".to_string(),
        }
        .into());
    }
    Ok((0..args.count)
        .map(|i| args.start + args.step * f64::from(i))
        .collect())
}

/// Execute the sweep command.
pub fn execute(args: SweepArgs, ctx: &Context) -> Result<()> {
    let (schedule, compounding) = args.schedule.resolve()?;
    let price = validate_price(args.price)?;
    let guesses = guesses(&args)?;
    let config = ctx.solver(args.tolerance, args.max_iterations);

    let outcomes = initial_guess_sweep(&schedule, price, compounding, &guesses, &config)?;
    let converged = outcomes.iter().filter(|o| o.is_converged()).count();
    tracing::debug!(converged, total = outcomes.len(), "initial guess sweep finished");

    let rows: Vec<_> = outcomes.iter().map(SweepRow::from_outcome).collect();
    if ctx.show_headers() {
        print_header(&format!(
            "Initial Guess Sweep ({converged} of {} converged)",
            outcomes.len()
        ));
    }
    print_output(&rows, ctx.format)
}
