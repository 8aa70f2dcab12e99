//! Ytm command implementation.
//!
//! Solves for the yield that reprices a cash-flow schedule, optionally
//! printing every Newton update.

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use coupon_bonds::yields::{internal_rate_of_return, yield_to_maturity, YieldResult};
use coupon_core::{CashFlow, CashFlowSchedule, Compounding};
use coupon_math::solvers::NewtonIterate;

use crate::cli::Context;
use crate::commands::{parse_compounding, parse_frequency, parse_list, validate_price, validate_rate};
use crate::output::{format_amount, format_scientific, print_header, print_output, print_warning, KeyValue};

/// Cash-flow and compounding arguments shared with the sweep command.
#[derive(Args, Debug)]
pub struct ScheduleArgs {
    /// Comma-separated cash flows, one per period
    #[arg(long, allow_hyphen_values = true)]
    pub flows: String,

    /// Cash-flow periods per year (flows are paid at k/m years)
    #[arg(long, default_value = "1")]
    pub spacing: u32,

    /// The first flow is paid immediately (t = 0) instead of after one period
    #[arg(long)]
    pub from_zero: bool,

    /// Compounding periods per year for the yield
    #[arg(long, default_value = "1", conflicts_with = "continuous")]
    pub compounding: u32,

    /// Compound the yield continuously
    #[arg(long)]
    pub continuous: bool,
}

impl ScheduleArgs {
    /// Builds the schedule and compounding convention.
    pub fn resolve(&self) -> Result<(CashFlowSchedule, Compounding)> {
        let amounts = parse_list(&self.flows)?;
        let m = f64::from(parse_frequency(self.spacing)?.periods_per_year());
        let offset = if self.from_zero { 0.0 } else { 1.0 };

        let flows = amounts
            .iter()
            .zip(0u32..)
            .map(|(&amount, k)| CashFlow::new((f64::from(k) + offset) / m, amount))
            .collect();
        let schedule = CashFlowSchedule::new(flows)?;
        let compounding = parse_compounding(self.continuous, self.compounding)?;
        Ok((schedule, compounding))
    }
}

/// Arguments for the ytm command.
#[derive(Args, Debug)]
pub struct YtmArgs {
    #[command(flatten)]
    pub schedule: ScheduleArgs,

    /// Market price the yield must reproduce
    #[arg(short, long, required_unless_present = "irr", allow_hyphen_values = true)]
    pub price: Option<f64>,

    /// Solve for the rate at which the flows are worth zero (IRR)
    #[arg(long, conflicts_with = "price")]
    pub irr: bool,

    /// Initial guess
    #[arg(short, long, default_value = "0.05", allow_hyphen_values = true)]
    pub guess: f64,

    /// Stopping tolerance (defaults to the configured `tolerance`)
    #[arg(short, long)]
    pub tolerance: Option<f64>,

    /// Iteration cap (defaults to the configured `max_iterations`)
    #[arg(long)]
    pub max_iterations: Option<u32>,

    /// Print every Newton update
    #[arg(long)]
    pub trace: bool,
}

/// One row of the iteration table.
#[derive(Debug, Serialize, Tabled)]
pub struct TraceRow {
    #[tabled(rename = "Iteration")]
    pub iteration: u32,
    #[tabled(rename = "Estimate")]
    pub estimate: String,
    #[tabled(rename = "|Step|")]
    pub step: String,
    #[tabled(rename = "Residual")]
    pub residual: String,
}

impl TraceRow {
    fn from_iterate(iterate: &NewtonIterate) -> Self {
        Self {
            iteration: iterate.index,
            estimate: format!("{:.12}", iterate.estimate),
            step: format_scientific(iterate.step),
            residual: format_scientific(iterate.residual),
        }
    }
}

/// Prints the summary table of a solved yield, plus the trace if present.
pub fn print_yield_result(result: &YieldResult, target: f64, ctx: &Context) -> Result<()> {
    let places = ctx.decimal_places;
    let solution = &result.solution;
    let results = vec![
        KeyValue::new("Yield", format!("{:.12}", result.yield_rate)),
        KeyValue::percent("Yield (%)", result.yield_rate, places),
        KeyValue::new("Status", solution.status.to_string()),
        KeyValue::new("Iterations", solution.iterations.to_string()),
        KeyValue::amount("Target", target, places),
        KeyValue::amount("Repriced", result.repriced, places),
        KeyValue::new("Final Residual", format_scientific(solution.residual)),
    ];

    if ctx.show_headers() {
        print_header("Yield to Maturity");
    }
    print_output(&results, ctx.format)?;

    if let Some(trace) = &solution.trace {
        let rows: Vec<_> = trace.iter().map(TraceRow::from_iterate).collect();
        if ctx.show_headers() {
            print_header("Newton Iterations");
        }
        print_output(&rows, ctx.format)?;
    }

    if !result.is_converged() && !ctx.quiet {
        print_warning(&format!(
            "no convergence within {} iterations; best estimate {}",
            solution.iterations,
            format_amount(result.yield_rate, 12)
        ));
    }
    Ok(())
}

/// Execute the ytm command.
pub fn execute(args: YtmArgs, ctx: &Context) -> Result<()> {
    let (schedule, compounding) = args.schedule.resolve()?;
    let guess = validate_rate(args.guess)?;
    let config = ctx
        .solver(args.tolerance, args.max_iterations)
        .with_trace(args.trace);

    let (result, target) = match args.price {
        Some(price) if !args.irr => {
            let price = validate_price(price)?;
            (
                yield_to_maturity(&schedule, price, compounding, guess, &config)?,
                price,
            )
        }
        _ => (
            internal_rate_of_return(&schedule, compounding, guess, &config)?,
            0.0,
        ),
    };
    tracing::debug!(
        yield_rate = result.yield_rate,
        iterations = result.iterations(),
        "solved yield"
    );

    print_yield_result(&result, target, ctx)
}
