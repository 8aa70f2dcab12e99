//! Sign command implementation.
//!
//! Finds the parameter values for which cash flows affine in `x` have a
//! positive present value.

use anyhow::Result;
use clap::Args;

use coupon_bonds::analysis::{AffineCashFlow, AffineCashFlows};

use crate::cli::Context;
use crate::commands::{parse_compounding, parse_list, validate_rate};
use crate::error::CliError;
use crate::output::{format_amount, print_header, print_output, KeyValue};

/// Arguments for the sign command.
///
/// Flow `k` is `constants[k] + slopes[k]·x`, paid at `times[k]`.
#[derive(Args, Debug)]
pub struct SignArgs {
    /// Comma-separated amounts that do not depend on x
    #[arg(long, allow_hyphen_values = true)]
    pub constants: String,

    /// Comma-separated coefficients of x
    #[arg(long, allow_hyphen_values = true)]
    pub slopes: String,

    /// Comma-separated payment times in years (defaults to 0, 1, 2, ...)
    #[arg(long)]
    pub times: Option<String>,

    /// Discount rate as a decimal
    #[arg(short, long, default_value = "0.05", allow_hyphen_values = true)]
    pub rate: f64,

    /// Compounding periods per year
    #[arg(long, default_value = "1", conflicts_with = "continuous")]
    pub compounding: u32,

    /// Compound continuously
    #[arg(long)]
    pub continuous: bool,

    /// Also evaluate the present value at this x
    #[arg(long, allow_hyphen_values = true)]
    pub at: Option<f64>,
}

fn build_flows(args: &SignArgs) -> Result<AffineCashFlows> {
    let constants = parse_list(&args.constants)?;
    let slopes = parse_list(&args.slopes)?;
    let times = match &args.times {
        Some(times) => parse_list(times)?,
        None => (0u32..).take(constants.len()).map(f64::from).collect(),
    };

    if constants.len() != slopes.len() || constants.len() != times.len() {
        return Err(CliError::InvalidList {
            input: args.slopes.clone(),
            reason: format!(
                "{} constants, {} slopes and {} times must have equal length",
                constants.len(),
                slopes.len(),
                times.len()
            ),
        }
        .into());
    }

    let flows = times
        .iter()
        .zip(constants.iter().zip(&slopes))
        .map(|(&t, (&a, &b))| AffineCashFlow::new(t, a, b))
        .collect();
    Ok(AffineCashFlows::new(flows)?)
}

/// Execute the sign command.
pub fn execute(args: SignArgs, ctx: &Context) -> Result<()> {
    let rate = validate_rate(args.rate)?;
    let compounding = parse_compounding(args.continuous, args.compounding)?;
    let flows = build_flows(&args)?;

    let line = flows.present_value_line(rate, compounding)?;
    let region = line.positive_region();

    let places = ctx.decimal_places;
    let mut results = vec![
        KeyValue::new("PV > 0 for", region.to_string()),
        KeyValue::amount("PV Intercept (A)", line.intercept, places),
        KeyValue::amount("PV Slope (B)", line.slope, places),
        KeyValue::new(
            "Break-even x",
            line.root()
                .map_or_else(|| "none".to_string(), |x| format_amount(x, places)),
        ),
        KeyValue::percent("Rate", rate, places),
        KeyValue::new("Compounding", compounding.to_string()),
    ];
    if let Some(x) = args.at {
        let value = flows.present_value(x, rate, compounding)?;
        results.push(KeyValue::amount(format!("PV at x = {x}"), value, places));
    }

    if ctx.show_headers() {
        print_header("Present Value Sign Analysis");
    }
    print_output(&results, ctx.format)
}
