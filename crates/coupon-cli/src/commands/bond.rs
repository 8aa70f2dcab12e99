//! Bond command implementation.
//!
//! Prices a fixed coupon bond at a discrete yield and reports its duration,
//! per-period present values, and horizon value.

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use coupon_bonds::pricing::FixedCouponBond;

use crate::cli::Context;
use crate::commands::{parse_frequency, validate_rate};
use crate::output::{format_amount, print_header, print_output, KeyValue};

/// Arguments for the bond command.
#[derive(Args, Debug)]
pub struct BondArgs {
    /// Face value
    #[arg(long, default_value = "10000")]
    pub face: f64,

    /// Maturity in years (a whole number of coupon periods)
    #[arg(short, long)]
    pub maturity: f64,

    /// Annual coupon rate as a decimal (0.05 for 5%)
    #[arg(short, long)]
    pub coupon: f64,

    /// Yield as a decimal, compounded at the coupon frequency
    #[arg(short = 'r', long = "yield", allow_hyphen_values = true)]
    pub rate: f64,

    /// Coupon periods per year
    #[arg(long, default_value = "2")]
    pub frequency: u32,

    /// Print the present value of every period's cash flow
    #[arg(long)]
    pub periods: bool,

    /// Value of the cash flows carried to this horizon (years)
    #[arg(long, conflicts_with = "horizon_at_duration")]
    pub horizon: Option<f64>,

    /// Use the Macaulay duration as the horizon
    #[arg(long)]
    pub horizon_at_duration: bool,
}

/// Present value of one coupon period.
#[derive(Debug, Serialize, Tabled)]
pub struct PeriodRow {
    #[tabled(rename = "Period")]
    pub period: u32,
    #[tabled(rename = "Time")]
    pub time: String,
    #[tabled(rename = "Cash Flow")]
    pub cash_flow: String,
    #[tabled(rename = "Present Value")]
    pub present_value: String,
}

/// Execute the bond command.
pub fn execute(args: BondArgs, ctx: &Context) -> Result<()> {
    let rate = validate_rate(args.rate)?;
    let frequency = parse_frequency(args.frequency)?;
    let bond = FixedCouponBond::new(args.face, args.maturity, args.coupon, frequency)?;

    let present_values = bond.present_values(rate)?;
    let price: f64 = present_values.iter().sum();
    let duration = bond.macaulay_duration(rate).ok();
    tracing::debug!(price, periods = bond.periods(), "priced coupon bond");

    let places = ctx.decimal_places;
    let mut results = vec![
        KeyValue::amount("Price", price, places),
        KeyValue::amount("Face Value", bond.face_value(), places),
        KeyValue::percent("Coupon Rate", bond.coupon_rate(), places),
        KeyValue::amount("Coupon Payment", bond.coupon_amount(), places),
        KeyValue::new("Frequency", frequency.to_string()),
        KeyValue::new("Periods", bond.periods().to_string()),
        KeyValue::percent("Yield", rate, places),
    ];
    match duration {
        Some(duration) => results.push(KeyValue::amount("Macaulay Duration", duration, places)),
        None => results.push(KeyValue::new("Macaulay Duration", "undefined")),
    }

    let horizon = if args.horizon_at_duration {
        duration
    } else {
        args.horizon
    };
    if let Some(horizon) = horizon {
        let value = bond.horizon_value(rate, horizon)?;
        results.push(KeyValue::new("Horizon", format!("{horizon:.6} years")));
        results.push(KeyValue::amount("Horizon Value", value, places));
    }

    if ctx.show_headers() {
        print_header("Coupon Bond");
    }
    print_output(&results, ctx.format)?;

    if args.periods {
        let schedule = bond.schedule()?;
        let rows: Vec<_> = schedule
            .iter()
            .zip(&present_values)
            .zip(1u32..)
            .map(|((flow, pv), period)| PeriodRow {
                period,
                time: format!("{:.4}", flow.time()),
                cash_flow: format_amount(flow.amount(), places),
                present_value: format_amount(*pv, places),
            })
            .collect();

        if ctx.show_headers() {
            print_header("Per-Period Present Values");
        }
        print_output(&rows, ctx.format)?;
    }

    Ok(())
}
