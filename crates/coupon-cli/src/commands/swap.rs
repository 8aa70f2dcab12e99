//! Swap command implementation.
//!
//! Values a fixed-for-floating swap on a curve bootstrapped from coupon
//! bond prices, one swap period per bond.

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use coupon_bonds::swap::{InterestRateSwap, SwapPeriod};

use crate::cli::Context;
use crate::commands::bootstrap::CurveInputArgs;
use crate::output::{format_amount, format_percent, print_header, print_output, KeyValue};

/// Arguments for the swap command.
#[derive(Args, Debug)]
pub struct SwapArgs {
    #[command(flatten)]
    pub bonds: CurveInputArgs,

    /// Notional amount
    #[arg(short, long, default_value = "1000000")]
    pub notional: f64,

    /// Fixed rate received (defaults to the par rate)
    #[arg(short = 'r', long, allow_hyphen_values = true)]
    pub fixed_rate: Option<f64>,

    /// Spread added to the floating rate
    #[arg(short, long, default_value = "0", allow_hyphen_values = true)]
    pub spread: f64,

    /// Print every swap period
    #[arg(long)]
    pub periods: bool,
}

/// One swap period.
#[derive(Debug, Serialize, Tabled)]
pub struct SwapPeriodRow {
    #[tabled(rename = "Period")]
    pub period: String,
    #[tabled(rename = "Forward")]
    pub forward_rate: String,
    #[tabled(rename = "Fixed")]
    pub fixed_payment: String,
    #[tabled(rename = "Floating")]
    pub floating_payment: String,
    #[tabled(rename = "Net")]
    pub net_payment: String,
    #[tabled(rename = "Present Value")]
    pub present_value: String,
}

impl SwapPeriodRow {
    fn new(period: &SwapPeriod, places: u32) -> Self {
        Self {
            period: format!("{:.4}-{:.4}", period.start, period.end),
            forward_rate: format_percent(period.forward_rate, places),
            fixed_payment: format_amount(period.fixed_payment, places),
            floating_payment: format_amount(period.floating_payment, places),
            net_payment: format_amount(period.net_payment(), places),
            present_value: format_amount(period.present_value(), places),
        }
    }
}

/// Execute the swap command.
pub fn execute(args: SwapArgs, ctx: &Context) -> Result<()> {
    let curve = args.bonds.build_curve()?;
    let quote = InterestRateSwap::new(args.notional, 0.0)?.with_floating_spread(args.spread)?;
    let par = quote.par_rate(&curve)?;

    let fixed_rate = args.fixed_rate.unwrap_or(par);
    let swap = InterestRateSwap::new(args.notional, fixed_rate)?.with_floating_spread(args.spread)?;
    let valuation = swap.value(&curve)?;
    tracing::debug!(par, value = valuation.value(), "valued swap");

    let places = ctx.decimal_places;
    let results = vec![
        KeyValue::amount("Value", valuation.value(), places),
        KeyValue::amount("Notional", swap.notional(), places),
        KeyValue::percent("Fixed Rate", swap.fixed_rate(), places),
        KeyValue::percent("Par Rate", par, places),
        KeyValue::percent("Floating Spread", swap.floating_spread(), places),
        KeyValue::amount("Fixed Leg", valuation.fixed_leg_value(), places),
        KeyValue::amount("Floating Leg", valuation.floating_leg_value(), places),
    ];

    if ctx.show_headers() {
        print_header("Interest Rate Swap (receive fixed)");
    }
    print_output(&results, ctx.format)?;

    if args.periods {
        let rows: Vec<_> = valuation
            .periods
            .iter()
            .map(|p| SwapPeriodRow::new(p, places))
            .collect();
        if ctx.show_headers() {
            print_header("Swap Periods");
        }
        print_output(&rows, ctx.format)?;
    }
    Ok(())
}
