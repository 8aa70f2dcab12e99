//! Zero command implementation.
//!
//! Prices a zero-coupon bond at a constant discrete or continuous yield.

use anyhow::Result;
use clap::Args;

use coupon_bonds::pricing::{price_zero_coupon_continuous, price_zero_coupon_discrete};
use coupon_core::Compounding;

use crate::cli::Context;
use crate::commands::{parse_compounding, validate_rate};
use crate::output::{print_header, print_output, KeyValue};

/// Arguments for the zero command.
#[derive(Args, Debug)]
pub struct ZeroArgs {
    /// Face value
    #[arg(long, default_value = "10000")]
    pub face: f64,

    /// Maturity in years
    #[arg(short, long)]
    pub maturity: f64,

    /// Yield as a decimal (0.08 for 8%)
    #[arg(short = 'r', long = "yield", allow_hyphen_values = true)]
    pub rate: f64,

    /// Compounding periods per year
    #[arg(long, default_value = "1", conflicts_with = "continuous")]
    pub frequency: u32,

    /// Compound continuously
    #[arg(long)]
    pub continuous: bool,
}

/// Execute the zero command.
pub fn execute(args: ZeroArgs, ctx: &Context) -> Result<()> {
    let rate = validate_rate(args.rate)?;
    let compounding = parse_compounding(args.continuous, args.frequency)?;

    let price = match compounding {
        Compounding::Continuous => price_zero_coupon_continuous(args.face, args.maturity, rate)?,
        Compounding::Periodic(frequency) => {
            price_zero_coupon_discrete(args.face, args.maturity, rate, frequency)?
        }
    };
    tracing::debug!(price, %compounding, "priced zero-coupon bond");

    let places = ctx.decimal_places;
    let results = vec![
        KeyValue::amount("Price", price, places),
        KeyValue::amount("Face Value", args.face, places),
        KeyValue::new("Maturity", format!("{} years", args.maturity)),
        KeyValue::percent("Yield", rate, places),
        KeyValue::new("Compounding", compounding.to_string()),
        KeyValue::amount("Discount Factor", price / args.face, places.max(8)),
    ];

    if ctx.show_headers() {
        print_header("Zero-Coupon Bond");
    }
    print_output(&results, ctx.format)
}
