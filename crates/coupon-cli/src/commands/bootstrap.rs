//! Bootstrap command implementation.
//!
//! Recovers continuously compounded spot rates, and the forward rates
//! between them, from the prices of coupon bonds maturing one period apart.

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use coupon_bonds::curves::{
    bootstrap_continuous, spot_rate_from_discount_factor, BootstrappedCurve, YieldCurve,
};

use crate::cli::Context;
use crate::commands::{parse_frequency, parse_list};
use crate::output::{format_percent, print_header, print_output};

/// Coupon bond prices that define a bootstrapped curve.
#[derive(Args, Debug)]
pub struct CurveInputArgs {
    /// Comma-separated bond prices, shortest maturity first
    #[arg(long)]
    pub prices: String,

    /// Comma-separated maturities in years (defaults to 1/m, 2/m, ...)
    #[arg(long)]
    pub maturities: Option<String>,

    /// Face value shared by the bonds
    #[arg(long, default_value = "100")]
    pub face: f64,

    /// Annual coupon rate shared by the bonds
    #[arg(short, long)]
    pub coupon: f64,

    /// Coupon periods per year
    #[arg(long, default_value = "1")]
    pub frequency: u32,
}

impl CurveInputArgs {
    /// Bootstraps the curve from the bond prices.
    pub fn build_curve(&self) -> Result<BootstrappedCurve> {
        let prices = parse_list(&self.prices)?;
        let frequency = parse_frequency(self.frequency)?;
        let m = f64::from(frequency.periods_per_year());
        let maturities = match &self.maturities {
            Some(list) => parse_list(list)?,
            None => (1u32..)
                .take(prices.len())
                .map(|k| f64::from(k) / m)
                .collect(),
        };
        Ok(bootstrap_continuous(&prices, &maturities, self.face, self.coupon, frequency)?)
    }
}

/// Arguments for the bootstrap command.
#[derive(Args, Debug)]
pub struct BootstrapArgs {
    #[command(flatten)]
    pub bonds: CurveInputArgs,
}

/// One bootstrapped maturity.
#[derive(Debug, Serialize, Tabled)]
pub struct BootstrapRow {
    #[tabled(rename = "Maturity")]
    pub maturity: String,
    #[tabled(rename = "Spot (cont.)")]
    pub spot_rate: String,
    #[tabled(rename = "Forward (cont.)")]
    pub forward_rate: String,
    #[tabled(rename = "Spot (annual)")]
    pub annual_spot_rate: String,
    #[tabled(rename = "Discount Factor")]
    pub discount_factor: String,
}

/// Execute the bootstrap command.
pub fn execute(args: BootstrapArgs, ctx: &Context) -> Result<()> {
    let curve = args.bonds.build_curve()?;

    let places = ctx.decimal_places;
    let rows = curve
        .points()
        .iter()
        .map(|point| {
            let discount_factor = curve.discount_factor(point.maturity)?;
            let annual = spot_rate_from_discount_factor(discount_factor, point.maturity)?;
            Ok(BootstrapRow {
                maturity: format!("{:.4}", point.maturity),
                spot_rate: format_percent(point.spot_rate, places),
                forward_rate: format_percent(point.forward_rate, places),
                annual_spot_rate: format_percent(annual, places),
                discount_factor: format!("{discount_factor:.8}"),
            })
        })
        .collect::<Result<Vec<_>>>()?;

    if ctx.show_headers() {
        print_header("Bootstrapped Term Structure");
    }
    print_output(&rows, ctx.format)
}
