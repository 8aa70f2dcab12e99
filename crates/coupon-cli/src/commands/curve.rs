//! Curve command implementation.
//!
//! Prices a zero-coupon bond under `y(t) = base + hump·t·e^(−t²)`, integrated
//! by adaptive quadrature.

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use coupon_bonds::curves::{FunctionalYield, YieldCurve};
use coupon_bonds::pricing::price_zero_coupon_time_varying;
use coupon_math::integration::QuadratureConfig;

use crate::cli::Context;
use crate::output::{format_percent, print_header, print_output, KeyValue};

/// Arguments for the curve command.
#[derive(Args, Debug)]
pub struct CurveArgs {
    /// Face value
    #[arg(long, default_value = "10000")]
    pub face: f64,

    /// Maturity in years
    #[arg(short, long, default_value = "20")]
    pub maturity: f64,

    /// Long-run yield level
    #[arg(long, default_value = "0.06", allow_hyphen_values = true)]
    pub base: f64,

    /// Size of the short-end hump
    #[arg(long, default_value = "0.2", allow_hyphen_values = true)]
    pub hump: f64,

    /// Quadrature absolute tolerance
    #[arg(long, default_value = "1e-10")]
    pub tolerance: f64,

    /// Panels evaluated before adaptive refinement
    #[arg(long, default_value = "64")]
    pub panels: u32,

    /// Also print the yield at this many evenly spaced times
    #[arg(long)]
    pub samples: Option<u32>,
}

/// One sampled point of the curve.
#[derive(Debug, Serialize, Tabled)]
pub struct CurveSample {
    #[tabled(rename = "Time")]
    pub time: String,
    #[tabled(rename = "Yield")]
    pub rate: String,
    #[tabled(rename = "Discount Factor")]
    pub discount_factor: String,
}

/// Execute the curve command.
pub fn execute(args: CurveArgs, ctx: &Context) -> Result<()> {
    let (base, hump) = (args.base, args.hump);
    let quadrature = QuadratureConfig::default()
        .with_tolerance(args.tolerance)
        .with_initial_panels(args.panels);
    let curve = FunctionalYield::new(move |t: f64| base + hump * t * (-t * t).exp())
        .with_quadrature(quadrature);

    let price = price_zero_coupon_time_varying(args.face, args.maturity, &curve)?;
    let integral = curve.cumulative_yield(args.maturity)?;

    let places = ctx.decimal_places;
    let results = vec![
        KeyValue::amount("Price", price, places),
        KeyValue::new("Yield Curve", format!("{base} + {hump}·t·exp(-t²)")),
        KeyValue::amount("Cumulative Yield", integral, places.max(8)),
        KeyValue::percent("Average Yield", integral / args.maturity, places),
        KeyValue::amount("Discount Factor", (-integral).exp(), places.max(8)),
    ];

    if ctx.show_headers() {
        print_header("Zero-Coupon Bond, Time-Varying Yield");
    }
    print_output(&results, ctx.format)?;

    if let Some(samples) = args.samples.filter(|&n| n > 0) {
        let rows = (0..=samples)
            .map(|i| {
                let t = args.maturity * f64::from(i) / f64::from(samples);
                Ok(CurveSample {
                    time: format!("{t:.2}"),
                    rate: format_percent(curve.yield_at(t), places),
                    discount_factor: format!("{:.8}", curve.discount_factor(t)?),
                })
            })
            .collect::<Result<Vec<_>>>()?;

        if ctx.show_headers() {
            print_header("Yield Samples");
        }
        print_output(&rows, ctx.format)?;
    }

    Ok(())
}
