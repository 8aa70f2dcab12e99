//! Demo command implementation.
//!
//! Runs every calculation on a set of worked examples.

use anyhow::Result;
use clap::Args;

use coupon_bonds::analysis::{AffineCashFlow, AffineCashFlows};
use coupon_bonds::curves::{bootstrap_continuous, BootstrappedCurve, FunctionalYield};
use coupon_bonds::lattice::ShortRateLattice;
use coupon_bonds::pricing::{
    price_zero_coupon_continuous, price_zero_coupon_discrete, price_zero_coupon_time_varying,
    FixedCouponBond,
};
use coupon_bonds::swap::InterestRateSwap;
use coupon_bonds::yields::{initial_guess_sweep, yield_to_maturity};
use coupon_core::{CashFlowSchedule, Compounding, Frequency};

use crate::cli::Context;
use crate::commands::ytm::print_yield_result;
use crate::output::{format_percent, print_divider, print_header, print_output, KeyValue};

/// Cash flows of the ten-year bond used for the yield examples.
const TEN_YEAR_FLOWS: [f64; 10] = [2.3, 2.9, 3.0, 3.2, 4.0, 3.8, 4.2, 4.8, 5.5, 105.0];

/// Arguments for the demo command.
#[derive(Args, Debug)]
pub struct DemoArgs {
    /// Show the Newton iteration table for the yield example
    #[arg(long)]
    pub trace: bool,
}

fn section(title: &str, ctx: &Context) {
    if ctx.show_headers() {
        print_divider();
        print_header(title);
    }
}

fn zero_coupon(ctx: &Context) -> Result<()> {
    let places = ctx.decimal_places;
    let discrete = price_zero_coupon_discrete(10_000.0, 20.0, 0.08, Frequency::Annual)?;
    let continuous = price_zero_coupon_continuous(10_000.0, 20.0, 0.08)?;
    let curve = FunctionalYield::new(|t: f64| 0.06 + 0.2 * t * (-t * t).exp());
    let humped = price_zero_coupon_time_varying(10_000.0, 20.0, &curve)?;

    section("Zero-Coupon Bonds (face 10,000, 20 years)", ctx);
    print_output(
        &[
            KeyValue::amount("8% annual compounding", discrete, places),
            KeyValue::amount("8% continuous compounding", continuous, places),
            KeyValue::amount("y(t) = 0.06 + 0.2·t·exp(-t²)", humped, places),
        ],
        ctx.format,
    )
}

fn coupon_bonds(ctx: &Context) -> Result<()> {
    let places = ctx.decimal_places;
    let quarterly = FixedCouponBond::new(10_000.0, 10.0, 0.05, Frequency::Quarterly)?;
    let semi = FixedCouponBond::new(100_000.0, 3.0, 0.08, Frequency::SemiAnnual)?;
    let duration = semi.macaulay_duration(0.09)?;

    section("Coupon Bonds", ctx);
    print_output(
        &[
            KeyValue::amount("10y 5% quarterly at 7%", quarterly.price(0.07)?, places),
            KeyValue::amount("3y 8% semi-annual at 9%", semi.price(0.09)?, places),
            KeyValue::amount("  Macaulay duration", duration, places),
            KeyValue::amount(
                "  Value at the duration horizon",
                semi.horizon_value(0.09, duration)?,
                places,
            ),
        ],
        ctx.format,
    )
}

fn yields(ctx: &Context, trace: bool) -> Result<()> {
    let schedule = CashFlowSchedule::annual(&TEN_YEAR_FLOWS)?;
    let config = ctx.solver(Some(1e-8), None).with_trace(trace);
    let result = yield_to_maturity(&schedule, 100.0, Compounding::Continuous, 0.05, &config)?;

    section("Yield to Maturity (ten-year bond at 100, continuous)", ctx);
    print_yield_result(&result, 100.0, ctx)?;

    let guesses: Vec<f64> = (0..20).map(|i| 0.05 + 0.01 * f64::from(i)).collect();
    let outcomes = initial_guess_sweep(
        &schedule,
        100.0,
        Compounding::Continuous,
        &guesses,
        &ctx.solver(Some(1e-8), None),
    )?;
    let rows: Vec<_> = outcomes
        .iter()
        .map(|outcome| {
            let value = match &outcome.result {
                Ok(solution) => format!("{} in {} iterations", solution.status, solution.iterations),
                Err(err) => err.to_string(),
            };
            KeyValue::new(format!("from {:.2}", outcome.initial_guess), value)
        })
        .collect();

    section("Initial Guess Sensitivity", ctx);
    print_output(&rows, ctx.format)
}

fn sign_and_curve(ctx: &Context) -> Result<()> {
    let places = ctx.decimal_places;
    let flows = AffineCashFlows::new(vec![
        AffineCashFlow::linear(0.0, -3.0),
        AffineCashFlow::fixed(1.0, 5.0),
        AffineCashFlow::linear(2.0, 1.0),
    ])?;
    let region = flows.positive_region(0.05, Compounding::default())?;

    let curve = demo_curve()?;

    section("Present Value Sign (-3x, 5, x at 5%)", ctx);
    print_output(&[KeyValue::new("PV > 0 for", region.to_string())], ctx.format)?;

    section("Bootstrapped Spot and Forward Rates", ctx);
    let rows: Vec<_> = curve
        .points()
        .iter()
        .map(|p| {
            KeyValue::new(
                format!("{} years", p.maturity),
                format!(
                    "spot {}, forward {}",
                    format_percent(p.spot_rate, places),
                    format_percent(p.forward_rate, places)
                ),
            )
        })
        .collect();
    print_output(&rows, ctx.format)
}

fn demo_curve() -> Result<BootstrappedCurve> {
    Ok(bootstrap_continuous(
        &[101.0, 101.5, 101.2],
        &[1.0, 2.0, 3.0],
        100.0,
        0.05,
        Frequency::Annual,
    )?)
}

fn swap_and_lattice(ctx: &Context) -> Result<()> {
    let places = ctx.decimal_places;
    let curve = demo_curve()?;
    let swap = InterestRateSwap::new(1_000_000.0, 0.05)?;
    let par = swap.par_rate(&curve)?;
    let value = swap.value(&curve)?.value();

    section("Receive-Fixed Swap on the Bootstrapped Curve (1,000,000 at 5%)", ctx);
    print_output(
        &[
            KeyValue::percent("Par rate", par, places),
            KeyValue::amount("Value at 5%", value, places),
        ],
        ctx.format,
    )?;

    let lattice = ShortRateLattice::multiplicative(0.06, 1.25, 0.9, 2, 0.5)?;
    section("Binomial Lattice (r0 = 6%, u = 1.25, d = 0.9, p = 0.5)", ctx);
    print_output(
        &[
            KeyValue::new("P(0, 3)", format!("{:.10}", lattice.zero_coupon_price()?)),
            KeyValue::percent("Three-period spot rate", lattice.spot_rate()?, places),
        ],
        ctx.format,
    )
}

/// Execute the demo command.
pub fn execute(args: DemoArgs, ctx: &Context) -> Result<()> {
    zero_coupon(ctx)?;
    coupon_bonds(ctx)?;
    yields(ctx, args.trace)?;
    sign_and_curve(ctx)?;
    swap_and_lattice(ctx)
}
