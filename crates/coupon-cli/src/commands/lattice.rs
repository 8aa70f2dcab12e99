//! Lattice command implementation.
//!
//! Prices a zero-coupon bond with face 1 by backward induction on a
//! multiplicative binomial short-rate lattice.

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use coupon_bonds::lattice::{spot_rate_from_price_lattice, BinomialLattice, ShortRateLattice};

use crate::cli::Context;
use crate::commands::validate_rate;
use crate::output::{format_percent, print_header, print_output, KeyValue};

/// Arguments for the lattice command.
#[derive(Args, Debug)]
pub struct LatticeArgs {
    /// One-period rate at the root
    #[arg(short, long, allow_hyphen_values = true)]
    pub rate: f64,

    /// Factor applied to the rate on an up move
    #[arg(short, long, default_value = "1.1")]
    pub up: f64,

    /// Factor applied to the rate on a down move
    #[arg(short, long, default_value = "0.9")]
    pub down: f64,

    /// Probability of an up move
    #[arg(short, long, default_value = "0.5")]
    pub probability: f64,

    /// Steps below the root; the bond matures one period after the last
    #[arg(long, default_value = "2")]
    pub depth: usize,

    /// Print the rate and price at every node
    #[arg(long)]
    pub nodes: bool,
}

/// One lattice node.
#[derive(Debug, Serialize, Tabled)]
pub struct NodeRow {
    #[tabled(rename = "Step")]
    pub step: usize,
    #[tabled(rename = "State")]
    pub state: usize,
    #[tabled(rename = "Rate")]
    pub rate: String,
    #[tabled(rename = "Price")]
    pub price: String,
}

fn node_rows(rates: &BinomialLattice, prices: &BinomialLattice, places: u32) -> Vec<NodeRow> {
    (0..=rates.depth())
        .flat_map(|step| rates.nodes_at_depth(step))
        .map(|node| NodeRow {
            step: node.step,
            state: node.state,
            rate: format_percent(node.value, places),
            price: prices
                .value(node.step, node.state)
                .map_or_else(|| "-".to_string(), |p| format!("{p:.10}")),
        })
        .collect()
}

/// Execute the lattice command.
pub fn execute(args: LatticeArgs, ctx: &Context) -> Result<()> {
    let rate = validate_rate(args.rate)?;
    let lattice =
        ShortRateLattice::multiplicative(rate, args.up, args.down, args.depth, args.probability)?;
    let prices = lattice.zero_coupon_lattice()?;
    let spot = spot_rate_from_price_lattice(&prices)?;

    let places = ctx.decimal_places;
    let results = vec![
        KeyValue::new("Zero Price", format!("{:.10}", prices.root())),
        KeyValue::new("Maturity", format!("{} periods", args.depth + 1)),
        KeyValue::percent("Spot Rate", spot, places),
        KeyValue::percent("Root Rate", rate, places),
        KeyValue::new("Up Probability", args.probability.to_string()),
    ];

    if ctx.show_headers() {
        print_header("Binomial Short-Rate Lattice");
    }
    print_output(&results, ctx.format)?;

    if args.nodes {
        let rows = node_rows(lattice.rates(), &prices, places);
        if ctx.show_headers() {
            print_header("Lattice Nodes");
        }
        print_output(&rows, ctx.format)?;
    }
    Ok(())
}
