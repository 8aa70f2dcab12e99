//! Benchmarks for the Newton solver and quadrature.
//!
//! Run with: cargo bench -p coupon-math

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};

use coupon_math::integration::{adaptive_simpson, QuadratureConfig};
use coupon_math::solvers::{newton_raphson, newton_raphson_numerical, SolverConfig};

const FLOWS: [f64; 10] = [2.3, 2.9, 3.0, 3.2, 4.0, 3.8, 4.2, 4.8, 5.5, 105.0];

fn residual(y: f64) -> f64 {
    FLOWS
        .iter()
        .zip(1u32..)
        .map(|(c, t)| c * (-y * f64::from(t)).exp())
        .sum::<f64>()
        - 100.0
}

fn residual_derivative(y: f64) -> f64 {
    -FLOWS
        .iter()
        .zip(1u32..)
        .map(|(c, t)| f64::from(t) * c * (-y * f64::from(t)).exp())
        .sum::<f64>()
}

fn bench_newton(c: &mut Criterion) {
    let mut group = c.benchmark_group("newton");

    for trace in [false, true] {
        let config = SolverConfig::new(1e-8, 100).with_trace(trace);
        group.bench_with_input(
            BenchmarkId::new("analytic", if trace { "trace" } else { "no_trace" }),
            &config,
            |b, config| {
                b.iter(|| newton_raphson(residual, residual_derivative, black_box(0.05), config))
            },
        );
    }

    let config = SolverConfig::new(1e-8, 100);
    group.bench_function("numerical", |b| {
        b.iter(|| newton_raphson_numerical(residual, black_box(0.05), &config))
    });

    group.finish();
}

fn bench_quadrature(c: &mut Criterion) {
    let curve = |t: f64| 0.06 + 0.2 * t * (-t * t).exp();
    let mut group = c.benchmark_group("adaptive_simpson");

    for panels in [1u32, 16, 64] {
        let config = QuadratureConfig::default().with_initial_panels(panels);
        group.bench_with_input(BenchmarkId::from_parameter(panels), &config, |b, config| {
            b.iter(|| adaptive_simpson(curve, 0.0, black_box(20.0), config))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_newton, bench_quadrature);
criterion_main!(benches);
