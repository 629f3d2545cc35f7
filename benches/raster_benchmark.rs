#![allow(clippy::expect_used, clippy::unwrap_used, missing_docs)]
//! Benchmark for line and circle rasterization.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use trueno_raster::prelude::*;

fn line_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("line");

    for length in [100, 1_000, 10_000] {
        // Shallow slope so Wu emits two pixels per step.
        let line = Line::from_coords(-length / 2, -length / 7, length / 2, length / 7);

        for algorithm in LineAlgorithm::ALL {
            group.bench_with_input(
                BenchmarkId::new(algorithm.as_str(), length),
                &line,
                |b, &line| b.iter(|| rasterize_line(black_box(line), algorithm)),
            );
        }
    }

    group.finish();
}

fn circle_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("circle");

    for radius in [10, 100, 1_000, 10_000] {
        for algorithm in CircleAlgorithm::ALL {
            let circle = Circle::new(Point::ORIGIN, radius);
            group.bench_with_input(
                BenchmarkId::new(algorithm.as_str(), radius),
                &circle,
                |b, &circle| {
                    b.iter(|| {
                        rasterize_circle_with(black_box(circle), algorithm)
                            .expect("radius is non-negative")
                    });
                },
            );
        }
    }

    group.finish();
}

fn handler_benchmark(c: &mut Criterion) {
    let handler = RasterRequestHandler::default();
    let body = r#"{"algorithm": "antialiased", "x1": -500, "y1": 120, "x2": 480, "y2": -333}"#;

    c.bench_function("handler_line_json", |b| {
        b.iter(|| {
            let result = handler
                .handle_line_json(black_box(body))
                .expect("valid request");
            result.to_json().expect("encodable")
        });
    });
}

criterion_group!(benches, line_benchmark, circle_benchmark, handler_benchmark);
criterion_main!(benches);
