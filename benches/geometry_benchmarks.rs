use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use ndarray::Array2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use spatial_graph::geometry::{compact, compute_ranges};
use spatial_graph::{GeometryMode, GeometryRange, Graph, COORDINATES};

fn random_graph(n_vertices: usize, n_edges: usize) -> Graph {
    let mut rng = StdRng::seed_from_u64(0);
    let mut graph = Graph::new();
    graph.add_vertices(n_vertices);
    let edges: Vec<_> = (0..n_edges)
        .map(|_| (rng.gen_range(0..n_vertices), rng.gen_range(0..n_vertices)))
        .collect();
    graph.add_edges(&edges).unwrap();
    let geometry: Vec<Array2<f64>> = (0..n_edges)
        .map(|_| {
            let len = rng.gen_range(2..12);
            Array2::from_shape_fn((len, 3), |_| rng.gen_range(0.0..100.0))
        })
        .collect();
    graph.set_edge_geometry(COORDINATES, geometry).unwrap();
    graph
}

/// Benchmark range computation and compaction of gappy ranges
fn bench_ranges(c: &mut Criterion) {
    let mut group = c.benchmark_group("ranges");

    for size in [1_000, 10_000, 100_000].iter() {
        let mut rng = StdRng::seed_from_u64(1);
        let lengths: Vec<usize> = (0..*size).map(|_| rng.gen_range(0..20)).collect();
        let gappy: Vec<GeometryRange> = compute_ranges(&lengths)
            .into_iter()
            .step_by(2)
            .collect();

        group.bench_with_input(BenchmarkId::new("compute", size), size, |b, _| {
            b.iter(|| criterion::black_box(compute_ranges(&lengths)));
        });
        group.bench_with_input(BenchmarkId::new("compact", size), size, |b, _| {
            b.iter(|| criterion::black_box(compact(&gappy)));
        });
    }
    group.finish();
}

/// Benchmark switching between packed and scattered layouts
fn bench_mode_conversion(c: &mut Criterion) {
    let mut group = c.benchmark_group("mode_conversion");

    for size in [1_000, 10_000].iter() {
        let packed = random_graph(size / 2, *size);
        let mut scattered = packed.clone();
        scattered.set_edge_geometry_mode(GeometryMode::Scattered).unwrap();

        group.bench_with_input(BenchmarkId::new("to_scattered", size), size, |b, _| {
            b.iter(|| {
                let mut graph = packed.clone();
                graph.set_edge_geometry_mode(GeometryMode::Scattered).unwrap();
                criterion::black_box(graph.n_edges());
            });
        });
        group.bench_with_input(BenchmarkId::new("to_packed", size), size, |b, _| {
            b.iter(|| {
                let mut graph = scattered.clone();
                graph.set_edge_geometry_mode(GeometryMode::Packed).unwrap();
                criterion::black_box(graph.n_edges());
            });
        });
    }
    group.finish();
}

/// Benchmark sub-graph extraction with packed geometry compaction
fn bench_sub_graph(c: &mut Criterion) {
    let mut group = c.benchmark_group("sub_graph");

    for size in [1_000, 10_000].iter() {
        let graph = random_graph(size / 2, *size);
        let keep: Vec<bool> = (0..graph.n_vertices()).map(|v| v % 3 != 0).collect();

        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| {
                let sub = graph.sub_graph(Some(&keep), None).unwrap();
                criterion::black_box(sub.n_edges());
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_ranges, bench_mode_conversion, bench_sub_graph);
criterion_main!(benches);
