use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use parallel_sssp::algorithm::{EngineKind, ShortestPathAlgorithm};
use parallel_sssp::graph::generators::{generate_random, vertex_key};
use parallel_sssp::graph::KeyedGraph;
use parallel_sssp::parallel::{Dispatcher, PoolConfig};

fn single_source(c: &mut Criterion) {
    let mut group = c.benchmark_group("single_source");
    for &size in &[250usize, 1_000] {
        let graph = generate_random(size, 3.0, 7).expect("generated graph is valid");
        let source = vertex_key(0);
        for engine in [EngineKind::Linear, EngineKind::Heap] {
            group.bench_with_input(BenchmarkId::new(engine.to_string(), size), &graph, |b, g| {
                b.iter(|| {
                    let tree = ShortestPathAlgorithm::<f64, KeyedGraph<f64>>::compute_shortest_paths(
                        &engine, g, &source,
                    );
                    black_box(tree.is_ok())
                })
            });
        }
    }
    group.finish();
}

fn fan_out(c: &mut Criterion) {
    let graph = generate_random(1_000, 3.0, 11).expect("generated graph is valid");
    let starts: Vec<String> = (0..64).map(vertex_key).collect();

    let mut group = c.benchmark_group("fan_out");
    group.sample_size(10);
    for workers in [1usize, 2, 4] {
        let dispatcher = Dispatcher::new(
            EngineKind::Linear,
            PoolConfig {
                workers,
                ..PoolConfig::default()
            },
        );
        group.bench_with_input(BenchmarkId::from_parameter(workers), &starts, |b, s| {
            b.iter(|| black_box(dispatcher.run(&graph, s).len()))
        });
    }
    group.finish();
}

criterion_group!(benches, single_source, fan_out);
criterion_main!(benches);
