use std::time::{Duration, Instant};

use parallel_sssp::algorithm::{DistanceMap, EngineKind, ShortestPathAlgorithm};
use parallel_sssp::graph::generators::{generate_geometric, generate_random, vertex_key};
use parallel_sssp::graph::{Graph, KeyedGraph};
use parallel_sssp::parallel::{Dispatcher, PoolConfig};
use parallel_sssp::Result;

// Time one single-source run of an engine
fn benchmark_engine(engine: EngineKind, graph: &KeyedGraph<f64>, source: &str) -> Duration {
    let name = <EngineKind as ShortestPathAlgorithm<f64, KeyedGraph<f64>>>::name(&engine);
    println!("Running {} on graph with {} vertices...", name, graph.vertex_count());

    let start = Instant::now();
    let outcome: Result<DistanceMap<f64>> = engine.distances(graph, source, None);
    let reachable = match outcome {
        Ok(distances) => distances.values().filter(|d| d.is_finite()).count(),
        Err(e) => {
            println!("  - failed: {}", e);
            return Duration::ZERO;
        }
    };
    let duration = start.elapsed();

    println!("  - Found {} reachable vertices in {:?}", reachable, duration);
    duration
}

// Time a batch of starts dispatched over `workers` threads
fn benchmark_dispatch(graph: &KeyedGraph<f64>, starts: &[String], workers: usize) -> Duration {
    let dispatcher = Dispatcher::new(
        EngineKind::Linear,
        PoolConfig {
            workers,
            ..PoolConfig::default()
        },
    );

    let start = Instant::now();
    let aggregate = dispatcher.run(graph, starts);
    let duration = start.elapsed();

    println!(
        "  - {} worker(s): {} results ({} failed) in {:?}",
        workers,
        aggregate.len(),
        aggregate.failed_count(),
        duration
    );
    duration
}

fn main() {
    env_logger::init();

    let graph_sizes = [500, 1_000, 2_000, 5_000];
    let edge_factor = 3.0;
    let batch = 32;

    println!("=====================================================");
    println!("Benchmark: frontier scan vs binary heap, and fan-out");
    println!("Edge factor: {} edges per vertex (on average)", edge_factor);
    println!("=====================================================");

    let max_workers = num_cpus::get().max(1);
    let mut results = Vec::new();

    for (i, &size) in graph_sizes.iter().enumerate() {
        // Uniform random digraph, then a road-like geometric graph around Lyon
        let generated = [
            ("random", generate_random(size, edge_factor, i as u64)),
            (
                "geometric",
                generate_geometric(size, 45.70, 4.80, 0.1, 600.0, i as u64),
            ),
        ];

        for (kind, generated) in generated {
            println!("\nGenerating {} graph with {} vertices...", kind, size);
            let graph = match generated {
                Ok(graph) => graph,
                Err(e) => {
                    println!("cannot generate graph: {}", e);
                    continue;
                }
            };
            let source = vertex_key(0);

            let linear_time = benchmark_engine(EngineKind::Linear, &graph, &source);
            let heap_time = benchmark_engine(EngineKind::Heap, &graph, &source);

            let starts: Vec<String> = (0..batch.min(size)).map(vertex_key).collect();
            println!("Dispatching {} starts:", starts.len());
            let serial_time = benchmark_dispatch(&graph, &starts, 1);
            let parallel_time = benchmark_dispatch(&graph, &starts, max_workers);

            results.push((kind, size, linear_time, heap_time, serial_time, parallel_time));
        }
    }

    println!("\n=====================================================");
    println!("Summary of Results");
    println!("=====================================================");
    println!(
        "{:<10} | {:<10} | {:<12} | {:<12} | {:<12} | {:<12} | {:<10}",
        "Graph", "Vertices", "Linear (ms)", "Heap (ms)", "1 thr (ms)", "N thr (ms)", "Fan-out x"
    );
    println!("-----------------------------------------------------");

    for (kind, size, linear, heap, serial, parallel) in &results {
        let speedup = serial.as_secs_f64() / parallel.as_secs_f64().max(f64::EPSILON);
        println!(
            "{:<10} | {:<10} | {:<12} | {:<12} | {:<12} | {:<12} | {:<10.2}",
            kind,
            size,
            linear.as_millis(),
            heap.as_millis(),
            serial.as_millis(),
            parallel.as_millis(),
            speedup
        );
    }
}
