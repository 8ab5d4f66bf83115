use parallel_sssp::algorithm::dijkstra::Dijkstra;
use parallel_sssp::algorithm::heap_dijkstra::HeapDijkstra;
use parallel_sssp::algorithm::{
    CancellationToken, DistanceMap, ShortestPathAlgorithm, ShortestPathTree,
};
use parallel_sssp::graph::components::{largest_component, weak_components};
use parallel_sssp::graph::generators::{
    generate_geometric, generate_grid, generate_random, vertex_key,
};
use parallel_sssp::graph::geo::haversine_meters;
use parallel_sssp::graph::{Graph, GraphBuilder, KeyedGraph, Node};
use parallel_sssp::{shortest_path, shortest_paths, Error};
use std::collections::HashMap;

// A -> B (1), A -> C (4), B -> C (2), B -> D (5), C -> D (1)
fn create_diamond() -> GraphBuilder<f64> {
    GraphBuilder::new()
        .edge("A", "B", 1.0)
        .edge("A", "C", 4.0)
        .edge("B", "C", 2.0)
        .edge("B", "D", 5.0)
        .edge("C", "D", 1.0)
        .node("D")
}

fn linear(graph: &KeyedGraph<f64>, start: &str) -> DistanceMap<f64> {
    Dijkstra.distances(graph, start, None).unwrap()
}

fn heap(graph: &KeyedGraph<f64>, start: &str) -> DistanceMap<f64> {
    HeapDijkstra.distances(graph, start, None).unwrap()
}

// Minimum cost over every simple path from `start`, by exhaustive DFS
fn brute_force(graph: &KeyedGraph<f64>, start: &str) -> HashMap<String, f64> {
    fn explore(
        graph: &KeyedGraph<f64>,
        u: usize,
        cost: f64,
        on_path: &mut Vec<bool>,
        best: &mut Vec<f64>,
    ) {
        if cost < best[u] {
            best[u] = cost;
        }
        for (v, w) in graph.outgoing_edges(u) {
            if !on_path[v] {
                on_path[v] = true;
                explore(graph, v, cost + w, on_path, best);
                on_path[v] = false;
            }
        }
    }

    let n = graph.vertex_count();
    let s = graph.index_of(start).unwrap();
    let mut best = vec![f64::INFINITY; n];
    let mut on_path = vec![false; n];
    on_path[s] = true;
    explore(graph, s, 0.0, &mut on_path, &mut best);

    (0..n)
        .map(|v| (graph.key_of(v).unwrap().to_string(), best[v]))
        .collect()
}

fn assert_same_distances(actual: &DistanceMap<f64>, expected: &HashMap<String, f64>) {
    assert_eq!(actual.len(), expected.len());
    for (key, &want) in expected {
        let got = actual[key];
        if want.is_infinite() {
            assert!(got.is_infinite(), "{} should be unreachable, got {}", key, got);
        } else {
            assert!((got - want).abs() < 1e-9, "{}: expected {}, got {}", key, want, got);
        }
    }
}

#[test]
fn test_diamond_distances() {
    let graph = create_diamond().build().unwrap();
    let distances = shortest_paths(&graph, "A").unwrap();

    assert_eq!(distances.len(), 4);
    assert_eq!(distances["A"], 0.0);
    assert_eq!(distances["B"], 1.0);
    assert_eq!(distances["C"], 3.0);
    assert_eq!(distances["D"], 4.0);
}

#[test]
fn test_disconnected_node_is_unreachable() {
    let graph = create_diamond().node("E").build().unwrap();

    let distances = shortest_paths(&graph, "A").unwrap();
    assert_eq!(distances["E"], f64::INFINITY);

    // Directed: nothing leads back to A from D
    let from_d = shortest_paths(&graph, "D").unwrap();
    assert_eq!(from_d["D"], 0.0);
    assert!(from_d["A"].is_infinite());
}

#[test]
fn test_point_to_point_takes_cheapest_route() {
    let graph = create_diamond().build().unwrap();
    let path = shortest_path(&graph, "A", "D").unwrap();

    assert_eq!(path.nodes, vec!["A", "B", "C", "D"]);
    assert_eq!(path.cost, 4.0);
}

#[test]
fn test_point_to_point_same_node() {
    let graph = create_diamond().build().unwrap();
    let path = shortest_path(&graph, "B", "B").unwrap();

    assert_eq!(path.nodes, vec!["B"]);
    assert_eq!(path.cost, 0.0);
}

#[test]
fn test_unreachable_end_reports_path_not_found() {
    let graph = create_diamond().node("E").build().unwrap();

    match shortest_path(&graph, "A", "E") {
        Err(Error::PathNotFound { start, end }) => {
            assert_eq!(start, "A");
            assert_eq!(end, "E");
        }
        other => panic!("expected PathNotFound, got {:?}", other),
    }
    assert!(matches!(
        shortest_path(&graph, "D", "A"),
        Err(Error::PathNotFound { .. })
    ));
}

#[test]
fn test_predecessor_walk_rejects_cycles_and_broken_chains() {
    // 1 and 2 point at each other and never lead back to source 0
    let cyclic = ShortestPathTree {
        distances: vec![0.0, 1.0, 2.0],
        predecessors: vec![None, Some(2), Some(1)],
        source: 0,
    };
    assert_eq!(cyclic.path_to(1), None);
    assert_eq!(cyclic.path_to(2), None);
    assert_eq!(cyclic.path_to(0), Some(vec![0]));

    // 3 -> 2 -> (nothing): the chain stops short of the source
    let broken = ShortestPathTree {
        distances: vec![0.0, 1.0, 2.0, 3.0],
        predecessors: vec![None, Some(0), None, Some(2)],
        source: 0,
    };
    assert_eq!(broken.path_to(3), None);
    assert_eq!(broken.path_to(2), None);
    assert_eq!(broken.path_to(1), Some(vec![0, 1]));

    // Out of range targets are unreachable
    assert_eq!(broken.path_to(9), None);
}

#[test]
fn test_missing_nodes_are_reported() {
    let graph = create_diamond().build().unwrap();

    assert!(matches!(shortest_paths(&graph, "Z"), Err(Error::NodeNotFound(k)) if k == "Z"));
    assert!(matches!(shortest_path(&graph, "A", "Z"), Err(Error::NodeNotFound(k)) if k == "Z"));
    assert!(matches!(shortest_path(&graph, "Z", "A"), Err(Error::NodeNotFound(k)) if k == "Z"));
}

#[test]
fn test_dangling_neighbor_is_ignored() {
    let graph = create_diamond().edge("C", "ghost", 0.5).build().unwrap();

    assert_eq!(graph.dangling_references().len(), 1);
    assert_eq!(graph.dangling_references()[0], ("C".to_string(), "ghost".to_string()));

    let distances = shortest_paths(&graph, "A").unwrap();
    assert_eq!(distances.len(), 4);
    assert!(!distances.contains_key("ghost"));
    assert_eq!(distances["D"], 4.0);
}

#[test]
fn test_negative_weight_is_rejected() {
    let result = GraphBuilder::new().edge("A", "B", -1.0).node("B").build();
    assert!(matches!(result, Err(Error::NegativeWeight { .. })));

    let nan = GraphBuilder::new().edge("A", "B", f64::NAN).node("B").build();
    assert!(matches!(nan, Err(Error::NegativeWeight { .. })));
}

#[test]
fn test_zero_weight_edges() {
    let graph = GraphBuilder::new()
        .edge("A", "B", 0.0)
        .edge("B", "C", 0.0)
        .edge("A", "C", 1.0)
        .node("C")
        .build()
        .unwrap();

    let distances = shortest_paths(&graph, "A").unwrap();
    assert_eq!(distances["C"], 0.0);
    assert_eq!(shortest_path(&graph, "A", "C").unwrap().nodes, vec!["A", "B", "C"]);
}

#[test]
fn test_matches_brute_force_on_small_graphs() {
    for seed in 0..20 {
        let graph = generate_random(7, 2.0, seed).unwrap();
        for start in graph.keys() {
            let expected = brute_force(&graph, start);
            assert_same_distances(&linear(&graph, start), &expected);
            assert_same_distances(&heap(&graph, start), &expected);
        }
    }
}

#[test]
fn test_start_is_always_zero() {
    let graph = generate_random(40, 2.5, 3).unwrap();
    for start in graph.keys() {
        assert_eq!(linear(&graph, start)[start], 0.0);
    }
}

#[test]
fn test_repeated_runs_are_identical() {
    let graph = generate_random(60, 3.0, 5).unwrap();
    let first = linear(&graph, "n0");
    let second = linear(&graph, "n0");
    assert_eq!(first, second);
}

#[test]
fn test_engines_agree_on_random_graphs() {
    for seed in 100..105 {
        let graph = generate_random(150, 3.0, seed).unwrap();
        let expected: HashMap<String, f64> = linear(&graph, "n0").into_iter().collect();
        assert_same_distances(&heap(&graph, "n0"), &expected);
    }
}

#[test]
fn test_path_finding_simple_grid() {
    let graph = generate_grid(10, 10).unwrap();
    let source = vertex_key(0);
    let target = vertex_key(99);

    let path = Dijkstra.shortest_path(&graph, &source, &target).unwrap();
    assert_eq!(path.cost, 18.0);
    assert_eq!(path.nodes.first(), Some(&source));
    assert_eq!(path.nodes.last(), Some(&target));
    assert_eq!(path.nodes.len(), 19);

    // Path continuity
    for pair in path.nodes.windows(2) {
        let u = graph.index_of(&pair[0]).unwrap();
        let v = graph.index_of(&pair[1]).unwrap();
        assert!(graph.has_edge(u, v), "Path should only use existing edges");
    }

    let heap_path = HeapDijkstra.shortest_path(&graph, &source, &target).unwrap();
    assert_eq!(heap_path.cost, path.cost);
}

#[test]
fn test_cancelled_run_aborts() {
    let graph = generate_grid(5, 5).unwrap();
    let token = CancellationToken::new();
    token.cancel();

    let linear_result = Dijkstra.distances(&graph, "n0", Some(&token));
    let heap_result = HeapDijkstra.distances(&graph, "n0", Some(&token));

    assert!(matches!(linear_result, Err(Error::Cancelled(k)) if k == "n0"));
    assert!(matches!(heap_result, Err(Error::Cancelled(k)) if k == "n0"));
}

#[test]
fn test_largest_component_keeps_biggest_island() {
    let graph = GraphBuilder::new()
        .undirected_edge("a", "b", 1.0)
        .undirected_edge("b", "c", 1.0)
        .edge("d", "e", 2.0)
        .node("e")
        .node("lonely")
        .build()
        .unwrap();

    assert_eq!(weak_components(&graph).len(), 3);

    let main = largest_component(&graph);
    let keys: Vec<&str> = main.keys().collect();
    assert_eq!(keys, vec!["a", "b", "c"]);
    assert_eq!(main.edge_count(), 4);
    assert!(shortest_paths(&main, "a").unwrap().values().all(|d| d.is_finite()));
}

#[test]
fn test_geometric_graph_is_symmetric_and_metric() {
    let graph = generate_geometric(60, 45.70, 4.80, 0.02, 800.0, 7).unwrap();
    assert_eq!(graph.vertex_count(), 60);
    assert!(graph.edge_count() > 0);

    for u in 0..graph.vertex_count() {
        let a = graph.node(graph.key_of(u).unwrap()).unwrap();
        for (v, weight) in graph.outgoing_edges(u) {
            let b = graph.node(graph.key_of(v).unwrap()).unwrap();
            assert_eq!(graph.get_edge_weight(v, u), Some(weight));
            assert!((weight - haversine_meters(a.lat, a.lon, b.lat, b.lon)).abs() < 1e-6);
            assert!(weight <= 800.0);
        }
    }

    for i in [0, 13, 59] {
        let start = vertex_key(i);
        let expected: HashMap<String, f64> = linear(&graph, &start).into_iter().collect();
        assert_same_distances(&heap(&graph, &start), &expected);
    }
}

#[test]
fn test_geometric_graph_rejects_bad_arguments() {
    assert!(matches!(
        generate_geometric(10, 45.0, 4.0, 0.0, 100.0, 1),
        Err(Error::InvalidConfig(_))
    ));
    assert!(matches!(
        generate_geometric(10, 45.0, 4.0, -1.0, 100.0, 1),
        Err(Error::InvalidConfig(_))
    ));
    assert!(matches!(
        generate_geometric(10, 45.0, 4.0, 0.1, f64::NAN, 1),
        Err(Error::InvalidConfig(_))
    ));
}

#[test]
fn test_node_records_pass_through() {
    let stop = Node::at("stop", 45.76, 4.83)
        .with_neighbor("depot", 3.5)
        .with_neighbor("depot", 2.5);
    let graph = GraphBuilder::new()
        .record("stop", stop.clone())
        .node("depot")
        .build()
        .unwrap();

    assert_eq!(graph.node("stop"), Some(&stop));
    assert_eq!(stop.neighbors.len(), 1);
    assert_eq!(shortest_paths(&graph, "stop").unwrap()["depot"], 2.5);
}
