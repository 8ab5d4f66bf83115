use crate::graph::geo::haversine_meters;
use crate::graph::keyed::{GraphBuilder, KeyedGraph};
use crate::graph::node::Node;
use crate::{Error, Result};
use rand::prelude::*;
use rand::rngs::StdRng;

/// Key used for the i-th generated vertex
pub fn vertex_key(i: usize) -> String {
    format!("n{}", i)
}

/// Generates a random directed graph with `n` vertices and roughly
/// `edge_factor * n` edges with weights in `1.0..100.0`.
/// The same seed always yields the same graph.
pub fn generate_random(n: usize, edge_factor: f64, seed: u64) -> Result<KeyedGraph<f64>> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut builder = GraphBuilder::new();

    for i in 0..n {
        builder = builder.node(&vertex_key(i));
    }

    let num_edges = (edge_factor * n as f64) as usize;
    if n > 1 {
        for _ in 0..num_edges {
            let u = rng.gen_range(0..n);
            let v = rng.gen_range(0..n);
            // Avoid self-loops
            if u != v {
                let weight = rng.gen_range(1.0..100.0);
                builder = builder.edge(&vertex_key(u), &vertex_key(v), weight);
            }
        }
    }

    builder.build()
}

/// Generates a `width * height` grid with unit-weight edges in both
/// directions between 4-connected cells. Vertex `y * width + x` sits at
/// lat = y, lon = x.
pub fn generate_grid(width: usize, height: usize) -> Result<KeyedGraph<f64>> {
    let mut builder = GraphBuilder::new();
    let index = |x: usize, y: usize| vertex_key(y * width + x);

    for y in 0..height {
        for x in 0..width {
            builder = builder.record(&index(x, y), Node::at("node", y as f64, x as f64));
        }
    }

    for y in 0..height {
        for x in 0..width {
            if x + 1 < width {
                builder = builder.undirected_edge(&index(x, y), &index(x + 1, y), 1.0);
            }
            if y + 1 < height {
                builder = builder.undirected_edge(&index(x, y), &index(x, y + 1), 1.0);
            }
        }
    }

    builder.build()
}

/// Generates a random road-like graph: `n` points scattered in a
/// `span_deg` square around (`lat`, `lon`), linked in both directions when
/// closer than `radius_m`, weighted by haversine distance in meters.
///
/// `span_deg` must be positive and `radius_m` non-negative.
pub fn generate_geometric(
    n: usize,
    lat: f64,
    lon: f64,
    span_deg: f64,
    radius_m: f64,
    seed: u64,
) -> Result<KeyedGraph<f64>> {
    if !(span_deg.is_finite() && span_deg > 0.0) {
        return Err(Error::InvalidConfig(format!(
            "span must be a positive number of degrees, got {}",
            span_deg
        )));
    }
    if radius_m.is_nan() || radius_m < 0.0 {
        return Err(Error::InvalidConfig(format!(
            "link radius must be non-negative, got {}",
            radius_m
        )));
    }

    let mut rng = StdRng::seed_from_u64(seed);

    let points: Vec<(f64, f64)> = (0..n)
        .map(|_| {
            (
                lat + rng.gen_range(0.0..span_deg),
                lon + rng.gen_range(0.0..span_deg),
            )
        })
        .collect();

    let mut builder = GraphBuilder::new();
    for (i, &(plat, plon)) in points.iter().enumerate() {
        builder = builder.record(&vertex_key(i), Node::at("node", plat, plon));
    }

    for i in 0..n {
        for j in (i + 1)..n {
            let (lat1, lon1) = points[i];
            let (lat2, lon2) = points[j];
            let dist = haversine_meters(lat1, lon1, lat2, lon2);
            if dist <= radius_m {
                builder = builder.undirected_edge(&vertex_key(i), &vertex_key(j), dist);
            }
        }
    }

    builder.build()
}
