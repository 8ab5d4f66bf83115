pub mod components;
pub mod generators;
pub mod geo;
pub mod keyed;
pub mod node;
pub mod traits;

pub use keyed::{GraphBuilder, KeyedGraph};
pub use node::Node;
pub use traits::Graph;
