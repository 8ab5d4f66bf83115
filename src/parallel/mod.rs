pub mod controller;
pub mod pool;
pub mod result;

pub use controller::{Dispatcher, StartSelection, Strategy};
pub use pool::{PoolConfig, WorkerPool};
pub use result::{AggregateResult, ShortestPathResult};
