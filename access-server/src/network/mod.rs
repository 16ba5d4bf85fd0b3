//! The rail network graph.
//!
//! The graph is built once from line and station records and never
//! mutated afterwards. Searches borrow it immutably, so any number of them
//! may run against the same graph at once.

mod error;
mod graph;
mod input;

pub use error::NetworkError;
pub use graph::{Edge, NetworkGraph};
pub use input::{LineRecord, NetworkData, StationRecord};
