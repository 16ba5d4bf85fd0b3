//! Domain types for the station access planner.
//!
//! This module contains the core model of the rail network: identifiers,
//! stations, lines, clusters and search constraints. Types that carry an
//! invariant enforce it at construction time, so code that receives them
//! can trust their validity.

mod cluster;
mod constraint;
mod error;
mod ids;
mod line;
mod station;

pub use cluster::{ClusterInfo, LineBadge};
pub use constraint::Constraint;
pub use error::DomainError;
pub use ids::{ClusterId, LineId, RegionCode, StationId};
pub use line::Line;
pub use station::{Coordinates, Station};
