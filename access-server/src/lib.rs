//! Station access planner.
//!
//! Answers two questions over a rail network: "which stations can I reach
//! from here within N transfers and M minutes?" and "what is the best way
//! to get from this station to that one under the same limits?"

pub mod cache;
pub mod domain;
pub mod network;
pub mod planner;
pub mod web;
