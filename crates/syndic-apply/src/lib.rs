//! syndic reconciler library entry.
//!
//! This crate wires the cluster admin client, the three reconciliation
//! stages, and the driver into a one-shot manifest applier. It is intended
//! to be consumed by the binary (`main.rs`) and by integration tests.

pub mod cluster;
pub mod driver;
pub mod stage;
