//! # Actor module
//!
//! The actors are controlers. They take the tables produced by the services
//! and push them to the outside world.

mod exporter;

pub use exporter::*;
