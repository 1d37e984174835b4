//! Service module
//!
//! The table loader resolves resource references through a resource source
//! and parses them into tables. Each call re-resolves and re-reads the
//! resource, nothing is cached between calls.

mod table_loader;

pub use table_loader::*;
