//! # Model module
//!
//! Resource references, loading options and the table structure the datasets
//! are parsed into.

mod cell;
mod error;
mod options;
mod resource;
mod table;

pub use cell::*;
pub use error::*;
pub use options::*;
pub use resource::*;
pub use table::*;
