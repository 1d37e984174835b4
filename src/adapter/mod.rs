//! The adapter module holds the resource sources: the different ways a
//! resource reference is resolved to a readable byte stream. They are the
//! only part of the crate touching the outside world (files).

mod resource_source;

pub use resource_source::*;
