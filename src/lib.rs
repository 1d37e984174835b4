//! WASTE SKIPS LIBRARY
//!
//! This library ships the Blantyre waste skips datasets and loads them into
//! in-memory tables: [`load_skips`] for the November 2023 skip listing and
//! [`load_dictionary`] for the data dictionary describing it.

pub mod actor;
pub mod adapter;
pub mod model;
pub mod service;

pub use service::{load_dictionary, load_skips};

pub type Result<T> = anyhow::Result<T>;
