use thiserror::Error;

use super::TableError;

/// The error type for resource loading.
///
/// None of these conditions is recovered locally, they are all surfaced to
/// the caller as is.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The resource does not exist in the source it was looked up in.
    #[error("Resource '{resource}' not found in {location}.")]
    ResourceNotFound {
        /// The resource that was looked up.
        resource: String,

        /// Where it was looked up (a path or the embedded table).
        location: String,
    },

    /// The resource exists but could not be read.
    #[error("Could not read resource '{resource}': {source}")]
    Io {
        /// The resource being read.
        resource: String,

        /// The underlying IO error.
        source: std::io::Error,
    },

    /// The resource content is not well formed tabular data.
    #[error("Could not parse resource '{resource}': {source}")]
    Parse {
        /// The resource being parsed.
        resource: String,

        /// What went wrong.
        source: TableError,
    },
}

impl LoadError {
    /// Is this a resource-not-found condition?
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::ResourceNotFound { .. })
    }
}
