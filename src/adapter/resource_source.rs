use std::{
    fs::File,
    io::{BufReader, ErrorKind, Read},
    path::{Path, PathBuf},
};

use log::debug;

use crate::model::{LoadError, ResourceRef};

/// Resource source trait.
///
/// A resource source resolves a resource reference to a reader. The reader is
/// owned by the caller and released when dropped, the source keeps no handle.
pub trait ResourceSource {
    /// Open the referenced resource for reading.
    /// Fails with [`LoadError::ResourceNotFound`] if the resource is absent.
    fn open(&self, reference: &ResourceRef) -> Result<Box<dyn Read + '_>, LoadError>;
}

/// An embedded resource: its reference and its content.
pub type EmbeddedResource = (ResourceRef, &'static [u8]);

/// The datasets shipped with this crate, compiled in at build time.
pub const BUNDLED_RESOURCES: &[EmbeddedResource] = &[
    (
        ResourceRef::SKIPS,
        include_bytes!(concat!(
            env!("CARGO_MANIFEST_DIR"),
            "/data/skips_November_2023.csv"
        )),
    ),
    (
        ResourceRef::DICTIONARY,
        include_bytes!(concat!(env!("CARGO_MANIFEST_DIR"), "/data/dictionary.csv")),
    ),
];

/// Resources embedded in the binary.
#[derive(Debug, Clone, Copy)]
pub struct EmbeddedResources {
    entries: &'static [EmbeddedResource],
}

impl Default for EmbeddedResources {
    fn default() -> Self {
        Self::bundled()
    }
}

impl EmbeddedResources {
    /// Resources from the given static table.
    pub fn new(entries: &'static [EmbeddedResource]) -> Self {
        Self { entries }
    }

    /// The datasets shipped with this crate.
    pub fn bundled() -> Self {
        Self::new(BUNDLED_RESOURCES)
    }

    /// Content of the referenced resource, if embedded.
    pub fn get(&self, reference: &ResourceRef) -> Option<&'static [u8]> {
        self.entries
            .iter()
            .find(|(entry, _)| entry == reference)
            .map(|(_, content)| *content)
    }
}

impl ResourceSource for EmbeddedResources {
    fn open(&self, reference: &ResourceRef) -> Result<Box<dyn Read + '_>, LoadError> {
        let content = self
            .get(reference)
            .ok_or_else(|| LoadError::ResourceNotFound {
                resource: reference.to_string(),
                location: "embedded resources".to_string(),
            })?;
        debug!(
            "Resolved '{}' to {} embedded bytes.",
            reference,
            content.len()
        );

        Ok(Box::new(content))
    }
}

/// Resources read from files under a base directory.
///
/// A reference resolves to `<base_dir>/<name>`, the package identifier is not
/// part of the path.
#[derive(Debug, Clone)]
pub struct DirectoryResources {
    base_dir: PathBuf,
}

impl DirectoryResources {
    /// Create a source rooted at the given directory.
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// The path a reference resolves to.
    pub fn resolve(&self, reference: &ResourceRef) -> PathBuf {
        self.base_dir.join(reference.name)
    }
}

impl ResourceSource for DirectoryResources {
    fn open(&self, reference: &ResourceRef) -> Result<Box<dyn Read + '_>, LoadError> {
        let path = self.resolve(reference);
        debug!("Resolved '{}' to '{}'.", reference, path.display());

        let file = File::open(&path).map_err(|error| match error.kind() {
            ErrorKind::NotFound => LoadError::ResourceNotFound {
                resource: reference.to_string(),
                location: path.display().to_string(),
            },
            _ => LoadError::Io {
                resource: reference.to_string(),
                source: error,
            },
        })?;

        Ok(Box::new(BufReader::new(file)))
    }
}
