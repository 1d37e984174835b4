use std::fmt;

/// Identifies a data file bundled with a package: the package identifier and
/// the file name relative to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ResourceRef {
    /// The package the file is shipped with.
    pub package: &'static str,

    /// The file name, relative to the package data directory.
    pub name: &'static str,
}

impl ResourceRef {
    /// Package identifier of the bundled datasets.
    pub const PACKAGE: &'static str = "wasteskipsblantyre.data";

    /// The November 2023 skip listing.
    pub const SKIPS: Self = Self::new(Self::PACKAGE, "skips_November_2023.csv");

    /// The data dictionary describing the skip listing columns.
    pub const DICTIONARY: Self = Self::new(Self::PACKAGE, "dictionary.csv");

    /// Create a new resource reference.
    ///
    /// ```
    /// use waste_skips::model::ResourceRef;
    ///
    /// let reference = ResourceRef::new("some.package", "table.csv");
    /// assert_eq!(reference.to_string(), "some.package/table.csv");
    /// ```
    pub const fn new(package: &'static str, name: &'static str) -> Self {
        Self { package, name }
    }
}

impl fmt::Display for ResourceRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.package, self.name)
    }
}
