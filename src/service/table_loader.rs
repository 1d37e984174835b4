use log::debug;

use crate::{
    adapter::{EmbeddedResources, ResourceSource},
    model::{LoadError, LoaderOptions, ResourceRef, Table},
};

/// Loads resources from a source into tables.
#[derive(Debug, Clone, Default)]
pub struct TableLoader<S> {
    source: S,
    options: LoaderOptions,
}

impl TableLoader<EmbeddedResources> {
    /// A loader over the datasets shipped with this crate.
    pub fn bundled() -> Self {
        Self::new(EmbeddedResources::bundled())
    }
}

impl<S: ResourceSource> TableLoader<S> {
    /// Create a new loader with default options.
    pub fn new(source: S) -> Self {
        Self {
            source,
            options: LoaderOptions::default(),
        }
    }

    /// Replace the parsing options.
    pub fn with_options(mut self, options: LoaderOptions) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> &LoaderOptions {
        &self.options
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Resolve and parse the referenced resource.
    ///
    /// The reader is dropped before this returns, whether parsing succeeded
    /// or not.
    pub fn load(&self, reference: &ResourceRef) -> Result<Table, LoadError> {
        debug!("Loading resource '{reference}'.");
        let reader = self.source.open(reference)?;
        let table = Table::from_reader(reader, &self.options).map_err(|source| LoadError::Parse {
            resource: reference.to_string(),
            source,
        })?;
        debug!(
            "Loaded resource '{}': {} rows, {} columns.",
            reference,
            table.row_count(),
            table.column_count()
        );

        Ok(table)
    }

    /// Load the November 2023 skip listing.
    pub fn load_skips(&self) -> Result<Table, LoadError> {
        self.load(&ResourceRef::SKIPS)
    }

    /// Load the data dictionary.
    pub fn load_dictionary(&self) -> Result<Table, LoadError> {
        self.load(&ResourceRef::DICTIONARY)
    }
}

/// Load the bundled November 2023 skip listing.
///
/// ```
/// let skips = waste_skips::load_skips().unwrap();
///
/// assert_eq!(skips.column_names()[..3], ["id", "name", "ward"]);
/// assert!(skips.row_count() > 0);
/// ```
pub fn load_skips() -> Result<Table, LoadError> {
    TableLoader::bundled().load_skips()
}

/// Load the bundled data dictionary.
///
/// ```
/// let dictionary = waste_skips::load_dictionary().unwrap();
///
/// assert!(dictionary.column("variable_name").is_some());
/// ```
pub fn load_dictionary() -> Result<Table, LoadError> {
    TableLoader::bundled().load_dictionary()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        adapter::{DirectoryResources, EmbeddedResource},
        model::{Cell, ColumnType, RaggedRows, TableError},
    };

    const SKIPS_COLUMNS: [&str; 9] = [
        "id",
        "name",
        "ward",
        "lat",
        "long",
        "skip_count",
        "condition",
        "emptied_weekly",
        "notes",
    ];
    const SKIPS_CSV: &str = include_str!("../../data/skips_November_2023.csv");
    const DICTIONARY_CSV: &str = include_str!("../../data/dictionary.csv");

    fn line_count(data: &str) -> usize {
        data.lines().filter(|line| !line.is_empty()).count()
    }

    #[test]
    fn test_load_skips() {
        let skips = load_skips().unwrap();

        assert_eq!(skips.column_names(), SKIPS_COLUMNS);
        assert_eq!(skips.row_count(), line_count(SKIPS_CSV) - 1);
        assert_eq!(skips.row_count(), 30);
    }

    #[test]
    fn test_skips_column_types() {
        let skips = load_skips().unwrap();
        let types: Vec<ColumnType> = skips
            .columns()
            .iter()
            .map(|column| column.column_type())
            .collect();

        assert_eq!(
            types,
            vec![
                ColumnType::Integer,
                ColumnType::Text,
                ColumnType::Text,
                ColumnType::Float,
                ColumnType::Float,
                ColumnType::Integer,
                ColumnType::Text,
                ColumnType::Boolean,
                ColumnType::Text,
            ]
        );
        assert_eq!(
            skips.get(0, "name"),
            Some(&Cell::Text("Limbe Market".to_string()))
        );
        assert_eq!(
            skips.get(2, "notes"),
            Some(&Cell::Text("Wheels missing, relocated 2023-09".to_string()))
        );
        // empty and NA conditions
        assert_eq!(skips.get(15, "condition"), Some(&Cell::Missing));
        assert_eq!(skips.get(29, "condition"), Some(&Cell::Missing));
    }

    #[test]
    fn test_load_dictionary() {
        let dictionary = load_dictionary().unwrap();
        let header: Vec<&str> = DICTIONARY_CSV
            .lines()
            .next()
            .unwrap()
            .split(',')
            .collect();

        assert_eq!(dictionary.column_names(), header);
        assert_eq!(dictionary.row_count(), line_count(DICTIONARY_CSV) - 1);
    }

    #[test]
    fn test_dictionary_describes_skips() {
        let dictionary = load_dictionary().unwrap();
        let described: Vec<&str> = dictionary
            .column("variable_name")
            .unwrap()
            .cells()
            .filter_map(Cell::as_str)
            .collect();

        assert_eq!(described, SKIPS_COLUMNS);
    }

    #[test]
    fn test_loads_are_idempotent() {
        assert_eq!(load_skips().unwrap(), load_skips().unwrap());
        assert_eq!(load_dictionary().unwrap(), load_dictionary().unwrap());
    }

    #[test]
    fn test_missing_resources_are_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let loader = TableLoader::new(DirectoryResources::new(dir.path()));

        assert!(loader.load_skips().unwrap_err().is_not_found());
        assert!(loader.load_dictionary().unwrap_err().is_not_found());
    }

    #[test]
    fn test_renamed_resource_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("skips_December_2023.csv"), SKIPS_CSV).unwrap();
        std::fs::write(dir.path().join("dictionary.csv"), DICTIONARY_CSV).unwrap();
        let loader = TableLoader::new(DirectoryResources::new(dir.path()));

        assert!(loader.load_skips().unwrap_err().is_not_found());
        assert_eq!(
            loader.load_dictionary().unwrap(),
            load_dictionary().unwrap()
        );
    }

    #[test]
    fn test_directory_matches_bundled() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("skips_November_2023.csv"), SKIPS_CSV).unwrap();
        let loader = TableLoader::new(DirectoryResources::new(dir.path()));

        assert_eq!(loader.load_skips().unwrap(), load_skips().unwrap());
    }

    #[test]
    fn test_embedded_not_found() {
        static ENTRIES: &[EmbeddedResource] = &[];
        let loader = TableLoader::new(EmbeddedResources::new(ENTRIES));

        let error = loader.load_skips().unwrap_err();
        assert!(matches!(error, LoadError::ResourceNotFound { .. }));
    }

    #[test]
    fn test_ragged_resource() {
        static ENTRIES: &[EmbeddedResource] =
            &[(ResourceRef::DICTIONARY, b"a,b,c\n1,2,3\n4,5\n")];

        let table = TableLoader::new(EmbeddedResources::new(ENTRIES))
            .load_dictionary()
            .unwrap();
        assert_eq!(table.shape(), (2, 3));
        assert_eq!(table.get(1, "c"), Some(&Cell::Missing));

        let strict = TableLoader::new(EmbeddedResources::new(ENTRIES))
            .with_options(LoaderOptions::default().with_ragged_rows(RaggedRows::Strict));
        match strict.load_dictionary().unwrap_err() {
            LoadError::Parse { resource, source } => {
                assert_eq!(resource, ResourceRef::DICTIONARY.to_string());
                assert!(matches!(source, TableError::RaggedRow { line: 3, .. }));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_empty_resource() {
        static ENTRIES: &[EmbeddedResource] = &[(ResourceRef::SKIPS, b"")];
        let loader = TableLoader::new(EmbeddedResources::new(ENTRIES));

        assert!(matches!(
            loader.load_skips().unwrap_err(),
            LoadError::Parse {
                source: TableError::NoColumns,
                ..
            }
        ));
    }
}
