use std::{collections::HashSet, io::Read};

use csv::{ReaderBuilder, StringRecord, Trim};
use thiserror::Error;

use super::{Cell, ColumnType, LoaderOptions, RaggedRows};

/// The error type for table parsing.
#[derive(Debug, Error)]
pub enum TableError {
    /// The CSV reader failed (bad quoting, invalid UTF-8, IO).
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A row does not have the header's field count.
    #[error("Row at line {line} has {found} fields, {expected} expected.")]
    RaggedRow {
        /// The line the row starts at (1 based).
        line: u64,

        /// The header field count.
        expected: usize,

        /// The row field count.
        found: usize,
    },

    /// There is no header line to take column names from.
    #[error("No columns to parse.")]
    NoColumns,
}

/// A named and typed table column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    name: String,
    column_type: ColumnType,
}

impl Column {
    /// The column name, after header normalization.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The type inferred from the column values.
    pub fn column_type(&self) -> ColumnType {
        self.column_type
    }
}

/// Borrowed view over one column of a table.
#[derive(Debug, Clone, Copy)]
pub struct ColumnView<'a> {
    table: &'a Table,
    index: usize,
}

impl<'a> ColumnView<'a> {
    /// The column name.
    pub fn name(&self) -> &'a str {
        let table = self.table;
        table.columns[self.index].name()
    }

    /// The column type.
    pub fn column_type(&self) -> ColumnType {
        self.table.columns[self.index].column_type()
    }

    /// The column cells, in row order.
    pub fn cells(&self) -> impl Iterator<Item = &'a Cell> + 'a {
        let (table, index) = (self.table, self.index);
        table.rows.iter().map(move |row| &row[index])
    }
}

/// In-memory table: named typed columns and an ordered sequence of rows.
///
/// Every row holds exactly one cell per column.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Table {
    columns: Vec<Column>,
    rows: Vec<Vec<Cell>>,
}

impl Table {
    /// Parse delimited data. The first record holds the column names, blank
    /// lines are skipped and column types are inferred from the values.
    ///
    /// ```
    /// use waste_skips::model::{Cell, ColumnType, LoaderOptions, Table};
    ///
    /// let data = "name,skip_count\n\"Limbe, Market\",4\nMbayani,\n";
    /// let table = Table::from_reader(data.as_bytes(), &LoaderOptions::default()).unwrap();
    ///
    /// assert_eq!(table.shape(), (2, 2));
    /// assert_eq!(table.column_names(), vec!["name", "skip_count"]);
    /// assert_eq!(table.column("skip_count").unwrap().column_type(), ColumnType::Integer);
    /// assert_eq!(table.get(0, "name"), Some(&Cell::Text("Limbe, Market".to_string())));
    /// assert_eq!(table.get(1, "skip_count"), Some(&Cell::Missing));
    /// ```
    pub fn from_reader<R: Read>(reader: R, options: &LoaderOptions) -> Result<Self, TableError> {
        let mut csv_reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .delimiter(options.delimiter)
            .trim(if options.trim { Trim::All } else { Trim::None })
            .from_reader(reader);
        let mut records = csv_reader.records();

        let header = records.next().ok_or(TableError::NoColumns)??;
        if header.is_empty() {
            return Err(TableError::NoColumns);
        }
        let names = normalize_headers(&header);

        let mut raw_rows: Vec<StringRecord> = Vec::new();
        for result in records {
            let record = result?;
            check_row_length(&record, names.len(), options.ragged_rows)?;
            raw_rows.push(record);
        }

        let columns: Vec<Column> = names
            .into_iter()
            .enumerate()
            .map(|(index, name)| Column {
                name,
                column_type: ColumnType::infer(raw_rows.iter().filter_map(|r| r.get(index))),
            })
            .collect();

        let rows = raw_rows
            .iter()
            .map(|record| {
                columns
                    .iter()
                    .enumerate()
                    .map(|(index, column)| match record.get(index) {
                        Some(raw) => column.column_type.convert(raw),
                        None => Cell::Missing,
                    })
                    .collect()
            })
            .collect();

        Ok(Self { columns, rows })
    }

    /// The columns, in header order.
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// The column names, in header order.
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(Column::name).collect()
    }

    /// Number of columns.
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Number of rows, the header excluded.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// `(rows, columns)`
    pub fn shape(&self) -> (usize, usize) {
        (self.row_count(), self.column_count())
    }

    /// Does the table have no row?
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Position of the named column.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|column| column.name == name)
    }

    /// View over the named column.
    pub fn column(&self, name: &str) -> Option<ColumnView<'_>> {
        self.column_index(name)
            .map(|index| ColumnView { table: self, index })
    }

    /// Cells of the given row.
    pub fn row(&self, index: usize) -> Option<&[Cell]> {
        self.rows.get(index).map(Vec::as_slice)
    }

    /// Rows, in source order.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.rows.iter().map(Vec::as_slice)
    }

    /// Cell at the given row in the named column.
    pub fn get(&self, row: usize, column: &str) -> Option<&Cell> {
        let index = self.column_index(column)?;
        self.rows.get(row).map(|cells| &cells[index])
    }
}

/// Empty names become `Unnamed: <position>`, repeated names get a `.<n>`
/// suffix.
fn normalize_headers(header: &StringRecord) -> Vec<String> {
    let mut taken: HashSet<String> = HashSet::with_capacity(header.len());
    let mut names = Vec::with_capacity(header.len());

    for (index, raw) in header.iter().enumerate() {
        let base = if raw.is_empty() {
            format!("Unnamed: {index}")
        } else {
            raw.to_string()
        };
        let mut name = base.clone();
        let mut suffix = 1;
        while taken.contains(&name) {
            name = format!("{base}.{suffix}");
            suffix += 1;
        }
        taken.insert(name.clone());
        names.push(name);
    }

    names
}

fn check_row_length(
    record: &StringRecord,
    expected: usize,
    policy: RaggedRows,
) -> Result<(), TableError> {
    let found = record.len();
    let accepted = match policy {
        RaggedRows::Strict => found == expected,
        RaggedRows::PadShort => found <= expected,
    };
    if accepted {
        return Ok(());
    }

    Err(TableError::RaggedRow {
        line: record.position().map_or(0, |position| position.line()),
        expected,
        found,
    })
}
