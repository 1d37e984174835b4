/// What to do with a row whose field count differs from the header's.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RaggedRows {
    /// Every row must have exactly as many fields as the header (RFC 4180).
    Strict,

    /// Rows shorter than the header are padded with missing cells. Rows
    /// longer than the header are still rejected.
    #[default]
    PadShort,
}

/// Parsing options shared by every load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoaderOptions {
    /// The field delimiter.
    pub delimiter: u8,

    /// The ragged row policy.
    pub ragged_rows: RaggedRows,

    /// Trim leading and trailing whitespace of headers and fields.
    pub trim: bool,
}

impl Default for LoaderOptions {
    fn default() -> Self {
        Self {
            delimiter: b',',
            ragged_rows: RaggedRows::default(),
            trim: false,
        }
    }
}

impl LoaderOptions {
    /// Set the field delimiter.
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Set the ragged row policy.
    pub fn with_ragged_rows(mut self, ragged_rows: RaggedRows) -> Self {
        self.ragged_rows = ragged_rows;
        self
    }

    /// Enable or disable whitespace trimming.
    pub fn with_trim(mut self, trim: bool) -> Self {
        self.trim = trim;
        self
    }
}
