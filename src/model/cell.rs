use std::fmt;

use serde::{Serialize, Serializer};

/// Field values read as a missing value.
pub const MISSING_MARKERS: &[&str] = &[
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// Is the given raw field a missing value marker?
pub fn is_missing_marker(raw: &str) -> bool {
    MISSING_MARKERS.contains(&raw)
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw {
        "true" | "True" | "TRUE" => Some(true),
        "false" | "False" | "FALSE" => Some(false),
        _ => None,
    }
}

/// The type of a column, inferred from its values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    /// Signed 64 bits integers.
    Integer,

    /// 64 bits floating point numbers.
    Float,

    /// Booleans.
    Boolean,

    /// Anything else.
    Text,
}

impl ColumnType {
    /// Infer the narrowest type accepting every non-missing value.
    ///
    /// Integers win over floats, floats over booleans and text accepts
    /// everything. A column with no value at all is text.
    ///
    /// ```
    /// use waste_skips::model::ColumnType;
    ///
    /// assert_eq!(ColumnType::infer(["1", "", "-3"]), ColumnType::Integer);
    /// assert_eq!(ColumnType::infer(["1", "2.5"]), ColumnType::Float);
    /// assert_eq!(ColumnType::infer(["True", "false", "NA"]), ColumnType::Boolean);
    /// assert_eq!(ColumnType::infer(["1", "one"]), ColumnType::Text);
    /// assert_eq!(ColumnType::infer(["", "NA"]), ColumnType::Text);
    /// ```
    pub fn infer<'a>(values: impl IntoIterator<Item = &'a str>) -> Self {
        let mut seen = false;
        let mut integer = true;
        let mut float = true;
        let mut boolean = true;

        for value in values.into_iter().filter(|v| !is_missing_marker(v)) {
            seen = true;
            integer = integer && value.parse::<i64>().is_ok();
            float = float && value.parse::<f64>().is_ok();
            boolean = boolean && parse_bool(value).is_some();

            if !(integer || float || boolean) {
                break;
            }
        }

        match (seen, integer, float, boolean) {
            (false, ..) => Self::Text,
            (true, true, ..) => Self::Integer,
            (true, false, true, _) => Self::Float,
            (true, false, false, true) => Self::Boolean,
            _ => Self::Text,
        }
    }

    /// Convert a raw field into a cell of this type.
    ///
    /// Missing markers always give [`Cell::Missing`], and so does any NaN
    /// spelling of a float column. A value this type does not accept falls
    /// back to text.
    pub fn convert(self, raw: &str) -> Cell {
        if is_missing_marker(raw) {
            return Cell::Missing;
        }
        let converted = match self {
            Self::Integer => raw.parse().ok().map(Cell::Integer),
            Self::Float => raw.parse::<f64>().ok().map(|value| {
                if value.is_nan() {
                    Cell::Missing
                } else {
                    Cell::Float(value)
                }
            }),
            Self::Boolean => parse_bool(raw).map(Cell::Boolean),
            Self::Text => None,
        };

        converted.unwrap_or_else(|| Cell::Text(raw.to_string()))
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Integer => "integer",
            Self::Float => "float",
            Self::Boolean => "boolean",
            Self::Text => "text",
        };
        f.write_str(name)
    }
}

/// A single table value.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Integer(i64),
    Float(f64),
    Boolean(bool),
    Text(String),
    Missing,
}

impl Cell {
    /// Is this a missing value?
    pub fn is_missing(&self) -> bool {
        matches!(self, Self::Missing)
    }

    /// Integer value of the cell.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Integer(value) => Some(*value),
            _ => None,
        }
    }

    /// Numeric value of the cell, integers are widened.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Integer(value) => Some(*value as f64),
            Self::Float(value) => Some(*value),
            _ => None,
        }
    }

    /// Boolean value of the cell.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Boolean(value) => Some(*value),
            _ => None,
        }
    }

    /// Text of the cell, `None` for any other kind.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(value) => Some(value),
            _ => None,
        }
    }
}

/// Missing cells display as an empty string.
impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(value) => write!(f, "{value}"),
            Self::Float(value) => write!(f, "{value}"),
            Self::Boolean(value) => write!(f, "{value}"),
            Self::Text(value) => f.write_str(value),
            Self::Missing => Ok(()),
        }
    }
}

impl Serialize for Cell {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Integer(value) => serializer.serialize_i64(*value),
            Self::Float(value) => serializer.serialize_f64(*value),
            Self::Boolean(value) => serializer.serialize_bool(*value),
            Self::Text(value) => serializer.serialize_str(value),
            Self::Missing => serializer.serialize_none(),
        }
    }
}
