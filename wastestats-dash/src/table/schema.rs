//! Column schema and display formatting
//!
//! Columns are declared once per table with a stable key, a header label, and
//! a value kind. Sorting and formatting both work from this declaration
//! instead of scraping rendered cell text.

use super::ResultRow;

/// How a column's values are typed and displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    /// The label column (always textual, sorted lexicographically).
    Text,
    /// A numeric column with its display format.
    Numeric(NumberFormat),
}

/// Display format for numeric cells.
///
/// The not-available sentinel always renders as `"N/A"`, never as zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumberFormat {
    /// Whole number with thousands separators, e.g. `34,600`.
    Integer,
    /// Fixed decimal places with thousands separators, e.g. `1,203.50`.
    Decimal(usize),
    /// Fixed decimal places with a trailing percent sign, e.g. `53.2%`.
    Percent(usize),
}

impl NumberFormat {
    /// Formats one cell value for display.
    pub fn format(&self, value: Option<f64>) -> String {
        let Some(value) = value else {
            return "N/A".to_string();
        };
        match *self {
            Self::Integer => group_thousands(&format!("{value:.0}")),
            Self::Decimal(places) => group_thousands(&format!("{value:.places$}")),
            Self::Percent(places) => format!("{value:.places$}%"),
        }
    }
}

/// Inserts thousands separators into a plain formatted number.
fn group_thousands(formatted: &str) -> String {
    let (number, sign) = match formatted.strip_prefix('-') {
        Some(rest) => (rest, "-"),
        None => (formatted, ""),
    };
    let (integer, fraction) = match number.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (number, None),
    };

    let mut grouped = String::with_capacity(integer.len() + integer.len() / 3);
    for (i, digit) in integer.chars().enumerate() {
        if i > 0 && (integer.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    match fraction {
        Some(fraction) => format!("{sign}{grouped}.{fraction}"),
        None => format!("{sign}{grouped}"),
    }
}

/// One declared column of a sortable table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    key: String,
    label: String,
    kind: ColumnKind,
}

impl Column {
    /// Declares the text (label) column.
    pub fn text(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            kind: ColumnKind::Text,
        }
    }

    /// Declares a numeric column with its display format.
    pub fn numeric(
        key: impl Into<String>,
        label: impl Into<String>,
        format: NumberFormat,
    ) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            kind: ColumnKind::Numeric(format),
        }
    }

    /// The stable identifier used to trigger sorting.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The header label shown to the user.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// The value kind of this column.
    pub fn kind(&self) -> ColumnKind {
        self.kind
    }
}

/// Errors raised when a schema declaration is inconsistent.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SchemaError {
    /// Two columns share a key.
    #[error("Duplicate column key '{key}'")]
    DuplicateKey {
        /// The offending key.
        key: String,
    },

    /// The schema does not have exactly one text column.
    #[error("Schema must declare exactly one text column, found {count}")]
    TextColumnCount {
        /// How many text columns were declared.
        count: usize,
    },
}

/// The static column declaration for one table instance.
///
/// Invariants, checked at construction: column keys are unique, and exactly
/// one column is the text (label) column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableSchema {
    columns: Vec<Column>,
}

impl TableSchema {
    /// Builds a schema, validating its invariants.
    pub fn new(columns: Vec<Column>) -> Result<Self, SchemaError> {
        for (i, column) in columns.iter().enumerate() {
            if columns[..i].iter().any(|c| c.key == column.key) {
                return Err(SchemaError::DuplicateKey {
                    key: column.key.clone(),
                });
            }
        }
        let text_count = columns
            .iter()
            .filter(|c| c.kind == ColumnKind::Text)
            .count();
        if text_count != 1 {
            return Err(SchemaError::TextColumnCount { count: text_count });
        }
        Ok(Self { columns })
    }

    /// All declared columns, in display order.
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Looks up a column by key.
    pub fn column(&self, key: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.key == key)
    }

    /// The keys of every numeric column.
    pub fn numeric_keys(&self) -> impl Iterator<Item = &str> {
        self.columns
            .iter()
            .filter(|c| matches!(c.kind, ColumnKind::Numeric(_)))
            .map(|c| c.key.as_str())
    }

    /// Formats one cell of a row for display.
    pub fn format_cell(&self, column: &Column, row: &ResultRow) -> String {
        match column.kind {
            ColumnKind::Text => row.label().to_string(),
            ColumnKind::Numeric(format) => format.format(row.value(column.key())),
        }
    }
}
