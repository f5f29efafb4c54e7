//! Result rows

use std::collections::HashMap;

/// One comparison result row: a textual label plus a value (possibly
/// not-available) per numeric column key.
///
/// `None` is the not-available sentinel. It is distinct from zero and is
/// never coerced to one. A key that was never supplied at all is also
/// distinguishable (see [`ResultRow::has_value`]) so that loading can repair
/// and report malformed rows.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultRow {
    label: String,
    values: HashMap<String, Option<f64>>,
}

impl ResultRow {
    /// Creates a row with the given label and no numeric values yet.
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            values: HashMap::new(),
        }
    }

    /// Adds or replaces one numeric value (builder style).
    pub fn with_value(mut self, key: impl Into<String>, value: impl Into<Option<f64>>) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }

    /// Adds or replaces one numeric value.
    pub fn set_value(&mut self, key: impl Into<String>, value: impl Into<Option<f64>>) {
        self.values.insert(key.into(), value.into());
    }

    /// The row's label (e.g. the LGA name).
    pub fn label(&self) -> &str {
        &self.label
    }

    /// The value for a column key; `None` for both not-available and
    /// never-supplied keys.
    pub fn value(&self, key: &str) -> Option<f64> {
        self.values.get(key).copied().flatten()
    }

    /// Whether the row supplied anything (even an explicit not-available)
    /// for this key.
    pub fn has_value(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sentinel_is_distinct_from_missing() {
        let row = ResultRow::new("Byron")
            .with_value("population", 34600.0)
            .with_value("recycling_percentage", None);

        assert_eq!(row.value("population"), Some(34600.0));
        assert_eq!(row.value("recycling_percentage"), None);
        assert!(row.has_value("recycling_percentage"));

        assert_eq!(row.value("avg_per_household"), None);
        assert!(!row.has_value("avg_per_household"));
    }
}
