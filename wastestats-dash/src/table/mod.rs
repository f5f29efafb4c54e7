//! Sortable, type-aware results table
//!
//! [`SortableTable`] owns a snapshot of result rows, the declarative column
//! schema, and the mutable sort state. Loading replaces the snapshot
//! wholesale and resets the sort; toggling a header flips or activates a
//! column; [`SortableTable::ordered_rows`] derives the display order as a
//! pure function of `(rows, active column, direction)`.

mod row;
mod schema;
mod sort;

pub use row::*;
pub use schema::*;
pub use sort::*;

/// Errors from table operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TableError {
    /// `toggle_sort` was called with a key the schema does not declare.
    ///
    /// A programming error in the host wiring, not a user error.
    #[error("Unknown column key '{key}'")]
    InvalidColumn {
        /// The unknown key.
        key: String,
    },
}

/// Outcome of loading a result set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LoadReport {
    /// Rows that were missing at least one declared numeric column and had
    /// the not-available sentinel substituted.
    pub repaired_rows: usize,
}

impl LoadReport {
    /// Returns `true` if every row arrived fully shaped.
    pub fn is_clean(&self) -> bool {
        self.repaired_rows == 0
    }
}

/// A sortable table of result rows.
#[derive(Debug, Clone)]
pub struct SortableTable {
    schema: TableSchema,
    rows: Vec<ResultRow>,
    sort: SortState,
}

impl SortableTable {
    /// Creates an empty table over the given schema.
    pub fn new(schema: TableSchema) -> Self {
        Self {
            schema,
            rows: Vec::new(),
            sort: SortState::default(),
        }
    }

    /// The table's column schema.
    pub fn schema(&self) -> &TableSchema {
        &self.schema
    }

    /// Replaces the stored rows with a new result set.
    ///
    /// The sort state resets to "no active column", so the new rows display
    /// in load order until the user sorts again. Rows missing a declared
    /// numeric key are repaired by substituting the not-available sentinel;
    /// the report says how many needed it. An empty set is valid and yields
    /// the "no results" state.
    pub fn load(&mut self, mut rows: Vec<ResultRow>) -> LoadReport {
        let mut repaired_rows = 0;
        for row in &mut rows {
            let mut repaired = false;
            for key in self.schema.numeric_keys() {
                if !row.has_value(key) {
                    row.set_value(key, None);
                    repaired = true;
                }
            }
            if repaired {
                repaired_rows += 1;
            }
        }

        self.rows = rows;
        self.sort.reset();
        LoadReport { repaired_rows }
    }

    /// Discards all rows (the on-error lifecycle of a result set).
    pub fn clear(&mut self) {
        self.rows.clear();
        self.sort.reset();
    }

    /// Applies a header activation to the sort state.
    ///
    /// Same column: flip direction. New column: activate it ascending.
    /// Unknown keys fail; nothing is re-fetched.
    pub fn toggle_sort(&mut self, key: &str) -> Result<(), TableError> {
        if self.schema.column(key).is_none() {
            return Err(TableError::InvalidColumn {
                key: key.to_string(),
            });
        }
        self.sort.toggle(key);
        Ok(())
    }

    /// The current sort state.
    pub fn sort_state(&self) -> &SortState {
        &self.sort
    }

    /// Rows in display order.
    ///
    /// Load order when no column is active; otherwise ordered by the
    /// comparator. The stored rows are never mutated, so repeated calls
    /// cannot drift.
    pub fn ordered_rows(&self) -> Vec<&ResultRow> {
        let mut ordered: Vec<&ResultRow> = self.rows.iter().collect();
        let Some(column) = self
            .sort
            .active_column()
            .and_then(|key| self.schema.column(key))
        else {
            return ordered;
        };
        let direction = self.sort.direction();
        ordered.sort_by(|a, b| compare_rows(a, b, column, direction));
        ordered
    }

    /// Ordered rows formatted through the schema, one string per cell.
    pub fn display_rows(&self) -> Vec<Vec<String>> {
        self.ordered_rows()
            .into_iter()
            .map(|row| {
                self.schema
                    .columns()
                    .iter()
                    .map(|column| self.schema.format_cell(column, row))
                    .collect()
            })
            .collect()
    }

    /// Number of stored rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// `true` when no rows are loaded ("No results found" state).
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_schema() -> TableSchema {
        TableSchema::new(vec![
            Column::text("lga", "LGA"),
            Column::numeric("rate", "Recycling Rate", NumberFormat::Percent(1)),
            Column::numeric("population", "Population", NumberFormat::Integer),
        ])
        .unwrap()
    }

    fn loaded_table() -> SortableTable {
        let mut table = SortableTable::new(test_schema());
        table.load(vec![
            ResultRow::new("Banyule")
                .with_value("rate", 5.0)
                .with_value("population", 130000.0),
            ResultRow::new("banksia")
                .with_value("rate", None)
                .with_value("population", 95000.0),
            ResultRow::new("Ararat")
                .with_value("rate", 3.0)
                .with_value("population", 11500.0),
        ]);
        table
    }

    fn labels(table: &SortableTable) -> Vec<String> {
        table
            .ordered_rows()
            .into_iter()
            .map(|row| row.label().to_string())
            .collect()
    }

    #[test]
    fn test_initial_order_is_load_order() {
        let table = loaded_table();
        assert_eq!(table.sort_state().active_column(), None);
        assert_eq!(labels(&table), ["Banyule", "banksia", "Ararat"]);
    }

    #[test]
    fn test_ordered_rows_is_a_permutation() {
        let mut table = loaded_table();
        table.toggle_sort("rate").unwrap();

        let mut sorted = labels(&table);
        sorted.sort();
        let mut original = vec!["Banyule".to_string(), "banksia".into(), "Ararat".into()];
        original.sort();
        assert_eq!(sorted, original);
        assert_eq!(table.len(), 3);
    }

    #[test]
    fn test_sentinel_first_ascending_last_descending() {
        let mut table = loaded_table();

        table.toggle_sort("rate").unwrap();
        assert_eq!(labels(&table), ["banksia", "Ararat", "Banyule"]);

        table.toggle_sort("rate").unwrap();
        assert_eq!(labels(&table), ["Banyule", "Ararat", "banksia"]);
    }

    #[test]
    fn test_double_toggle_restores_equivalent_order() {
        let mut table = loaded_table();
        table.toggle_sort("population").unwrap();
        let ascending = labels(&table);

        table.toggle_sort("population").unwrap();
        table.toggle_sort("population").unwrap();
        assert_eq!(labels(&table), ascending);
    }

    #[test]
    fn test_text_sort_is_case_insensitive() {
        let mut table = loaded_table();
        table.toggle_sort("lga").unwrap();
        assert_eq!(labels(&table), ["Ararat", "banksia", "Banyule"]);
    }

    #[test]
    fn test_reload_resets_sort() {
        let mut table = loaded_table();
        table.toggle_sort("rate").unwrap();
        assert!(table.sort_state().is_active("rate"));

        table.load(vec![
            ResultRow::new("Zed").with_value("rate", 9.0),
            ResultRow::new("Alpha").with_value("rate", 1.0),
        ]);
        assert_eq!(table.sort_state().active_column(), None);
        assert_eq!(labels(&table), ["Zed", "Alpha"]);
    }

    #[test]
    fn test_unknown_column_is_rejected() {
        let mut table = loaded_table();
        let err = table.toggle_sort("households").unwrap_err();
        assert_eq!(
            err,
            TableError::InvalidColumn {
                key: "households".to_string()
            }
        );
        // State untouched.
        assert_eq!(table.sort_state().active_column(), None);
    }

    #[test]
    fn test_load_repairs_missing_numeric_keys() {
        let mut table = SortableTable::new(test_schema());
        let report = table.load(vec![
            ResultRow::new("Albury").with_value("rate", 4.0),
            ResultRow::new("Byron")
                .with_value("rate", 2.0)
                .with_value("population", 34600.0),
        ]);

        assert_eq!(report.repaired_rows, 1);
        assert!(!report.is_clean());
        let rows = table.ordered_rows();
        assert!(rows[0].has_value("population"));
        assert_eq!(rows[0].value("population"), None);
    }

    #[test]
    fn test_empty_load_is_valid() {
        let mut table = loaded_table();
        let report = table.load(Vec::new());
        assert!(report.is_clean());
        assert!(table.is_empty());
        assert!(table.ordered_rows().is_empty());
        // Sorting an empty table is still a total function.
        table.toggle_sort("rate").unwrap();
        assert!(table.ordered_rows().is_empty());
    }

    #[test]
    fn test_ordered_rows_does_not_mutate_storage() {
        let mut table = loaded_table();
        table.toggle_sort("rate").unwrap();
        let first = labels(&table);
        let second = labels(&table);
        assert_eq!(first, second);

        // Dropping back to load order proves storage never reordered.
        table.load(vec![
            ResultRow::new("Banyule").with_value("rate", 5.0),
            ResultRow::new("Ararat").with_value("rate", 3.0),
        ]);
        assert_eq!(labels(&table), ["Banyule", "Ararat"]);
    }

    #[test]
    fn test_display_rows_format_through_schema() {
        let mut table = SortableTable::new(test_schema());
        table.load(vec![
            ResultRow::new("Byron")
                .with_value("rate", 53.24)
                .with_value("population", 34600.0),
            ResultRow::new("Albury").with_value("rate", None),
        ]);

        let display = table.display_rows();
        assert_eq!(display[0], ["Byron", "53.2%", "34,600"]);
        assert_eq!(display[1], ["Albury", "N/A", "N/A"]);
    }
}
