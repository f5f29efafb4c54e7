//! LGA comparison page
//!
//! Compares selected LGAs side by side for one waste stream and a set of
//! collection subtypes. Results land in the sortable table; header clicks
//! toggle the sort; selection problems and fetch failures go to the error
//! sink.

use std::sync::Arc;
use std::sync::Mutex;

use log::debug;

use wastestats_lib::WasteStatsClient;
use wastestats_lib::api::ComparisonRequest;
use wastestats_lib::error::Error;
use wastestats_lib::model::ComparisonRow;
use wastestats_lib::model::Lga;
use wastestats_lib::model::WasteStream;
use wastestats_lib::model::WasteSubtype;

use crate::banner::ErrorSink;
use crate::loader::LoadSequence;
use crate::loader::LoadTicket;
use crate::lock;
use crate::table::Column;
use crate::table::NumberFormat;
use crate::table::ResultRow;
use crate::table::SortState;
use crate::table::SortableTable;
use crate::table::TableError;
use crate::table::TableSchema;

/// What the user has picked in the comparison controls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComparisonSelection {
    /// The waste stream under comparison.
    pub waste_type: WasteStream,
    /// Selected LGAs (at least one required).
    pub lga_ids: Vec<i64>,
    /// Selected collection subtypes (at least one required).
    pub subtype_ids: Vec<i64>,
}

impl ComparisonSelection {
    /// Creates an empty selection for the given stream.
    pub fn new(waste_type: WasteStream) -> Self {
        Self {
            waste_type,
            lga_ids: Vec::new(),
            subtype_ids: Vec::new(),
        }
    }
}

/// State owner for the comparison page.
pub struct ComparisonPage {
    client: WasteStatsClient,
    errors: Arc<dyn ErrorSink>,
    loads: LoadSequence,
    table: Mutex<SortableTable>,
    lga_options: Mutex<Vec<Lga>>,
}

impl ComparisonPage {
    /// Creates the page with an empty results table.
    pub fn new(client: WasteStatsClient, errors: Arc<dyn ErrorSink>) -> Self {
        Self {
            client,
            errors,
            loads: LoadSequence::new(),
            table: Mutex::new(SortableTable::new(Self::schema())),
            lga_options: Mutex::new(Vec::new()),
        }
    }

    /// The comparison table's column declaration.
    pub fn schema() -> TableSchema {
        TableSchema::new(vec![
            Column::text("lga", "LGA"),
            Column::numeric("population", "Population", NumberFormat::Integer),
            Column::numeric("houses_surveyed", "Houses Surveyed", NumberFormat::Integer),
            Column::numeric("total_collected", "Total Collected (t)", NumberFormat::Decimal(2)),
            Column::numeric("total_recycled", "Total Recycled (t)", NumberFormat::Decimal(2)),
            Column::numeric("recycling_percentage", "Recycling Rate", NumberFormat::Percent(1)),
            Column::numeric("avg_per_household", "Avg per Household", NumberFormat::Decimal(2)),
        ])
        .expect("comparison schema is statically valid")
    }

    /// Fetches the LGA dropdown options.
    pub async fn load_lgas(&self) {
        match self.client.lgas().await {
            Ok(lgas) => *lock(&self.lga_options) = lgas,
            Err(err) => {
                debug!("loading LGAs failed: {err}");
                self.errors.report("Failed to load LGAs");
            }
        }
    }

    /// The currently loaded LGA dropdown options.
    pub fn lga_options(&self) -> Vec<Lga> {
        lock(&self.lga_options).clone()
    }

    /// The subtype dropdown options for a stream (built-in catalogue).
    pub fn subtype_options(stream: WasteStream) -> Vec<WasteSubtype> {
        stream.builtin_subtypes()
    }

    /// Runs a comparison for the current selection.
    ///
    /// Invalid selections are reported and nothing is fetched. A resolved
    /// fetch only applies while its load is still the latest issued, so
    /// overlapping comparisons cannot clobber each other out of order.
    /// Returns `true` when fresh results were applied.
    pub async fn compare(&self, selection: &ComparisonSelection) -> bool {
        if selection.lga_ids.is_empty() {
            self.errors.report("Please select at least one LGA");
            return false;
        }
        if selection.subtype_ids.is_empty() {
            self.errors.report("Please select at least one waste subtype");
            return false;
        }

        let request = ComparisonRequest::new(selection.waste_type)
            .lgas(selection.lga_ids.iter().copied())
            .subtypes(selection.subtype_ids.iter().copied());

        let ticket = self.loads.issue();
        let result = self.client.compare_lgas(&request).await;
        self.apply(ticket, result)
    }

    /// Applies one resolved comparison fetch, unless it went stale.
    fn apply(&self, ticket: LoadTicket, result: Result<Vec<ComparisonRow>, Error>) -> bool {
        if !self.loads.is_current(&ticket) {
            debug!("discarding stale comparison response");
            return false;
        }
        match result {
            Ok(results) => {
                let rows = results.iter().map(result_row).collect();
                let report = lock(&self.table).load(rows);
                if !report.is_clean() {
                    self.errors.report(&format!(
                        "{} result rows were missing values and show N/A",
                        report.repaired_rows
                    ));
                }
                true
            }
            Err(err) => {
                self.errors.report(&format!("Failed to compare LGAs: {err}"));
                lock(&self.table).clear();
                false
            }
        }
    }

    /// Applies a column-header activation.
    pub fn toggle_sort(&self, key: &str) -> Result<(), TableError> {
        lock(&self.table).toggle_sort(key)
    }

    /// The current sort state.
    pub fn sort_state(&self) -> SortState {
        lock(&self.table).sort_state().clone()
    }

    /// A snapshot of the rows in display order.
    pub fn rows(&self) -> Vec<ResultRow> {
        lock(&self.table)
            .ordered_rows()
            .into_iter()
            .cloned()
            .collect()
    }

    /// A snapshot of the rows formatted for display, one string per cell.
    pub fn display_rows(&self) -> Vec<Vec<String>> {
        lock(&self.table).display_rows()
    }

    /// `true` when the table holds no results ("No results found").
    pub fn is_empty(&self) -> bool {
        lock(&self.table).is_empty()
    }
}

/// Maps one backend comparison row onto the table's data model.
fn result_row(result: &ComparisonRow) -> ResultRow {
    ResultRow::new(result.lga_name.clone())
        .with_value("population", result.population.map(|v| v as f64))
        .with_value("houses_surveyed", result.houses_surveyed.map(|v| v as f64))
        .with_value("total_collected", result.total_collected)
        .with_value("total_recycled", result.total_recycled)
        .with_value("recycling_percentage", result.recycling_percentage)
        .with_value("avg_per_household", result.avg_per_household)
}
