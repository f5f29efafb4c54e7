//! Similar-LGAs page
//!
//! Finds the LGAs whose recycling rate sits closest to a chosen base LGA's
//! and presents them as ranked cards. The backend's "no similar LGAs"
//! outcome is a renderable state of its own, not a crash.

use std::sync::Arc;
use std::sync::Mutex;

use log::debug;

use wastestats_lib::WasteStatsClient;
use wastestats_lib::api::DEFAULT_YEAR_START;
use wastestats_lib::api::SimilarityRequest;
use wastestats_lib::api::clamp_cutoff;
use wastestats_lib::error::Error;
use wastestats_lib::model::Lga;
use wastestats_lib::model::SimilarLga;
use wastestats_lib::model::WasteStream;

use crate::banner::ErrorSink;
use crate::loader::LoadSequence;
use crate::loader::LoadTicket;
use crate::lock;

/// What the user has picked in the similarity controls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimilaritySelection {
    /// The base LGA to compare against.
    pub lga_id: i64,
    /// Display name of the base LGA (for the results heading).
    pub lga_name: String,
    /// The waste stream to measure on.
    pub waste_type: WasteStream,
    /// Starting year of the reporting period.
    pub year_start: u16,
    /// Maximum number of similar LGAs to show, clamped to `1..=50`.
    pub cutoff: u8,
}

impl SimilaritySelection {
    /// Creates a selection with the default period and cutoff.
    pub fn new(lga_id: i64, lga_name: impl Into<String>, waste_type: WasteStream) -> Self {
        Self {
            lga_id,
            lga_name: lga_name.into(),
            waste_type,
            year_start: DEFAULT_YEAR_START,
            cutoff: wastestats_lib::api::DEFAULT_CUTOFF,
        }
    }

    /// Sets the cutoff from raw user input, clamping it into range.
    pub fn set_cutoff(&mut self, value: i64) {
        self.cutoff = clamp_cutoff(value);
    }
}

/// One similar-LGA card.
#[derive(Debug, Clone, PartialEq)]
pub struct SimilarityCard {
    /// Council name.
    pub lga_name: String,
    /// Resident population.
    pub population: Option<i64>,
    /// Households covered by the survey.
    pub houses_surveyed: Option<i64>,
    /// Recycling rate, in percent.
    pub recycle_rate: Option<f64>,
    /// How similar to the base LGA, in percent (100 means identical rate).
    pub similarity_score: Option<f64>,
}

impl From<&SimilarLga> for SimilarityCard {
    fn from(row: &SimilarLga) -> Self {
        Self {
            lga_name: row.lga_name.clone(),
            population: row.population,
            houses_surveyed: row.houses_surveyed,
            recycle_rate: row.recycle_rate,
            similarity_score: row.difference.map(|d| 100.0 - d),
        }
    }
}

/// Heading for a set of similarity results.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimilarityHeading {
    /// Name of the base LGA.
    pub base_lga: String,
    /// The stream the comparison was made on.
    pub waste_type: WasteStream,
    /// Starting year of the reporting period.
    pub year_start: u16,
}

/// What the similarity page is currently showing.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum SimilarityView {
    /// Nothing searched yet.
    #[default]
    Idle,
    /// A search is in flight.
    Loading,
    /// Ranked similar LGAs.
    Results {
        /// Heading context for the card list.
        heading: SimilarityHeading,
        /// Cards, most similar first (backend order).
        cards: Vec<SimilarityCard>,
    },
    /// The backend found nothing for the criteria.
    NoResults {
        /// The backend's explanation, for the error card.
        message: String,
    },
    /// The search failed outright.
    Failed {
        /// User-facing description.
        message: String,
    },
}

/// State owner for the similarity page.
pub struct SimilarityPage {
    client: WasteStatsClient,
    errors: Arc<dyn ErrorSink>,
    loads: LoadSequence,
    view: Mutex<SimilarityView>,
    lga_options: Mutex<Vec<Lga>>,
}

impl SimilarityPage {
    /// Creates the page in the idle state.
    pub fn new(client: WasteStatsClient, errors: Arc<dyn ErrorSink>) -> Self {
        Self {
            client,
            errors,
            loads: LoadSequence::new(),
            view: Mutex::new(SimilarityView::Idle),
            lga_options: Mutex::new(Vec::new()),
        }
    }

    /// Fetches the base-LGA dropdown options.
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

    /// Runs a similarity search for the current selection.
    ///
    /// The view shows `Loading` while the fetch is in flight. Only the
    /// latest issued search may set the final view.
    pub async fn find_similar(&self, selection: &SimilaritySelection) {
        let ticket = self.loads.issue();
        *lock(&self.view) = SimilarityView::Loading;

        let request = SimilarityRequest::new(selection.lga_id, selection.waste_type)
            .year_start(selection.year_start)
            .cutoff(i64::from(selection.cutoff));
        let result = self.client.similar_lgas(&request).await;
        self.apply(ticket, selection, result);
    }

    /// Applies one resolved search, unless it went stale.
    fn apply(
        &self,
        ticket: LoadTicket,
        selection: &SimilaritySelection,
        result: Result<Vec<SimilarLga>, Error>,
    ) {
        if !self.loads.is_current(&ticket) {
            debug!("discarding stale similarity response");
            return;
        }
        let view = match result {
            Ok(rows) if rows.is_empty() => SimilarityView::NoResults {
                message: "No similar LGAs found for the selected criteria.".to_string(),
            },
            Ok(rows) => SimilarityView::Results {
                heading: SimilarityHeading {
                    base_lga: selection.lga_name.clone(),
                    waste_type: selection.waste_type,
                    year_start: selection.year_start,
                },
                cards: rows.iter().map(SimilarityCard::from).collect(),
            },
            Err(Error::Backend(detail)) => {
                self.errors.report(detail.display_message());
                SimilarityView::NoResults {
                    message: detail.display_message().to_string(),
                }
            }
            Err(err) => {
                debug!("similarity search failed: {err}");
                self.errors.report("Failed to find similar LGAs");
                SimilarityView::Failed {
                    message: "Failed to find similar LGAs. Please try again.".to_string(),
                }
            }
        };
        *lock(&self.view) = view;
    }

    /// A snapshot of the current view.
    pub fn view(&self) -> SimilarityView {
        lock(&self.view).clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use wastestats_lib::error::ApiError;
    use wastestats_lib::error::BackendError;

    use crate::banner::ErrorBanner;

    fn page() -> (SimilarityPage, ErrorBanner) {
        let client = WasteStatsClient::builder("http://127.0.0.1:9")
            .build()
            .unwrap();
        let banner = ErrorBanner::new();
        let page = SimilarityPage::new(client, Arc::new(banner.clone()));
        (page, banner)
    }

    fn selection() -> SimilaritySelection {
        SimilaritySelection::new(5, "Byron", WasteStream::Recyclable)
    }

    fn similar(name: &str, difference: f64) -> SimilarLga {
        SimilarLga {
            lga_id: 1,
            lga_name: name.to_string(),
            population: Some(20_000),
            houses_surveyed: Some(8_000),
            total_collected: Some(500.0),
            total_recycled: Some(250.0),
            recycle_rate: Some(50.0),
            difference: Some(difference),
        }
    }

    #[test]
    fn test_selection_cutoff_clamps() {
        let mut selection = selection();
        selection.set_cutoff(0);
        assert_eq!(selection.cutoff, 1);
        selection.set_cutoff(200);
        assert_eq!(selection.cutoff, 50);
    }

    #[tokio::test]
    async fn test_results_view_scores_cards() {
        let (page, _banner) = page();
        let ticket = page.loads.issue();
        page.apply(ticket, &selection(), Ok(vec![similar("Bayside", 1.5)]));

        match page.view() {
            SimilarityView::Results { heading, cards } => {
                assert_eq!(heading.base_lga, "Byron");
                assert_eq!(heading.year_start, 2019);
                assert_eq!(cards.len(), 1);
                assert_eq!(cards[0].similarity_score, Some(98.5));
            }
            other => panic!("unexpected view: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_backend_envelope_becomes_no_results() {
        let (page, banner) = page();
        let ticket = page.loads.issue();
        let detail = BackendError::with_message(
            "No similar LGAs found",
            "Try adjusting the criteria or selecting a different LGA",
        );
        page.apply(ticket, &selection(), Err(Error::Backend(detail)));

        assert_eq!(
            page.view(),
            SimilarityView::NoResults {
                message: "Try adjusting the criteria or selecting a different LGA".to_string(),
            }
        );
        assert!(banner.message().is_some());
    }

    #[tokio::test]
    async fn test_transport_failure_becomes_failed() {
        let (page, banner) = page();
        let ticket = page.loads.issue();
        page.apply(
            ticket,
            &selection(),
            Err(Error::Api(ApiError::http(502, "bad gateway"))),
        );

        assert!(matches!(page.view(), SimilarityView::Failed { .. }));
        assert_eq!(
            banner.message().as_deref(),
            Some("Failed to find similar LGAs")
        );
    }

    #[tokio::test]
    async fn test_stale_search_cannot_overwrite_fresh_view() {
        let (page, _banner) = page();

        let slow = page.loads.issue();
        let fast = page.loads.issue();
        page.apply(fast, &selection(), Ok(vec![similar("Fresh", 0.5)]));
        page.apply(slow, &selection(), Ok(vec![similar("Stale", 9.0)]));

        match page.view() {
            SimilarityView::Results { cards, .. } => {
                assert_eq!(cards[0].lga_name, "Fresh");
            }
            other => panic!("unexpected view: {other:?}"),
        }
    }
}
