//! Landing page
//!
//! Headline survey coverage per reporting period.

use std::sync::Arc;
use std::sync::Mutex;

use log::debug;

use wastestats_lib::WasteStatsClient;
use wastestats_lib::error::Error;
use wastestats_lib::model::LandingStats;

use crate::banner::ErrorSink;
use crate::loader::LoadSequence;
use crate::loader::LoadTicket;
use crate::lock;

/// One period's headline numbers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PeriodSummary {
    /// Period label, e.g. `"2018-2019"`.
    pub period: String,
    /// LGAs surveyed in the period.
    pub total_lgas: i64,
    /// Households surveyed in the period.
    pub total_houses: i64,
}

/// What the landing page is currently showing.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LandingView {
    /// Nothing fetched yet.
    #[default]
    Idle,
    /// Statistics per period, ordered by period label.
    Loaded(Vec<PeriodSummary>),
    /// The fetch failed.
    Failed {
        /// User-facing description.
        message: String,
    },
}

/// State owner for the landing page.
pub struct LandingPage {
    client: WasteStatsClient,
    errors: Arc<dyn ErrorSink>,
    loads: LoadSequence,
    view: Mutex<LandingView>,
}

impl LandingPage {
    /// Creates the page in the idle state.
    pub fn new(client: WasteStatsClient, errors: Arc<dyn ErrorSink>) -> Self {
        Self {
            client,
            errors,
            loads: LoadSequence::new(),
            view: Mutex::new(LandingView::Idle),
        }
    }

    /// Fetches (or re-fetches) the headline statistics.
    pub async fn refresh(&self) {
        let ticket = self.loads.issue();
        let result = self.client.landing_stats().await;
        self.apply(ticket, result);
    }

    fn apply(&self, ticket: LoadTicket, result: Result<LandingStats, Error>) {
        if !self.loads.is_current(&ticket) {
            debug!("discarding stale landing statistics");
            return;
        }
        let view = match result {
            Ok(stats) => {
                let mut periods: Vec<PeriodSummary> = stats
                    .iter()
                    .map(|(period, stats)| PeriodSummary {
                        period: period.to_string(),
                        total_lgas: stats.total_lgas,
                        total_houses: stats.total_houses,
                    })
                    .collect();
                periods.sort_by(|a, b| a.period.cmp(&b.period));
                LandingView::Loaded(periods)
            }
            Err(err) => {
                debug!("loading landing statistics failed: {err}");
                self.errors.report("Failed to load statistics");
                LandingView::Failed {
                    message: "Failed to load statistics".to_string(),
                }
            }
        };
        *lock(&self.view) = view;
    }

    /// A snapshot of the current view.
    pub fn view(&self) -> LandingView {
        lock(&self.view).clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use wastestats_lib::error::ApiError;

    use crate::banner::ErrorBanner;

    fn page() -> (LandingPage, ErrorBanner) {
        let client = WasteStatsClient::builder("http://127.0.0.1:9")
            .build()
            .unwrap();
        let banner = ErrorBanner::new();
        let page = LandingPage::new(client, Arc::new(banner.clone()));
        (page, banner)
    }

    #[tokio::test]
    async fn test_periods_are_ordered() {
        let (page, _banner) = page();
        let stats: LandingStats = serde_json::from_str(
            r#"{"2019-2020": {"total_lgas": 15, "total_houses": 824500},
                "2018-2019": {"total_lgas": 15, "total_houses": 812000}}"#,
        )
        .unwrap();

        let ticket = page.loads.issue();
        page.apply(ticket, Ok(stats));

        match page.view() {
            LandingView::Loaded(periods) => {
                assert_eq!(periods.len(), 2);
                assert_eq!(periods[0].period, "2018-2019");
                assert_eq!(periods[1].period, "2019-2020");
                assert_eq!(periods[1].total_houses, 824500);
            }
            other => panic!("unexpected view: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_failure_reports_and_sets_failed_view() {
        let (page, banner) = page();
        let ticket = page.loads.issue();
        page.apply(ticket, Err(Error::Api(ApiError::http(503, "down"))));

        assert!(matches!(page.view(), LandingView::Failed { .. }));
        assert_eq!(banner.message().as_deref(), Some("Failed to load statistics"));
    }
}
