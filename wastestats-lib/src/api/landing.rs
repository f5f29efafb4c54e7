//! Landing-page statistics

use crate::WasteStatsClient;
use crate::error::Error;
use crate::model::LandingStats;

impl WasteStatsClient {
    /// Fetches the headline statistics shown on the landing page.
    pub async fn landing_stats(&self) -> Result<LandingStats, Error> {
        self.get_json("/api/landing-stats", &[]).await
    }
}
