//! LGA catalogue

use crate::WasteStatsClient;
use crate::error::Error;
use crate::model::Lga;

impl WasteStatsClient {
    /// Fetches every known LGA, ordered by name.
    ///
    /// Used to populate selection dropdowns.
    pub async fn lgas(&self) -> Result<Vec<Lga>, Error> {
        self.get_json("/api/lgas", &[]).await
    }
}
