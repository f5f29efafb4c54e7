//! Waste-type catalogue

use crate::WasteStatsClient;
use crate::error::Error;
use crate::model::RawWasteType;
use crate::model::WasteType;

impl WasteStatsClient {
    /// Fetches the waste-type catalogue with subtypes unpacked.
    pub async fn waste_types(&self) -> Result<Vec<WasteType>, Error> {
        let raw: Vec<RawWasteType> = self.get_json("/api/waste-types", &[]).await?;
        raw.into_iter()
            .map(|row| WasteType::try_from(row).map_err(Error::from))
            .collect()
    }
}
