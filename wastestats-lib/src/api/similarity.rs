//! Recycling-rate similarity search
//!
//! Finds the LGAs whose recycling rate for a waste stream sits closest to a
//! base LGA's rate in a given reporting year.

use serde::Deserialize;

use crate::WasteStatsClient;
use crate::error::BackendError;
use crate::error::Error;
use crate::model::SimilarLga;
use crate::model::WasteStream;

/// Smallest accepted similarity cutoff.
pub const MIN_CUTOFF: u8 = 1;
/// Largest accepted similarity cutoff.
pub const MAX_CUTOFF: u8 = 50;
/// Cutoff used when none is specified.
pub const DEFAULT_CUTOFF: u8 = 10;
/// Reporting year used when none is specified.
pub const DEFAULT_YEAR_START: u16 = 2019;

/// Clamps a requested cutoff into the accepted `1..=50` range.
pub fn clamp_cutoff(value: i64) -> u8 {
    value.clamp(i64::from(MIN_CUTOFF), i64::from(MAX_CUTOFF)) as u8
}

/// Builder for a similarity query.
///
/// # Example
///
/// ```ignore
/// let request = SimilarityRequest::new(5, WasteStream::Recyclable)
///     .year_start(2019)
///     .cutoff(25);
/// let similar = client.similar_lgas(&request).await?;
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimilarityRequest {
    lga_id: i64,
    waste_type: WasteStream,
    year_start: u16,
    cutoff: u8,
}

impl SimilarityRequest {
    /// Creates a new similarity request for the given base LGA and stream.
    pub fn new(lga_id: i64, waste_type: WasteStream) -> Self {
        Self {
            lga_id,
            waste_type,
            year_start: DEFAULT_YEAR_START,
            cutoff: DEFAULT_CUTOFF,
        }
    }

    /// Sets the reporting year (the starting year of the period).
    pub fn year_start(mut self, year: u16) -> Self {
        self.year_start = year;
        self
    }

    /// Sets the maximum number of similar LGAs to return.
    ///
    /// Values outside `1..=50` are clamped, matching the input validation of
    /// the dashboard's cutoff field.
    pub fn cutoff(mut self, cutoff: i64) -> Self {
        self.cutoff = clamp_cutoff(cutoff);
        self
    }

    /// Returns the base LGA id.
    pub fn lga_id(&self) -> i64 {
        self.lga_id
    }

    /// Returns the selected waste stream.
    pub fn waste_type(&self) -> WasteStream {
        self.waste_type
    }

    /// Returns the reporting year.
    pub fn year(&self) -> u16 {
        self.year_start
    }

    /// Returns the (clamped) cutoff.
    pub fn cutoff_value(&self) -> u8 {
        self.cutoff
    }

    /// Builds the query pairs for `/api/similar-lgas`.
    pub(crate) fn query_pairs(&self) -> Vec<(String, String)> {
        vec![
            ("lga_id".to_string(), self.lga_id.to_string()),
            ("waste_type".to_string(), self.waste_type.as_str().to_string()),
            ("year_start".to_string(), self.year_start.to_string()),
            ("cutoff".to_string(), self.cutoff.to_string()),
        ]
    }
}

/// The similarity endpoint answers either with rows or with the backend's
/// error envelope, both under a 200 status.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum SimilarityResponse {
    Rows(Vec<SimilarLga>),
    Failure(BackendError),
}

impl WasteStatsClient {
    /// Runs a similarity search around the request's base LGA.
    ///
    /// A backend "no similar LGAs" outcome surfaces as [`Error::Backend`] so
    /// callers can show the backend's message; it is not an empty `Ok`.
    pub async fn similar_lgas(
        &self,
        request: &SimilarityRequest,
    ) -> Result<Vec<SimilarLga>, Error> {
        let response: SimilarityResponse = self
            .get_json("/api/similar-lgas", &request.query_pairs())
            .await?;
        match response {
            SimilarityResponse::Rows(rows) => Ok(rows),
            SimilarityResponse::Failure(detail) => Err(Error::Backend(detail)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cutoff_clamped_to_range() {
        assert_eq!(clamp_cutoff(0), 1);
        assert_eq!(clamp_cutoff(-4), 1);
        assert_eq!(clamp_cutoff(10), 10);
        assert_eq!(clamp_cutoff(50), 50);
        assert_eq!(clamp_cutoff(51), 50);
        assert_eq!(clamp_cutoff(9999), 50);
    }

    #[test]
    fn test_request_defaults() {
        let request = SimilarityRequest::new(5, WasteStream::Recyclable);
        assert_eq!(request.year(), 2019);
        assert_eq!(request.cutoff_value(), 10);
    }

    #[test]
    fn test_query_pairs() {
        let request = SimilarityRequest::new(5, WasteStream::Organics)
            .year_start(2018)
            .cutoff(120);
        assert_eq!(
            request.query_pairs(),
            vec![
                ("lga_id".to_string(), "5".to_string()),
                ("waste_type".to_string(), "organics".to_string()),
                ("year_start".to_string(), "2018".to_string()),
                ("cutoff".to_string(), "50".to_string()),
            ]
        );
    }

    #[test]
    fn test_response_shapes() {
        let rows: SimilarityResponse = serde_json::from_str(
            r#"[{"lga_id": 2, "lga_name": "Bayside", "recycle_rate": 48.0,
                 "difference": 0.4}]"#,
        )
        .unwrap();
        assert!(matches!(rows, SimilarityResponse::Rows(ref r) if r.len() == 1));

        let failure: SimilarityResponse = serde_json::from_str(
            r#"{"error": "No similar LGAs found",
                "message": "Try adjusting the criteria or selecting a different LGA"}"#,
        )
        .unwrap();
        assert!(matches!(failure, SimilarityResponse::Failure(_)));
    }
}
