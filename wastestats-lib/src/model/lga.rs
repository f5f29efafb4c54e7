//! Local Government Area model

use serde::Deserialize;

/// A Local Government Area (council) known to the backend.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Lga {
    /// Backend identifier.
    pub id: i64,
    /// Council name, e.g. "Canterbury-Bankstown".
    pub name: String,
}
