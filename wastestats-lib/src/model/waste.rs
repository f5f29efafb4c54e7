//! Waste stream and subtype models
//!
//! The backend groups collection data into three streams (recyclable,
//! organics, general waste), each with a fixed set of subtypes. The
//! `/api/waste-types` endpoint reports subtypes in a packed
//! `GROUP_CONCAT` string (`"1:Kerbside Recycling,2:CDS Recycling,..."`)
//! which is unpacked here into typed values.

use serde::Deserialize;

use crate::error::ApiError;

/// One of the three top-level waste streams.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WasteStream {
    /// Recyclable material (kerbside, CDS, drop-off, cleanup).
    Recyclable,
    /// Garden and food organics.
    Organics,
    /// General (residual) waste.
    Waste,
}

impl WasteStream {
    /// All streams, in the backend's catalogue order.
    pub const ALL: [WasteStream; 3] = [
        WasteStream::Recyclable,
        WasteStream::Organics,
        WasteStream::Waste,
    ];

    /// The backend's name for this stream, used in query parameters.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Recyclable => "recyclable",
            Self::Organics => "organics",
            Self::Waste => "waste",
        }
    }

    /// Parses a backend stream name.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "recyclable" => Some(Self::Recyclable),
            "organics" => Some(Self::Organics),
            "waste" => Some(Self::Waste),
            _ => None,
        }
    }

    /// The built-in subtype catalogue for this stream.
    ///
    /// Matches the backend's seed data; usable as a dropdown fallback when
    /// the `/api/waste-types` endpoint is unavailable.
    pub fn builtin_subtypes(&self) -> Vec<WasteSubtype> {
        let pairs: &[(i64, &str)] = match self {
            Self::Recyclable => &[
                (1, "Kerbside Recycling"),
                (2, "CDS Recycling"),
                (3, "Drop off Recycling"),
                (4, "Cleanup Recycling"),
            ],
            Self::Organics => &[
                (5, "Kerbside Organics Bin"),
                (6, "Kerbside FOGO Organics"),
                (7, "Drop off Organics"),
                (8, "Cleanup Organics"),
                (9, "Other Council Garden Organics"),
            ],
            Self::Waste => &[
                (10, "Kerbside Waste Bin"),
                (11, "Drop Off"),
                (12, "Clean Up"),
            ],
        };
        pairs
            .iter()
            .map(|(id, name)| WasteSubtype {
                id: *id,
                name: (*name).to_string(),
            })
            .collect()
    }
}

impl std::fmt::Display for WasteStream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A collection subtype within a waste stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WasteSubtype {
    /// Backend identifier.
    pub id: i64,
    /// Display name, e.g. "Kerbside Recycling".
    pub name: String,
}

/// A waste stream as reported by `/api/waste-types`, with its subtypes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WasteType {
    /// Backend identifier.
    pub id: i64,
    /// Stream name, e.g. "recyclable".
    pub name: String,
    /// Subtypes belonging to this stream.
    pub subtypes: Vec<WasteSubtype>,
}

impl WasteType {
    /// Returns the typed stream for this waste type, if it is a known one.
    pub fn stream(&self) -> Option<WasteStream> {
        WasteStream::from_name(&self.name)
    }
}

/// Raw `/api/waste-types` row before the subtype string is unpacked.
#[derive(Debug, Deserialize)]
pub(crate) struct RawWasteType {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub subtypes: Option<String>,
}

impl TryFrom<RawWasteType> for WasteType {
    type Error = ApiError;

    fn try_from(raw: RawWasteType) -> Result<Self, Self::Error> {
        let subtypes = match raw.subtypes.as_deref() {
            Some(packed) => parse_subtypes(packed)?,
            None => Vec::new(),
        };
        Ok(Self {
            id: raw.id,
            name: raw.name,
            subtypes,
        })
    }
}

/// Unpacks a `GROUP_CONCAT` subtype string (`"id:name,id:name,..."`).
pub(crate) fn parse_subtypes(packed: &str) -> Result<Vec<WasteSubtype>, ApiError> {
    packed
        .split(',')
        .filter(|part| !part.is_empty())
        .map(|part| {
            let (id, name) = part.split_once(':').ok_or_else(|| {
                ApiError::parse(format!("malformed subtype entry '{part}'"))
            })?;
            let id = id.parse::<i64>().map_err(|_| {
                ApiError::parse(format!("non-numeric subtype id in '{part}'"))
            })?;
            Ok(WasteSubtype {
                id,
                name: name.to_string(),
            })
        })
        .collect()
}
