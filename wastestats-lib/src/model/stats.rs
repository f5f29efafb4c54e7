//! Result-row and statistics models

use std::collections::HashMap;

use serde::Deserialize;

/// Headline survey statistics for one reporting period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct PeriodStats {
    /// Number of LGAs surveyed in the period.
    pub total_lgas: i64,
    /// Total households surveyed across those LGAs.
    pub total_houses: i64,
}

/// Landing-page statistics keyed by period label (e.g. `"2018-2019"`).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct LandingStats {
    periods: HashMap<String, PeriodStats>,
}

impl LandingStats {
    /// Looks up the statistics for one period label.
    pub fn period(&self, label: &str) -> Option<PeriodStats> {
        self.periods.get(label).copied()
    }

    /// Iterates over `(period label, stats)` pairs in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, PeriodStats)> {
        self.periods.iter().map(|(label, stats)| (label.as_str(), *stats))
    }

    /// Returns the number of reporting periods present.
    pub fn len(&self) -> usize {
        self.periods.len()
    }

    /// Returns `true` if no periods are present.
    pub fn is_empty(&self) -> bool {
        self.periods.is_empty()
    }
}

/// One LGA's row in a comparison result.
///
/// Every numeric field is optional: the backend emits `null` where the
/// aggregate is undefined (e.g. a recycling percentage over zero collected
/// tonnes), and absent fields deserialize to `None` rather than zero.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ComparisonRow {
    /// Council name.
    pub lga_name: String,
    /// Resident population of the LGA.
    #[serde(default)]
    pub population: Option<i64>,
    /// Households covered by the survey.
    #[serde(default)]
    pub houses_surveyed: Option<i64>,
    /// Total tonnes collected over the selected subtypes.
    #[serde(default)]
    pub total_collected: Option<f64>,
    /// Total tonnes recycled over the selected subtypes.
    #[serde(default)]
    pub total_recycled: Option<f64>,
    /// Recycled share of collected tonnage, in percent.
    #[serde(default)]
    pub recycling_percentage: Option<f64>,
    /// Collected tonnes per surveyed household.
    #[serde(default)]
    pub avg_per_household: Option<f64>,
}

/// One LGA's row in a similarity result, ordered by closeness of
/// recycling rate to the base LGA.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SimilarLga {
    /// Backend identifier.
    pub lga_id: i64,
    /// Council name.
    pub lga_name: String,
    /// Resident population of the LGA.
    #[serde(default)]
    pub population: Option<i64>,
    /// Households covered by the survey.
    #[serde(default)]
    pub houses_surveyed: Option<i64>,
    /// Total tonnes collected.
    #[serde(default)]
    pub total_collected: Option<f64>,
    /// Total tonnes recycled.
    #[serde(default)]
    pub total_recycled: Option<f64>,
    /// Recycling rate, in percent.
    #[serde(default)]
    pub recycle_rate: Option<f64>,
    /// Absolute difference from the base LGA's recycling rate.
    #[serde(default)]
    pub difference: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_landing_stats_deserialize() {
        let stats: LandingStats = serde_json::from_str(
            r#"{"2018-2019": {"total_lgas": 15, "total_houses": 812000},
                "2019-2020": {"total_lgas": 15, "total_houses": 824500}}"#,
        )
        .unwrap();
        assert_eq!(stats.len(), 2);
        assert_eq!(stats.period("2018-2019").unwrap().total_lgas, 15);
        assert_eq!(stats.period("2019-2020").unwrap().total_houses, 824500);
        assert!(stats.period("2020-2021").is_none());
    }

    #[test]
    fn test_comparison_row_null_and_absent_fields() {
        let row: ComparisonRow = serde_json::from_str(
            r#"{"lga_name": "Byron", "population": 34600,
                "houses_surveyed": null, "total_collected": 1203.5}"#,
        )
        .unwrap();
        assert_eq!(row.lga_name, "Byron");
        assert_eq!(row.population, Some(34600));
        assert_eq!(row.houses_surveyed, None);
        assert_eq!(row.total_collected, Some(1203.5));
        // Absent entirely, not just null.
        assert_eq!(row.recycling_percentage, None);
        assert_eq!(row.avg_per_household, None);
    }

    #[test]
    fn test_similar_lga_deserialize() {
        let row: SimilarLga = serde_json::from_str(
            r#"{"lga_id": 5, "lga_name": "Byron", "population": 34600,
                "houses_surveyed": 14200, "total_collected": 1203.5,
                "total_recycled": 640.2, "recycle_rate": 53.2,
                "difference": 1.7}"#,
        )
        .unwrap();
        assert_eq!(row.lga_id, 5);
        assert_eq!(row.recycle_rate, Some(53.2));
        assert_eq!(row.difference, Some(1.7));
    }
}
