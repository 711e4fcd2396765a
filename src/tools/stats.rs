//! Dashboard statistics tool

use serde::Serialize;

use crate::area::format_acres;
use crate::dataset::Dataset;

/// Response for get_stats
#[derive(Debug, Serialize)]
pub struct StatsResponse {
    pub total_farmers: usize,
    pub total_lands: usize,
    pub total_area: f64,
    pub total_area_formatted: String,
}

/// Headline counts and total land area
pub fn get_stats(dataset: &Dataset) -> StatsResponse {
    let stats = dataset.stats();
    StatsResponse {
        total_farmers: stats.total_farmers,
        total_lands: stats.total_lands,
        total_area: stats.total_area,
        total_area_formatted: format_acres(stats.total_area),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_stats_empty() {
        let resp = get_stats(&Dataset::default());
        assert_eq!(resp.total_farmers, 0);
        assert_eq!(resp.total_lands, 0);
        assert_eq!(resp.total_area_formatted, "0.00 acres");
    }

    #[test]
    fn test_get_stats_totals() {
        let ds = Dataset::from_json(
            r#"{"land_records": [
                {"id": 1, "kanal": 8},
                {"id": 2, "marle": "80"},
                {"id": 3, "sarsai": "bad"}
            ]}"#,
        )
        .unwrap();
        let resp = get_stats(&ds);
        assert_eq!(resp.total_lands, 3);
        assert_eq!(resp.total_area_formatted, "1.50 acres");
    }
}
