//! Area aggregation across land records
//!
//! Components are summed per unit before any conversion, so a farmer's
//! portfolio displays the literal sum of what was recorded.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::converter::{format_acres_value, format_traditional_string, LandAreaDisplay};
use super::units::{parse_component, TraditionalArea};

/// Which kanal/marle/sarsai triple of a land record to read
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AreaField {
    /// Total land: `kanal`, `marle`, `sarsai`
    #[default]
    TotalLand,
    /// Area under cultivation: `land_owner_area_k`, `land_owner_area_m`, `land_owner_area_sarsai`
    Cultivation,
}

impl AreaField {
    /// Raw field names holding the kanal, marle and sarsai components
    pub fn field_names(&self) -> [&'static str; 3] {
        match self {
            AreaField::TotalLand => ["kanal", "marle", "sarsai"],
            AreaField::Cultivation => [
                "land_owner_area_k",
                "land_owner_area_m",
                "land_owner_area_sarsai",
            ],
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AreaField::TotalLand => "total_land",
            AreaField::Cultivation => "cultivation",
        }
    }

    /// Parse from string, defaulting to total land
    pub fn from_str(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "cultivation" | "area_under_cultivation" | "land_owner_area" => AreaField::Cultivation,
            _ => AreaField::TotalLand,
        }
    }
}

/// Anything that carries land-area triples
pub trait AreaSource {
    fn area(&self, field: AreaField) -> TraditionalArea;
}

/// Raw JSON records, as they come from the backend. Missing keys are zero.
impl AreaSource for Value {
    fn area(&self, field: AreaField) -> TraditionalArea {
        let [k, m, s] = field.field_names();
        let read = |key: &str| self.get(key).map_or(0.0, parse_component);
        TraditionalArea::new(read(k), read(m), read(s))
    }
}

/// Sum each component independently across records.
///
/// The result is not renormalized: three records of 10 marle give 30 marle.
pub fn aggregate_traditional_areas<'a, R, I>(records: I, field: AreaField) -> TraditionalArea
where
    R: AreaSource + 'a,
    I: IntoIterator<Item = &'a R>,
{
    records.into_iter().map(|record| record.area(field)).sum()
}

/// Aggregate and render both representations
pub fn summarize_areas<'a, R, I>(records: I, field: AreaField) -> LandAreaDisplay
where
    R: AreaSource + 'a,
    I: IntoIterator<Item = &'a R>,
{
    LandAreaDisplay::from_area(aggregate_traditional_areas(records, field))
}

/// Total land of all records in acres, fixed to two decimals
pub fn total_land_area_in_acres<'a, R, I>(records: I) -> String
where
    R: AreaSource + 'a,
    I: IntoIterator<Item = &'a R>,
{
    let total = aggregate_traditional_areas(records, AreaField::TotalLand);
    format_acres_value(total.to_acres())
}

/// Total land of all records as raw summed "K/M/S" text
pub fn total_land_area_traditional<'a, R, I>(records: I) -> String
where
    R: AreaSource + 'a,
    I: IntoIterator<Item = &'a R>,
{
    format_traditional_string(&aggregate_traditional_areas(records, AreaField::TotalLand))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_records() -> Vec<Value> {
        vec![
            json!({
                "kanal": 2, "marle": 10, "sarsai": 4,
                "land_owner_area_k": 1, "land_owner_area_m": 5
            }),
            json!({"kanal": "1", "marle": "15", "sarsai": "7", "land_owner_area_sarsai": "3"}),
            json!({"kanal": null, "marle": "abc", "sarsai": 2.5}),
            json!({"owner_name": "no area fields"}),
            json!({"kanal": 4.5, "marle": 0, "sarsai": 0, "land_owner_area_k": "2"}),
        ]
    }

    #[test]
    fn test_aggregate_total_land() {
        let total = aggregate_traditional_areas(&sample_records(), AreaField::TotalLand);
        assert_eq!(total, TraditionalArea::new(7.5, 25.0, 13.5));
    }

    #[test]
    fn test_aggregate_cultivation() {
        let total = aggregate_traditional_areas(&sample_records(), AreaField::Cultivation);
        assert_eq!(total, TraditionalArea::new(3.0, 5.0, 3.0));
    }

    #[test]
    fn test_aggregate_empty() {
        let none: Vec<Value> = Vec::new();
        assert_eq!(
            aggregate_traditional_areas(&none, AreaField::TotalLand),
            TraditionalArea::zero()
        );
        assert_eq!(total_land_area_in_acres(&none), "0.00");
        assert_eq!(total_land_area_traditional(&none), "0K/0M/0S");
    }

    #[test]
    fn test_aggregate_order_independent() {
        let records = sample_records();
        let expected = aggregate_traditional_areas(&records, AreaField::TotalLand);

        let mut reversed = records.clone();
        reversed.reverse();
        assert_eq!(aggregate_traditional_areas(&reversed, AreaField::TotalLand), expected);

        let mut rotated = records.clone();
        rotated.rotate_left(2);
        assert_eq!(aggregate_traditional_areas(&rotated, AreaField::TotalLand), expected);
    }

    #[test]
    fn test_aggregate_is_additive() {
        let records = sample_records();
        let (left, right) = records.split_at(2);
        let combined = aggregate_traditional_areas(left, AreaField::TotalLand)
            + aggregate_traditional_areas(right, AreaField::TotalLand);
        assert_eq!(combined, aggregate_traditional_areas(&records, AreaField::TotalLand));
    }

    #[test]
    fn test_sum_before_convert_matches_convert_then_sum() {
        let records = sample_records();
        let summed_first = aggregate_traditional_areas(&records, AreaField::TotalLand).to_acres();
        let converted_first: f64 = records
            .iter()
            .map(|r| r.area(AreaField::TotalLand).to_acres())
            .sum();
        assert!((summed_first - converted_first).abs() < 1e-9);
    }

    #[test]
    fn test_portfolio_strings() {
        let records = sample_records();
        // 7.5*180 + 25*9 + 13.5 = 1588.5 sarsai
        assert_eq!(total_land_area_in_acres(&records), "1.10");
        assert_eq!(total_land_area_traditional(&records), "7.5K/25M/13.5S");
    }

    #[test]
    fn test_summarize_areas() {
        let summary = summarize_areas(&sample_records(), AreaField::Cultivation);
        assert_eq!(summary.traditional_formatted, "3K/5M/3S");
        assert_eq!(summary.normalized.to_string(), "3K/5M/3S");
        assert_eq!(summary.acres_formatted, "0.41 acres");
    }

    #[test]
    fn test_area_field_parsing() {
        assert_eq!(AreaField::from_str("cultivation"), AreaField::Cultivation);
        assert_eq!(AreaField::from_str(" Total_Land "), AreaField::TotalLand);
        assert_eq!(AreaField::from_str("unknown"), AreaField::TotalLand);
        assert_eq!(AreaField::Cultivation.as_str(), "cultivation");
    }
}
