//! Land Record model
//!
//! A revenue land record with its total-land and cultivation measurements.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::area::{AreaField, AreaSource, TraditionalArea};

/// Timestamp format used for record audit fields
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A land record as served by the backend.
///
/// Area components are kept as raw JSON so numbers, numeric strings and
/// nulls all survive deserialization; they are parsed only when read.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LandRecord {
    pub id: i64,
    #[serde(default)]
    pub farmer_id: Option<i64>,
    #[serde(default)]
    pub sr_no: Option<String>,
    #[serde(default)]
    pub owner_name: Option<String>,
    #[serde(default)]
    pub district_name: Option<String>,
    #[serde(default)]
    pub city_name: Option<String>,
    #[serde(default)]
    pub village_name: Option<String>,
    #[serde(default)]
    pub khewat_no: Option<String>,
    #[serde(default)]
    pub khasra_no: Option<String>,
    #[serde(default, rename = "type")]
    pub land_type: Option<String>,
    #[serde(default, alias = "verify_status")]
    pub status: Value,
    #[serde(default)]
    pub kanal: Value,
    #[serde(default)]
    pub marle: Value,
    #[serde(default)]
    pub sarsai: Value,
    #[serde(default)]
    pub land_owner_area_k: Value,
    #[serde(default)]
    pub land_owner_area_m: Value,
    #[serde(default)]
    pub land_owner_area_sarsai: Value,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

/// Inline edit of a land record. Only fields that are set get changed.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LandRecordUpdate {
    #[serde(default, rename = "type")]
    pub land_type: Option<String>,
    pub land_owner_area_k: Option<Value>,
    pub land_owner_area_m: Option<Value>,
    pub land_owner_area_sarsai: Option<Value>,
    pub khewat_no: Option<String>,
}

impl LandRecordUpdate {
    pub fn is_empty(&self) -> bool {
        self.land_type.is_none()
            && self.land_owner_area_k.is_none()
            && self.land_owner_area_m.is_none()
            && self.land_owner_area_sarsai.is_none()
            && self.khewat_no.is_none()
    }
}

impl LandRecord {
    /// Total land measurement
    pub fn total_area(&self) -> TraditionalArea {
        self.area(AreaField::TotalLand)
    }

    /// Area under cultivation
    pub fn cultivation_area(&self) -> TraditionalArea {
        self.area(AreaField::Cultivation)
    }

    /// Case-insensitive substring match on owner, village, survey number,
    /// district and city. An empty query matches everything.
    pub fn matches_search(&self, query: &str) -> bool {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return true;
        }

        [
            &self.owner_name,
            &self.village_name,
            &self.sr_no,
            &self.district_name,
            &self.city_name,
        ]
        .iter()
        .any(|field| contains_ignore_case(field.as_deref(), &needle))
    }

    /// Apply an inline edit and stamp `updated_at`.
    ///
    /// Cultivation area is not checked against total land here.
    pub fn apply_update(&mut self, update: &LandRecordUpdate) {
        if let Some(ref land_type) = update.land_type {
            self.land_type = Some(land_type.clone());
        }
        if let Some(ref k) = update.land_owner_area_k {
            self.land_owner_area_k = k.clone();
        }
        if let Some(ref m) = update.land_owner_area_m {
            self.land_owner_area_m = m.clone();
        }
        if let Some(ref s) = update.land_owner_area_sarsai {
            self.land_owner_area_sarsai = s.clone();
        }
        if let Some(ref khewat_no) = update.khewat_no {
            self.khewat_no = Some(khewat_no.clone());
        }
        self.updated_at = Some(chrono::Utc::now().format(TIMESTAMP_FORMAT).to_string());
    }
}

impl AreaSource for LandRecord {
    fn area(&self, field: AreaField) -> TraditionalArea {
        match field {
            AreaField::TotalLand => {
                TraditionalArea::from_components(&self.kanal, &self.marle, &self.sarsai)
            }
            AreaField::Cultivation => TraditionalArea::from_components(
                &self.land_owner_area_k,
                &self.land_owner_area_m,
                &self.land_owner_area_sarsai,
            ),
        }
    }
}

/// Case-insensitive containment; `needle` must already be lowercase
pub(crate) fn contains_ignore_case(haystack: Option<&str>, needle: &str) -> bool {
    haystack.is_some_and(|h| h.to_lowercase().contains(needle))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record() -> LandRecord {
        serde_json::from_value(json!({
            "id": 11,
            "farmer_id": 501,
            "sr_no": "45//12",
            "owner_name": "Gurpreet Singh",
            "village_name": "Kheri",
            "district_name": "Karnal",
            "type": "owned",
            "verify_status": 1,
            "kanal": "3",
            "marle": 12,
            "sarsai": null,
            "land_owner_area_k": 2.0,
            "land_owner_area_m": "abc"
        }))
        .unwrap()
    }

    #[test]
    fn test_deserialize_loose_fields() {
        let land = record();
        assert_eq!(land.id, 11);
        assert_eq!(land.land_type.as_deref(), Some("owned"));
        assert_eq!(land.status, json!(1));
        assert_eq!(land.land_owner_area_sarsai, Value::Null);
    }

    #[test]
    fn test_area_triples() {
        let land = record();
        assert_eq!(land.total_area(), TraditionalArea::new(3.0, 12.0, 0.0));
        assert_eq!(land.cultivation_area(), TraditionalArea::new(2.0, 0.0, 0.0));
    }

    #[test]
    fn test_matches_search() {
        let land = record();
        assert!(land.matches_search(""));
        assert!(land.matches_search("gurpreet"));
        assert!(land.matches_search("KHERI"));
        assert!(land.matches_search("45//"));
        assert!(land.matches_search("karn"));
        assert!(!land.matches_search("ambala"));
    }

    #[test]
    fn test_apply_update_only_touches_set_fields() {
        let mut land = record();
        let update = LandRecordUpdate {
            land_owner_area_m: Some(json!("7")),
            khewat_no: Some("88".to_string()),
            ..Default::default()
        };
        land.apply_update(&update);

        assert_eq!(land.khewat_no.as_deref(), Some("88"));
        assert_eq!(land.land_type.as_deref(), Some("owned"));
        assert_eq!(land.cultivation_area(), TraditionalArea::new(2.0, 7.0, 0.0));
        assert!(land.updated_at.is_some());
    }

    #[test]
    fn test_cultivation_may_exceed_total() {
        let mut land = record();
        land.apply_update(&LandRecordUpdate {
            land_owner_area_k: Some(json!(50)),
            ..Default::default()
        });
        assert!(land.cultivation_area().to_acres() > land.total_area().to_acres());
    }

    #[test]
    fn test_update_is_empty() {
        assert!(LandRecordUpdate::default().is_empty());
        let update = LandRecordUpdate {
            land_type: Some("leased".to_string()),
            ..Default::default()
        };
        assert!(!update.is_empty());
    }
}
