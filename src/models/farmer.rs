//! Farmer model
//!
//! A registered farmer. Land records link back through `farmer_id`.

use serde::{Deserialize, Serialize};

use super::land_record::contains_ignore_case;

/// A farmer as served by the backend
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Farmer {
    pub id: i64,
    #[serde(default)]
    pub farmer_id: Option<i64>,
    #[serde(default)]
    pub farmer_name: Option<String>,
    #[serde(default)]
    pub father_name: Option<String>,
    #[serde(default)]
    pub grandfather_name: Option<String>,
    #[serde(default)]
    pub mobile_number: Option<String>,
    #[serde(default)]
    pub aadhar_number: Option<String>,
    #[serde(default)]
    pub village_name: Option<String>,
    #[serde(default)]
    pub district_name: Option<String>,
    #[serde(default)]
    pub city_name: Option<String>,
    #[serde(default)]
    pub source_api: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

impl Farmer {
    /// Case-insensitive substring match on name, father's name, mobile and
    /// Aadhaar number. An empty query matches everything.
    pub fn matches_search(&self, query: &str) -> bool {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return true;
        }

        [
            &self.farmer_name,
            &self.father_name,
            &self.mobile_number,
            &self.aadhar_number,
        ]
        .iter()
        .any(|field| contains_ignore_case(field.as_deref(), &needle))
    }

    /// Display name, falling back when the record has none
    pub fn display_name(&self) -> &str {
        self.farmer_name.as_deref().unwrap_or("Unknown Farmer")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn farmer() -> Farmer {
        Farmer {
            id: 1,
            farmer_id: Some(501),
            farmer_name: Some("Gurpreet Singh".to_string()),
            father_name: Some("Harbhajan Singh".to_string()),
            mobile_number: Some("9876543210".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_matches_search() {
        let f = farmer();
        assert!(f.matches_search("  "));
        assert!(f.matches_search("harbhajan"));
        assert!(f.matches_search("98765"));
        assert!(!f.matches_search("kaur"));
    }

    #[test]
    fn test_display_name() {
        assert_eq!(farmer().display_name(), "Gurpreet Singh");
        assert_eq!(Farmer::default().display_name(), "Unknown Farmer");
    }
}
