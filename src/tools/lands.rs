//! Land Record MCP Tools
//!
//! Listing, lookup and inline editing of land records.

use serde::Serialize;
use serde_json::Value;

use crate::area::{AreaField, AreaSource, LandAreaDisplay};
use crate::dataset::{page_window, Dataset, Page, PAGE_WINDOW};
use crate::models::{LandRecord, LandRecordUpdate};

/// Land record row for list results
#[derive(Debug, Serialize)]
pub struct LandSummary {
    pub id: i64,
    pub farmer_id: Option<i64>,
    pub farmer_name: String,
    pub sr_no: Option<String>,
    pub owner_name: Option<String>,
    pub village_name: Option<String>,
    pub district_name: Option<String>,
    pub city_name: Option<String>,
    pub land_type: Option<String>,
    pub status: Value,
    pub total_land: LandAreaDisplay,
    pub cultivation: LandAreaDisplay,
}

impl LandSummary {
    pub fn from_record(dataset: &Dataset, land: &LandRecord) -> Self {
        let farmer_name = dataset
            .farmer_for_land(land)
            .map(|f| f.display_name().to_string())
            .unwrap_or_else(|| "Unknown Farmer".to_string());

        Self {
            id: land.id,
            farmer_id: land.farmer_id,
            farmer_name,
            sr_no: land.sr_no.clone(),
            owner_name: land.owner_name.clone(),
            village_name: land.village_name.clone(),
            district_name: land.district_name.clone(),
            city_name: land.city_name.clone(),
            land_type: land.land_type.clone(),
            status: land.status.clone(),
            total_land: LandAreaDisplay::from_area(land.area(AreaField::TotalLand)),
            cultivation: LandAreaDisplay::from_area(land.area(AreaField::Cultivation)),
        }
    }
}

/// Full land record detail response
#[derive(Debug, Serialize)]
pub struct LandDetail {
    #[serde(flatten)]
    pub summary: LandSummary,
    pub khewat_no: Option<String>,
    pub khasra_no: Option<String>,
    pub farmer_phone: Option<String>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

/// Response for list_lands
#[derive(Debug, Serialize)]
pub struct ListLandsResponse {
    #[serde(flatten)]
    pub page: Page<LandSummary>,
    /// Page numbers to offer as navigation links
    pub page_links: Vec<usize>,
}

/// Response for update_land
#[derive(Debug, Serialize)]
pub struct UpdateLandResponse {
    pub success: bool,
    pub id: i64,
    pub updated_at: Option<String>,
    pub cultivation: LandAreaDisplay,
}

/// Search and page through land records
pub fn list_lands(
    dataset: &Dataset,
    search: &str,
    page: usize,
    per_page: usize,
) -> ListLandsResponse {
    let page = dataset
        .search_lands(search, page, per_page)
        .map(|land| LandSummary::from_record(dataset, land));
    let page_links = page_window(page.page, page.total_pages, PAGE_WINDOW).collect();

    ListLandsResponse { page, page_links }
}

/// Get a land record with both area displays
pub fn get_land(dataset: &Dataset, id: i64) -> Option<LandDetail> {
    let land = dataset.get_land(id)?;
    let farmer_phone = dataset
        .farmer_for_land(land)
        .and_then(|f| f.mobile_number.clone());

    Some(LandDetail {
        summary: LandSummary::from_record(dataset, land),
        khewat_no: land.khewat_no.clone(),
        khasra_no: land.khasra_no.clone(),
        farmer_phone,
        created_at: land.created_at.clone(),
        updated_at: land.updated_at.clone(),
    })
}

/// Apply an inline edit to a land record
pub fn update_land(
    dataset: &mut Dataset,
    id: i64,
    update: &LandRecordUpdate,
) -> Result<UpdateLandResponse, String> {
    if update.is_empty() {
        return Err("No fields to update".to_string());
    }

    let land = dataset
        .update_land(id, update)
        .map_err(|e| format!("Failed to update land record: {}", e))?;

    Ok(UpdateLandResponse {
        success: true,
        id: land.id,
        updated_at: land.updated_at.clone(),
        cultivation: LandAreaDisplay::from_area(land.cultivation_area()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Farmer;
    use serde_json::json;

    fn dataset() -> Dataset {
        let farmers = vec![Farmer {
            id: 1,
            farmer_id: Some(501),
            farmer_name: Some("Gurpreet Singh".to_string()),
            mobile_number: Some("9876543210".to_string()),
            ..Default::default()
        }];
        let lands = (1..=12)
            .map(|id| LandRecord {
                id,
                farmer_id: if id % 2 == 0 { Some(501) } else { None },
                village_name: Some(if id <= 6 { "Kheri" } else { "Nissing" }.to_string()),
                kanal: json!(id),
                land_owner_area_m: json!("20"),
                ..Default::default()
            })
            .collect();
        Dataset::new(farmers, lands)
    }

    #[test]
    fn test_list_lands_pages_and_links() {
        let ds = dataset();
        let resp = list_lands(&ds, "", 2, 5);
        assert_eq!(resp.page.total, 12);
        assert_eq!(resp.page.total_pages, 3);
        assert_eq!(resp.page.items.len(), 5);
        assert_eq!(resp.page.items[0].id, 6);
        assert_eq!(resp.page_links, vec![1, 2, 3]);
    }

    #[test]
    fn test_list_lands_search() {
        let ds = dataset();
        let resp = list_lands(&ds, "nissing", 1, 10);
        assert_eq!(resp.page.total, 6);
    }

    #[test]
    fn test_land_summary_farmer_name_fallback() {
        let ds = dataset();
        let resp = list_lands(&ds, "", 1, 2);
        assert_eq!(resp.page.items[0].farmer_name, "Unknown Farmer");
        assert_eq!(resp.page.items[1].farmer_name, "Gurpreet Singh");
    }

    #[test]
    fn test_get_land() {
        let ds = dataset();
        let detail = get_land(&ds, 8).unwrap();
        assert_eq!(detail.summary.total_land.traditional_formatted, "8K/0M/0S");
        assert_eq!(detail.summary.total_land.acres_formatted, "1.00 acres");
        assert_eq!(detail.summary.cultivation.traditional_formatted, "0K/20M/0S");
        assert_eq!(detail.farmer_phone.as_deref(), Some("9876543210"));
        assert!(get_land(&ds, 99).is_none());
    }

    #[test]
    fn test_update_land() {
        let mut ds = dataset();
        let update = LandRecordUpdate {
            land_owner_area_k: Some(json!(2)),
            ..Default::default()
        };
        let resp = update_land(&mut ds, 3, &update).unwrap();
        assert!(resp.success);
        assert_eq!(resp.cultivation.traditional_formatted, "2K/20M/0S");

        assert!(update_land(&mut ds, 3, &LandRecordUpdate::default()).is_err());
        assert!(update_land(&mut ds, 404, &update).is_err());
    }
}
