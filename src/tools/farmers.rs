//! Farmer MCP Tools
//!
//! Farmer listings and profiles with land portfolio totals.

use serde::Serialize;

use crate::area::{summarize_areas, AreaField, LandAreaDisplay};
use crate::dataset::{page_window, Dataset, FarmerFilter, Page, PAGE_WINDOW};
use crate::models::Farmer;

use super::lands::LandSummary;

/// Farmer row for list results
#[derive(Debug, Serialize)]
pub struct FarmerSummary {
    pub id: i64,
    pub farmer_id: Option<i64>,
    pub farmer_name: String,
    pub father_name: Option<String>,
    pub mobile_number: Option<String>,
    pub village_name: Option<String>,
    pub source_api: Option<String>,
    pub total_land_records: usize,
    pub total_land: LandAreaDisplay,
}

impl FarmerSummary {
    pub fn from_farmer(dataset: &Dataset, farmer: &Farmer) -> Self {
        let lands = dataset.lands_for_farmer(farmer);

        Self {
            id: farmer.id,
            farmer_id: farmer.farmer_id,
            farmer_name: farmer.display_name().to_string(),
            father_name: farmer.father_name.clone(),
            mobile_number: farmer.mobile_number.clone(),
            village_name: farmer.village_name.clone(),
            source_api: farmer.source_api.clone(),
            total_land_records: lands.len(),
            total_land: summarize_areas(lands.iter().copied(), AreaField::TotalLand),
        }
    }
}

/// Farmer profile with every land record and portfolio totals
#[derive(Debug, Serialize)]
pub struct FarmerDetail {
    pub farmer: Farmer,
    pub lands: Vec<LandSummary>,
    pub total_land_records: usize,
    pub total_land: LandAreaDisplay,
    pub cultivation: LandAreaDisplay,
}

/// Response for list_farmers
#[derive(Debug, Serialize)]
pub struct ListFarmersResponse {
    #[serde(flatten)]
    pub page: Page<FarmerSummary>,
    pub page_links: Vec<usize>,
}

/// Search and page through farmers
pub fn list_farmers(
    dataset: &Dataset,
    filter: &FarmerFilter,
    page: usize,
    per_page: usize,
) -> ListFarmersResponse {
    let page = dataset
        .search_farmers(filter, page, per_page)
        .map(|farmer| FarmerSummary::from_farmer(dataset, farmer));
    let page_links = page_window(page.page, page.total_pages, PAGE_WINDOW).collect();

    ListFarmersResponse { page, page_links }
}

/// Get a farmer profile by ID
pub fn get_farmer(dataset: &Dataset, id: i64) -> Option<FarmerDetail> {
    let farmer = dataset.get_farmer(id)?;
    let lands = dataset.lands_for_farmer(farmer);

    Some(FarmerDetail {
        farmer: farmer.clone(),
        lands: lands
            .iter()
            .map(|land| LandSummary::from_record(dataset, land))
            .collect(),
        total_land_records: lands.len(),
        total_land: summarize_areas(lands.iter().copied(), AreaField::TotalLand),
        cultivation: summarize_areas(lands.iter().copied(), AreaField::Cultivation),
    })
}
