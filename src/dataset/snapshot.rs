//! Dataset snapshot
//!
//! Holds farmers and land records for the lifetime of the process. Inline
//! edits change the in-memory copy only; nothing is written back.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::area::{aggregate_traditional_areas, AreaField};
use crate::models::{Farmer, LandRecord, LandRecordUpdate};

use super::pagination::{paginate, Page};

/// Dataset error types
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("Failed to read dataset: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid dataset JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Land record not found: {0}")]
    LandNotFound(i64),
}

/// Result type for dataset operations
pub type DatasetResult<T> = Result<T, DatasetError>;

/// Filters for farmer listings
#[derive(Debug, Clone, Default)]
pub struct FarmerFilter {
    /// Substring match on name, father's name, mobile and Aadhaar
    pub search: Option<String>,
    /// Exact match on the source the farmer was imported from
    pub source_api: Option<String>,
    /// Only farmers with no land records at all
    pub without_land: bool,
}

/// Headline counts for the dashboard
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DatasetStats {
    pub total_farmers: usize,
    pub total_lands: usize,
    /// Total land of every record, in acres
    pub total_area: f64,
}

/// Farmers and land records
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Dataset {
    #[serde(default)]
    pub farmers: Vec<Farmer>,
    #[serde(default, alias = "lands")]
    pub land_records: Vec<LandRecord>,
}

impl Dataset {
    pub fn new(farmers: Vec<Farmer>, land_records: Vec<LandRecord>) -> Self {
        Self {
            farmers,
            land_records,
        }
    }

    /// Load a snapshot from a JSON file
    pub fn load<P: AsRef<Path>>(path: P) -> DatasetResult<Self> {
        let contents = std::fs::read_to_string(path.as_ref())?;
        let dataset = Self::from_json(&contents)?;
        tracing::info!(
            "Loaded {} farmers and {} land records from {}",
            dataset.farmers.len(),
            dataset.land_records.len(),
            path.as_ref().display()
        );
        Ok(dataset)
    }

    /// Parse a snapshot from JSON text
    pub fn from_json(json: &str) -> DatasetResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn get_farmer(&self, id: i64) -> Option<&Farmer> {
        self.farmers.iter().find(|f| f.id == id)
    }

    pub fn get_land(&self, id: i64) -> Option<&LandRecord> {
        self.land_records.iter().find(|l| l.id == id)
    }

    /// Land records owned by a farmer, joined on `farmer_id`
    pub fn lands_for_farmer(&self, farmer: &Farmer) -> Vec<&LandRecord> {
        match farmer.farmer_id {
            Some(farmer_id) => self
                .land_records
                .iter()
                .filter(|l| l.farmer_id == Some(farmer_id))
                .collect(),
            None => Vec::new(),
        }
    }

    /// The farmer a land record belongs to
    pub fn farmer_for_land(&self, land: &LandRecord) -> Option<&Farmer> {
        let farmer_id = land.farmer_id?;
        self.farmers.iter().find(|f| f.farmer_id == Some(farmer_id))
    }

    /// Search land records by record fields or the owning farmer's name,
    /// ordered by ID
    pub fn search_lands(&self, query: &str, page: usize, per_page: usize) -> Page<&LandRecord> {
        let needle = query.trim().to_lowercase();
        let mut matches: Vec<&LandRecord> = self
            .land_records
            .iter()
            .filter(|land| {
                land.matches_search(&needle)
                    || self
                        .farmer_for_land(land)
                        .and_then(|f| f.farmer_name.as_deref())
                        .is_some_and(|name| name.to_lowercase().contains(&needle))
            })
            .collect();
        matches.sort_by_key(|land| land.id);

        paginate(matches, page, per_page)
    }

    /// List farmers matching every set filter, ordered by ID
    pub fn search_farmers(
        &self,
        filter: &FarmerFilter,
        page: usize,
        per_page: usize,
    ) -> Page<&Farmer> {
        let mut matches: Vec<&Farmer> = self
            .farmers
            .iter()
            .filter(|f| filter.search.as_deref().map_or(true, |q| f.matches_search(q)))
            .filter(|f| {
                filter
                    .source_api
                    .as_deref()
                    .map_or(true, |src| f.source_api.as_deref() == Some(src))
            })
            .filter(|f| !filter.without_land || self.lands_for_farmer(f).is_empty())
            .collect();
        matches.sort_by_key(|farmer| farmer.id);

        paginate(matches, page, per_page)
    }

    /// Apply an inline edit to a land record
    pub fn update_land(
        &mut self,
        id: i64,
        update: &LandRecordUpdate,
    ) -> DatasetResult<&LandRecord> {
        let land = self
            .land_records
            .iter_mut()
            .find(|l| l.id == id)
            .ok_or(DatasetError::LandNotFound(id))?;

        land.apply_update(update);
        tracing::info!("Updated land record {}", id);
        Ok(land)
    }

    /// Counts and total land area
    pub fn stats(&self) -> DatasetStats {
        let total_area = aggregate_traditional_areas(&self.land_records, AreaField::TotalLand);
        DatasetStats {
            total_farmers: self.farmers.len(),
            total_lands: self.land_records.len(),
            total_area: total_area.to_acres(),
        }
    }
}
