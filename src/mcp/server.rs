//! LAM MCP Server Implementation
//!
//! Implements the MCP server with all LAM tools.

use std::path::PathBuf;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use rmcp::handler::server::router::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{
    CallToolResult, Content, Implementation, ProtocolVersion, ServerCapabilities, ServerInfo,
};
use rmcp::{schemars, tool, tool_handler, tool_router, ErrorData as McpError, ServerHandler};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::sync::Mutex;

use crate::area::AreaField;
use crate::dataset::{Dataset, FarmerFilter, DEFAULT_PER_PAGE};
use crate::models::LandRecordUpdate;
use crate::tools::conversion;
use crate::tools::farmers;
use crate::tools::lands;
use crate::tools::stats;
use crate::tools::status::StatusTracker;

/// LAM MCP Service
#[derive(Clone)]
pub struct LamService {
    status_tracker: Arc<Mutex<StatusTracker>>,
    dataset: Arc<RwLock<Dataset>>,
    tool_router: ToolRouter<LamService>,
}

impl LamService {
    pub fn new(dataset_path: PathBuf, dataset: Dataset) -> Self {
        Self {
            status_tracker: Arc::new(Mutex::new(StatusTracker::new(dataset_path))),
            dataset: Arc::new(RwLock::new(dataset)),
            tool_router: Self::tool_router(),
        }
    }

    fn read_dataset(&self) -> Result<RwLockReadGuard<'_, Dataset>, McpError> {
        self.dataset
            .read()
            .map_err(|_| McpError::internal_error("Dataset lock poisoned", None))
    }

    fn write_dataset(&self) -> Result<RwLockWriteGuard<'_, Dataset>, McpError> {
        self.dataset
            .write()
            .map_err(|_| McpError::internal_error("Dataset lock poisoned", None))
    }
}

fn json_result<T: Serialize>(value: &T) -> Result<CallToolResult, McpError> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| McpError::internal_error(format!("Serialization error: {}", e), None))?;
    Ok(CallToolResult::success(vec![Content::text(json)]))
}

// ============================================================================
// Conversion Parameter Structs
// ============================================================================

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct AreaTripleParams {
    /// Kanal (number or numeric text; anything else counts as 0)
    #[serde(default)]
    pub kanal: Value,
    /// Marle (1 kanal = 20 marle)
    #[serde(default)]
    pub marle: Value,
    /// Sarsai (1 marle = 9 sarsai)
    #[serde(default)]
    pub sarsai: Value,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct DecomposeSarsaiParams {
    /// Total area in sarsai (1 acre = 1440 sarsai)
    pub total_sarsai: f64,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct AcresToTraditionalParams {
    /// Area in acres
    pub acres: f64,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct AggregateLandAreasParams {
    /// Land record objects carrying kanal/marle/sarsai or land_owner_area_k/m/sarsai fields
    pub records: Vec<Value>,
    /// Which triple to sum: total_land (default) or cultivation
    #[serde(default)]
    pub field: Option<String>,
}

// ============================================================================
// Land Record Parameter Structs
// ============================================================================

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ListLandsParams {
    /// Search owner, village, survey number, district, city or farmer name
    #[serde(default)]
    pub search: String,
    /// Page number, starting at 1
    #[serde(default = "default_page")]
    pub page: usize,
    /// Records per page (default 10, max 100)
    #[serde(default = "default_per_page")]
    pub per_page: usize,
}

fn default_page() -> usize { 1 }
fn default_per_page() -> usize { DEFAULT_PER_PAGE }

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct GetLandParams {
    /// Land record ID
    pub id: i64,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct UpdateLandParams {
    /// Land record ID
    pub id: i64,
    /// Land type
    #[serde(rename = "type")]
    pub land_type: Option<String>,
    /// Cultivated kanal
    pub land_owner_area_k: Option<Value>,
    /// Cultivated marle
    pub land_owner_area_m: Option<Value>,
    /// Cultivated sarsai
    pub land_owner_area_sarsai: Option<Value>,
    /// Khewat number
    pub khewat_no: Option<String>,
}

// ============================================================================
// Farmer Parameter Structs
// ============================================================================

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ListFarmersParams {
    /// Search name, father's name, mobile or Aadhaar number
    pub search: Option<String>,
    /// Only farmers imported from this source
    pub source_api: Option<String>,
    /// Only farmers with no land records
    #[serde(default)]
    pub without_land: bool,
    /// Page number, starting at 1
    #[serde(default = "default_page")]
    pub page: usize,
    /// Farmers per page (default 10, max 100)
    #[serde(default = "default_per_page")]
    pub per_page: usize,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct GetFarmerParams {
    /// Farmer ID
    pub id: i64,
}

// ============================================================================
// Tool Implementations
// ============================================================================

#[tool_router]
impl LamService {
    // --- Status ---

    #[tool(description = "Get the current status of the LAM service including build info, dataset status, and process information")]
    async fn get_status(&self) -> Result<CallToolResult, McpError> {
        let tracker = self.status_tracker.lock().await;
        let status = {
            let dataset = self.read_dataset()?;
            tracker.get_status(&dataset)
        };
        json_result(&status)
    }

    #[tool(description = "Get a guide to kanal/marle/sarsai units and how LAM reports land areas. Call this before working with land areas.")]
    fn area_instructions(&self) -> Result<CallToolResult, McpError> {
        use crate::tools::status::AREA_INSTRUCTIONS;
        Ok(CallToolResult::success(vec![Content::text(AREA_INSTRUCTIONS)]))
    }

    // --- Conversion ---

    #[tool(description = "Convert kanal/marle/sarsai to acres (1 acre = 8 kanal = 160 marle = 1440 sarsai). Non-numeric or missing values count as 0.")]
    fn convert_to_acres(&self, Parameters(p): Parameters<AreaTripleParams>) -> Result<CallToolResult, McpError> {
        json_result(&conversion::convert_to_acres(&p.kanal, &p.marle, &p.sarsai))
    }

    #[tool(description = "Split a sarsai total into canonical kanal/marle/sarsai (marle < 20, sarsai < 9). Fractional sarsai is dropped.")]
    fn decompose_sarsai(&self, Parameters(p): Parameters<DecomposeSarsaiParams>) -> Result<CallToolResult, McpError> {
        let result = conversion::decompose_sarsai(p.total_sarsai)
            .map_err(|e| McpError::invalid_params(e, None))?;
        json_result(&result)
    }

    #[tool(description = "Split an acreage into canonical kanal/marle/sarsai")]
    fn acres_to_traditional(&self, Parameters(p): Parameters<AcresToTraditionalParams>) -> Result<CallToolResult, McpError> {
        let result = conversion::acres_to_traditional_units(p.acres)
            .map_err(|e| McpError::invalid_params(e, None))?;
        json_result(&result)
    }

    #[tool(description = "Format one kanal/marle/sarsai triple as acres and as K/M/S text")]
    fn format_land_area(&self, Parameters(p): Parameters<AreaTripleParams>) -> Result<CallToolResult, McpError> {
        json_result(&conversion::format_land_area(&p.kanal, &p.marle, &p.sarsai))
    }

    #[tool(description = "Sum kanal, marle and sarsai separately across the given land records, then convert the sums to acres. field: total_land (default) or cultivation.")]
    fn aggregate_land_areas(&self, Parameters(p): Parameters<AggregateLandAreasParams>) -> Result<CallToolResult, McpError> {
        let field = p.field.as_deref().map(AreaField::from_str).unwrap_or_default();
        json_result(&conversion::aggregate_land_areas(&p.records, field))
    }

    // --- Land Records ---

    #[tool(description = "List land records with optional search and pagination. Each row shows total land and area under cultivation.")]
    fn list_lands(&self, Parameters(p): Parameters<ListLandsParams>) -> Result<CallToolResult, McpError> {
        let dataset = self.read_dataset()?;
        json_result(&lands::list_lands(&dataset, &p.search, p.page, p.per_page))
    }

    #[tool(description = "Get a land record by ID with total and cultivation areas")]
    fn get_land(&self, Parameters(p): Parameters<GetLandParams>) -> Result<CallToolResult, McpError> {
        let dataset = self.read_dataset()?;
        match lands::get_land(&dataset, p.id) {
            Some(detail) => json_result(&detail),
            None => Ok(CallToolResult::success(vec![Content::text(format!(
                r#"{{"error": "Land record not found", "id": {}}}"#,
                p.id
            ))])),
        }
    }

    #[tool(description = "Edit a land record's type, khewat number or cultivation area. Only provided fields change. Edits are kept in memory for this session.")]
    fn update_land(&self, Parameters(p): Parameters<UpdateLandParams>) -> Result<CallToolResult, McpError> {
        let update = LandRecordUpdate {
            land_type: p.land_type,
            land_owner_area_k: p.land_owner_area_k,
            land_owner_area_m: p.land_owner_area_m,
            land_owner_area_sarsai: p.land_owner_area_sarsai,
            khewat_no: p.khewat_no,
        };
        let mut dataset = self.write_dataset()?;
        let result = lands::update_land(&mut dataset, p.id, &update)
            .map_err(|e| McpError::internal_error(e, None))?;
        json_result(&result)
    }

    // --- Farmers ---

    #[tool(description = "List farmers with search, source filter, no-land filter and pagination. Each row includes total land in acres.")]
    fn list_farmers(&self, Parameters(p): Parameters<ListFarmersParams>) -> Result<CallToolResult, McpError> {
        let filter = FarmerFilter {
            search: p.search,
            source_api: p.source_api,
            without_land: p.without_land,
        };
        let dataset = self.read_dataset()?;
        json_result(&farmers::list_farmers(&dataset, &filter, p.page, p.per_page))
    }

    #[tool(description = "Get a farmer profile with every land record and portfolio totals for total land and cultivation")]
    fn get_farmer(&self, Parameters(p): Parameters<GetFarmerParams>) -> Result<CallToolResult, McpError> {
        let dataset = self.read_dataset()?;
        match farmers::get_farmer(&dataset, p.id) {
            Some(detail) => json_result(&detail),
            None => Ok(CallToolResult::success(vec![Content::text(format!(
                r#"{{"error": "Farmer not found", "id": {}}}"#,
                p.id
            ))])),
        }
    }

    // --- Stats ---

    #[tool(description = "Get total farmers, total land records and total land area in acres")]
    fn get_stats(&self) -> Result<CallToolResult, McpError> {
        let dataset = self.read_dataset()?;
        json_result(&stats::get_stats(&dataset))
    }
}

// ============================================================================
// Server Handler
// ============================================================================

#[tool_handler]
impl ServerHandler for LamService {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::LATEST,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "lam".into(),
                version: crate::build_info::VERSION.into(),
                title: Some("Land Area Manager".into()),
                icons: None,
                website_url: None,
            },
            instructions: Some(
                "Land Area Manager (LAM) - Farmer land records and kanal/marle/sarsai area conversion. \
                 Call area_instructions first. \
                 Conversion: convert_to_acres, decompose_sarsai, acres_to_traditional, format_land_area, aggregate_land_areas. \
                 Lands: list_lands/get_land/update_land. \
                 Farmers: list_farmers/get_farmer. \
                 Overview: get_stats, get_status."
                    .into(),
            ),
        }
    }
}
