//! Area conversion MCP Tools
//!
//! Stateless tools over the kanal/marle/sarsai converter.

use serde::Serialize;
use serde_json::Value;

use crate::area::{
    acres_to_sarsai, acres_to_traditional, aggregate_traditional_areas,
    convert_acres_to_traditional, format_acres, AreaField, LandAreaDisplay, NormalizedArea,
    TraditionalArea,
};

/// Response for convert_to_acres
#[derive(Debug, Serialize)]
pub struct ConvertToAcresResponse {
    /// Components as they were read (unparseable input shows as 0)
    pub kanal: f64,
    pub marle: f64,
    pub sarsai: f64,
    pub total_sarsai: f64,
    pub acres: f64,
    pub acres_formatted: String,
    pub traditional_formatted: String,
    pub normalized: NormalizedArea,
}

/// Response for decompose_sarsai and acres_to_traditional
#[derive(Debug, Serialize)]
pub struct DecomposeResponse {
    pub total_sarsai: f64,
    pub acres: f64,
    pub kanal: u64,
    pub marle: u32,
    pub sarsai: u32,
    pub formatted: String,
    /// Fractional sarsai dropped by the decomposition
    pub truncated_sarsai: f64,
}

/// Response for aggregate_land_areas
#[derive(Debug, Serialize)]
pub struct AggregateResponse {
    pub field: AreaField,
    pub record_count: usize,
    pub totals: LandAreaDisplay,
}

/// Convert raw kanal/marle/sarsai values to acres. Never fails.
pub fn convert_to_acres(kanal: &Value, marle: &Value, sarsai: &Value) -> ConvertToAcresResponse {
    let area = TraditionalArea::from_components(kanal, marle, sarsai);
    let display = LandAreaDisplay::from_area(area);

    ConvertToAcresResponse {
        kanal: area.kanal,
        marle: area.marle,
        sarsai: area.sarsai,
        total_sarsai: area.total_sarsai(),
        acres: display.acres,
        acres_formatted: display.acres_formatted,
        traditional_formatted: display.traditional_formatted,
        normalized: display.normalized,
    }
}

fn decompose_response(total_sarsai: f64, split: NormalizedArea) -> DecomposeResponse {
    DecomposeResponse {
        total_sarsai,
        acres: total_sarsai / acres_to_sarsai(1.0),
        kanal: split.kanal,
        marle: split.marle,
        sarsai: split.sarsai,
        formatted: split.to_string(),
        truncated_sarsai: (total_sarsai - split.total_sarsai() as f64).max(0.0),
    }
}

/// Split a sarsai total into canonical kanal/marle/sarsai
pub fn decompose_sarsai(total_sarsai: f64) -> Result<DecomposeResponse, String> {
    if !total_sarsai.is_finite() {
        return Err("total_sarsai must be a finite number".to_string());
    }
    if total_sarsai < 0.0 {
        return Err("total_sarsai cannot be negative".to_string());
    }

    let split = convert_acres_to_traditional(total_sarsai);
    Ok(decompose_response(total_sarsai, split))
}

/// Split an acreage into canonical kanal/marle/sarsai
pub fn acres_to_traditional_units(acres: f64) -> Result<DecomposeResponse, String> {
    if !acres.is_finite() {
        return Err("acres must be a finite number".to_string());
    }
    if acres < 0.0 {
        return Err("acres cannot be negative".to_string());
    }

    let split = acres_to_traditional(acres);
    let mut response = decompose_response(acres_to_sarsai(acres), split);
    // Report the caller's acreage rather than the sarsai round trip
    response.acres = acres;
    Ok(response)
}

/// Render a single triple in both representations
pub fn format_land_area(kanal: &Value, marle: &Value, sarsai: &Value) -> LandAreaDisplay {
    crate::area::format_land_area(kanal, marle, sarsai)
}

/// Sum one area triple across inline land records
pub fn aggregate_land_areas(records: &[Value], field: AreaField) -> AggregateResponse {
    let totals = aggregate_traditional_areas(records, field);
    tracing::debug!(
        "Aggregated {} records ({}): {} = {}",
        records.len(),
        field.as_str(),
        totals,
        format_acres(totals.to_acres())
    );

    AggregateResponse {
        field,
        record_count: records.len(),
        totals: LandAreaDisplay::from_area(totals),
    }
}
