//! Area conversion functions
//!
//! Converts kanal/marle/sarsai measurements to acres and back, and formats
//! both representations for display.

use serde::Serialize;

use super::units::{
    AreaComponent, NormalizedArea, TraditionalArea, SARSAI_PER_ACRE, SARSAI_PER_KANAL,
    SARSAI_PER_MARLE,
};

/// Values this close to a whole number of sarsai are treated as that number
const SARSAI_SNAP_EPSILON: f64 = 1e-9;

/// Convert a kanal/marle/sarsai triple to acres.
///
/// Each component is parsed permissively, so `None`, `"abc"` or `null`
/// contribute nothing instead of failing.
///
/// ```
/// use lam::area::convert_to_acres;
/// assert_eq!(convert_to_acres(8, 0, 0), 1.0);
/// assert_eq!(convert_to_acres("4", "80", None::<f64>), 1.0);
/// ```
pub fn convert_to_acres<K, M, S>(kanal: K, marle: M, sarsai: S) -> f64
where
    K: AreaComponent,
    M: AreaComponent,
    S: AreaComponent,
{
    TraditionalArea::from_components(kanal, marle, sarsai).to_acres()
}

/// Decompose a sarsai total into canonical kanal/marle/sarsai.
///
/// Uses floor and remainder, not rounding. Any fractional sarsai is dropped,
/// and negative or non-finite totals decompose to zero.
pub fn convert_acres_to_traditional(total_sarsai: f64) -> NormalizedArea {
    if !total_sarsai.is_finite() || total_sarsai <= 0.0 {
        return NormalizedArea::default();
    }

    let whole = total_sarsai.floor() as u64;
    let per_kanal = SARSAI_PER_KANAL as u64;
    let per_marle = SARSAI_PER_MARLE as u64;

    let kanal = whole / per_kanal;
    let remainder = whole % per_kanal;

    NormalizedArea {
        kanal,
        marle: (remainder / per_marle) as u32,
        sarsai: (remainder % per_marle) as u32,
    }
}

/// Express acres in sarsai
pub fn acres_to_sarsai(acres: f64) -> f64 {
    acres * SARSAI_PER_ACRE
}

/// Convert acres to a canonical kanal/marle/sarsai split.
///
/// The acres are rescaled to sarsai first. Products that land within a
/// hair of a whole sarsai (0.3 acres is 431.99999999999994) are snapped
/// before the floor.
pub fn acres_to_traditional(acres: f64) -> NormalizedArea {
    let sarsai = acres_to_sarsai(acres);
    let nearest = sarsai.round();
    let snapped = if (sarsai - nearest).abs() < SARSAI_SNAP_EPSILON {
        nearest
    } else {
        sarsai
    };
    convert_acres_to_traditional(snapped)
}

/// Canonical split of a possibly non-canonical area
pub fn normalize(area: &TraditionalArea) -> NormalizedArea {
    convert_acres_to_traditional(area.total_sarsai())
}

/// Format an area as "{kanal}K/{marle}M/{sarsai}S" using the raw components
pub fn format_traditional_string(area: &TraditionalArea) -> String {
    area.to_string()
}

/// Acres fixed to two decimals, without a unit label
pub fn format_acres_value(acres: f64) -> String {
    format!("{:.2}", acres + 0.0)
}

/// Acres fixed to two decimals with the unit label, e.g. "1.25 acres"
pub fn format_acres(acres: f64) -> String {
    format!("{} acres", format_acres_value(acres))
}

/// Both representations of one area, ready for display
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LandAreaDisplay {
    pub kanal: f64,
    pub marle: f64,
    pub sarsai: f64,
    pub acres: f64,
    /// Acres fixed to two decimals ("1.25")
    pub acres_text: String,
    /// Acres with unit label ("1.25 acres")
    pub acres_formatted: String,
    /// Raw components ("3K/25M/2S")
    pub traditional_formatted: String,
    /// Canonical split of the same area
    pub normalized: NormalizedArea,
}

impl LandAreaDisplay {
    pub fn from_area(area: TraditionalArea) -> Self {
        let acres = area.to_acres();
        Self {
            kanal: area.kanal,
            marle: area.marle,
            sarsai: area.sarsai,
            acres,
            acres_text: format_acres_value(acres),
            acres_formatted: format_acres(acres),
            traditional_formatted: format_traditional_string(&area),
            normalized: normalize(&area),
        }
    }
}

/// Build the display for a single loosely-typed triple
pub fn format_land_area<K, M, S>(kanal: K, marle: M, sarsai: S) -> LandAreaDisplay
where
    K: AreaComponent,
    M: AreaComponent,
    S: AreaComponent,
{
    LandAreaDisplay::from_area(TraditionalArea::from_components(kanal, marle, sarsai))
}
