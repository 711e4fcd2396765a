//! Land area module
//!
//! Kanal/marle/sarsai conversion to acres, and aggregation across records.

pub mod aggregate;
pub mod converter;
pub mod units;

pub use aggregate::{
    aggregate_traditional_areas, summarize_areas, total_land_area_in_acres,
    total_land_area_traditional, AreaField, AreaSource,
};
pub use converter::{
    acres_to_sarsai, acres_to_traditional, convert_acres_to_traditional, convert_to_acres,
    format_acres, format_acres_value, format_land_area, format_traditional_string, normalize,
    LandAreaDisplay,
};
pub use units::{
    parse_component, parse_leading_float, AreaComponent, NormalizedArea, TraditionalArea,
    TraditionalUnit,
};
