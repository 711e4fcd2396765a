//! LAM Tools module
//!
//! MCP tool implementations for the Land Area Manager.

pub mod conversion;
pub mod farmers;
pub mod lands;
pub mod stats;
pub mod status;
