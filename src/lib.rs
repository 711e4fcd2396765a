//! Land Area Manager (LAM) Library
//!
//! Kanal/marle/sarsai land-area conversion and farmer land records.

pub mod area;
pub mod build_info;
pub mod dataset;
pub mod mcp;
pub mod models;
pub mod tools;
