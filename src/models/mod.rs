//! Data models
//!
//! Farmer and land record entities as served by the backend.

mod farmer;
mod land_record;

pub use farmer::Farmer;
pub use land_record::{LandRecord, LandRecordUpdate, TIMESTAMP_FORMAT};
