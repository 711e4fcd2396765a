//! LAM Status Tool
//!
//! Provides runtime status information about the LAM service.

use serde::Serialize;
use std::path::PathBuf;
use std::time::Instant;
use sysinfo::{Pid, ProcessesToUpdate, System};

use crate::build_info::BuildInfo;
use crate::dataset::Dataset;

/// Unit guide for AI assistants working with land records
pub const AREA_INSTRUCTIONS: &str = r#"
# LAM Land Area Instructions

Land records measure area in three traditional units:

| Unit   | In sarsai | Per acre |
|--------|-----------|----------|
| kanal  | 180       | 8        |
| marle  | 9         | 160      |
| sarsai | 1         | 1440     |

1 kanal = 20 marle, 1 marle = 9 sarsai.

## Reading areas

- Each land record carries two triples: total land (`kanal`, `marle`, `sarsai`)
  and area under cultivation (`land_owner_area_k`, `land_owner_area_m`,
  `land_owner_area_sarsai`).
- Values may be numbers, numeric strings or missing. Anything that is not a
  number counts as 0.
- The "K/M/S" text shows the literal recorded (or summed) components, so
  "2K/30M/0S" is normal. Use `normalized` for the canonical split.

## Tools

- `convert_to_acres` for one triple, `aggregate_land_areas` for a list.
- `decompose_sarsai` / `acres_to_traditional` for the canonical split. Any
  fractional sarsai is dropped.
- Cultivation area is not checked against total land.
"#;

/// Runtime status of the LAM service
#[derive(Debug, Serialize)]
pub struct LamStatus {
    pub build_number: u64,
    pub build_timestamp: &'static str,
    pub version: &'static str,
    pub dataset_path: String,
    pub dataset_loaded: bool,
    pub farmers: usize,
    pub land_records: usize,
    pub uptime_seconds: u64,
    pub process_id: u32,
    pub memory_usage_bytes: u64,
}

/// Tracks service start time and dataset location
pub struct StatusTracker {
    start_time: Instant,
    dataset_path: PathBuf,
}

impl StatusTracker {
    /// Create a new status tracker
    pub fn new(dataset_path: PathBuf) -> Self {
        Self {
            start_time: Instant::now(),
            dataset_path,
        }
    }

    /// Get the current status
    pub fn get_status(&self, dataset: &Dataset) -> LamStatus {
        let build_info = BuildInfo::current();

        let pid = std::process::id();
        let mut sys = System::new();
        sys.refresh_processes(ProcessesToUpdate::Some(&[Pid::from_u32(pid)]));

        let memory_usage_bytes = sys
            .process(Pid::from_u32(pid))
            .map(|p| p.memory())
            .unwrap_or(0);

        LamStatus {
            build_number: build_info.build_number,
            build_timestamp: build_info.build_timestamp,
            version: build_info.version,
            dataset_path: self.dataset_path.display().to_string(),
            dataset_loaded: self.dataset_path.exists(),
            farmers: dataset.farmers.len(),
            land_records: dataset.land_records.len(),
            uptime_seconds: self.start_time.elapsed().as_secs(),
            process_id: pid,
            memory_usage_bytes,
        }
    }
}
