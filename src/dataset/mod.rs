//! Dataset module
//!
//! In-memory farmer and land records, loaded from a JSON snapshot.

pub mod pagination;
pub mod snapshot;

pub use pagination::{page_window, paginate, Page, DEFAULT_PER_PAGE, MAX_PER_PAGE, PAGE_WINDOW};
pub use snapshot::{Dataset, DatasetError, DatasetResult, DatasetStats, FarmerFilter};
