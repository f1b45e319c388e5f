//! Region-name normalization for conflict-event admin-1 fields.
//!
//! Two strategies that must stay separate: [`RegionTable`] maps exact
//! spellings to canonical governorate names and passes unknown names
//! through, while [`RegionBucket`] classifies by substring into a fixed
//! set with an explicit `Other` fallback.

pub mod region_buckets;
pub mod region_table;

pub use region_buckets::{RegionBucket, BUCKET_RULES};
pub use region_table::{strip_governorate_suffix, RegionTable, SYRIA_REGION_ALIASES};
