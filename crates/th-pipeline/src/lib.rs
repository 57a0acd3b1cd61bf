//! # th-pipeline
//!
//! Pure operations over the park dataset. Every function here takes and
//! returns in-memory records; loading and saving stay behind the
//! `ParkStore` port so these stay trivially testable.

pub mod merge;
pub mod reset;
pub mod status;
pub mod validate;

pub use merge::{merge_osm_entries, MergeReport};
pub use reset::{strip_osm_enrichment, ResetReport};
pub use status::backfill_data_status;
pub use validate::{ensure_valid, validate_parks, Issue};
