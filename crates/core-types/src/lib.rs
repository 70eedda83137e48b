//! # Shelfwise Core Types
//!
//! The Layer 0 vocabulary shared by every other crate in the workspace: the
//! sales record, the immutable in-memory dataset and the small enums used to
//! name grouping keys and numeric fields.
//!
//! This crate has no knowledge of files, configuration or presentation.

pub mod dataset;
pub mod enums;
pub mod error;
pub mod structs;

// Re-export the core types to provide a clean public API.
pub use dataset::Dataset;
pub use enums::{GroupKey, NumericField, PromotionFlag};
pub use error::CoreError;
pub use structs::SalesRecord;
