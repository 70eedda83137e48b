//! # Shelfwise Analytics Engine
//!
//! Filtering and aggregation for the retail sales dashboard.
//!
//! ## Architectural Principles
//!
//! - **Layer 1 Logic:** This is a pure logic crate. It has no knowledge of files,
//!   configuration or rendering. It depends only on `core-types` (Layer 0).
//! - **Stateless Pipeline:** Every selection change recomputes
//!   `Dataset -> FilterSelection -> Dataset -> DashboardReport` from the full,
//!   immutable dataset. Nothing is cached between runs.
//! - **Empty Is Not An Error:** An empty selection or an inverted date range
//!   produces an empty report, never a failure. Empty groups are omitted.
//!
//! ## Public API
//!
//! - `FilterSelection` / `SelectionBuilder`: the four user-chosen constraints.
//! - `filter`: the Filter Engine.
//! - `aggregate`: the grouped summary functions (`sum_by`, `mean_by`, ...).
//! - `AnalyticsEngine`: runs the whole pipeline into a `DashboardReport`.
//! - `DashboardSession`: owns the dataset and keeps the latest published report.
//! - `AnalyticsError`: the specific error types that can be returned from this crate.

// Declare the modules that constitute this crate.
pub mod aggregate;
pub mod engine;
pub mod error;
pub mod filter;
pub mod kpi;
pub mod report;
pub mod selection;
pub mod session;
pub mod stats;
pub mod table;

// Re-export the key components to create a clean, public-facing API.
pub use aggregate::{
    Distribution, ScatterSeries, Share, Totals, by_promotion_flag, daily_series, distribution_by,
    mean_by, scatter_by, share_by, sum_by,
};
pub use engine::AnalyticsEngine;
pub use error::AnalyticsError;
pub use filter::{Criterion, filter, filter_by};
pub use kpi::Kpis;
pub use report::DashboardReport;
pub use selection::{FilterSelection, SelectionBuilder};
pub use session::{DashboardSession, Ticket};
pub use stats::{BoxStats, Trendline};
pub use table::SummaryTable;
