use crate::aggregate;
use crate::filter::filter;
use crate::kpi::Kpis;
use crate::report::DashboardReport;
use crate::selection::FilterSelection;
use core_types::{Dataset, GroupKey, NumericField};
use tracing::{debug, info};

/// A stateless calculator that turns the full dataset and a selection into a
/// `DashboardReport`.
#[derive(Debug, Default, Clone, Copy)]
pub struct AnalyticsEngine {}

impl AnalyticsEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// The main entry point: filter, then aggregate.
    ///
    /// # Arguments
    ///
    /// * `dataset` - The full, unfiltered dataset as loaded.
    /// * `selection` - The user's current filter choices.
    ///
    /// # Returns
    ///
    /// A `DashboardReport` covering only the matching records. An empty match
    /// produces an empty report rather than an error.
    pub fn calculate(&self, dataset: &Dataset, selection: &FilterSelection) -> DashboardReport {
        let filtered = filter(dataset, selection);
        info!(
            total = dataset.len(),
            matched = filtered.len(),
            stores = selection.stores.len(),
            categories = selection.categories.len(),
            shelf_levels = selection.shelf_levels.len(),
            start = %selection.start,
            end = %selection.end,
            "Recomputing dashboard"
        );
        self.summarize(filtered, selection.clone())
    }

    /// Builds the report from an already filtered dataset.
    pub fn summarize(&self, filtered: Dataset, selection: FilterSelection) -> DashboardReport {
        if filtered.is_empty() {
            // No rows: every table is empty and the KPIs are zeroed out.
            debug!("No data for current filters");
            return DashboardReport::empty(selection);
        }

        DashboardReport {
            kpis: Kpis::from_dataset(&filtered),
            units_by_shelf: aggregate::sum_by(&filtered, GroupKey::ShelfLevel),
            revenue_by_store: aggregate::sum_by(&filtered, GroupKey::StoreId),
            units_distribution_by_shelf: aggregate::distribution_by(&filtered, GroupKey::ShelfLevel),
            price_vs_units_by_shelf: aggregate::scatter_by(
                &filtered,
                GroupKey::ShelfLevel,
                NumericField::Price,
                NumericField::UnitsSold,
            ),
            units_by_category: aggregate::sum_by(&filtered, GroupKey::Category),
            revenue_share_by_category: aggregate::share_by(&filtered, GroupKey::Category),
            daily_series: aggregate::daily_series(&filtered),
            promotion_impact: aggregate::by_promotion_flag(&filtered),
            foot_traffic_vs_units_by_store: aggregate::scatter_by(
                &filtered,
                GroupKey::StoreId,
                NumericField::FootTraffic,
                NumericField::UnitsSold,
            ),
            selection,
            filtered,
        }
    }
}
