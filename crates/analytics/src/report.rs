use crate::aggregate::{Distribution, ScatterSeries, Share, Totals};
use crate::kpi::Kpis;
use crate::selection::FilterSelection;
use crate::table::SummaryTable;
use chrono::NaiveDate;
use core_types::{Dataset, PromotionFlag};
use rust_decimal::Decimal;
use serde::Serialize;

/// Everything the presentation layer needs to draw the dashboard for one
/// selection.
///
/// This struct is the final output of the `AnalyticsEngine`. It is rebuilt
/// from scratch on every selection change and never cached.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardReport {
    pub selection: FilterSelection,
    #[serde(skip)]
    pub filtered: Dataset,

    // I. Headline KPIs
    pub kpis: Kpis,

    // II. Overview
    pub units_by_shelf: SummaryTable<String, Totals>,
    pub revenue_by_store: SummaryTable<String, Totals>,

    // III. Shelf Analysis
    pub units_distribution_by_shelf: SummaryTable<String, Distribution>,
    pub price_vs_units_by_shelf: SummaryTable<String, ScatterSeries>,

    // IV. Category Insights
    pub units_by_category: SummaryTable<String, Totals>,
    pub revenue_share_by_category: SummaryTable<String, Share>,

    // V. Time Series
    pub daily_series: SummaryTable<NaiveDate, Totals>,

    // VI. Promotion Impact
    pub promotion_impact: SummaryTable<PromotionFlag, Decimal>,

    // VII. Foot Traffic
    pub foot_traffic_vs_units_by_store: SummaryTable<String, ScatterSeries>,
}

impl DashboardReport {
    /// A report with no rows, used when the selection excludes everything.
    pub fn empty(selection: FilterSelection) -> Self {
        Self {
            selection,
            filtered: Dataset::empty(),
            kpis: Kpis::default(),
            units_by_shelf: SummaryTable::empty(),
            revenue_by_store: SummaryTable::empty(),
            units_distribution_by_shelf: SummaryTable::empty(),
            price_vs_units_by_shelf: SummaryTable::empty(),
            units_by_category: SummaryTable::empty(),
            revenue_share_by_category: SummaryTable::empty(),
            daily_series: SummaryTable::empty(),
            promotion_impact: SummaryTable::empty(),
            foot_traffic_vs_units_by_store: SummaryTable::empty(),
        }
    }

    /// False when no record matched the selection; render "no data" instead of charts.
    pub fn has_data(&self) -> bool {
        !self.filtered.is_empty()
    }
}
