//! Grouped aggregations over a (filtered) dataset.
//!
//! Every function here is a pure function of its inputs and may be called in
//! any order. Groups are formed only from records that exist, so an empty
//! dataset yields an empty table and no group ever reports NaN or a zero
//! placeholder.

use crate::stats::{BoxStats, Trendline};
use crate::table::SummaryTable;
use chrono::NaiveDate;
use core_types::{Dataset, GroupKey, NumericField, PromotionFlag, SalesRecord};
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::BTreeMap;

/// Total units sold and total revenue of a group. Both sums saturate
/// rather than overflow.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Totals {
    pub units_sold: u64,
    pub revenue: Decimal,
}

impl Totals {
    fn add(&mut self, record: &SalesRecord) {
        self.units_sold = self.units_sold.saturating_add(record.units_sold);
        self.revenue = self.revenue.saturating_add(record.revenue);
    }
}

/// Raw `units_sold` values of a group, ascending, with their box-plot summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Distribution {
    pub values: Vec<u64>,
    pub stats: BoxStats,
}

/// A group's revenue and its percentage of the table's total revenue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Share {
    pub revenue: Decimal,
    /// `None` when the total revenue is zero.
    pub percent: Option<Decimal>,
}

/// Per-group `(x, y)` points with a least-squares trendline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScatterSeries {
    pub x: NumericField,
    pub y: NumericField,
    pub points: Vec<(Decimal, Decimal)>,
    pub trendline: Option<Trendline>,
}

#[derive(Debug, Default, Clone, Copy)]
struct Mean {
    sum: Decimal,
    count: u64,
}

impl Mean {
    fn push(&mut self, value: Decimal) {
        self.sum = self.sum.saturating_add(value);
        self.count += 1;
    }

    fn value(&self) -> Option<Decimal> {
        (self.count > 0).then(|| self.sum / Decimal::from(self.count))
    }
}

/// Total units sold and total revenue grouped by `key`.
pub fn sum_by(dataset: &Dataset, key: GroupKey) -> SummaryTable<String, Totals> {
    let mut groups: BTreeMap<String, Totals> = BTreeMap::new();
    for record in dataset {
        groups
            .entry(key.value_of(record).to_string())
            .or_default()
            .add(record);
    }
    groups.into()
}

/// Mean of `field` grouped by `key`.
pub fn mean_by(dataset: &Dataset, key: GroupKey, field: NumericField) -> SummaryTable<String, Decimal> {
    let mut groups: BTreeMap<String, Mean> = BTreeMap::new();
    for record in dataset {
        groups
            .entry(key.value_of(record).to_string())
            .or_default()
            .push(field.value_of(record));
    }
    into_means(groups)
}

/// Raw `units_sold` values grouped by `key`, for spread and quantile charts.
pub fn distribution_by(dataset: &Dataset, key: GroupKey) -> SummaryTable<String, Distribution> {
    let mut groups: BTreeMap<String, Vec<u64>> = BTreeMap::new();
    for record in dataset {
        groups
            .entry(key.value_of(record).to_string())
            .or_default()
            .push(record.units_sold);
    }

    let rows: BTreeMap<String, Distribution> = groups
        .into_iter()
        .filter_map(|(group, mut values)| {
            values.sort_unstable();
            let decimals: Vec<Decimal> = values.iter().map(|&v| Decimal::from(v)).collect();
            let stats = BoxStats::from_sorted(&decimals)?;
            Some((group, Distribution { values, stats }))
        })
        .collect();
    rows.into()
}

/// Totals per calendar day, ascending.
///
/// Only dates present in `dataset` appear; days without sales are omitted
/// rather than zero-filled.
pub fn daily_series(dataset: &Dataset) -> SummaryTable<NaiveDate, Totals> {
    let mut days: BTreeMap<NaiveDate, Totals> = BTreeMap::new();
    for record in dataset {
        days.entry(record.date).or_default().add(record);
    }
    days.into()
}

/// Mean units sold with and without promotion.
///
/// At most two rows, always "No Promotion" before "Promotion" whatever order
/// the flags appear in the data.
pub fn by_promotion_flag(dataset: &Dataset) -> SummaryTable<PromotionFlag, Decimal> {
    let mut groups: BTreeMap<PromotionFlag, Mean> = BTreeMap::new();
    for record in dataset {
        groups
            .entry(record.promotion)
            .or_default()
            .push(Decimal::from(record.units_sold));
    }
    into_means(groups)
}

/// Revenue grouped by `key` with each group's share of the total.
pub fn share_by(dataset: &Dataset, key: GroupKey) -> SummaryTable<String, Share> {
    let totals = sum_by(dataset, key);
    let grand_total = totals
        .values()
        .fold(Decimal::ZERO, |acc, t| acc.saturating_add(t.revenue));

    totals.map_values(|t| Share {
        revenue: t.revenue,
        percent: (!grand_total.is_zero())
            .then(|| t.revenue / grand_total * Decimal::ONE_HUNDRED),
    })
}

/// `(x, y)` points grouped by `key`, each group with its own trendline.
/// Points keep source order.
pub fn scatter_by(
    dataset: &Dataset,
    key: GroupKey,
    x: NumericField,
    y: NumericField,
) -> SummaryTable<String, ScatterSeries> {
    let mut groups: BTreeMap<String, Vec<(Decimal, Decimal)>> = BTreeMap::new();
    for record in dataset {
        groups
            .entry(key.value_of(record).to_string())
            .or_default()
            .push((x.value_of(record), y.value_of(record)));
    }

    let rows: BTreeMap<String, ScatterSeries> = groups
        .into_iter()
        .map(|(group, points)| {
            let trendline = Trendline::fit(&points);
            (
                group,
                ScatterSeries {
                    x,
                    y,
                    points,
                    trendline,
                },
            )
        })
        .collect();
    rows.into()
}

fn into_means<K: Ord>(groups: BTreeMap<K, Mean>) -> SummaryTable<K, Decimal> {
    let means: BTreeMap<K, Decimal> = groups
        .into_iter()
        .filter_map(|(group, mean)| Some((group, mean.value()?)))
        .collect();
    means.into()
}
