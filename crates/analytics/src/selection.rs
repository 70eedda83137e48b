use crate::error::AnalyticsError;
use chrono::NaiveDate;
use core_types::{Dataset, SalesRecord};
use serde::Serialize;
use std::collections::BTreeSet;

/// The four user-chosen constraints applied by the Filter Engine.
///
/// A record passes when its store, category and shelf level are all chosen
/// and its date lies in `[start, end]`, inclusive on both ends. An empty set
/// or `start > end` selects nothing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterSelection {
    pub stores: BTreeSet<String>,
    pub categories: BTreeSet<String>,
    pub shelf_levels: BTreeSet<String>,
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl FilterSelection {
    pub fn new<S, C, L>(stores: S, categories: C, shelf_levels: L, start: NaiveDate, end: NaiveDate) -> Self
    where
        S: IntoIterator,
        S::Item: Into<String>,
        C: IntoIterator,
        C::Item: Into<String>,
        L: IntoIterator,
        L::Item: Into<String>,
    {
        Self {
            stores: stores.into_iter().map(Into::into).collect(),
            categories: categories.into_iter().map(Into::into).collect(),
            shelf_levels: shelf_levels.into_iter().map(Into::into).collect(),
            start,
            end,
        }
    }

    /// The default selection: every value present in the dataset and its full
    /// date span. An empty dataset gets the widest representable range.
    pub fn all(dataset: &Dataset) -> Self {
        let (start, end) = dataset
            .date_bounds()
            .unwrap_or((NaiveDate::MIN, NaiveDate::MAX));
        Self::new(
            dataset.distinct_stores(),
            dataset.distinct_categories(),
            dataset.distinct_shelf_levels(),
            start,
            end,
        )
    }

    pub fn with_stores<I: IntoIterator<Item = S>, S: Into<String>>(mut self, stores: I) -> Self {
        self.stores = stores.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_categories<I: IntoIterator<Item = S>, S: Into<String>>(mut self, categories: I) -> Self {
        self.categories = categories.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_shelf_levels<I: IntoIterator<Item = S>, S: Into<String>>(mut self, levels: I) -> Self {
        self.shelf_levels = levels.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_date_range(mut self, start: NaiveDate, end: NaiveDate) -> Self {
        self.start = start;
        self.end = end;
        self
    }

    pub fn is_inverted(&self) -> bool {
        self.start > self.end
    }

    /// True when no record can pass, whatever the dataset holds.
    pub fn selects_nothing(&self) -> bool {
        self.is_inverted()
            || self.stores.is_empty()
            || self.categories.is_empty()
            || self.shelf_levels.is_empty()
    }

    pub fn admits_store(&self, record: &SalesRecord) -> bool {
        self.stores.contains(&record.store_id)
    }

    pub fn admits_category(&self, record: &SalesRecord) -> bool {
        self.categories.contains(&record.category)
    }

    pub fn admits_shelf_level(&self, record: &SalesRecord) -> bool {
        self.shelf_levels.contains(&record.shelf_level)
    }

    pub fn admits_date(&self, record: &SalesRecord) -> bool {
        self.start <= record.date && record.date <= self.end
    }

    /// The full predicate: all four criteria at once.
    pub fn matches(&self, record: &SalesRecord) -> bool {
        self.admits_store(record)
            && self.admits_category(record)
            && self.admits_shelf_level(record)
            && self.admits_date(record)
    }
}

/// Builds a `FilterSelection` from optional user input.
///
/// Unspecified criteria default to "all". Supplied values must be options of
/// the dataset, the way a multi-select widget only offers present values.
/// An explicitly empty list is kept empty.
#[derive(Debug, Clone, Default)]
pub struct SelectionBuilder {
    stores: Option<Vec<String>>,
    categories: Option<Vec<String>>,
    shelf_levels: Option<Vec<String>>,
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
}

impl SelectionBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stores(mut self, stores: Option<Vec<String>>) -> Self {
        self.stores = stores;
        self
    }

    pub fn categories(mut self, categories: Option<Vec<String>>) -> Self {
        self.categories = categories;
        self
    }

    pub fn shelf_levels(mut self, shelf_levels: Option<Vec<String>>) -> Self {
        self.shelf_levels = shelf_levels;
        self
    }

    pub fn start(mut self, start: Option<NaiveDate>) -> Self {
        self.start = start;
        self
    }

    pub fn end(mut self, end: Option<NaiveDate>) -> Self {
        self.end = end;
        self
    }

    pub fn build(self, dataset: &Dataset) -> Result<FilterSelection, AnalyticsError> {
        let defaults = FilterSelection::all(dataset);

        let stores = choose("store", self.stores, defaults.stores)?;
        let categories = choose("category", self.categories, defaults.categories)?;
        let shelf_levels = choose("shelf level", self.shelf_levels, defaults.shelf_levels)?;

        Ok(FilterSelection {
            stores,
            categories,
            shelf_levels,
            start: self.start.unwrap_or(defaults.start),
            end: self.end.unwrap_or(defaults.end),
        })
    }
}

fn choose(
    dimension: &'static str,
    chosen: Option<Vec<String>>,
    options: BTreeSet<String>,
) -> Result<BTreeSet<String>, AnalyticsError> {
    let Some(chosen) = chosen else {
        return Ok(options);
    };
    if let Some(unknown) = chosen.iter().find(|value| !options.contains(*value)) {
        return Err(AnalyticsError::UnknownOption {
            dimension,
            value: unknown.clone(),
        });
    }
    Ok(chosen.into_iter().collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_types::PromotionFlag;
    use rust_decimal_macros::dec;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
    }

    fn record(store: &str, category: &str, shelf: &str, d: u32) -> SalesRecord {
        SalesRecord {
            store_id: store.to_string(),
            category: category.to_string(),
            shelf_level: shelf.to_string(),
            date: day(d),
            units_sold: 1,
            revenue: dec!(1.0),
            price: dec!(1.0),
            promotion: PromotionFlag::NoPromotion,
            foot_traffic: 1,
        }
    }

    fn dataset() -> Dataset {
        Dataset::new(vec![
            record("A", "Snacks", "Top", 1),
            record("B", "Drinks", "Eye", 3),
            record("C", "Snacks", "Bottom", 2),
        ])
    }

    #[test]
    fn all_selects_every_option_and_the_full_span() {
        let selection = FilterSelection::all(&dataset());
        assert_eq!(selection.stores.len(), 3);
        assert_eq!(selection.categories.len(), 2);
        assert_eq!(selection.shelf_levels.len(), 3);
        assert_eq!((selection.start, selection.end), (day(1), day(3)));
        assert!(!selection.selects_nothing());
    }

    #[test]
    fn all_on_empty_dataset_selects_nothing() {
        let selection = FilterSelection::all(&Dataset::empty());
        assert!(selection.stores.is_empty());
        assert!(selection.selects_nothing());
        assert!(!selection.is_inverted());
    }

    #[test]
    fn date_bounds_are_inclusive() {
        let selection = FilterSelection::all(&dataset()).with_date_range(day(2), day(3));
        assert!(!selection.admits_date(&record("A", "Snacks", "Top", 1)));
        assert!(selection.admits_date(&record("A", "Snacks", "Top", 2)));
        assert!(selection.admits_date(&record("A", "Snacks", "Top", 3)));
    }

    #[test]
    fn inverted_range_selects_nothing() {
        let selection = FilterSelection::all(&dataset()).with_date_range(day(3), day(1));
        assert!(selection.is_inverted());
        assert!(selection.selects_nothing());
    }

    #[test]
    fn builder_defaults_unspecified_criteria_to_all() {
        let selection = SelectionBuilder::new()
            .stores(Some(vec!["A".to_string()]))
            .start(Some(day(2)))
            .build(&dataset())
            .unwrap();
        assert_eq!(selection.stores, BTreeSet::from(["A".to_string()]));
        assert_eq!(selection.categories.len(), 2);
        assert_eq!((selection.start, selection.end), (day(2), day(3)));
    }

    #[test]
    fn builder_keeps_explicitly_empty_sets() {
        let selection = SelectionBuilder::new()
            .shelf_levels(Some(vec![]))
            .build(&dataset())
            .unwrap();
        assert!(selection.shelf_levels.is_empty());
        assert!(selection.selects_nothing());
    }

    #[test]
    fn builder_rejects_values_not_in_dataset() {
        let result = SelectionBuilder::new()
            .categories(Some(vec!["Snacks".to_string(), "Frozen".to_string()]))
            .build(&dataset());
        assert_eq!(
            result,
            Err(AnalyticsError::UnknownOption {
                dimension: "category",
                value: "Frozen".to_string(),
            })
        );
    }
}
