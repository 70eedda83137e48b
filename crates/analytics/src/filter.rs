use crate::selection::FilterSelection;
use core_types::{Dataset, SalesRecord};
use tracing::debug;

/// One of the four independent constraints of a `FilterSelection`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Criterion {
    Store,
    Category,
    ShelfLevel,
    DateRange,
}

impl Criterion {
    pub const ALL: [Criterion; 4] = [
        Criterion::Store,
        Criterion::Category,
        Criterion::ShelfLevel,
        Criterion::DateRange,
    ];

    pub fn admits(&self, selection: &FilterSelection, record: &SalesRecord) -> bool {
        match self {
            Criterion::Store => selection.admits_store(record),
            Criterion::Category => selection.admits_category(record),
            Criterion::ShelfLevel => selection.admits_shelf_level(record),
            Criterion::DateRange => selection.admits_date(record),
        }
    }
}

/// Returns the records of `dataset` that satisfy every criterion of `selection`.
///
/// Always derived from the dataset passed in; the input is never modified.
/// Source order is kept. An inverted date range or an empty chosen set yields
/// an empty dataset.
pub fn filter(dataset: &Dataset, selection: &FilterSelection) -> Dataset {
    filter_by(dataset, selection, &Criterion::ALL)
}

/// Applies only the listed criteria, in the listed order.
///
/// `filter` is this with all four. The AND of the criteria is commutative, so
/// any ordering of the same criteria gives the same result.
pub fn filter_by(dataset: &Dataset, selection: &FilterSelection, criteria: &[Criterion]) -> Dataset {
    let full = Criterion::ALL.iter().all(|c| criteria.contains(c));
    if full && selection.selects_nothing() {
        debug!(
            inverted = selection.is_inverted(),
            "Selection excludes every record"
        );
        return Dataset::empty();
    }

    let filtered: Dataset = dataset
        .iter()
        .filter(|record| criteria.iter().all(|c| c.admits(selection, record)))
        .cloned()
        .collect();

    debug!(
        input = dataset.len(),
        output = filtered.len(),
        "Filtered dataset"
    );
    filtered
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use core_types::PromotionFlag;
    use rust_decimal_macros::dec;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
    }

    fn record(store: &str, category: &str, shelf: &str, d: u32, units: u64) -> SalesRecord {
        SalesRecord {
            store_id: store.to_string(),
            category: category.to_string(),
            shelf_level: shelf.to_string(),
            date: day(d),
            units_sold: units,
            revenue: dec!(1.0),
            price: dec!(1.0),
            promotion: PromotionFlag::NoPromotion,
            foot_traffic: 1,
        }
    }

    fn dataset() -> Dataset {
        Dataset::new(vec![
            record("A", "Snacks", "Top", 1, 1),
            record("B", "Snacks", "Eye", 1, 2),
            record("A", "Drinks", "Eye", 2, 3),
            record("A", "Snacks", "Bottom", 3, 4),
            record("C", "Drinks", "Top", 3, 5),
        ])
    }

    fn units(dataset: &Dataset) -> Vec<u64> {
        dataset.iter().map(|r| r.units_sold).collect()
    }

    #[test]
    fn default_selection_keeps_everything() {
        let data = dataset();
        assert_eq!(filter(&data, &FilterSelection::all(&data)), data);
    }

    #[test]
    fn criteria_are_combined_with_and() {
        let data = dataset();
        let selection = FilterSelection::all(&data)
            .with_stores(["A"])
            .with_categories(["Snacks"])
            .with_date_range(day(1), day(2));
        assert_eq!(units(&filter(&data, &selection)), vec![1]);
    }

    #[test]
    fn keeps_source_order() {
        let data = dataset();
        let selection = FilterSelection::all(&data).with_shelf_levels(["Top", "Bottom"]);
        assert_eq!(units(&filter(&data, &selection)), vec![1, 4, 5]);
    }

    #[test]
    fn inverted_range_is_empty_not_an_error() {
        let data = dataset();
        let selection = FilterSelection::all(&data).with_date_range(day(3), day(1));
        assert!(filter(&data, &selection).is_empty());
    }

    #[test]
    fn single_day_range_is_inclusive() {
        let data = dataset();
        let selection = FilterSelection::all(&data).with_date_range(day(3), day(3));
        assert_eq!(units(&filter(&data, &selection)), vec![4, 5]);
    }

    #[test]
    fn any_empty_set_yields_empty_result() {
        let data = dataset();
        let all = FilterSelection::all(&data);
        let none: Vec<String> = Vec::new();
        assert!(filter(&data, &all.clone().with_stores(none.clone())).is_empty());
        assert!(filter(&data, &all.clone().with_categories(none.clone())).is_empty());
        assert!(filter(&data, &all.with_shelf_levels(none)).is_empty());
    }

    #[test]
    fn refiltering_is_idempotent() {
        let data = dataset();
        let selection = FilterSelection::all(&data).with_stores(["A", "C"]);
        let once = filter(&data, &selection);
        let twice = filter(&once, &selection);
        assert_eq!(once, twice);
    }

    #[test]
    fn partial_criteria_ignore_the_others() {
        let data = dataset();
        let selection = FilterSelection::all(&data)
            .with_stores(["B"])
            .with_date_range(day(3), day(3));
        assert_eq!(units(&filter_by(&data, &selection, &[Criterion::Store])), vec![2]);
        assert_eq!(
            units(&filter_by(&data, &selection, &[Criterion::DateRange])),
            vec![4, 5]
        );
        assert!(filter(&data, &selection).is_empty());
    }
}
