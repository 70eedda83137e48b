use crate::structs::SalesRecord;
use chrono::NaiveDate;
use std::collections::HashSet;

/// An immutable, ordered collection of sales records.
///
/// Both the loaded source data and every filtered subset are a `Dataset`.
/// Records keep their source order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dataset {
    records: Vec<SalesRecord>,
}

impl Dataset {
    pub fn new(records: Vec<SalesRecord>) -> Self {
        Self { records }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn records(&self) -> &[SalesRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SalesRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Distinct store ids, in order of first appearance.
    pub fn distinct_stores(&self) -> Vec<String> {
        self.distinct(|r| &r.store_id)
    }

    /// Distinct categories, in order of first appearance.
    pub fn distinct_categories(&self) -> Vec<String> {
        self.distinct(|r| &r.category)
    }

    /// Distinct shelf levels, in order of first appearance.
    pub fn distinct_shelf_levels(&self) -> Vec<String> {
        self.distinct(|r| &r.shelf_level)
    }

    /// The earliest and latest date present, or `None` for an empty dataset.
    pub fn date_bounds(&self) -> Option<(NaiveDate, NaiveDate)> {
        let min = self.records.iter().map(|r| r.date).min()?;
        let max = self.records.iter().map(|r| r.date).max()?;
        Some((min, max))
    }

    fn distinct<F>(&self, accessor: F) -> Vec<String>
    where
        F: Fn(&SalesRecord) -> &String,
    {
        let mut seen = HashSet::new();
        self.records
            .iter()
            .map(accessor)
            .filter(|value| seen.insert(value.as_str()))
            .cloned()
            .collect()
    }
}

impl From<Vec<SalesRecord>> for Dataset {
    fn from(records: Vec<SalesRecord>) -> Self {
        Self::new(records)
    }
}

impl FromIterator<SalesRecord> for Dataset {
    fn from_iter<I: IntoIterator<Item = SalesRecord>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Dataset {
    type Item = &'a SalesRecord;
    type IntoIter = std::slice::Iter<'a, SalesRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
