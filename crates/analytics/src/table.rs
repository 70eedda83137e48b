use serde::Serialize;
use std::borrow::Borrow;
use std::collections::BTreeMap;

/// An ordered sequence of `(grouping key, aggregate value)` rows, ascending by key.
///
/// Serializes as a plain array of `[key, value]` pairs, ready for a chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SummaryTable<K, V> {
    rows: Vec<(K, V)>,
}

impl<K, V> SummaryTable<K, V> {
    pub fn empty() -> Self {
        Self { rows: Vec::new() }
    }

    pub fn rows(&self) -> &[(K, V)] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.rows.iter().map(|(k, _)| k)
    }

    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.rows.iter().map(|(_, v)| v)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, (K, V)> {
        self.rows.iter()
    }

    /// Looks up the value for `key`.
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: PartialEq + ?Sized,
    {
        self.rows
            .iter()
            .find(|(k, _)| <K as Borrow<Q>>::borrow(k) == key)
            .map(|(_, v)| v)
    }

    pub(crate) fn map_values<W, F>(self, f: F) -> SummaryTable<K, W>
    where
        F: Fn(V) -> W,
    {
        SummaryTable {
            rows: self.rows.into_iter().map(|(k, v)| (k, f(v))).collect(),
        }
    }
}

impl<K, V> Default for SummaryTable<K, V> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<K: Ord, V> From<BTreeMap<K, V>> for SummaryTable<K, V> {
    fn from(groups: BTreeMap<K, V>) -> Self {
        Self {
            rows: groups.into_iter().collect(),
        }
    }
}

impl<K, V> IntoIterator for SummaryTable<K, V> {
    type Item = (K, V);
    type IntoIter = std::vec::IntoIter<(K, V)>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.into_iter()
    }
}

impl<'a, K, V> IntoIterator for &'a SummaryTable<K, V> {
    type Item = &'a (K, V);
    type IntoIter = std::slice::Iter<'a, (K, V)>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}
