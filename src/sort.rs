//! Sort-by-field over track records.
//!
//! Three interchangeable algorithms share one contract: the result is ordered
//! by `record[key]`, records with equal keys keep their input order, and
//! descending is the inverted comparison rather than a reversed result. The
//! input slice is never reordered; callers get a new vector.
//!
//! Every key is extracted and checked before anything moves, so a missing or
//! incomparable field fails the whole call. Inputs of zero or one record come
//! back as they are without their key being read.

mod exchange;
mod key;
mod merge;
mod partition;

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::Result;
use crate::record::Record;

use key::KeyColumn;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortAlgorithm {
    /// Adjacent compare-and-exchange passes (bubble sort). O(n²).
    #[serde(
        alias = "bubble",
        alias = "exchange",
        alias = "selection_exchange",
        alias = "selection"
    )]
    SelectionExchange,
    /// Three-way partition around the middle element (quicksort).
    #[serde(alias = "quick", alias = "quicksort")]
    Partition,
    /// Top-down merge sort.
    #[serde(alias = "mergesort")]
    Merge,
}

impl SortAlgorithm {
    pub const ALL: [SortAlgorithm; 3] = [
        SortAlgorithm::SelectionExchange,
        SortAlgorithm::Partition,
        SortAlgorithm::Merge,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SortAlgorithm::SelectionExchange => "selection-exchange",
            SortAlgorithm::Partition => "partition",
            SortAlgorithm::Merge => "merge",
        }
    }
}

impl fmt::Display for SortAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortAlgorithm {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "selection-exchange" | "selection_exchange" | "selection" | "exchange" | "bubble" => {
                Ok(SortAlgorithm::SelectionExchange)
            }
            "partition" | "quick" | "quicksort" => Ok(SortAlgorithm::Partition),
            "merge" | "mergesort" => Ok(SortAlgorithm::Merge),
            other => Err(format!(
                "unknown sort algorithm `{other}` (expected selection-exchange, partition or merge)"
            )),
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortOrder {
    #[serde(alias = "asc")]
    Ascending,
    #[default]
    #[serde(alias = "desc")]
    Descending,
}

impl SortOrder {
    pub fn from_ascending(ascending: bool) -> Self {
        if ascending {
            SortOrder::Ascending
        } else {
            SortOrder::Descending
        }
    }

    /// Orient an ascending comparison result.
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            SortOrder::Ascending => ordering,
            SortOrder::Descending => ordering.reverse(),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SortOrder::Ascending => "ascending",
            SortOrder::Descending => "descending",
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "asc" | "ascending" => Ok(SortOrder::Ascending),
            "desc" | "descending" => Ok(SortOrder::Descending),
            other => Err(format!(
                "unknown sort order `{other}` (expected ascending or descending)"
            )),
        }
    }
}

/// Sort `records` by the field `key` with the chosen algorithm.
pub fn sort<R>(records: &[R], key: &str, order: SortOrder, algorithm: SortAlgorithm) -> Result<Vec<R>>
where
    R: Record + Clone,
{
    debug!(%algorithm, key, %order, count = records.len(), "sorting records");

    // Nothing to order, so the key is never read.
    if records.len() <= 1 {
        return Ok(records.to_vec());
    }

    let sorted = match key::extract(records, key)? {
        KeyColumn::Numbers(keys) => run(keys, records, order, algorithm, |a, b| a.compare(b)),
        KeyColumn::Texts(keys) => run(keys, records, order, algorithm, |a, b| a.cmp(b)),
    };
    Ok(sorted)
}

/// Adjacent exchange passes; simplest baseline.
pub fn selection_sort<R: Record + Clone>(records: &[R], key: &str, order: SortOrder) -> Result<Vec<R>> {
    sort(records, key, order, SortAlgorithm::SelectionExchange)
}

/// Middle-pivot three-way partition sort.
pub fn partition_sort<R: Record + Clone>(records: &[R], key: &str, order: SortOrder) -> Result<Vec<R>> {
    sort(records, key, order, SortAlgorithm::Partition)
}

/// Stable top-down merge sort.
pub fn merge_sort<R: Record + Clone>(records: &[R], key: &str, order: SortOrder) -> Result<Vec<R>> {
    sort(records, key, order, SortAlgorithm::Merge)
}

fn run<K, R, F>(keys: Vec<K>, records: &[R], order: SortOrder, algorithm: SortAlgorithm, compare: F) -> Vec<R>
where
    R: Clone,
    F: Fn(&K, &K) -> Ordering,
{
    let items: Vec<(K, R)> = keys.into_iter().zip(records.iter().cloned()).collect();
    let by_key = |a: &(K, R), b: &(K, R)| order.apply(compare(&a.0, &b.0));

    let sorted = match algorithm {
        SortAlgorithm::SelectionExchange => exchange::sort(items, &by_key),
        SortAlgorithm::Partition => partition::sort(items, &by_key),
        SortAlgorithm::Merge => merge::sort(items, &by_key),
    };
    sorted.into_iter().map(|(_, record)| record).collect()
}
