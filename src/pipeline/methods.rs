use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::record::Record;
use crate::sort::{self, SortAlgorithm, SortOrder};

/// Which algorithm sorts by which field in which direction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortSpec {
    pub algorithm: SortAlgorithm,
    pub key: String,
    #[serde(default)]
    pub order: SortOrder,
}

impl SortSpec {
    pub fn new(algorithm: SortAlgorithm, key: impl Into<String>, order: SortOrder) -> Self {
        Self {
            algorithm,
            key: key.into(),
            order,
        }
    }

    pub fn apply<R: Record + Clone>(&self, records: &[R]) -> Result<Vec<R>> {
        sort::sort(records, &self.key, self.order, self.algorithm)
    }
}

impl fmt::Display for SortSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} by {} ({})", self.algorithm, self.key, self.order)
    }
}

/// Named sort specs, looked up case-insensitively.
#[derive(Debug, Clone, PartialEq)]
pub struct SortMethods {
    methods: BTreeMap<String, SortSpec>,
}

impl Default for SortMethods {
    /// `popularity`, `energy` and `danceability`, all descending, each on
    /// a different algorithm.
    fn default() -> Self {
        let mut methods = Self {
            methods: BTreeMap::new(),
        };
        methods.insert(
            "popularity",
            SortSpec::new(SortAlgorithm::SelectionExchange, "popularity", SortOrder::Descending),
        );
        methods.insert(
            "energy",
            SortSpec::new(SortAlgorithm::Partition, "energy", SortOrder::Descending),
        );
        methods.insert(
            "danceability",
            SortSpec::new(SortAlgorithm::Merge, "danceability", SortOrder::Descending),
        );
        methods
    }
}

impl SortMethods {
    /// Defaults plus configured methods; a configured method replaces a
    /// default of the same name.
    pub fn with_overrides<'a>(overrides: impl IntoIterator<Item = (&'a String, &'a SortSpec)>) -> Self {
        let mut methods = Self::default();
        for (name, spec) in overrides {
            methods.insert(name, spec.clone());
        }
        methods
    }

    pub fn insert(&mut self, name: &str, spec: SortSpec) -> Option<SortSpec> {
        self.methods.insert(normalize(name), spec)
    }

    pub fn resolve(&self, name: &str) -> Result<&SortSpec> {
        self.methods
            .get(&normalize(name))
            .ok_or_else(|| Error::UnknownSortMethod(name.trim().to_string()))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &SortSpec)> {
        self.methods.iter().map(|(name, spec)| (name.as_str(), spec))
    }
}

fn normalize(name: &str) -> String {
    name.trim().to_lowercase()
}
