use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// An audio feature supplied by the data source.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Feature {
    Energy,
    Valence,
    Danceability,
    /// Beats per minute; not scaled to 0..1 like the others.
    Tempo,
}

impl Feature {
    pub const ALL: [Feature; 4] = [
        Feature::Energy,
        Feature::Valence,
        Feature::Danceability,
        Feature::Tempo,
    ];

    /// Field name of the feature on a track record.
    pub fn as_str(self) -> &'static str {
        match self {
            Feature::Energy => "energy",
            Feature::Valence => "valence",
            Feature::Danceability => "danceability",
            Feature::Tempo => "tempo",
        }
    }

    /// Field name under which a mood distance for this feature is stored.
    pub fn distance_field(self) -> &'static str {
        match self {
            Feature::Energy => "energy_distance",
            Feature::Valence => "valence_distance",
            Feature::Danceability => "danceability_distance",
            Feature::Tempo => "tempo_distance",
        }
    }

    /// Exact match on a record field name.
    pub fn from_field(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.as_str() == name)
    }

    pub(crate) fn from_distance_field(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.distance_field() == name)
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lenient parse used for user and config input: trimmed, case-insensitive.
impl FromStr for Feature {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Feature::from_field(&wanted).ok_or_else(|| Error::UnknownFeature(s.trim().to_string()))
    }
}
