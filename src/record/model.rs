use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize, de};

use super::{Feature, FieldValue};

/// Name of the aggregated distance stored on a scored track.
pub const MOOD_SCORE_FIELD: &str = "mood_score";

/// Anything the sorter can order: a record exposing its fields by name.
pub trait Record {
    /// Identity used in error messages.
    fn id(&self) -> &str;

    /// Value of the field called `key`, or `None` when the record lacks it.
    fn field(&self, key: &str) -> Option<FieldValue>;
}

/// A track joined with its audio features, as supplied by the data source.
///
/// Fields the engine does not know about (`duration_ms`, `release_date`, ...)
/// are kept in `extra` and can still be used as sort keys. Only scalar extras
/// are kept; nested arrays and objects are dropped on load.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Track {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artist: Option<String>,
    #[serde(
        default,
        deserialize_with = "whole_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub popularity: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub energy: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub valence: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub danceability: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tempo: Option<f64>,
    #[serde(flatten, deserialize_with = "scalar_extras")]
    pub extra: BTreeMap<String, FieldValue>,
}

/// Accepts `80` as well as `80.0`, but not `80.5`.
fn whole_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<i64>, D::Error> {
    let Some(n) = Option::<serde_json::Number>::deserialize(deserializer)? else {
        return Ok(None);
    };
    if let Some(i) = n.as_i64() {
        return Ok(Some(i));
    }
    match n.as_f64() {
        Some(f) if f.fract() == 0.0 && f.abs() < 9.0e15 => Ok(Some(f as i64)),
        _ => Err(de::Error::custom(format!("expected a whole number, found {n}"))),
    }
}

fn scalar_extras<'de, D: Deserializer<'de>>(deserializer: D) -> Result<BTreeMap<String, FieldValue>, D::Error> {
    let raw = BTreeMap::<String, serde_json::Value>::deserialize(deserializer)?;
    Ok(raw
        .into_iter()
        .filter_map(|(key, value)| FieldValue::from_json(value).map(|v| (key, v)))
        .collect())
}

impl Track {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_artist(mut self, artist: impl Into<String>) -> Self {
        self.artist = Some(artist.into());
        self
    }

    pub fn with_popularity(mut self, popularity: i64) -> Self {
        self.popularity = Some(popularity);
        self
    }

    pub fn with_feature(mut self, feature: Feature, value: f64) -> Self {
        *self.feature_slot(feature) = Some(value);
        self
    }

    pub fn with_extra(mut self, key: impl Into<String>, value: FieldValue) -> Self {
        self.extra.insert(key.into(), value);
        self
    }

    pub fn feature(&self, feature: Feature) -> Option<f64> {
        match feature {
            Feature::Energy => self.energy,
            Feature::Valence => self.valence,
            Feature::Danceability => self.danceability,
            Feature::Tempo => self.tempo,
        }
    }

    fn feature_slot(&mut self, feature: Feature) -> &mut Option<f64> {
        match feature {
            Feature::Energy => &mut self.energy,
            Feature::Valence => &mut self.valence,
            Feature::Danceability => &mut self.danceability,
            Feature::Tempo => &mut self.tempo,
        }
    }
}

impl Record for Track {
    fn id(&self) -> &str {
        &self.id
    }

    fn field(&self, key: &str) -> Option<FieldValue> {
        match key {
            "id" => Some(FieldValue::Text(self.id.clone())),
            "name" => self.name.clone().map(FieldValue::Text),
            "artist" => self.artist.clone().map(FieldValue::Text),
            "popularity" => self.popularity.map(FieldValue::Int),
            _ => match Feature::from_field(key) {
                Some(feature) => self.feature(feature).map(FieldValue::Float),
                None => self.extra.get(key).cloned(),
            },
        }
    }
}

impl AsRef<Track> for Track {
    fn as_ref(&self) -> &Track {
        self
    }
}

/// Per-feature absolute deviations from a mood profile's targets. Only the
/// features the profile names are set.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Distances {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub energy_distance: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub valence_distance: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub danceability_distance: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tempo_distance: Option<f64>,
}

impl Distances {
    pub fn get(&self, feature: Feature) -> Option<f64> {
        match feature {
            Feature::Energy => self.energy_distance,
            Feature::Valence => self.valence_distance,
            Feature::Danceability => self.danceability_distance,
            Feature::Tempo => self.tempo_distance,
        }
    }

    pub fn set(&mut self, feature: Feature, distance: f64) {
        let slot = match feature {
            Feature::Energy => &mut self.energy_distance,
            Feature::Valence => &mut self.valence_distance,
            Feature::Danceability => &mut self.danceability_distance,
            Feature::Tempo => &mut self.tempo_distance,
        };
        *slot = Some(distance);
    }

    /// Distances that are set, in feature order.
    pub fn iter(&self) -> impl Iterator<Item = (Feature, f64)> + '_ {
        Feature::ALL
            .into_iter()
            .filter_map(|f| self.get(f).map(|d| (f, d)))
    }
}

/// A track after mood scoring.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredTrack {
    #[serde(flatten)]
    pub track: Track,
    #[serde(flatten)]
    pub distances: Distances,
    pub mood_score: f64,
}

impl ScoredTrack {
    /// Extra fields named like derived fields are dropped from `track` so the
    /// computed values are the only ones visible.
    pub fn new(mut track: Track, distances: Distances, mood_score: f64) -> Self {
        track.extra.retain(|key, _| !is_derived_field(key));
        Self {
            track,
            distances,
            mood_score,
        }
    }
}

impl Record for ScoredTrack {
    fn id(&self) -> &str {
        &self.track.id
    }

    fn field(&self, key: &str) -> Option<FieldValue> {
        if key == MOOD_SCORE_FIELD {
            return Some(FieldValue::Float(self.mood_score));
        }
        match Feature::from_distance_field(key) {
            Some(feature) => self.distances.get(feature).map(FieldValue::Float),
            None => self.track.field(key),
        }
    }
}

impl AsRef<Track> for ScoredTrack {
    fn as_ref(&self) -> &Track {
        &self.track
    }
}

/// Whether `key` names a field computed by mood scoring.
pub fn is_derived_field(key: &str) -> bool {
    key == MOOD_SCORE_FIELD || Feature::from_distance_field(key).is_some()
}
