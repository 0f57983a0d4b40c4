use std::collections::BTreeMap;

use serde::Serialize;

use crate::error::{Error, Result};
use crate::record::Feature;

/// A named set of feature targets.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MoodProfile {
    name: String,
    targets: BTreeMap<Feature, f64>,
}

impl MoodProfile {
    /// Build a profile. It needs at least one target, and every target must
    /// be finite.
    pub fn new(name: impl Into<String>, targets: impl IntoIterator<Item = (Feature, f64)>) -> Result<Self> {
        let name = normalize(&name.into());
        let targets: BTreeMap<Feature, f64> = targets.into_iter().collect();

        if targets.is_empty() {
            return Err(Error::EmptyMoodProfile(name));
        }
        if let Some((feature, _)) = targets.iter().find(|(_, t)| !t.is_finite()) {
            return Err(Error::InvalidTarget {
                mood: name,
                feature: feature.to_string(),
            });
        }
        Ok(Self { name, targets })
    }

    /// Build a profile from textual feature names, as found in config files.
    pub fn from_named_targets<'a>(
        name: &str,
        targets: impl IntoIterator<Item = (&'a String, &'a f64)>,
    ) -> Result<Self> {
        let parsed = targets
            .into_iter()
            .map(|(feature, target)| Ok::<_, Error>((feature.parse::<Feature>()?, *target)))
            .collect::<Result<Vec<_>>>()?;
        Self::new(name, parsed)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Targets in feature order.
    pub fn targets(&self) -> impl Iterator<Item = (Feature, f64)> + '_ {
        self.targets.iter().map(|(f, t)| (*f, *t))
    }

    pub fn target(&self, feature: Feature) -> Option<f64> {
        self.targets.get(&feature).copied()
    }

    pub fn happy() -> Self {
        Self::preset("happy", &[(Feature::Valence, 0.7), (Feature::Energy, 0.7)])
    }

    pub fn sad() -> Self {
        Self::preset("sad", &[(Feature::Valence, 0.3), (Feature::Energy, 0.3)])
    }

    pub fn energetic() -> Self {
        Self::preset("energetic", &[(Feature::Energy, 0.8), (Feature::Tempo, 120.0)])
    }

    pub fn chill() -> Self {
        Self::preset("chill", &[(Feature::Energy, 0.3), (Feature::Tempo, 100.0)])
    }

    fn preset(name: &str, targets: &[(Feature, f64)]) -> Self {
        Self {
            name: name.to_string(),
            targets: targets.iter().copied().collect(),
        }
    }
}

/// Mood profiles by name. Lookups ignore case and surrounding whitespace.
#[derive(Debug, Clone, PartialEq)]
pub struct MoodCatalog {
    profiles: BTreeMap<String, MoodProfile>,
}

impl Default for MoodCatalog {
    fn default() -> Self {
        Self::with_presets()
    }
}

impl MoodCatalog {
    pub fn empty() -> Self {
        Self {
            profiles: BTreeMap::new(),
        }
    }

    /// `happy`, `sad`, `energetic` and `chill`.
    pub fn with_presets() -> Self {
        let mut catalog = Self::empty();
        for profile in [
            MoodProfile::happy(),
            MoodProfile::sad(),
            MoodProfile::energetic(),
            MoodProfile::chill(),
        ] {
            catalog.insert(profile);
        }
        catalog
    }

    /// Presets plus configured profiles; a configured profile replaces a
    /// preset of the same name.
    pub fn from_config(moods: &BTreeMap<String, BTreeMap<String, f64>>) -> Result<Self> {
        let mut catalog = Self::with_presets();
        for (name, targets) in moods {
            catalog.insert(MoodProfile::from_named_targets(name, targets)?);
        }
        Ok(catalog)
    }

    /// Add a profile, returning the one it replaced.
    pub fn insert(&mut self, profile: MoodProfile) -> Option<MoodProfile> {
        self.profiles.insert(profile.name.clone(), profile)
    }

    pub fn get(&self, name: &str) -> Option<&MoodProfile> {
        self.profiles.get(&normalize(name))
    }

    /// Profiles in name order.
    pub fn iter(&self) -> impl Iterator<Item = &MoodProfile> {
        self.profiles.values()
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
}

fn normalize(name: &str) -> String {
    name.trim().to_lowercase()
}
