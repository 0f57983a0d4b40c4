use serde::Serialize;
use tracing::info;

use crate::config::Settings;
use crate::error::Result;
use crate::mood::{self, MoodCatalog, MoodRanking};
use crate::record::{Record, ScoredTrack, Track};
use crate::summary::{self, VisualizationData, VisualizationKind};

use super::{SortMethods, SortSpec};

/// How the mood-ranked tracks get reordered afterwards.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum SortChoice {
    /// Keep the mood ranking (or the input order when the mood is unknown).
    #[default]
    MoodOrder,
    /// A sort method by name, resolved against the engine's methods.
    Method(String),
    Custom(SortSpec),
}

#[derive(Debug, Clone, PartialEq)]
pub struct AnalyzeRequest {
    pub mood: String,
    pub sort: SortChoice,
    pub visualization: Option<VisualizationKind>,
    /// How many leading tracks to keep; the engine default when `None`.
    pub limit: Option<usize>,
}

impl AnalyzeRequest {
    pub fn new(mood: impl Into<String>) -> Self {
        Self {
            mood: mood.into(),
            sort: SortChoice::MoodOrder,
            visualization: None,
            limit: None,
        }
    }
}

/// Ranked output in whichever shape the mood step produced.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum RankedTracks {
    Scored(Vec<ScoredTrack>),
    Unscored(Vec<Track>),
}

impl RankedTracks {
    pub fn len(&self) -> usize {
        match self {
            RankedTracks::Scored(tracks) => tracks.len(),
            RankedTracks::Unscored(tracks) => tracks.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn truncate(&mut self, len: usize) {
        match self {
            RankedTracks::Scored(tracks) => tracks.truncate(len),
            RankedTracks::Unscored(tracks) => tracks.truncate(len),
        }
    }

    pub fn ids(&self) -> Vec<&str> {
        match self {
            RankedTracks::Scored(tracks) => tracks.iter().map(|t| t.id()).collect(),
            RankedTracks::Unscored(tracks) => tracks.iter().map(|t| t.id()).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Analysis {
    pub mood: String,
    pub mood_applied: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort: Option<SortSpec>,
    pub tracks: RankedTracks,
    #[serde(rename = "visualizationData")]
    pub visualization: Option<VisualizationData>,
}

#[derive(Debug, Clone)]
pub struct Engine {
    moods: MoodCatalog,
    sort_methods: SortMethods,
    default_limit: usize,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new(MoodCatalog::with_presets(), SortMethods::default(), 10)
    }
}

impl Engine {
    pub fn new(moods: MoodCatalog, sort_methods: SortMethods, default_limit: usize) -> Self {
        Self {
            moods,
            sort_methods,
            default_limit,
        }
    }

    /// Presets and default methods, extended by whatever the settings add.
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        Ok(Self::new(
            MoodCatalog::from_config(&settings.moods)?,
            SortMethods::with_overrides(&settings.sort_methods),
            settings.ranking.limit,
        ))
    }

    pub fn moods(&self) -> &MoodCatalog {
        &self.moods
    }

    pub fn sort_methods(&self) -> &SortMethods {
        &self.sort_methods
    }

    pub fn default_limit(&self) -> usize {
        self.default_limit
    }

    /// Rank `tracks` by mood, reorder by the requested sort, keep the first
    /// `limit`. Visualization data covers the whole mood-ranked set.
    pub fn analyze(&self, tracks: &[Track], request: &AnalyzeRequest) -> Result<Analysis> {
        let spec = match &request.sort {
            SortChoice::MoodOrder => None,
            SortChoice::Method(name) => Some(self.sort_methods.resolve(name)?.clone()),
            SortChoice::Custom(spec) => Some(spec.clone()),
        };

        let ranking = mood::rank(tracks, &request.mood, &self.moods)?;
        let visualization = request
            .visualization
            .map(|kind| summary::visualize(kind, ranking.tracks()));
        let mood = ranking.mood().to_string();
        let mood_applied = ranking.is_scored();

        let mut ranked = match ranking {
            MoodRanking::Scored { tracks, .. } => RankedTracks::Scored(reorder(tracks, spec.as_ref())?),
            MoodRanking::Unscored { tracks, .. } => RankedTracks::Unscored(reorder(tracks, spec.as_ref())?),
        };
        let limit = request.limit.unwrap_or(self.default_limit);
        ranked.truncate(limit);

        let sort_label = spec
            .as_ref()
            .map_or_else(|| "mood order".to_string(), |s| s.to_string());
        info!(
            mood = %mood,
            mood_applied,
            sort = %sort_label,
            returned = ranked.len(),
            total = tracks.len(),
            "analysis complete"
        );

        Ok(Analysis {
            mood,
            mood_applied,
            sort: spec,
            tracks: ranked,
            visualization,
        })
    }
}

fn reorder<R: Record + Clone>(records: Vec<R>, spec: Option<&SortSpec>) -> Result<Vec<R>> {
    match spec {
        Some(spec) => spec.apply(&records),
        None => Ok(records),
    }
}
