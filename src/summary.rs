//! Data behind the charts: feature averages and top-song listings.
//!
//! Nothing here draws anything; the output is what a presentation layer
//! would plot.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::record::{Feature, Track};

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum VisualizationKind {
    #[serde(alias = "audio-features")]
    AudioFeatures,
    #[serde(alias = "top-songs")]
    TopSongs,
}

impl fmt::Display for VisualizationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VisualizationKind::AudioFeatures => f.write_str("audio-features"),
            VisualizationKind::TopSongs => f.write_str("top-songs"),
        }
    }
}

impl FromStr for VisualizationKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let folded: String = s
            .trim()
            .chars()
            .filter(|c| *c != '-' && *c != '_')
            .collect::<String>()
            .to_ascii_lowercase();
        match folded.as_str() {
            "audiofeatures" => Ok(VisualizationKind::AudioFeatures),
            "topsongs" => Ok(VisualizationKind::TopSongs),
            _ => Err(format!(
                "unknown visualization `{}` (expected audio-features or top-songs)",
                s.trim()
            )),
        }
    }
}

/// Mean of each 0..1 feature over the tracks that carry it.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct FeatureAverages {
    pub energy: Option<f64>,
    pub valence: Option<f64>,
    pub danceability: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TopSong {
    pub name: Option<String>,
    pub artist: Option<String>,
    pub popularity: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum VisualizationData {
    AudioFeatures(FeatureAverages),
    TopSongs(Vec<TopSong>),
}

pub fn visualize<'a>(kind: VisualizationKind, tracks: impl IntoIterator<Item = &'a Track>) -> VisualizationData {
    match kind {
        VisualizationKind::AudioFeatures => VisualizationData::AudioFeatures(feature_averages(tracks)),
        VisualizationKind::TopSongs => VisualizationData::TopSongs(top_songs(tracks)),
    }
}

pub fn feature_averages<'a>(tracks: impl IntoIterator<Item = &'a Track>) -> FeatureAverages {
    let mut sums = [(0.0, 0usize); 3];
    let features = [Feature::Energy, Feature::Valence, Feature::Danceability];

    for track in tracks {
        for (slot, feature) in sums.iter_mut().zip(features) {
            if let Some(value) = track.feature(feature) {
                slot.0 += value;
                slot.1 += 1;
            }
        }
    }

    let mean = |(sum, count): (f64, usize)| (count > 0).then(|| sum / count as f64);
    FeatureAverages {
        energy: mean(sums[0]),
        valence: mean(sums[1]),
        danceability: mean(sums[2]),
    }
}

pub fn top_songs<'a>(tracks: impl IntoIterator<Item = &'a Track>) -> Vec<TopSong> {
    tracks
        .into_iter()
        .map(|t| TopSong {
            name: t.name.clone(),
            artist: t.artist.clone(),
            popularity: t.popularity,
        })
        .collect()
}
