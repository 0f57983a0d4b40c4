use tracing::{debug, info};

use crate::error::{Error, Result, record_label};
use crate::record::{Distances, MOOD_SCORE_FIELD, ScoredTrack, Track};
use crate::sort::{SortOrder, merge_sort};

use super::{MoodCatalog, MoodProfile};

/// Outcome of ranking by a mood name.
#[derive(Debug, Clone, PartialEq)]
pub enum MoodRanking {
    /// The mood resolved to a profile; tracks are ordered by `mood_score`.
    Scored {
        profile: MoodProfile,
        tracks: Vec<ScoredTrack>,
    },
    /// No profile goes by that name; tracks are in their original order.
    Unscored { mood: String, tracks: Vec<Track> },
}

impl MoodRanking {
    pub fn is_scored(&self) -> bool {
        matches!(self, MoodRanking::Scored { .. })
    }

    /// The mood as resolved, or as requested when unrecognized.
    pub fn mood(&self) -> &str {
        match self {
            MoodRanking::Scored { profile, .. } => profile.name(),
            MoodRanking::Unscored { mood, .. } => mood,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            MoodRanking::Scored { tracks, .. } => tracks.len(),
            MoodRanking::Unscored { tracks, .. } => tracks.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The underlying tracks in ranked order.
    pub fn tracks(&self) -> Vec<&Track> {
        match self {
            MoodRanking::Scored { tracks, .. } => tracks.iter().map(|s| &s.track).collect(),
            MoodRanking::Unscored { tracks, .. } => tracks.iter().collect(),
        }
    }
}

/// Score every track against `profile` and order them by `mood_score`,
/// closest first. Ties keep their input order.
pub fn score(tracks: &[Track], profile: &MoodProfile) -> Result<Vec<ScoredTrack>> {
    let scored = tracks
        .iter()
        .enumerate()
        .map(|(index, track)| score_track(index, track, profile))
        .collect::<Result<Vec<_>>>()?;

    merge_sort(&scored, MOOD_SCORE_FIELD, SortOrder::Ascending)
}

/// Resolve `mood` in `catalog` and score by it. An unknown mood is not an
/// error: the tracks come back unscored.
pub fn rank(tracks: &[Track], mood: &str, catalog: &MoodCatalog) -> Result<MoodRanking> {
    let Some(profile) = catalog.get(mood) else {
        info!(mood, count = tracks.len(), "unrecognized mood, passing tracks through unscored");
        return Ok(MoodRanking::Unscored {
            mood: mood.to_string(),
            tracks: tracks.to_vec(),
        });
    };

    let scored = score(tracks, profile)?;
    debug!(mood = profile.name(), count = scored.len(), "scored tracks");
    Ok(MoodRanking::Scored {
        profile: profile.clone(),
        tracks: scored,
    })
}

fn score_track(index: usize, track: &Track, profile: &MoodProfile) -> Result<ScoredTrack> {
    let mut distances = Distances::default();
    let mut total = 0.0;
    let mut count = 0usize;

    for (feature, target) in profile.targets() {
        let value = track.feature(feature).ok_or_else(|| Error::MissingField {
            field: feature.as_str().to_string(),
            record: record_label(index, &track.id),
        })?;
        if value.is_nan() {
            return Err(Error::TypeMismatch {
                field: feature.as_str().to_string(),
                record: record_label(index, &track.id),
                found: "NaN",
                expected: "a number",
            });
        }

        let distance = (value - target).abs();
        distances.set(feature, distance);
        total += distance;
        count += 1;
    }

    // Profiles always carry at least one target.
    Ok(ScoredTrack::new(track.clone(), distances, total / count as f64))
}
