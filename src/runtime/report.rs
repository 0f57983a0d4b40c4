use std::fmt::Write;

use crate::config::{OutputSettings, TrackDisplayField};
use crate::mood::MoodProfile;
use crate::pipeline::{Analysis, RankedTracks};
use crate::record::{FieldValue, MOOD_SCORE_FIELD, Record, Track};
use crate::summary::{FeatureAverages, TopSong, VisualizationData};

/// Build a display string for a track according to the provided `fields` and separator.
///
/// Missing or blank fields are skipped; the track id stands in when nothing
/// else is left.
pub fn display_from_fields(track: &Track, fields: &[TrackDisplayField], sep: &str) -> String {
    let mut parts: Vec<String> = Vec::new();

    for f in fields {
        let part = match f {
            TrackDisplayField::Id => Some(track.id.as_str()),
            TrackDisplayField::Name => track.name.as_deref(),
            TrackDisplayField::Artist => track.artist.as_deref(),
            TrackDisplayField::Album => match track.extra.get("album") {
                Some(FieldValue::Text(album)) => Some(album.as_str()),
                _ => None,
            },
        };
        if let Some(p) = part.map(str::trim).filter(|s| !s.is_empty()) {
            parts.push(p.to_string());
        }
    }

    if parts.is_empty() {
        track.id.clone()
    } else {
        parts.join(sep)
    }
}

/// `popularity` -> `Popularity`, `mood_score` -> `Mood score`.
pub fn key_label(key: &str) -> String {
    let spaced = key.replace('_', " ");
    let mut chars = spaced.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => spaced,
    }
}

fn render_line<R: Record + AsRef<Track>>(record: &R, key: Option<&str>, output: &OutputSettings) -> String {
    let display = display_from_fields(record.as_ref(), &output.display_fields, &output.display_separator);
    match key.and_then(|k| record.field(k).map(|v| (k, v))) {
        Some((k, value)) => format!("{display} - {}: {value}", key_label(k)),
        None => display,
    }
}

/// One line per ranked track, followed by the chart data when present.
///
/// Each line ends with the value the tracks were ordered by: the sort key
/// when a sort method ran, the mood score otherwise.
pub fn render(analysis: &Analysis, output: &OutputSettings) -> String {
    let sort_key = analysis.sort.as_ref().map(|s| s.key.as_str());
    let mut lines: Vec<String> = match &analysis.tracks {
        RankedTracks::Scored(tracks) => {
            let key = sort_key.or(Some(MOOD_SCORE_FIELD));
            tracks.iter().map(|t| render_line(t, key, output)).collect()
        }
        RankedTracks::Unscored(tracks) => tracks.iter().map(|t| render_line(t, sort_key, output)).collect(),
    };

    match &analysis.visualization {
        Some(VisualizationData::AudioFeatures(avg)) => {
            lines.push(String::new());
            lines.push(render_averages(avg));
        }
        Some(VisualizationData::TopSongs(songs)) => {
            lines.push(String::new());
            lines.push("Top songs:".to_string());
            lines.extend(songs.iter().map(|s| format!("  {}", render_top_song(s, output))));
        }
        None => {}
    }

    lines.join("\n")
}

fn render_averages(avg: &FeatureAverages) -> String {
    let mut out = String::from("Average audio features:");
    for (name, value) in [
        ("energy", avg.energy),
        ("valence", avg.valence),
        ("danceability", avg.danceability),
    ] {
        match value {
            Some(v) => {
                let _ = write!(out, " {name} {v:.2}");
            }
            None => {
                let _ = write!(out, " {name} n/a");
            }
        }
    }
    out
}

fn render_top_song(song: &TopSong, output: &OutputSettings) -> String {
    let parts: Vec<&str> = [song.name.as_deref(), song.artist.as_deref()]
        .into_iter()
        .flatten()
        .collect();
    let title = if parts.is_empty() {
        "(untitled)".to_string()
    } else {
        parts.join(output.display_separator.as_str())
    };
    match song.popularity {
        Some(p) => format!("{title} ({p})"),
        None => title,
    }
}

/// `happy: energy 0.70, valence 0.70`
pub fn render_mood(profile: &MoodProfile) -> String {
    let targets: Vec<String> = profile
        .targets()
        .map(|(feature, target)| format!("{feature} {target:.2}"))
        .collect();
    format!("{}: {}", profile.name(), targets.join(", "))
}
