//! Loading track records exported by the data source.
//!
//! The export is a JSON array of flat objects, one per track, with the
//! audio features already joined in.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use tracing::info;

use crate::error::{Error, Result};
use crate::record::Track;

/// Read and parse the track export at `path`.
pub fn load_tracks(path: &Path) -> Result<Vec<Track>> {
    let text = fs::read_to_string(path)?;
    let tracks = parse_tracks(&text)?;
    info!(path = %path.display(), count = tracks.len(), "loaded tracks");
    Ok(tracks)
}

/// Parse a JSON track export. Ids must be unique within the set.
pub fn parse_tracks(text: &str) -> Result<Vec<Track>> {
    let tracks: Vec<Track> = serde_json::from_str(text)?;
    if let Some(id) = first_duplicate(&tracks) {
        return Err(Error::DuplicateTrackId(id.to_string()));
    }
    Ok(tracks)
}

fn first_duplicate(tracks: &[Track]) -> Option<&str> {
    let mut seen = HashSet::with_capacity(tracks.len());
    tracks
        .iter()
        .map(|t| t.id.as_str())
        .find(|id| !seen.insert(*id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::Feature;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn load_tracks_reads_an_export_in_order() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("tracks.json");
        fs::write(
            &path,
            r#"[
                {"id": "b", "name": "Second", "artist": "X", "popularity": 40, "energy": 0.4},
                {"id": "a", "name": "First", "artist": "Y", "popularity": 90, "valence": 0.9}
            ]"#,
        )
        .unwrap();

        let tracks = load_tracks(&path).unwrap();
        assert_eq!(tracks.len(), 2);
        assert_eq!(tracks[0].id, "b");
        assert_eq!(tracks[0].feature(Feature::Energy), Some(0.4));
        assert_eq!(tracks[1].name.as_deref(), Some("First"));
    }

    #[test]
    fn parse_tracks_rejects_duplicate_ids() {
        let err = parse_tracks(r#"[{"id": "a"}, {"id": "b"}, {"id": "a"}]"#).unwrap_err();
        assert!(matches!(err, Error::DuplicateTrackId(id) if id == "a"));
    }

    #[test]
    fn parse_tracks_requires_an_id() {
        assert!(matches!(parse_tracks(r#"[{"name": "anon"}]"#), Err(Error::Json(_))));
    }

    #[test]
    fn load_tracks_reports_missing_files() {
        let dir = tempdir().unwrap();
        let err = load_tracks(&dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }
}
