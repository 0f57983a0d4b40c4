use std::collections::BTreeMap;

use super::*;
use crate::error::Error;
use crate::record::{Feature, Record, Track};

fn track(id: &str, valence: f64, energy: f64, tempo: f64) -> Track {
    Track::new(id)
        .with_feature(Feature::Valence, valence)
        .with_feature(Feature::Energy, energy)
        .with_feature(Feature::Tempo, tempo)
}

fn ids<R: Record>(records: &[R]) -> Vec<&str> {
    records.iter().map(|r| r.id()).collect()
}

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn exact_happy_match_scores_zero_and_ranks_first() {
    let tracks = vec![
        track("near", 0.6, 0.75, 110.0),
        track("far", 0.1, 0.2, 90.0),
        track("exact", 0.7, 0.7, 140.0),
    ];
    let scored = score(&tracks, &MoodProfile::happy()).unwrap();

    assert_eq!(ids(&scored), vec!["exact", "near", "far"]);
    assert_eq!(scored[0].mood_score, 0.0);
    // mean(|0.6 - 0.7|, |0.75 - 0.7|)
    assert!(close(scored[1].mood_score, 0.075));
    assert!(close(scored[1].distances.valence_distance.unwrap(), 0.1));
    assert!(close(scored[1].distances.energy_distance.unwrap(), 0.05));
}

#[test]
fn only_profile_features_are_scored() {
    let scored = score(&[track("a", 0.5, 0.5, 128.0)], &MoodProfile::sad()).unwrap();
    let d = &scored[0].distances;
    assert!(d.valence_distance.is_some());
    assert!(d.energy_distance.is_some());
    assert!(d.tempo_distance.is_none());
    assert!(d.danceability_distance.is_none());
    assert_eq!(d.iter().count(), 2);
}

#[test]
fn features_outside_the_profile_may_be_absent() {
    // No tempo, no danceability: happy only needs valence and energy.
    let t = Track::new("partial")
        .with_feature(Feature::Valence, 0.7)
        .with_feature(Feature::Energy, 0.5);
    let scored = score(&[t], &MoodProfile::happy()).unwrap();
    assert!(close(scored[0].mood_score, 0.1));
}

#[test]
fn tempo_distance_is_averaged_unscaled() {
    let tracks = vec![
        // energy spot on, tempo 20 BPM off: (0 + 20) / 2
        track("tempo-off", 0.5, 0.8, 140.0),
        // energy far off, tempo spot on: (0.7 + 0) / 2
        track("energy-off", 0.5, 0.1, 120.0),
    ];
    let scored = score(&tracks, &MoodProfile::energetic()).unwrap();

    assert_eq!(ids(&scored), vec!["energy-off", "tempo-off"]);
    assert!(close(scored[0].mood_score, 0.35));
    assert!(close(scored[1].mood_score, 10.0));
}

#[test]
fn equal_scores_keep_input_order() {
    let tracks = vec![
        track("first", 0.6, 0.7, 100.0),
        track("second", 0.7, 0.6, 100.0),
        track("best", 0.7, 0.7, 100.0),
        track("third", 0.6, 0.7, 100.0),
    ];
    let scored = score(&tracks, &MoodProfile::happy()).unwrap();
    assert_eq!(ids(&scored), vec!["best", "first", "second", "third"]);
}

#[test]
fn missing_profile_feature_fails_the_batch() {
    let tracks = vec![
        track("ok", 0.5, 0.5, 100.0),
        Track::new("no-tempo").with_feature(Feature::Energy, 0.4),
    ];
    match score(&tracks, &MoodProfile::chill()).unwrap_err() {
        Error::MissingField { field, record } => {
            assert_eq!(field, "tempo");
            assert!(record.contains("no-tempo"));
        }
        other => panic!("expected MissingField, got {other:?}"),
    }
}

#[test]
fn nan_profile_feature_is_a_type_mismatch() {
    let tracks = vec![
        track("ok", 0.5, 0.5, 100.0),
        track("broken", f64::NAN, 0.5, 100.0),
    ];
    match score(&tracks, &MoodProfile::happy()).unwrap_err() {
        Error::TypeMismatch { field, record, found, .. } => {
            assert_eq!(field, "valence");
            assert!(record.contains("broken"));
            assert_eq!(found, "NaN");
        }
        other => panic!("expected TypeMismatch, got {other:?}"),
    }

    // A lone track is still scored, so its NaN is still caught.
    let lone = vec![track("alone", 0.5, f64::NAN, 100.0)];
    assert!(matches!(
        score(&lone, &MoodProfile::happy()),
        Err(Error::TypeMismatch { .. })
    ));
}

#[test]
fn empty_input_scores_to_empty_output() {
    assert!(score(&[], &MoodProfile::happy()).unwrap().is_empty());
    let ranking = rank(&[], "happy", &MoodCatalog::with_presets()).unwrap();
    assert!(ranking.is_scored());
    assert!(ranking.is_empty());
}

#[test]
fn unknown_mood_passes_tracks_through_unscored() {
    let tracks = vec![track("b", 0.1, 0.1, 90.0), track("a", 0.7, 0.7, 120.0)];
    let ranking = rank(&tracks, "melancholic", &MoodCatalog::with_presets()).unwrap();

    assert!(!ranking.is_scored());
    assert_eq!(ranking.mood(), "melancholic");
    match ranking {
        MoodRanking::Unscored { tracks: out, .. } => assert_eq!(out, tracks),
        other => panic!("expected Unscored, got {other:?}"),
    }
}

#[test]
fn rank_resolves_mood_names_case_insensitively() {
    let tracks = vec![track("x", 0.3, 0.3, 80.0), track("y", 0.9, 0.9, 80.0)];
    let ranking = rank(&tracks, "  SAD ", &MoodCatalog::with_presets()).unwrap();
    assert!(ranking.is_scored());
    assert_eq!(ranking.mood(), "sad");
    let order: Vec<&str> = ranking.tracks().iter().map(|t| t.id.as_str()).collect();
    assert_eq!(order, vec!["x", "y"]);
}

#[test]
fn presets_match_their_documented_targets() {
    let catalog = MoodCatalog::with_presets();
    assert_eq!(catalog.len(), 4);

    let happy = catalog.get("happy").unwrap();
    assert_eq!(happy.target(Feature::Valence), Some(0.7));
    assert_eq!(happy.target(Feature::Energy), Some(0.7));
    assert_eq!(happy.target(Feature::Tempo), None);

    let chill = catalog.get("chill").unwrap();
    assert_eq!(chill.target(Feature::Energy), Some(0.3));
    assert_eq!(chill.target(Feature::Tempo), Some(100.0));

    let names: Vec<&str> = catalog.iter().map(|p| p.name()).collect();
    assert_eq!(names, vec!["chill", "energetic", "happy", "sad"]);
}

#[test]
fn configured_profiles_extend_and_override_presets() {
    let mut moods = BTreeMap::new();
    moods.insert(
        "Focus".to_string(),
        BTreeMap::from([("danceability".to_string(), 0.2), ("energy".to_string(), 0.4)]),
    );
    moods.insert("happy".to_string(), BTreeMap::from([("valence".to_string(), 0.9)]));

    let catalog = MoodCatalog::from_config(&moods).unwrap();
    assert_eq!(catalog.len(), 5);
    assert_eq!(catalog.get("focus").unwrap().target(Feature::Danceability), Some(0.2));
    let happy = catalog.get("happy").unwrap();
    assert_eq!(happy.target(Feature::Valence), Some(0.9));
    assert_eq!(happy.target(Feature::Energy), None);
}

#[test]
fn invalid_profiles_are_rejected() {
    assert!(matches!(
        MoodProfile::new("nothing", Vec::<(Feature, f64)>::new()),
        Err(Error::EmptyMoodProfile(name)) if name == "nothing"
    ));
    assert!(matches!(
        MoodProfile::new("broken", [(Feature::Energy, f64::INFINITY)]),
        Err(Error::InvalidTarget { .. })
    ));

    let moods = BTreeMap::from([(
        "loud".to_string(),
        BTreeMap::from([("loudness".to_string(), -5.0)]),
    )]);
    assert!(matches!(
        MoodCatalog::from_config(&moods),
        Err(Error::UnknownFeature(f)) if f == "loudness"
    ));
}

#[test]
fn scored_tracks_can_be_resorted_by_derived_fields() {
    use crate::sort::{SortAlgorithm, SortOrder, sort};

    let tracks = vec![
        track("a", 0.2, 0.7, 100.0),
        track("b", 0.7, 0.1, 100.0),
        track("c", 0.5, 0.5, 100.0),
    ];
    let scored = score(&tracks, &MoodProfile::happy()).unwrap();
    let by_energy_gap = sort(&scored, "energy_distance", SortOrder::Descending, SortAlgorithm::Partition).unwrap();
    assert_eq!(ids(&by_energy_gap), vec!["b", "c", "a"]);
}
