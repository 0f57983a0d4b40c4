use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use serde_json::{Value, json};
use tower::ServiceExt; // for `oneshot`

use super::*;
use crate::config::RankingSettings;
use crate::pipeline::Engine;
use crate::record::{Feature, Track};

fn tracks() -> Vec<Track> {
    vec![
        Track::new("a")
            .with_name("Sunny")
            .with_artist("Ann")
            .with_popularity(50)
            .with_feature(Feature::Energy, 0.7)
            .with_feature(Feature::Valence, 0.7)
            .with_feature(Feature::Danceability, 0.5)
            .with_feature(Feature::Tempo, 120.0),
        Track::new("b")
            .with_name("Drift")
            .with_artist("Bo")
            .with_popularity(80)
            .with_feature(Feature::Energy, 0.5)
            .with_feature(Feature::Valence, 0.5)
            .with_feature(Feature::Danceability, 0.9)
            .with_feature(Feature::Tempo, 100.0),
        Track::new("c")
            .with_name("Storm")
            .with_artist("Cy")
            .with_popularity(90)
            .with_feature(Feature::Energy, 0.9)
            .with_feature(Feature::Valence, 0.2),
    ]
}

fn app() -> Router {
    make_app(ServerState::new(Engine::default(), tracks(), RankingSettings::default()))
}

async fn post_analyze(app: Router, body: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri("/api/analyze")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

fn ids(body: &Value) -> Vec<&str> {
    body["tracks"]
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["id"].as_str().unwrap())
        .collect()
}

#[tokio::test]
async fn analyze_with_defaults_ranks_by_popularity() {
    let (status, body) = post_analyze(app(), json!({ "mood": "sad" })).await;
    // Track c lacks tempo but sad only needs energy and valence.
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["mood"], "sad");
    assert_eq!(body["moodApplied"], true);
    assert_eq!(ids(&body), vec!["c", "b", "a"]);
    assert!(body["visualizationData"]["energy"].is_number());
}

#[tokio::test]
async fn analyze_honors_limit_and_sort_method() {
    let (status, body) = post_analyze(
        app(),
        json!({ "mood": "sad", "sortMethod": "energy", "limit": 2, "visualizationType": "topSongs" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&body), vec!["c", "a"]);
    assert_eq!(body["visualizationData"].as_array().unwrap().len(), 3);
    // Chart data follows the mood ranking over the whole set.
    assert_eq!(body["visualizationData"][0]["name"], "Drift");
}

#[tokio::test]
async fn analyze_passes_unknown_moods_through() {
    let (status, body) = post_analyze(app(), json!({ "mood": "wistful", "sortMethod": "popularity" })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["moodApplied"], false);
    assert_eq!(ids(&body), vec!["c", "b", "a"]);
    assert!(body["tracks"][0].get("mood_score").is_none());
}

#[tokio::test]
async fn analyze_answers_null_for_unknown_visualization() {
    let (status, body) = post_analyze(
        app(),
        json!({ "mood": "sad", "visualizationType": "genreDistribution" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["visualizationData"].is_null());
}

#[tokio::test]
async fn analyze_rejects_unknown_sort_method() {
    let (status, body) = post_analyze(app(), json!({ "mood": "sad", "sortMethod": "loudness" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("loudness"));
}

#[tokio::test]
async fn analyze_rejects_zero_limit() {
    let (status, body) = post_analyze(app(), json!({ "mood": "sad", "limit": 0 })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn analyze_answers_malformed_bodies_with_json_errors() {
    let (status, body) = post_analyze(app(), json!({ "mood": "sad", "limit": -1 })).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["error"].as_str().unwrap().contains("limit"));

    let (status, body) = post_analyze(app(), json!({ "mood": 5 })).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["error"].is_string());

    let request = Request::builder()
        .method("POST")
        .uri("/api/analyze")
        .header("content-type", "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let response = app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn analyze_reports_missing_features_as_unprocessable() {
    // Energetic needs tempo, which track c lacks.
    let (status, body) = post_analyze(app(), json!({ "mood": "energetic" })).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["error"].as_str().unwrap().contains("tempo"));
}

#[tokio::test]
async fn lists_moods_and_sort_methods() {
    let (status, moods) = get_json(app(), "/api/moods").await;
    assert_eq!(status, StatusCode::OK);
    let names: Vec<&str> = moods
        .as_array()
        .unwrap()
        .iter()
        .map(|m| m["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["chill", "energetic", "happy", "sad"]);
    assert_eq!(moods[1]["targets"]["tempo"], 120.0);

    let (status, methods) = get_json(app(), "/api/sort-methods").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(methods["popularity"]["algorithm"], "selection-exchange");
    assert_eq!(methods["energy"]["algorithm"], "partition");
    assert_eq!(methods["danceability"]["order"], "descending");
}
