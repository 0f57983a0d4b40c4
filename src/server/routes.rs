use std::collections::BTreeMap;

use anyhow::Result;
use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::Deserialize;
use serde_json::json;
use tracing::{info, warn};

use crate::error::Error;
use crate::mood::MoodProfile;
use crate::pipeline::{Analysis, AnalyzeRequest, SortChoice, SortSpec};
use crate::summary::VisualizationKind;

use super::ServerState;

/// Body of `POST /api/analyze`. Every field is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct AnalyzeBody {
    mood: Option<String>,
    sort_method: Option<String>,
    visualization_type: Option<String>,
    limit: Option<usize>,
}

/// An error answered as `{ "error": message }`.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        let status = match &err {
            e if e.is_record_error() => StatusCode::UNPROCESSABLE_ENTITY,
            Error::Io(_) | Error::Json(_) => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::BAD_REQUEST,
        };
        Self {
            status,
            message: err.to_string(),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}

async fn analyze(
    State(state): State<ServerState>,
    body: Result<Json<AnalyzeBody>, JsonRejection>,
) -> Result<Json<Analysis>, ApiError> {
    let Json(body) = body.inspect_err(|rejection| warn!("rejected analyze body: {rejection}"))?;
    if body.limit == Some(0) {
        return Err(ApiError::bad_request("limit must be at least 1"));
    }

    let mood = body.mood.unwrap_or_else(|| state.defaults.default_mood.clone());
    let sort_method = body
        .sort_method
        .unwrap_or_else(|| state.defaults.default_sort_method.clone());
    // An unknown kind yields no chart data rather than an error.
    let visualization = match body.visualization_type.as_deref() {
        None => Some(VisualizationKind::AudioFeatures),
        Some(kind) => kind.parse().ok(),
    };

    let request = AnalyzeRequest {
        mood,
        sort: SortChoice::Method(sort_method.clone()),
        visualization,
        limit: body.limit,
    };

    match state.engine.analyze(&state.tracks, &request) {
        Ok(analysis) => {
            info!(
                mood = %request.mood,
                sort_method = %sort_method,
                returned = analysis.tracks.len(),
                "analyze request served"
            );
            Ok(Json(analysis))
        }
        Err(err) => {
            warn!(mood = %request.mood, sort_method = %sort_method, "analyze request failed: {err}");
            Err(err.into())
        }
    }
}

async fn list_moods(State(state): State<ServerState>) -> Json<Vec<MoodProfile>> {
    Json(state.engine.moods().iter().cloned().collect())
}

async fn list_sort_methods(State(state): State<ServerState>) -> Json<BTreeMap<String, SortSpec>> {
    Json(
        state
            .engine
            .sort_methods()
            .iter()
            .map(|(name, spec)| (name.to_string(), spec.clone()))
            .collect(),
    )
}

pub fn make_app(state: ServerState) -> Router {
    let api_routes: Router = Router::new()
        .route("/analyze", post(analyze))
        .route("/moods", get(list_moods))
        .route("/sort-methods", get(list_sort_methods))
        .with_state(state);

    Router::new().nest("/api", api_routes)
}

pub async fn run_server(state: ServerState, host: &str, port: u16) -> Result<()> {
    let app = make_app(state);

    let listener = tokio::net::TcpListener::bind(format!("{host}:{port}")).await?;
    info!("listening on {}", listener.local_addr()?);

    Ok(axum::serve(listener, app).await?)
}
