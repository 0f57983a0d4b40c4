use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow, ensure};
use tracing::{info, warn};

use crate::config::Settings;
use crate::pipeline::{AnalyzeRequest, Engine, SortChoice, SortSpec};
use crate::server::{self, ServerState};
use crate::sort::{SortAlgorithm, SortOrder};
use crate::source::load_tracks;

mod cli;
mod report;
mod settings;

pub use cli::*;
pub use report::{display_from_fields, key_label, render, render_mood};
pub use settings::load_settings;

pub async fn run(args: CliArgs) -> Result<()> {
    let settings = load_settings();

    match args.command {
        Command::Rank(rank_args) => println!("{}", rank(&settings, &rank_args)?),
        Command::Moods => println!("{}", moods(&settings)?),
        Command::Config => print!("{}", settings.to_toml().context("failed to render settings")?),
        Command::Serve(serve_args) => serve(&settings, &serve_args).await?,
    }
    Ok(())
}

/// Run one analysis and render it as a report or as JSON.
pub fn rank(settings: &Settings, args: &RankArgs) -> Result<String> {
    let path = input_path(args.input.as_deref(), settings)?;
    let tracks = load_tracks(&path).with_context(|| format!("failed to load tracks from {}", path.display()))?;
    let engine = Engine::from_settings(settings).context("invalid mood or sort method configuration")?;

    let request = rank_request(settings, args)?;
    let analysis = engine.analyze(&tracks, &request)?;
    if !analysis.mood_applied {
        warn!(mood = %analysis.mood, "unrecognized mood, tracks are not mood-ranked");
    }

    if args.json {
        Ok(serde_json::to_string_pretty(&analysis)?)
    } else {
        Ok(render(&analysis, &settings.output))
    }
}

/// Translate command line flags into an analysis request, filling the gaps
/// from `settings`.
pub fn rank_request(settings: &Settings, args: &RankArgs) -> Result<AnalyzeRequest> {
    if let Some(limit) = args.limit {
        ensure!(limit >= 1, "--limit must be at least 1");
    }

    let mood = args
        .mood
        .clone()
        .unwrap_or_else(|| settings.ranking.default_mood.clone());
    let sort = match (&args.key, &args.sort) {
        (Some(key), _) => SortChoice::Custom(SortSpec::new(
            args.algorithm.unwrap_or(SortAlgorithm::Merge),
            key.clone(),
            SortOrder::from_ascending(args.ascending),
        )),
        (None, Some(method)) => SortChoice::Method(method.clone()),
        (None, None) if args.mood_order => SortChoice::MoodOrder,
        (None, None) => SortChoice::Method(settings.ranking.default_sort_method.clone()),
    };

    Ok(AnalyzeRequest {
        mood,
        sort,
        visualization: args.visualization,
        limit: args.limit,
    })
}

pub fn moods(settings: &Settings) -> Result<String> {
    let engine = Engine::from_settings(settings)?;
    let lines: Vec<String> = engine.moods().iter().map(render_mood).collect();
    Ok(lines.join("\n"))
}

pub async fn serve(settings: &Settings, args: &ServeArgs) -> Result<()> {
    let path = input_path(args.input.as_deref(), settings)?;
    let tracks = load_tracks(&path).with_context(|| format!("failed to load tracks from {}", path.display()))?;
    let engine = Engine::from_settings(settings)?;

    let host = args.host.as_deref().unwrap_or(&settings.server.host);
    let port = args.port.unwrap_or(settings.server.port);
    info!(tracks = tracks.len(), "starting analysis server");

    let state = ServerState::new(engine, tracks, settings.ranking.clone());
    server::run_server(state, host, port).await
}

fn input_path(input: Option<&Path>, settings: &Settings) -> Result<PathBuf> {
    input
        .map(Path::to_path_buf)
        .or_else(|| settings.ranking.tracks_path.clone())
        .ok_or_else(|| anyhow!("no track export given and `ranking.tracks_path` is not set"))
}
