use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};

use crate::sort::SortAlgorithm;
use crate::summary::VisualizationKind;

fn parse_path(s: &str) -> Result<PathBuf> {
    let original_path = PathBuf::from(s);
    if original_path.is_absolute() {
        return Ok(original_path);
    }
    let cwd = std::env::current_dir()?;
    Ok(cwd.join(original_path))
}

#[derive(Parser, Debug)]
#[command(name = "tunerank", version, about = "Rank tracks by mood and sort them by any field")]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Rank a JSON track export by mood and print the result.
    Rank(RankArgs),

    /// Shows the known mood profiles and their feature targets.
    Moods,

    /// Prints the effective settings as TOML.
    Config,

    /// Serves the analysis API over HTTP.
    Serve(ServeArgs),
}

#[derive(Args, Debug, Default, Clone)]
pub struct RankArgs {
    /// JSON track export. Defaults to `ranking.tracks_path`.
    #[clap(value_parser = parse_path)]
    pub input: Option<PathBuf>,

    /// Mood to rank by. Defaults to `ranking.default_mood`.
    #[clap(long)]
    pub mood: Option<String>,

    /// Named sort method applied after the mood ranking.
    #[clap(long, conflicts_with_all = ["key", "mood_order"])]
    pub sort: Option<String>,

    /// Keep the mood ranking instead of applying a sort method.
    #[clap(long, conflicts_with = "key")]
    pub mood_order: bool,

    /// Sort by this field instead of a named method.
    #[clap(long)]
    pub key: Option<String>,

    /// Algorithm used with `--key`. Defaults to merge.
    #[clap(long, requires = "key")]
    pub algorithm: Option<SortAlgorithm>,

    /// Sort `--key` ascending instead of descending.
    #[clap(long, requires = "key")]
    pub ascending: bool,

    /// How many tracks to print. Defaults to `ranking.limit`.
    #[clap(long)]
    pub limit: Option<usize>,

    /// Also print chart data: audio-features or top-songs.
    #[clap(long)]
    pub visualization: Option<VisualizationKind>,

    /// Print the analysis as JSON.
    #[clap(long)]
    pub json: bool,
}

#[derive(Args, Debug, Default, Clone)]
pub struct ServeArgs {
    /// JSON track export. Defaults to `ranking.tracks_path`.
    #[clap(value_parser = parse_path)]
    pub input: Option<PathBuf>,

    /// Address to bind. Defaults to `server.host`.
    #[clap(long)]
    pub host: Option<String>,

    /// Port to bind. Defaults to `server.port`.
    #[clap(short, long)]
    pub port: Option<u16>,
}
