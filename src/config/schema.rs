use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::pipeline::SortSpec;

/// Top-level settings loaded from `config.toml`.
///
/// File format: TOML
/// Default path (Linux/XDG): `$XDG_CONFIG_HOME/tunerank/config.toml` or `~/.config/tunerank/config.toml`
///
/// Precedence (highest wins):
/// 1) Environment variables (prefix `TUNERANK__`, `__` as nested separator)
/// 2) Config file (if present)
/// 3) Struct defaults
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub ranking: RankingSettings,
    pub output: OutputSettings,
    pub server: ServerSettings,

    /// Extra mood profiles: mood name -> feature name -> target.
    ///
    /// Example:
    /// ```toml
    /// [moods.focus]
    /// energy = 0.4
    /// danceability = 0.2
    /// ```
    pub moods: BTreeMap<String, BTreeMap<String, f64>>,

    /// Extra sort methods, by name.
    ///
    /// Example:
    /// ```toml
    /// [sort_methods.brightest]
    /// algorithm = "merge"
    /// key = "valence"
    /// order = "descending"
    /// ```
    pub sort_methods: BTreeMap<String, SortSpec>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RankingSettings {
    /// Mood used when a request names none.
    pub default_mood: String,
    /// Sort method used when a request names none.
    pub default_sort_method: String,
    /// How many leading tracks a request returns by default.
    pub limit: usize,
    /// Track export read when no path is given on the command line.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tracks_path: Option<PathBuf>,
}

impl Default for RankingSettings {
    fn default() -> Self {
        Self {
            default_mood: "happy".to_string(),
            default_sort_method: "popularity".to_string(),
            limit: 10,
            tracks_path: None,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TrackDisplayField {
    Id,
    Name,
    Artist,
    /// Free-form `album` field, when the export carries one.
    Album,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputSettings {
    /// Which track fields make up a report line, and in what order.
    ///
    /// Example: ["name", "artist"] -> "Song by Artist"
    pub display_fields: Vec<TrackDisplayField>,
    /// Separator used to join `display_fields`.
    pub display_separator: String,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            display_fields: vec![TrackDisplayField::Name, TrackDisplayField::Artist],
            display_separator: " by ".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 5000,
        }
    }
}
