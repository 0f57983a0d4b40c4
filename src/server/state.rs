use std::sync::Arc;

use crate::config::RankingSettings;
use crate::pipeline::Engine;
use crate::record::Track;

#[derive(Clone)]
pub struct ServerState {
    pub engine: Arc<Engine>,
    pub tracks: Arc<Vec<Track>>,
    /// Mood, sort method and limit used when a request leaves them out.
    pub defaults: Arc<RankingSettings>,
}

impl ServerState {
    pub fn new(engine: Engine, tracks: Vec<Track>, defaults: RankingSettings) -> Self {
        Self {
            engine: Arc::new(engine),
            tracks: Arc::new(tracks),
            defaults: Arc::new(defaults),
        }
    }
}
