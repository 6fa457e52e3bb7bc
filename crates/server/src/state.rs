use std::sync::Arc;

use common::song_detail::SongDetailApi;
use service::song::{repository::SongRepository, SongService};

/// Shared handler state; cloned per request.
#[derive(Clone)]
pub struct AppState {
    pub songs: Arc<SongService<dyn SongRepository>>,
    pub details: Arc<dyn SongDetailApi>,
}

impl AppState {
    pub fn new(repo: Arc<dyn SongRepository>, details: Arc<dyn SongDetailApi>) -> Self {
        Self { songs: Arc::new(SongService::new(repo)), details }
    }
}
