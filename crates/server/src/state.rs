use std::sync::Arc;

use concourse::{config::Config, refresh, repository::Repository, walking::WalkingGraph};

/// Everything a request handler needs: the read-only Stop Directory and
/// walking graph (loaded once at startup), a handle to the most recently
/// published snapshot, and the process configuration.
pub struct AppState {
    pub config: Arc<Config>,
    pub repository: Arc<Repository>,
    pub walking: Arc<WalkingGraph>,
    pub live: refresh::Handle,
}
