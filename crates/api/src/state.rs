use std::sync::Arc;

use crate::config::ServerConfig;
use crate::services::CharacterService;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Character registry over the configured storage backend.
    pub characters: CharacterService,
}
