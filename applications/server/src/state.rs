/// Shared application state
use crate::services::TokenService;
use ebazar_storage::Database;
use std::sync::Arc;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<Database>,
    pub tokens: Arc<TokenService>,
}

impl AppState {
    pub fn new(db: Arc<Database>, tokens: Arc<TokenService>) -> Self {
        Self { db, tokens }
    }
}
