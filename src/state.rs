//! Shared application state injected into every handler.

use std::sync::Arc;

use crate::application::services::SlugService;

#[derive(Clone)]
pub struct AppState {
    pub slug_service: Arc<SlugService>,
}

impl AppState {
    pub fn new(slug_service: Arc<SlugService>) -> Self {
        Self { slug_service }
    }
}
