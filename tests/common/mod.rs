#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use axum_test::TestServer;
use slug_shortener::application::services::{CreationLimit, IdentityGate, SlugService};
use slug_shortener::domain::gateway::StoreGateway;
use slug_shortener::infrastructure::identity::StaticIdentityProvider;
use slug_shortener::infrastructure::persistence::MemoryStore;
use slug_shortener::routes::router;
use slug_shortener::state::AppState;

/// Users known to the static identity provider in every test.
pub const KNOWN_USERS: &[&str] = &["u1", "u2"];

pub fn create_test_state_with_limit(store: Arc<MemoryStore>, limit: CreationLimit) -> AppState {
    let gateway = StoreGateway::new(store.clone(), store, Duration::from_secs(5));
    let identity = IdentityGate::new(Arc::new(StaticIdentityProvider::new(
        KNOWN_USERS.iter().copied(),
    )));

    AppState::new(Arc::new(SlugService::new(gateway, identity, limit)))
}

pub fn create_test_state(store: Arc<MemoryStore>) -> AppState {
    create_test_state_with_limit(store, CreationLimit::default())
}

/// Full application router over a fresh in-memory store.
pub fn make_server() -> (TestServer, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::new());
    let app = router(create_test_state(store.clone()));
    (TestServer::new(app).unwrap(), store)
}

pub fn make_server_with_limit(limit: CreationLimit) -> (TestServer, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::new());
    let app = router(create_test_state_with_limit(store.clone(), limit));
    (TestServer::new(app).unwrap(), store)
}
