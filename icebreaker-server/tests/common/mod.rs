//! Common test utilities: handler state wired to a throwaway storage
//! backend, so every test drives the same routes the real server serves.

use actix_web::web;
use icebreaker_server::handlers::AppState;
use icebreaker_server::storage::{MemoryStore, QuestionStore, SqliteStore};
use std::sync::Arc;
use std::time::SystemTime;

pub fn app_state(store: Arc<dyn QuestionStore>) -> web::Data<AppState> {
    web::Data::new(AppState {
        store,
        start_time: SystemTime::now(),
    })
}

/// Fresh volatile backend, unseeded.
pub fn memory_state() -> web::Data<AppState> {
    app_state(Arc::new(MemoryStore::new()))
}

/// Fresh durable backend in a temp directory owned by the caller.
pub fn sqlite_state(dir: &tempfile::TempDir) -> web::Data<AppState> {
    let store = SqliteStore::new(&dir.path().join("test.db")).expect("failed to open test db");
    app_state(Arc::new(store))
}
