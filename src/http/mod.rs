//! HTTP surface: router, shared state, auth boundary, response envelope.

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;

use crate::config::PolicyConfig;
use crate::store::Store;

pub mod auth;
pub mod response;
pub mod todos;

/// Shared handler state: the injected store handle plus ownership policy
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<Store>,
    pub policy: PolicyConfig,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route(
            "/api/todos",
            get(todos::list_todos).post(todos::create_todo),
        )
        .route("/api/todos/stats", get(todos::get_stats))
        .route(
            "/api/todos/{id}",
            get(todos::get_todo)
                .put(todos::update_todo)
                .delete(todos::delete_todo),
        )
        .route("/api/todos/{id}/notes", post(todos::add_note))
        .with_state(state)
}

/// Bind and serve until the process is stopped
pub async fn serve(bind: &str, state: AppState) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(bind).await?;
    tracing::info!(addr = %listener.local_addr()?, "listening");
    axum::serve(listener, router(state)).await?;
    Ok(())
}
