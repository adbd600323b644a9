//! HTTP service persisting todo records.
//!
//! [`app`] assembles the router for any [`store::TodoStore`]; the binary picks
//! the store from [`config::Config`].

use std::path::PathBuf;

use axum::Router;
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};

pub mod config;
pub mod error;
pub mod routes;
pub mod store;
pub mod telemetry;

pub use store::{MemoryStore, RedisStore, StoreError, TodoStore};

/// Builds the API router. With a `static_dir`, unmatched paths fall through
/// to the built frontend.
pub fn app<S: TodoStore>(store: S, static_dir: Option<PathBuf>) -> Router {
    let api = routes::router::<S>().with_state(store);
    let app = match static_dir {
        Some(dir) => api.fallback_service(ServeDir::new(dir)),
        None => api,
    };

    app.layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
