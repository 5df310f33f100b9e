use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::AppState;

/// Build the application router with all routes
pub fn build(state: Arc<AppState>, frontend_dir: &str) -> Router {
    let mut router = Router::new()
        .route("/api/health", get(handlers::healthcheck))
        // Topology routes
        .route("/api/topology", get(handlers::topology::get_topology))
        .route("/api/topology/refresh", post(handlers::topology::refresh_topology))
        .route("/api/tenants", get(handlers::topology::list_tenants))
        .route("/api/tenants/:id/vrfs", get(handlers::topology::list_tenant_vrfs))
        .route("/api/vrfs", get(handlers::topology::list_vrfs))
        .route("/api/vrfs/:id/svis", get(handlers::topology::list_vrf_svis))
        .route("/api/diagnostics/orphans", get(handlers::topology::get_orphans))
        // SVI routes
        .route("/api/svis", post(handlers::svis::create_svi));

    // Static files (dashboard)
    if !frontend_dir.is_empty() {
        router = router
            .nest_service("/assets", ServeDir::new(format!("{}/assets", frontend_dir)))
            .fallback_service(
                ServeDir::new(frontend_dir)
                    .fallback(ServeFile::new(format!("{}/index.html", frontend_dir))),
            );
    }

    router
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
}
