use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{HeaderValue, Method};
use axum::middleware;
use axum::routing::get;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::warn;

use crate::audit::audit_requests;
use crate::routes::{auth, health, investments, products, root};
use crate::state::AppState;

fn cors(frontend_url: &str) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PATCH, Method::OPTIONS])
        .allow_headers([AUTHORIZATION, CONTENT_TYPE])
        .allow_credentials(true);
    match HeaderValue::from_str(frontend_url) {
        Ok(origin) => layer.allow_origin(origin),
        Err(e) => {
            warn!("Ignoring invalid FRONTEND_URL '{}': {}", frontend_url, e);
            layer
        }
    }
}

pub fn create_app(state: AppState) -> Router {
    let api = Router::<AppState>::new()
        .nest("/api/auth", auth::router())
        .nest("/api/products", products::router())
        .nest("/api/investments", investments::router())
        .method_not_allowed_fallback(root::method_not_allowed)
        .layer(middleware::from_fn_with_state(state.clone(), audit_requests));

    // Routes that already carry a 405 handler keep it, so `/api` stays audited.
    Router::<AppState>::new()
        .route("/", get(root::index))
        .nest("/health", health::router())
        .merge(api)
        .method_not_allowed_fallback(root::method_not_allowed)
        .fallback(root::not_found)
        .layer(TraceLayer::new_for_http())
        .layer(cors(&state.config.frontend_url))
        .with_state(state)
}
