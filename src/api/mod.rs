use std::sync::Arc;

use axum::{
    middleware,
    routing::{delete, get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::middleware::auth::require_auth;
use crate::AppState;

pub mod auth;
pub mod checks;
pub mod client;
pub mod users;

/// Build the full application router. The client receipt view and the two
/// credential endpoints are public; everything else sits behind bearer auth.
pub fn router(state: Arc<AppState>) -> Router {
    let protected = Router::new()
        .route("/refresh-token", post(auth::refresh_token))
        .route("/logout", delete(auth::logout))
        .route("/logout-all", delete(auth::logout_all))
        .route("/users/me", get(users::me).patch(users::update_me))
        .route(
            "/checks/",
            post(checks::create_check).get(checks::get_checks),
        )
        .route("/checks/:check_uuid", get(checks::get_check))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_auth));

    Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        .route("/client/:check_uuid", get(client::get_check_for_client))
        .merge(protected)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
