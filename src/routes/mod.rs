use axum::{
    Router,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use crate::assets::AssetsService;
use crate::email::EmailService;

mod contact;
mod health;
mod index;

pub use contact::MSG_SENT;

#[derive(Clone)]
pub struct AppState {
    pub email: EmailService,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index::page))
        .route("/api/contact", post(contact::submit))
        .route("/api/health", get(health::health))
        .nest_service("/static", AssetsService::new())
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}
