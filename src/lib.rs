pub mod assets;
pub mod client;
pub mod config;
pub mod contact;
pub mod email;
pub mod error;
pub mod observability;
pub mod routes;

pub use routes::AppState;

/// Create the application router
///
/// Used by the `serve` command and by integration tests, which run the same
/// router against a mock mail relay.
pub fn create_app(state: AppState) -> axum::Router {
    routes::router(state)
}
