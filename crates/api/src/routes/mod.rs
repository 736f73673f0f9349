pub mod health;
pub mod notification;
pub mod settings;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /notifications/dispatch                  dispatch to explicit channels (POST)
/// /notifications/notify                    dispatch per saved preferences (POST)
/// /notifications/preferences/test          preference confirmation (POST)
/// /notifications/ledger                    list caller's ledger rows (GET)
/// /notifications/ledger/{id}               get one ledger row (GET)
///
/// /settings/{setting_type}                 get, replace settings document
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/notifications", notification::router())
        .nest("/settings", settings::router())
}
