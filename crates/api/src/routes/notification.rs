//! Route definitions for the `/notifications` resource.
//!
//! All endpoints require authentication.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::notification;
use crate::state::AppState;

/// Routes mounted at `/notifications`.
///
/// ```text
/// POST   /dispatch                  -> dispatch
/// POST   /notify                    -> notify
/// POST   /preferences/test          -> preference_test
///
/// GET    /ledger                    -> list_ledger
/// GET    /ledger/{id}               -> get_ledger_entry
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/dispatch", post(notification::dispatch))
        .route("/notify", post(notification::notify))
        .route("/preferences/test", post(notification::preference_test))
        .route("/ledger", get(notification::list_ledger))
        .route("/ledger/{id}", get(notification::get_ledger_entry))
}
