use axum::routing::get;
use axum::Router;

use crate::handlers::settings;
use crate::state::AppState;

/// Routes mounted at `/settings`.
///
/// ```text
/// GET    /{setting_type}            -> get_setting
/// PUT    /{setting_type}            -> put_setting
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route(
        "/{setting_type}",
        get(settings::get_setting).put(settings::put_setting),
    )
}
