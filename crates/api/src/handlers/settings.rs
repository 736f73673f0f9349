//! Handlers for the `/settings` resource: the caller's role-specific
//! settings documents, which hold notification toggles and phone numbers.

use axum::extract::{Path, State};
use axum::Json;
use campusgig_core::error::CoreError;
use campusgig_core::settings::SettingType;
use serde_json::Value;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

fn parse_setting_type(raw: &str) -> AppResult<SettingType> {
    raw.parse::<SettingType>()
        .map_err(|e| AppError::Core(CoreError::Validation(e.to_string())))
}

/// GET /api/v1/settings/{setting_type}
pub async fn get_setting(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(setting_type): Path<String>,
) -> AppResult<Json<DataResponse<Value>>> {
    let setting_type = parse_setting_type(&setting_type)?;

    let document = state
        .dispatcher
        .settings()
        .load(setting_type, auth.user_id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "Setting",
                id: setting_type.to_string(),
            })
        })?;

    Ok(Json(DataResponse { data: document }))
}

/// PUT /api/v1/settings/{setting_type}
///
/// Replace the whole document. The body must be a JSON object.
pub async fn put_setting(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(setting_type): Path<String>,
    Json(document): Json<Value>,
) -> AppResult<Json<DataResponse<Value>>> {
    let setting_type = parse_setting_type(&setting_type)?;
    if !document.is_object() {
        return Err(AppError::BadRequest(
            "Settings document must be a JSON object".into(),
        ));
    }

    state
        .dispatcher
        .settings()
        .save(setting_type, auth.user_id, &document)
        .await?;

    tracing::info!(
        user_id = %auth.user_id,
        setting_type = %setting_type,
        "Settings document saved"
    );

    Ok(Json(DataResponse { data: document }))
}
