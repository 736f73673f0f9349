//! Handlers for the `/notifications` resource.
//!
//! All endpoints require authentication via [`AuthUser`]. The authenticated
//! user is the dispatcher's identity for the request.

use axum::extract::{Path, Query, State};
use axum::Json;
use campusgig_core::dispatch::{ChannelOutcome, DispatchOptions};
use campusgig_core::error::CoreError;
use campusgig_core::notification_type::NotificationType;
use campusgig_core::preferences::ChannelPreferences;
use campusgig_core::settings::SettingType;
use campusgig_core::types::DbId;
use campusgig_db::models::ledger::LedgerEntry;
use campusgig_db::repositories::NotificationLedgerRepo;
use serde::Deserialize;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / query types
// ---------------------------------------------------------------------------

/// Body of `POST /notifications/dispatch`.
#[derive(Debug, Deserialize, Validate)]
pub struct DispatchRequest {
    #[serde(rename = "type")]
    pub notification_type: NotificationType,
    /// Channel names as given; unknown names come back as `channel-unknown`.
    #[validate(length(max = 10, message = "At most 10 channels per dispatch"))]
    pub channels: Vec<String>,
    #[validate(length(max = 200))]
    pub subject: Option<String>,
    #[validate(length(max = 5000))]
    pub message: Option<String>,
}

/// Body of `POST /notifications/notify`.
#[derive(Debug, Deserialize, Validate)]
pub struct NotifyRequest {
    #[serde(rename = "type")]
    pub notification_type: NotificationType,
    /// Preferred settings document to read toggles from.
    pub setting_type: Option<SettingType>,
    #[validate(length(max = 200))]
    pub subject: Option<String>,
    #[validate(length(max = 5000))]
    pub message: Option<String>,
}

/// Body of `POST /notifications/preferences/test`.
#[derive(Debug, Deserialize)]
pub struct PreferenceTestRequest {
    /// A preference document, either bare or wrapped in `notifications`.
    pub preferences: serde_json::Value,
}

/// Query parameters for `GET /notifications/ledger`.
#[derive(Debug, Deserialize)]
pub struct LedgerQuery {
    /// Maximum number of results. Defaults to 50, capped at 100.
    pub limit: Option<i64>,
    /// Number of results to skip. Defaults to 0.
    pub offset: Option<i64>,
}

/// Maximum page size for ledger listing.
const MAX_LIMIT: i64 = 100;

/// Default page size for ledger listing.
const DEFAULT_LIMIT: i64 = 50;

impl LedgerQuery {
    /// Effective `(limit, offset)` after defaults and clamping.
    fn bounds(&self) -> (i64, i64) {
        (
            self.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT),
            self.offset.unwrap_or(0).max(0),
        )
    }
}

fn options(subject: Option<String>, message: Option<String>) -> DispatchOptions {
    DispatchOptions { subject, message }
}

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

/// POST /api/v1/notifications/dispatch
///
/// Send one notification to an explicit channel list. Returns one outcome
/// per requested channel, in request order.
pub async fn dispatch(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<DispatchRequest>,
) -> AppResult<Json<DataResponse<Vec<ChannelOutcome>>>> {
    input.validate()?;

    let opts = options(input.subject, input.message);
    let outcomes = state
        .dispatcher
        .dispatch(&auth, input.notification_type, input.channels.as_slice(), &opts)
        .await;

    Ok(Json(DataResponse { data: outcomes }))
}

/// POST /api/v1/notifications/notify
///
/// Send one notification to the channels the caller enabled in their saved
/// settings.
pub async fn notify(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<NotifyRequest>,
) -> AppResult<Json<DataResponse<Vec<ChannelOutcome>>>> {
    input.validate()?;

    let opts = options(input.subject, input.message);
    let outcomes = state
        .dispatcher
        .notify_from_saved(&auth, input.notification_type, input.setting_type, &opts)
        .await;

    Ok(Json(DataResponse { data: outcomes }))
}

/// POST /api/v1/notifications/preferences/test
///
/// Send a confirmation to every channel enabled in the submitted
/// preferences.
pub async fn preference_test(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<PreferenceTestRequest>,
) -> AppResult<Json<DataResponse<Vec<ChannelOutcome>>>> {
    if !input.preferences.is_object() {
        return Err(AppError::BadRequest(
            "preferences must be a JSON object".into(),
        ));
    }

    let prefs = ChannelPreferences::from_document(&input.preferences);
    let outcomes = state.dispatcher.send_preference_test(&auth, &prefs).await;

    Ok(Json(DataResponse { data: outcomes }))
}

// ---------------------------------------------------------------------------
// Ledger
// ---------------------------------------------------------------------------

/// GET /api/v1/notifications/ledger
///
/// List the caller's delivery attempts, newest first.
pub async fn list_ledger(
    auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<LedgerQuery>,
) -> AppResult<Json<DataResponse<Vec<LedgerEntry>>>> {
    let (limit, offset) = params.bounds();

    let entries =
        NotificationLedgerRepo::list_for_user(&state.pool, auth.user_id, limit, offset).await?;

    Ok(Json(DataResponse { data: entries }))
}

/// GET /api/v1/notifications/ledger/{id}
///
/// Fetch one ledger row. Rows owned by other users are reported as missing.
pub async fn get_ledger_entry(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<LedgerEntry>>> {
    let entry = NotificationLedgerRepo::find_by_id(&state.pool, id)
        .await?
        .filter(|e| e.user_id == auth.user_id)
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "LedgerEntry",
                id: id.to_string(),
            })
        })?;

    Ok(Json(DataResponse { data: entry }))
}
