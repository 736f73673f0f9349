//! Current-user contact resolution.
//!
//! Email comes from the identity provider. The phone number is best-effort
//! enrichment from saved settings: `client_settings.contactPhone` first,
//! then `student_profile.phone`.

use campusgig_core::dispatch::ContactInfo;
use campusgig_core::settings::{SettingType, CLIENT_CONTACT_PHONE_FIELD, STUDENT_PHONE_FIELD};
use campusgig_core::types::UserId;
use serde_json::Value;

use crate::error::StoreError;
use crate::identity::IdentityProvider;
use crate::settings::SettingsStore;

/// Phone sources in lookup order.
const PHONE_SOURCES: [(SettingType, &str); 2] = [
    (SettingType::ClientSettings, CLIENT_CONTACT_PHONE_FIELD),
    (SettingType::StudentProfile, STUDENT_PHONE_FIELD),
];

/// Resolve the current user's contact details. Never fails: an identity
/// error counts as "nobody signed in" and a settings error leaves the
/// phone unset.
pub async fn resolve_contact(
    identity: &dyn IdentityProvider,
    settings: &dyn SettingsStore,
) -> ContactInfo {
    let user = match identity.current_user().await {
        Ok(user) => user,
        Err(e) => {
            tracing::warn!(error = %e, "Identity lookup failed, treating caller as anonymous");
            None
        }
    };

    let Some(user) = user else {
        return ContactInfo::default();
    };

    let phone = match lookup_phone(settings, user.user_id).await {
        Ok(phone) => phone,
        Err(e) => {
            tracing::debug!(user_id = %user.user_id, error = %e, "Phone lookup failed");
            None
        }
    };

    ContactInfo {
        user_id: Some(user.user_id),
        email: user.email.filter(|e| !e.is_empty()),
        phone,
    }
}

/// Stops at the first source holding a non-empty string. An error from any
/// load ends the lookup.
async fn lookup_phone(
    settings: &dyn SettingsStore,
    user_id: UserId,
) -> Result<Option<String>, StoreError> {
    for (setting_type, field) in PHONE_SOURCES {
        let document = settings.load(setting_type, user_id).await?;
        if let Some(phone) = document.as_ref().and_then(|doc| string_field(doc, field)) {
            return Ok(Some(phone));
        }
    }
    Ok(None)
}

fn string_field(document: &Value, field: &str) -> Option<String> {
    document
        .get(field)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}
