//! Logical notification categories.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Classification of a notification. Selects the message templates and
/// the key looked up in a user's preference document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum NotificationType {
    NewApplicants,
    JobUpdates,
    /// Stored under the `recommendations` preference key.
    Requests,
    BillingEmails,
    ApplicationStatus,
}

impl NotificationType {
    pub const ALL: [NotificationType; 5] = [
        NotificationType::NewApplicants,
        NotificationType::JobUpdates,
        NotificationType::Requests,
        NotificationType::BillingEmails,
        NotificationType::ApplicationStatus,
    ];

    /// The wire name, e.g. `"jobUpdates"`.
    pub fn as_str(self) -> &'static str {
        match self {
            NotificationType::NewApplicants => "newApplicants",
            NotificationType::JobUpdates => "jobUpdates",
            NotificationType::Requests => "requests",
            NotificationType::BillingEmails => "billingEmails",
            NotificationType::ApplicationStatus => "applicationStatus",
        }
    }

    /// Key under which this type's channel toggles are saved.
    pub fn preference_key(self) -> &'static str {
        match self {
            NotificationType::Requests => "recommendations",
            other => other.as_str(),
        }
    }

    pub fn default_subject(self) -> String {
        format!("CampusGig notification: {}", self.as_str())
    }

    pub fn default_message(self) -> String {
        format!("You have a new {} notification on CampusGig.", self.as_str())
    }
}

impl fmt::Display for NotificationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown notification type: {0}")]
pub struct UnknownNotificationType(pub String);

impl FromStr for NotificationType {
    type Err = UnknownNotificationType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NotificationType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| UnknownNotificationType(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn requests_maps_to_recommendations_key() {
        assert_eq!(NotificationType::Requests.preference_key(), "recommendations");
    }

    #[test]
    fn other_types_use_their_own_name_as_key() {
        for t in NotificationType::ALL {
            if t != NotificationType::Requests {
                assert_eq!(t.preference_key(), t.as_str());
            }
        }
    }

    #[test]
    fn serde_names_match_as_str() {
        for t in NotificationType::ALL {
            let json = serde_json::to_value(t).unwrap();
            assert_eq!(json, serde_json::Value::String(t.as_str().to_string()));
            assert_eq!(t.as_str().parse::<NotificationType>(), Ok(t));
        }
    }

    #[test]
    fn templates_embed_type_name() {
        let t = NotificationType::BillingEmails;
        assert!(t.default_subject().contains("billingEmails"));
        assert!(t.default_message().contains("billingEmails"));
    }
}
