//! Setting document kinds stored per user.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Field in `client_settings` holding the client's phone number.
pub const CLIENT_CONTACT_PHONE_FIELD: &str = "contactPhone";

/// Field in `student_profile` holding the student's phone number.
pub const STUDENT_PHONE_FIELD: &str = "phone";

/// The role-specific document a settings row holds. One document exists per
/// `(user, setting type)` pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SettingType {
    ClientSettings,
    StudentSettings,
    StudentProfile,
}

impl SettingType {
    pub const ALL: [SettingType; 3] = [
        SettingType::ClientSettings,
        SettingType::StudentSettings,
        SettingType::StudentProfile,
    ];

    /// Documents searched for saved notification preferences, in order.
    pub const PREFERENCE_SOURCES: [SettingType; 2] =
        [SettingType::ClientSettings, SettingType::StudentSettings];

    pub fn as_str(self) -> &'static str {
        match self {
            SettingType::ClientSettings => "client_settings",
            SettingType::StudentSettings => "student_settings",
            SettingType::StudentProfile => "student_profile",
        }
    }
}

impl fmt::Display for SettingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown setting type: {0}")]
pub struct UnknownSettingType(pub String);

impl FromStr for SettingType {
    type Err = UnknownSettingType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SettingType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| UnknownSettingType(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_through_str() {
        for t in SettingType::ALL {
            assert_eq!(t.as_str().parse::<SettingType>(), Ok(t));
        }
    }

    #[test]
    fn rejects_unknown() {
        assert!("admin_settings".parse::<SettingType>().is_err());
    }
}
