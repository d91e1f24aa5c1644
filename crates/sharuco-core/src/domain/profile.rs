//! User profile record

use serde::{Deserialize, Serialize};

use crate::identifiers::ProfileKey;
use crate::Timestamp;

/// A user's public identity summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    /// Unique key of the profile
    pub key: ProfileKey,
    /// Name shown in the header
    pub display_name: String,
    /// Avatar image location, if the user has one
    #[serde(default)]
    pub avatar_url: Option<String>,
    /// Whether the account carries the certified badge
    #[serde(default)]
    pub is_certified: bool,
    /// Account creation time
    pub created_at: Timestamp,
    /// Most recent login time
    pub last_login_at: Timestamp,
}
