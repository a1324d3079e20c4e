//! Session Configuration

use serde::{Deserialize, Serialize};

use crate::error::UtilResult;

/// Name of the cookie holding the logged-in user
pub const DEFAULT_COOKIE_NAME: &str = "loginUser";

/// Lifetime of the user cookie, in days
pub const DEFAULT_TTL_DAYS: i64 = 1;

/// Where and for how long the session user is stored
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub cookie_name: String,
    pub ttl_days: i64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            cookie_name: DEFAULT_COOKIE_NAME.to_string(),
            ttl_days: DEFAULT_TTL_DAYS,
        }
    }
}

impl SessionConfig {
    /// Parse a config object; missing fields keep their defaults
    pub fn from_json(raw: &str) -> UtilResult<Self> {
        Ok(serde_json::from_str(raw)?)
    }
}
