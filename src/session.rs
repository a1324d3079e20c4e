//! Session User Storage
//!
//! Keeps the logged-in user as JSON inside a cookie.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::config::SessionConfig;
use crate::cookie::CookieJar;
use crate::error::UtilResult;

/// The user record is owned by the backend; treated as opaque JSON by default
pub type User = Value;

/// Session accessor over an injected cookie jar
#[derive(Debug, Clone)]
pub struct Session<J: CookieJar> {
    jar: J,
    config: SessionConfig,
}

impl<J: CookieJar> Session<J> {
    pub fn new(jar: J) -> Self {
        Self::with_config(jar, SessionConfig::default())
    }

    pub fn with_config(jar: J, config: SessionConfig) -> Self {
        Self { jar, config }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn jar(&self) -> &J {
        &self.jar
    }

    pub fn jar_mut(&mut self) -> &mut J {
        &mut self.jar
    }

    pub fn into_inner(self) -> J {
        self.jar
    }

    /// Stored user, or `None` when no session cookie is present
    pub fn get_user<T: DeserializeOwned>(&self) -> UtilResult<Option<T>> {
        let raw = self.jar.get_cookie(&self.config.cookie_name)?;
        if raw.is_empty() {
            return Ok(None);
        }
        Ok(Some(serde_json::from_str(&raw)?))
    }

    /// Store `user` for `ttl_days`. Falsy values (`null`, `false`, `0`, `""`)
    /// leave the current session untouched.
    pub fn set_user<T: Serialize + ?Sized>(&mut self, user: &T) -> UtilResult<()> {
        let value = serde_json::to_value(user)?;
        if is_falsy(&value) {
            log::debug!("[Session] Ignoring empty user");
            return Ok(());
        }

        let encoded = serde_json::to_string(&value)?;
        self.jar
            .set_cookie(&self.config.cookie_name, &encoded, Some(self.config.ttl_days))?;
        log::debug!("[Session] Stored user in '{}'", self.config.cookie_name);
        Ok(())
    }

    pub fn delete_user(&mut self) -> UtilResult<()> {
        self.jar.delete_cookie(&self.config.cookie_name)?;
        log::debug!("[Session] Cleared '{}'", self.config.cookie_name);
        Ok(())
    }
}

/// JS truthiness for JSON values: containers are always truthy
pub fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f == 0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(_) | Value::Object(_) => false,
    }
}
