//! Cookie Storage
//!
//! The cookie wire format plus the `CookieJar` storage-provider trait.
//! Anything that can read the whole jar and apply a single assignment
//! (`document.cookie`, an in-memory map) gets `get_cookie`, `set_cookie`
//! and `delete_cookie` for free.

use chrono::{DateTime, NaiveDateTime, TimeDelta, Utc};
use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use crate::error::{UtilError, UtilResult};

/// HTTP-date layout used by the `expires` attribute
pub const HTTP_DATE_FORMAT: &str = "%a, %d %b %Y %H:%M:%S GMT";

/// Characters left alone by JS `encodeURIComponent`; everything else is escaped
const VALUE_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// A single name/value pair with an optional expiry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cookie {
    pub name: String,
    /// Decoded value
    pub value: String,
    /// `None` = session cookie
    pub expires: Option<DateTime<Utc>>,
}

impl Cookie {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            expires: None,
        }
    }

    /// Cookie expiring `days` days after `now`; `None` keeps it a session cookie.
    /// Negative days give an expiry in the past, which deletes the cookie.
    pub fn expiring_in(
        name: impl Into<String>,
        value: impl Into<String>,
        days: Option<i64>,
        now: DateTime<Utc>,
    ) -> UtilResult<Self> {
        let expires = match days {
            None => None,
            Some(days) => {
                let expires = TimeDelta::try_days(days)
                    .and_then(|delta| now.checked_add_signed(delta))
                    .ok_or_else(|| {
                        UtilError::InvalidInput(format!("cookie lifetime of {} days", days))
                    })?;
                Some(expires)
            }
        };

        Ok(Self {
            name: name.into(),
            value: value.into(),
            expires,
        })
    }

    /// Whether the cookie is gone at `now`
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires.is_some_and(|expires| expires <= now)
    }

    /// `name=value` pair as it appears when reading the jar
    pub fn to_pair(&self) -> String {
        format!("{}={}", self.name, encode_value(&self.value))
    }

    /// Assignment string: `name=value[; expires=<HTTP-date>]`
    pub fn to_header(&self) -> String {
        match self.expires {
            Some(expires) => format!(
                "{}; expires={}",
                self.to_pair(),
                expires.format(HTTP_DATE_FORMAT)
            ),
            None => self.to_pair(),
        }
    }

    /// Parse an assignment string produced by `to_header`.
    /// Attributes other than `expires` are ignored.
    pub fn parse(header: &str) -> UtilResult<Self> {
        let mut parts = header.split(';');
        let pair = parts.next().unwrap_or_default().trim();
        let (name, value) = pair
            .split_once('=')
            .ok_or_else(|| UtilError::InvalidInput(format!("cookie assignment '{}'", header)))?;

        let mut expires = None;
        for attr in parts {
            let Some((key, raw)) = attr.trim().split_once('=') else {
                continue;
            };
            if key.eq_ignore_ascii_case("expires") {
                let parsed = NaiveDateTime::parse_from_str(raw.trim(), HTTP_DATE_FORMAT)
                    .map_err(|e| UtilError::InvalidInput(format!("expires '{}': {}", raw, e)))?;
                expires = Some(parsed.and_utc());
            }
        }

        Ok(Self {
            name: name.trim().to_string(),
            value: decode(value),
            expires,
        })
    }
}

/// Percent-encode a cookie value so `;`, `,`, spaces and quotes survive the jar
pub fn encode_value(value: &str) -> String {
    utf8_percent_encode(value, VALUE_ENCODE_SET).to_string()
}

fn decode(raw: &str) -> String {
    percent_decode_str(raw).decode_utf8_lossy().into_owned()
}

/// Scan jar contents (`a=1; b=2`) for `name` and return its decoded value,
/// or an empty string when absent
pub fn find_cookie(jar: &str, name: &str) -> String {
    let prefix = format!("{}=", name);
    jar.split(';')
        .map(|segment| decode(segment.trim_start_matches(' ')))
        .find_map(|segment| segment.strip_prefix(&prefix).map(str::to_string))
        .unwrap_or_default()
}

/// Cookie storage provider
///
/// Implementors supply raw access; the cookie helpers are provided.
pub trait CookieJar {
    /// Whole jar in `document.cookie` form
    fn read(&self) -> UtilResult<String>;

    /// Apply one assignment (`name=value; expires=...`)
    fn write(&mut self, header: &str) -> UtilResult<()>;

    /// Current time, used for expiry calculation
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }

    /// Decoded value of `name`, empty string when absent
    fn get_cookie(&self, name: &str) -> UtilResult<String> {
        Ok(find_cookie(&self.read()?, name))
    }

    /// Store `value` under `name`, expiring in `days` days (`None` = session cookie)
    fn set_cookie(&mut self, name: &str, value: &str, days: Option<i64>) -> UtilResult<()> {
        let cookie = Cookie::expiring_in(name, value, days, self.now())?;
        self.write(&cookie.to_header())
    }

    fn delete_cookie(&mut self, name: &str) -> UtilResult<()> {
        self.set_cookie(name, "", Some(-1))
    }
}

/// In-memory jar with browser semantics: assignments whose expiry has
/// passed remove the cookie, reads list live cookies in insertion order
#[derive(Debug, Clone)]
pub struct MemoryCookieJar {
    cookies: Vec<Cookie>,
    clock: fn() -> DateTime<Utc>,
}

impl Default for MemoryCookieJar {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryCookieJar {
    pub fn new() -> Self {
        Self::with_clock(Utc::now)
    }

    pub fn with_clock(clock: fn() -> DateTime<Utc>) -> Self {
        Self {
            cookies: Vec::new(),
            clock,
        }
    }

    /// Live cookies
    pub fn cookies(&self) -> impl Iterator<Item = &Cookie> {
        let now = (self.clock)();
        self.cookies.iter().filter(move |c| !c.is_expired(now))
    }
}

impl CookieJar for MemoryCookieJar {
    fn read(&self) -> UtilResult<String> {
        Ok(self
            .cookies()
            .map(Cookie::to_pair)
            .collect::<Vec<_>>()
            .join("; "))
    }

    fn write(&mut self, header: &str) -> UtilResult<()> {
        let cookie = Cookie::parse(header)?;
        let now = (self.clock)();
        let existing = self.cookies.iter().position(|c| c.name == cookie.name);

        match (existing, cookie.is_expired(now)) {
            (Some(index), true) => {
                self.cookies.remove(index);
            }
            (Some(index), false) => self.cookies[index] = cookie,
            (None, true) => {}
            (None, false) => self.cookies.push(cookie),
        }
        Ok(())
    }

    fn now(&self) -> DateTime<Utc> {
        (self.clock)()
    }
}
