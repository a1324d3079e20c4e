//! Admin Frontend Utilities
//!
//! Session cookie storage, money/date formatting and list helpers for
//! the shop admin UI.
//!
//! Everything except `browser` and `bindings` runs natively, so the
//! helpers can be tested without a browser: inject a `MemoryCookieJar`
//! where the page would use `document.cookie`.

mod config;
mod cookie;
mod equal;
mod error;
mod format;
mod list;
mod session;
mod store;

pub mod logging;

#[cfg(target_arch = "wasm32")]
mod browser;
#[cfg(target_arch = "wasm32")]
mod bindings;


pub use config::{SessionConfig, DEFAULT_COOKIE_NAME, DEFAULT_TTL_DAYS};
pub use cookie::{encode_value, find_cookie, Cookie, CookieJar, MemoryCookieJar, HTTP_DATE_FORMAT};
pub use equal::deep_equal;
pub use error::{UtilError, UtilResult};
pub use format::{cost_format, cost_stripe, cost_with_currency, format_date, format_date_in, AsAmount};
pub use list::{delete_item, get_item_index, update_item};
pub use session::{is_falsy, Session, User};
pub use store::{store_delete_item, store_update_item};

#[cfg(target_arch = "wasm32")]
pub use browser::{browser_session, locale_time_string, DocumentCookieJar};
