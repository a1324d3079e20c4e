//! Browser Bindings
//!
//! `document.cookie` as a `CookieJar`, plus locale-aware time formatting.

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::HtmlDocument;

use crate::config::SessionConfig;
use crate::cookie::CookieJar;
use crate::error::{UtilError, UtilResult};
use crate::session::Session;

/// The page's cookie store. Holds no state of its own.
#[derive(Debug, Clone, Copy, Default)]
pub struct DocumentCookieJar;

fn html_document() -> UtilResult<HtmlDocument> {
    web_sys::window()
        .and_then(|window| window.document())
        .ok_or_else(|| UtilError::Storage("no document available".to_string()))?
        .dyn_into::<HtmlDocument>()
        .map_err(|_| UtilError::Storage("document is not an HTML document".to_string()))
}

fn js_error(err: JsValue) -> UtilError {
    UtilError::Storage(err.as_string().unwrap_or_else(|| format!("{:?}", err)))
}

impl CookieJar for DocumentCookieJar {
    fn read(&self) -> UtilResult<String> {
        html_document()?.cookie().map_err(js_error)
    }

    fn write(&mut self, header: &str) -> UtilResult<()> {
        html_document()?.set_cookie(header).map_err(js_error)
    }
}

/// Session backed by `document.cookie` with the default config
pub fn browser_session() -> Session<DocumentCookieJar> {
    Session::with_config(DocumentCookieJar, SessionConfig::default())
}

/// Time of day for a Unix timestamp, as `Date.prototype.toLocaleTimeString()` renders it
pub fn locale_time_string(timestamp: i64) -> String {
    let date = js_sys::Date::new(&JsValue::from_f64(timestamp as f64 * 1000.0));
    date.to_locale_time_string("default").into()
}
