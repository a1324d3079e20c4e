//! JavaScript Exports
//!
//! The utility surface under its camelCase names, for JS front-ends
//! that load the wasm module directly.

use js_sys::Array;
use serde::Serialize;
use serde_json::Value;
use wasm_bindgen::prelude::*;

use crate::browser::{browser_session, DocumentCookieJar};
use crate::cookie::CookieJar;
use crate::error::UtilError;
use crate::{format, list};

fn to_json(value: JsValue) -> Result<Value, JsError> {
    serde_wasm_bindgen::from_value(value).map_err(|e| JsError::new(&e.to_string()))
}

fn to_js(value: &Value) -> Result<JsValue, JsError> {
    value
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .map_err(|e| JsError::new(&e.to_string()))
}

fn array_to_json(list: &Array) -> Result<Vec<Value>, JsError> {
    list.iter().map(to_json).collect()
}

fn locate(list: &Array, row: JsValue) -> Result<u32, JsError> {
    let rows = array_to_json(list)?;
    let row = to_json(row)?;
    list::get_item_index(&rows, &row)
        .map(|index| index as u32)
        .ok_or_else(|| UtilError::NotFound("row not in list".to_string()).into())
}

#[wasm_bindgen(js_name = getCookie)]
pub fn get_cookie(name: &str) -> Result<String, JsError> {
    Ok(DocumentCookieJar.get_cookie(name)?)
}

/// Whole days from a JS number. `NaN` and infinities give no expiry,
/// as an `Invalid Date` does in the browser.
fn day_offset(days: Option<f64>) -> Option<i64> {
    days.filter(|d| d.is_finite()).map(|d| d.trunc() as i64)
}

#[wasm_bindgen(js_name = setCookie)]
pub fn set_cookie(name: &str, value: &str, days: Option<f64>) -> Result<(), JsError> {
    Ok(DocumentCookieJar.set_cookie(name, value, day_offset(days))?)
}

/// Stored user object, `undefined` when logged out
#[wasm_bindgen(js_name = getUser)]
pub fn get_user() -> Result<JsValue, JsError> {
    match browser_session().get_user::<Value>()? {
        Some(user) => to_js(&user),
        None => Ok(JsValue::UNDEFINED),
    }
}

#[wasm_bindgen(js_name = setUser)]
pub fn set_user(user: JsValue) -> Result<(), JsError> {
    let user = to_json(user)?;
    Ok(browser_session().set_user(&user)?)
}

#[wasm_bindgen(js_name = delUser)]
pub fn del_user() -> Result<(), JsError> {
    Ok(browser_session().delete_user()?)
}

#[wasm_bindgen(js_name = getItemIndex)]
pub fn get_item_index(list: &Array, row: JsValue) -> Result<Option<u32>, JsError> {
    let rows = array_to_json(list)?;
    let row = to_json(row)?;
    Ok(list::get_item_index(&rows, &row).map(|index| index as u32))
}

/// Replace `row` inside the JS array in place
#[wasm_bindgen(js_name = updateItem)]
pub fn update_item(list: &Array, row: JsValue, new_val: JsValue) -> Result<(), JsError> {
    let index = locate(list, row)?;
    list.set(index, new_val);
    Ok(())
}

/// Remove `row` from the JS array in place
#[wasm_bindgen(js_name = deleteItem)]
pub fn delete_item(list: &Array, row: JsValue) -> Result<(), JsError> {
    let index = locate(list, row)? as i32;
    list.copy_within(index, index + 1, list.length() as i32);
    list.pop();
    Ok(())
}

#[wasm_bindgen(js_name = costFormat)]
pub fn cost_format(cost: JsValue) -> String {
    match to_json(cost) {
        Ok(cost) => format::cost_format(&cost),
        Err(_) => format::cost_format(None::<f64>),
    }
}

/// Minor units, `NaN` for non-numeric input
#[wasm_bindgen(js_name = costStripe)]
pub fn cost_stripe(cost: JsValue) -> f64 {
    to_json(cost)
        .ok()
        .and_then(|cost| format::cost_stripe(&cost))
        .map_or(f64::NAN, |minor| minor as f64)
}

#[wasm_bindgen(js_name = formatDate)]
pub fn format_date(timestamp: f64) -> Result<String, JsError> {
    if !timestamp.is_finite() {
        return Err(UtilError::InvalidInput(format!("timestamp {}", timestamp)).into());
    }
    Ok(format::format_date(timestamp.trunc() as i64)?)
}
