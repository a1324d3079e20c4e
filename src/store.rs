//! Reactive Store Helpers
//!
//! List helpers applied to a Leptos signal. Subscribers are notified
//! once, and only when the list actually changed.

use leptos::prelude::*;
use serde::Serialize;

use crate::error::{UtilError, UtilResult};
use crate::list::get_item_index;

fn locate<T>(signal: RwSignal<Vec<T>>, row: &T) -> UtilResult<usize>
where
    T: Serialize + Send + Sync + 'static,
{
    signal
        .try_with_untracked(|list| get_item_index(list, row))
        .ok_or_else(disposed)?
        .ok_or_else(|| UtilError::NotFound("row not in store".to_string()))
}

fn disposed() -> UtilError {
    UtilError::Storage("signal disposed".to_string())
}

/// Replace the row structurally equal to `row` inside the signal
pub fn store_update_item<T>(signal: RwSignal<Vec<T>>, row: &T, new_val: T) -> UtilResult<T>
where
    T: Serialize + Send + Sync + 'static,
{
    let index = locate(signal, row)?;
    signal
        .try_update(|list| std::mem::replace(&mut list[index], new_val))
        .ok_or_else(disposed)
}

/// Remove the row structurally equal to `row` from the signal
pub fn store_delete_item<T>(signal: RwSignal<Vec<T>>, row: &T) -> UtilResult<T>
where
    T: Serialize + Send + Sync + 'static,
{
    let index = locate(signal, row)?;
    signal
        .try_update(|list| list.remove(index))
        .ok_or_else(disposed)
}
