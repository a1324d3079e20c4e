//! List Helpers
//!
//! Locate rows by content instead of by id and mutate the list in place.
//! Reactive containers must be unwrapped by the caller (see `store`).

use serde::Serialize;
use serde_json::Value;

use crate::equal::deep_equal;
use crate::error::{UtilError, UtilResult};

/// Position of the first element structurally equal to `row`
pub fn get_item_index<T: Serialize>(list: &[T], row: &T) -> Option<usize> {
    let target = match serde_json::to_value(row) {
        Ok(value) => value,
        Err(e) => {
            log::warn!("[List] Row is not serializable: {}", e);
            return None;
        }
    };

    list.iter().position(|item| {
        serde_json::to_value(item)
            .map(|value: Value| deep_equal(&value, &target))
            .unwrap_or(false)
    })
}

fn require_index<T: Serialize>(list: &[T], row: &T) -> UtilResult<usize> {
    get_item_index(list, row)
        .ok_or_else(|| UtilError::NotFound(format!("row not in list of {}", list.len())))
}

/// Replace the slot holding `row` with `new_val`, returning the old element
pub fn update_item<T: Serialize>(list: &mut [T], row: &T, new_val: T) -> UtilResult<T> {
    let index = require_index(list, row)?;
    Ok(std::mem::replace(&mut list[index], new_val))
}

/// Remove the slot holding `row`, keeping the order of the rest
pub fn delete_item<T: Serialize>(list: &mut Vec<T>, row: &T) -> UtilResult<T> {
    let index = require_index(list, row)?;
    Ok(list.remove(index))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Clone, PartialEq, Serialize)]
    struct Product {
        id: u32,
        name: String,
        amount: i64,
    }

    fn product(id: u32, name: &str, amount: i64) -> Product {
        Product { id, name: name.to_string(), amount }
    }

    #[test]
    fn test_get_item_index() {
        let list = vec![json!({"id": 1}), json!({"id": 2}), json!({"id": 3})];
        assert_eq!(get_item_index(&list, &json!({"id": 2})), Some(1));
        assert_eq!(get_item_index(&list, &json!({"id": 4})), None);
        assert_eq!(get_item_index(&[] as &[Value], &json!({"id": 1})), None);
    }

    #[test]
    fn test_first_duplicate_wins() {
        let list = vec![json!({"id": 1}), json!({"id": 2}), json!({"id": 2})];
        assert_eq!(get_item_index(&list, &json!({"id": 2})), Some(1));
    }

    #[test]
    fn test_update_item() {
        let (a, b, c, x) = (json!({"id": 1}), json!({"id": 2}), json!({"id": 3}), json!({"id": 9}));
        let mut list = vec![a.clone(), b.clone(), c.clone()];
        let old = update_item(&mut list, &b, x.clone()).unwrap();
        assert_eq!(old, b);
        assert_eq!(list, vec![a, x, c]);
    }

    #[test]
    fn test_delete_item() {
        let (a, b, c) = (json!({"id": 1}), json!({"id": 2}), json!({"id": 3}));
        let mut list = vec![a.clone(), b.clone(), c.clone()];
        let removed = delete_item(&mut list, &b).unwrap();
        assert_eq!(removed, b);
        assert_eq!(list, vec![a, c]);
    }

    #[test]
    fn test_typed_rows() {
        let mut list = vec![product(1, "Mug", 1200), product(2, "Shirt", 2500)];
        update_item(&mut list, &product(2, "Shirt", 2500), product(2, "Shirt", 1999)).unwrap();
        assert_eq!(list[1].amount, 1999);
        delete_item(&mut list, &product(1, "Mug", 1200)).unwrap();
        assert_eq!(list, vec![product(2, "Shirt", 1999)]);
    }

    #[test]
    fn test_missing_row_leaves_list_untouched() {
        let mut list = vec![json!({"id": 1}), json!({"id": 2})];
        let before = list.clone();

        let err = update_item(&mut list, &json!({"id": 5}), json!({"id": 6})).unwrap_err();
        assert!(matches!(err, UtilError::NotFound(_)));
        let err = delete_item(&mut list, &json!({"id": 5})).unwrap_err();
        assert!(matches!(err, UtilError::NotFound(_)));

        assert_eq!(list, before);
    }
}
