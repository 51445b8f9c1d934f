//! List/get/create/update/delete shared by every entity's handler.

use crate::filter::{filter_records, Criteria, Record};
use crate::ipc::error::HandlerError;
use crate::ipc::helpers::{required_object, required_str};
use crate::ipc::types::{AppState, Request};
use crate::store::{Portal, Repository, Stored};
use serde_json::{json, Map, Value};

/// A stored entity as it appears in list rows.
pub trait Listed: Stored {
    /// Adds display-only fields (bands, colors, derived percentages) to a row.
    fn decorate(&self, _row: &mut Map<String, Value>) {}
}

pub fn row<T: Listed>(record: &T) -> Value {
    match serde_json::to_value(record) {
        Ok(Value::Object(mut map)) => {
            record.decorate(&mut map);
            Value::Object(map)
        }
        Ok(other) => other,
        Err(_) => Value::Null,
    }
}

pub fn criteria<T: Record>(params: &Value) -> Result<Criteria, HandlerError> {
    Criteria::from_params::<T>(params).map_err(HandlerError::bad_params)
}

/// The filtered view of `T`'s collection for the criteria in `params`.
pub fn view<'a, T: Stored>(portal: &'a Portal, params: &Value) -> Result<Vec<&'a T>, HandlerError> {
    let c = criteria::<T>(params)?;
    Ok(filter_records(T::collection(portal).list(), &c, T::SEARCHABLE))
}

fn list<T: Listed>(state: &AppState, req: &Request) -> Result<Value, HandlerError> {
    let total = T::collection(&state.portal).len();
    let items: Vec<Value> = view::<T>(&state.portal, &req.params)?
        .into_iter()
        .map(row)
        .collect();
    Ok(json!({
        "items": items,
        "total": total,
        "matched": items.len(),
    }))
}

fn get<T: Listed>(state: &AppState, req: &Request) -> Result<Value, HandlerError> {
    let id = required_str(&req.params, "id")?;
    let Some(record) = T::collection(&state.portal).get(id) else {
        return Err(HandlerError::not_found(format!("{} record not found: {}", T::KIND, id)));
    };
    Ok(json!({ "item": row(record) }))
}

fn create<T: Listed>(state: &mut AppState, req: &Request) -> Result<Value, HandlerError> {
    let fields = required_object(&req.params, "record")?.clone();
    let created = state.portal.create_from_json::<T>(fields)?;
    Ok(json!({ "item": row(created) }))
}

fn update<T: Listed>(state: &mut AppState, req: &Request) -> Result<Value, HandlerError> {
    let id = required_str(&req.params, "id")?;
    let patch = required_object(&req.params, "patch")?;
    let updated = state.portal.update_from_patch::<T>(id, patch)?;
    Ok(json!({ "item": row(updated) }))
}

fn delete<T: Listed>(state: &mut AppState, req: &Request) -> Result<Value, HandlerError> {
    let id = required_str(&req.params, "id")?;
    let removed = T::collection_mut(&mut state.portal).delete(id)?;
    Ok(json!({ "deleted": removed.id() }))
}

/// Runs a CRUD action, or returns `None` when `action` is not one.
pub fn handle<T: Listed>(
    state: &mut AppState,
    req: &Request,
    action: &str,
) -> Option<Result<Value, HandlerError>> {
    match action {
        "list" => Some(list::<T>(state, req)),
        "get" => Some(get::<T>(state, req)),
        "create" => Some(create::<T>(state, req)),
        "update" => Some(update::<T>(state, req)),
        "delete" => Some(delete::<T>(state, req)),
        _ => None,
    }
}

pub fn insert<V: serde::Serialize>(row: &mut Map<String, Value>, key: &str, value: V) {
    row.insert(key.to_string(), json!(value));
}
