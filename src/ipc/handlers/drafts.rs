use crate::ipc::error::{respond, HandlerError};
use crate::ipc::helpers::{optional_str, required_object, required_str};
use crate::ipc::types::{AppState, Request};
use crate::models::EntityKind;
use serde_json::{json, Value};

fn handle_open(state: &mut AppState, req: &Request) -> Result<Value, HandlerError> {
    let entity_raw = required_str(&req.params, "entity")?;
    let Some(entity) = EntityKind::parse(entity_raw) else {
        return Err(HandlerError::bad_params(format!("unknown entity: {}", entity_raw)));
    };
    let record_id = optional_str(&req.params, "recordId")?;
    let draft = state.drafts.open(&state.portal, entity, record_id)?;
    Ok(json!(draft))
}

fn handle_update(state: &mut AppState, req: &Request) -> Result<Value, HandlerError> {
    let draft_id = required_str(&req.params, "draftId")?;
    let patch = required_object(&req.params, "patch")?;
    let draft = state.drafts.update(draft_id, patch)?;
    Ok(json!(draft))
}

fn handle_commit(state: &mut AppState, req: &Request) -> Result<Value, HandlerError> {
    let draft_id = required_str(&req.params, "draftId")?;
    let item = state.drafts.commit(&mut state.portal, draft_id)?;
    Ok(json!({ "item": item }))
}

fn handle_discard(state: &mut AppState, req: &Request) -> Result<Value, HandlerError> {
    let draft_id = required_str(&req.params, "draftId")?;
    state.drafts.discard(draft_id)?;
    Ok(json!({ "discarded": draft_id }))
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    let result = match req.method.as_str() {
        "drafts.open" => handle_open(state, req),
        "drafts.update" => handle_update(state, req),
        "drafts.commit" => handle_commit(state, req),
        "drafts.discard" => handle_discard(state, req),
        _ => return None,
    };
    Some(respond(&req.id, result))
}
