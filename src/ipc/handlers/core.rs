use crate::ipc::error::ok;
use crate::ipc::types::{AppState, Request};
use serde_json::json;

fn handle_health(state: &mut AppState, req: &Request) -> serde_json::Value {
    ok(
        &req.id,
        json!({
            "version": env!("CARGO_PKG_VERSION"),
            "seed": state.seed.as_str(),
            "openDrafts": state.drafts.len(),
        }),
    )
}

fn handle_reset(state: &mut AppState, req: &Request) -> serde_json::Value {
    state.reset();
    tracing::info!(seed = state.seed.as_str(), "portal reset to seed data");
    ok(&req.id, json!({ "seed": state.seed.as_str() }))
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "health" => Some(handle_health(state, req)),
        "portal.reset" => Some(handle_reset(state, req)),
        _ => None,
    }
}
