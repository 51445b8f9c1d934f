use crate::bands;
use crate::calc::count_where;
use crate::ipc::error::{respond, HandlerError};
use crate::ipc::handlers::collection::{self, insert, Listed};
use crate::ipc::types::{AppState, Request};
use crate::models::{Role, User, UserStatus};
use serde_json::{json, Map, Value};

impl Listed for User {
    fn decorate(&self, row: &mut Map<String, Value>) {
        insert(row, "roleColor", bands::role_color(self.role));
        insert(row, "statusColor", bands::user_status_color(self.status));
    }
}

pub fn user_stats(view: &[&User]) -> Value {
    let by_role: Map<String, Value> = Role::ALL
        .iter()
        .map(|role| {
            let n = count_where(view.iter().copied(), |u: &User| u.role == *role);
            (role.as_str().to_string(), json!(n))
        })
        .collect();
    json!({
        "total": view.len(),
        "active": count_where(view.iter().copied(), |u: &User| u.status == UserStatus::Active),
        "inactive": count_where(view.iter().copied(), |u: &User| u.status == UserStatus::Inactive),
        "suspended": count_where(view.iter().copied(), |u: &User| u.status == UserStatus::Suspended),
        "byRole": by_role,
    })
}

fn handle_stats(state: &AppState, req: &Request) -> Result<Value, HandlerError> {
    let view = collection::view::<User>(&state.portal, &req.params)?;
    Ok(user_stats(&view))
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    let action = req.method.strip_prefix("users.")?;
    let result = match action {
        "stats" => handle_stats(state, req),
        _ => collection::handle::<User>(state, req, action)?,
    };
    Some(respond(&req.id, result))
}
