use crate::bands;
use crate::calc::{aggregate, count_where, round_1};
use crate::ipc::error::{respond, HandlerError};
use crate::ipc::handlers::collection::{self, insert, Listed};
use crate::ipc::types::{AppState, Request};
use crate::models::{Assignment, AssignmentStatus, AssignmentType};
use serde_json::{json, Map, Value};

impl Listed for Assignment {
    fn decorate(&self, row: &mut Map<String, Value>) {
        let rate = self.submission_rate();
        insert(row, "submissionRate", round_1(rate));
        insert(row, "submissionBand", bands::PROGRESS.band(rate));
        insert(row, "statusColor", bands::assignment_status_color(self.status));
    }
}

pub fn assignment_stats(view: &[&Assignment]) -> Value {
    let by_type: Map<String, Value> = AssignmentType::ALL
        .iter()
        .map(|kind| {
            let n = count_where(view.iter().copied(), |a: &Assignment| a.kind == *kind);
            (kind.as_str().to_string(), json!(n))
        })
        .collect();
    let submissions = aggregate(view.iter().copied(), |a: &Assignment| a.submissions as f64);
    let rate = aggregate(view.iter().copied(), |a: &Assignment| a.submission_rate());
    json!({
        "total": view.len(),
        "published": count_where(view.iter().copied(), |a: &Assignment| a.status == AssignmentStatus::Published),
        "draft": count_where(view.iter().copied(), |a: &Assignment| a.status == AssignmentStatus::Draft),
        "closed": count_where(view.iter().copied(), |a: &Assignment| a.status == AssignmentStatus::Closed),
        "byType": by_type,
        "totalSubmissions": submissions.sum as u64,
        "averageSubmissionRate": round_1(rate.mean),
    })
}

fn handle_stats(state: &AppState, req: &Request) -> Result<Value, HandlerError> {
    let view = collection::view::<Assignment>(&state.portal, &req.params)?;
    Ok(assignment_stats(&view))
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    let action = req.method.strip_prefix("assignments.")?;
    let result = match action {
        "stats" => handle_stats(state, req),
        _ => collection::handle::<Assignment>(state, req, action)?,
    };
    Some(respond(&req.id, result))
}
