use crate::bands;
use crate::calc::{aggregate, count_where, round_1};
use crate::ipc::error::{respond, HandlerError};
use crate::ipc::handlers::collection::{self, insert, Listed};
use crate::ipc::types::{AppState, Request};
use crate::models::{Teacher, TeacherStatus};
use serde_json::{json, Map, Value};

impl Listed for Teacher {
    fn decorate(&self, row: &mut Map<String, Value>) {
        insert(row, "statusColor", bands::teacher_status_color(self.status));
    }
}

pub fn teacher_stats(view: &[&Teacher]) -> Value {
    let classes = aggregate(view.iter().copied(), |t: &Teacher| t.class_count as f64);
    let students = aggregate(view.iter().copied(), |t: &Teacher| t.student_count as f64);
    let experience = aggregate(view.iter().copied(), |t: &Teacher| t.experience_years as f64);
    json!({
        "total": view.len(),
        "active": count_where(view.iter().copied(), |t: &Teacher| t.status == TeacherStatus::Active),
        "onLeave": count_where(view.iter().copied(), |t: &Teacher| t.status == TeacherStatus::OnLeave),
        "totalClasses": classes.sum as u64,
        "totalStudents": students.sum as u64,
        "averageExperience": round_1(experience.mean),
    })
}

fn handle_stats(state: &AppState, req: &Request) -> Result<Value, HandlerError> {
    let view = collection::view::<Teacher>(&state.portal, &req.params)?;
    Ok(teacher_stats(&view))
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    let action = req.method.strip_prefix("teachers.")?;
    let result = match action {
        "stats" => handle_stats(state, req),
        _ => collection::handle::<Teacher>(state, req, action)?,
    };
    Some(respond(&req.id, result))
}
