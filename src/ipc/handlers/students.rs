use crate::bands;
use crate::calc::{aggregate, count_where, round_1};
use crate::ipc::error::{respond, HandlerError};
use crate::ipc::handlers::collection::{self, insert, Listed};
use crate::ipc::types::{AppState, Request};
use crate::models::{Student, StudentStatus};
use serde_json::{json, Map, Value};

impl Listed for Student {
    fn decorate(&self, row: &mut Map<String, Value>) {
        insert(row, "statusColor", bands::student_status_color(self.status));
        insert(row, "gradeBand", bands::GRADE.band(self.average_grade));
        insert(row, "letterGrade", bands::letter_grade(self.average_grade));
        insert(row, "attendanceBand", bands::ATTENDANCE.band(self.attendance_rate));
        insert(row, "completionPercent", round_1(self.completion_percent()));
    }
}

pub fn student_stats(view: &[&Student]) -> Value {
    let grade = aggregate(view.iter().copied(), |s: &Student| s.average_grade);
    let attendance = aggregate(view.iter().copied(), |s: &Student| s.attendance_rate);
    json!({
        "total": view.len(),
        "active": count_where(view.iter().copied(), |s: &Student| s.status == StudentStatus::Active),
        "inactive": count_where(view.iter().copied(), |s: &Student| s.status == StudentStatus::Inactive),
        "graduated": count_where(view.iter().copied(), |s: &Student| s.status == StudentStatus::Graduated),
        "suspended": count_where(view.iter().copied(), |s: &Student| s.status == StudentStatus::Suspended),
        "averageGrade": round_1(grade.mean),
        "averageAttendance": round_1(attendance.mean),
        "gradeBand": bands::GRADE.band(grade.mean),
    })
}

fn handle_stats(state: &AppState, req: &Request) -> Result<Value, HandlerError> {
    let view = collection::view::<Student>(&state.portal, &req.params)?;
    Ok(student_stats(&view))
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    let action = req.method.strip_prefix("students.")?;
    let result = match action {
        "stats" => handle_stats(state, req),
        _ => collection::handle::<Student>(state, req, action)?,
    };
    Some(respond(&req.id, result))
}
