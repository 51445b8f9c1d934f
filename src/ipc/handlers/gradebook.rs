use crate::bands;
use crate::calc::{aggregate_present, round_1};
use crate::ipc::error::{respond, HandlerError};
use crate::ipc::handlers::collection::{self, insert, Listed};
use crate::ipc::helpers::required_str;
use crate::ipc::types::{AppState, Request};
use crate::models::GradebookEntry;
use crate::store::Repository;
use serde_json::{json, Map, Value};
use std::collections::BTreeMap;

impl GradebookEntry {
    /// Student average, or `None` when nothing has been graded yet.
    fn graded_average(&self) -> Option<f64> {
        if self.grades.values().any(|g| g.is_some()) {
            Some(self.average())
        } else {
            None
        }
    }
}

impl Listed for GradebookEntry {
    fn decorate(&self, row: &mut Map<String, Value>) {
        let avg = self.graded_average();
        insert(row, "average", avg.map(round_1));
        insert(row, "letterGrade", avg.map(bands::letter_grade));
        insert(row, "gradeBand", avg.map(|a| bands::GRADE.band(a)));
    }
}

/// Column means: each assignment averaged over the students graded on it.
fn assignment_averages(rows: &[&GradebookEntry]) -> Map<String, Value> {
    let mut columns: BTreeMap<&str, Vec<Option<f64>>> = BTreeMap::new();
    for row in rows {
        for (assignment_id, grade) in &row.grades {
            columns.entry(assignment_id.as_str()).or_default().push(*grade);
        }
    }
    columns
        .into_iter()
        .map(|(assignment_id, grades)| {
            let agg = aggregate_present(&grades, |g: &Option<f64>| *g);
            (
                assignment_id.to_string(),
                json!({
                    "average": round_1(agg.mean),
                    "graded": agg.count,
                    "students": grades.len(),
                }),
            )
        })
        .collect()
}

pub fn gradebook_stats(view: &[&GradebookEntry]) -> Value {
    let class_avg = aggregate_present(view.iter().copied(), |e: &GradebookEntry| e.graded_average());
    json!({
        "students": view.len(),
        "graded": class_avg.count,
        "classAverage": round_1(class_avg.mean),
        "gradeBand": bands::GRADE.band(class_avg.mean),
        "assignments": assignment_averages(view),
    })
}

fn handle_stats(state: &AppState, req: &Request) -> Result<Value, HandlerError> {
    let view = collection::view::<GradebookEntry>(&state.portal, &req.params)?;
    Ok(gradebook_stats(&view))
}

fn handle_assignment_averages(state: &AppState, req: &Request) -> Result<Value, HandlerError> {
    let class_id = required_str(&req.params, "classId")?;
    let rows: Vec<&GradebookEntry> = state
        .portal
        .gradebook
        .list()
        .iter()
        .filter(|e| e.class_id == class_id)
        .collect();
    Ok(json!({
        "classId": class_id,
        "assignments": assignment_averages(&rows),
    }))
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    let action = req.method.strip_prefix("gradebook.")?;
    let result = match action {
        "stats" => handle_stats(state, req),
        "assignmentAverages" => handle_assignment_averages(state, req),
        _ => collection::handle::<GradebookEntry>(state, req, action)?,
    };
    Some(respond(&req.id, result))
}
