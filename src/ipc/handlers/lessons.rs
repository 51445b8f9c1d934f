use crate::bands;
use crate::calc::{aggregate, count_where, round_1};
use crate::ipc::error::{respond, HandlerError};
use crate::ipc::handlers::collection::{self, insert, Listed};
use crate::ipc::types::{AppState, Request};
use crate::models::{Lesson, LessonStatus};
use serde_json::{json, Map, Value};

impl Listed for Lesson {
    fn decorate(&self, row: &mut Map<String, Value>) {
        insert(row, "completionBand", bands::PROGRESS.band(self.completion_rate));
        insert(row, "statusColor", bands::lesson_status_color(self.status));
    }
}

pub fn lesson_stats(view: &[&Lesson]) -> Value {
    let duration = aggregate(view.iter().copied(), |l: &Lesson| l.duration_minutes as f64);
    let views = aggregate(view.iter().copied(), |l: &Lesson| l.views as f64);
    // Completion is averaged over published lessons only.
    let completion = aggregate(
        view.iter()
            .copied()
            .filter(|l| l.status == LessonStatus::Published),
        |l: &Lesson| l.completion_rate,
    );
    json!({
        "total": view.len(),
        "published": count_where(view.iter().copied(), |l: &Lesson| l.status == LessonStatus::Published),
        "draft": count_where(view.iter().copied(), |l: &Lesson| l.status == LessonStatus::Draft),
        "archived": count_where(view.iter().copied(), |l: &Lesson| l.status == LessonStatus::Archived),
        "totalDurationMinutes": duration.sum as u64,
        "averageDurationMinutes": round_1(duration.mean),
        "totalViews": views.sum as u64,
        "averageCompletion": round_1(completion.mean),
    })
}

fn handle_stats(state: &AppState, req: &Request) -> Result<Value, HandlerError> {
    let view = collection::view::<Lesson>(&state.portal, &req.params)?;
    Ok(lesson_stats(&view))
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    let action = req.method.strip_prefix("lessons.")?;
    let result = match action {
        "stats" => handle_stats(state, req),
        _ => collection::handle::<Lesson>(state, req, action)?,
    };
    Some(respond(&req.id, result))
}
