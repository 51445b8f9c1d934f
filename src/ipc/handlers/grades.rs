use crate::bands;
use crate::calc::{aggregate_present, count_where, round_1};
use crate::ipc::error::{respond, HandlerError};
use crate::ipc::handlers::collection::{self, insert, Listed};
use crate::ipc::types::{AppState, Request};
use crate::models::{Grade, GradeStatus};
use serde_json::{json, Map, Value};

impl Listed for Grade {
    fn decorate(&self, row: &mut Map<String, Value>) {
        let pct = self.percentage();
        insert(row, "percentage", pct.map(round_1));
        insert(row, "letterGrade", pct.map(bands::letter_grade));
        insert(row, "gradeBand", pct.map(|p| bands::GRADE.band(p)));
        insert(row, "statusColor", bands::grade_status_color(self.status));
    }
}

pub fn grade_stats(view: &[&Grade]) -> Value {
    let scored: Vec<f64> = view.iter().filter_map(|g| g.percentage()).collect();
    let avg = aggregate_present(view.iter().copied(), |g: &Grade| g.percentage());
    let highest = scored.iter().copied().fold(None, |acc: Option<f64>, v| {
        Some(acc.map_or(v, |a| a.max(v)))
    });
    let lowest = scored.iter().copied().fold(None, |acc: Option<f64>, v| {
        Some(acc.map_or(v, |a| a.min(v)))
    });

    let mut letters = Map::new();
    for letter in ["A", "B", "C", "D", "F"] {
        let n = scored
            .iter()
            .filter(|p| bands::letter_grade(**p) == letter)
            .count();
        letters.insert(letter.to_string(), json!(n));
    }

    json!({
        "total": view.len(),
        "graded": avg.count,
        "pending": count_where(view.iter().copied(), |g: &Grade| g.status == GradeStatus::Pending),
        "averagePercentage": round_1(avg.mean),
        "gradeBand": bands::GRADE.band(avg.mean),
        "highest": round_1(highest.unwrap_or(0.0)),
        "lowest": round_1(lowest.unwrap_or(0.0)),
        "letterDistribution": letters,
    })
}

fn handle_stats(state: &AppState, req: &Request) -> Result<Value, HandlerError> {
    let view = collection::view::<Grade>(&state.portal, &req.params)?;
    Ok(grade_stats(&view))
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    let action = req.method.strip_prefix("grades.")?;
    let result = match action {
        "stats" => handle_stats(state, req),
        _ => collection::handle::<Grade>(state, req, action)?,
    };
    Some(respond(&req.id, result))
}
