use crate::bands;
use crate::calc::{aggregate, count_where, mean_ratio_percent, round_1};
use crate::ipc::error::{respond, HandlerError};
use crate::ipc::handlers::collection::{self, insert, Listed};
use crate::ipc::types::{AppState, Request};
use crate::models::{ClassRecord, ClassStatus};
use serde_json::{json, Map, Value};

impl Listed for ClassRecord {
    fn decorate(&self, row: &mut Map<String, Value>) {
        let capacity = self.capacity_percent();
        insert(row, "capacityPercent", round_1(capacity));
        insert(row, "capacityBand", bands::CAPACITY.band(capacity));
        insert(
            row,
            "availableSeats",
            self.max_students.saturating_sub(self.current_students),
        );
        insert(row, "statusColor", bands::class_status_color(self.status));
    }
}

pub fn class_stats(view: &[&ClassRecord]) -> Value {
    let enrolled = aggregate(view.iter().copied(), |c: &ClassRecord| c.current_students as f64);
    let seats = aggregate(view.iter().copied(), |c: &ClassRecord| c.max_students as f64);
    let average_capacity = mean_ratio_percent(
        view.iter().copied(),
        |c: &ClassRecord| c.current_students as f64,
        |c: &ClassRecord| c.max_students as f64,
    );
    json!({
        "total": view.len(),
        "active": count_where(view.iter().copied(), |c: &ClassRecord| c.status == ClassStatus::Active),
        "totalStudents": enrolled.sum as u64,
        "totalCapacity": seats.sum as u64,
        "averageClassSize": round_1(enrolled.mean),
        "averageCapacity": average_capacity,
        "capacityBand": bands::CAPACITY.band(average_capacity as f64),
    })
}

fn handle_stats(state: &AppState, req: &Request) -> Result<Value, HandlerError> {
    let view = collection::view::<ClassRecord>(&state.portal, &req.params)?;
    Ok(class_stats(&view))
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    let action = req.method.strip_prefix("classes.")?;
    let result = match action {
        "stats" => handle_stats(state, req),
        _ => collection::handle::<ClassRecord>(state, req, action)?,
    };
    Some(respond(&req.id, result))
}
