use crate::bands;
use crate::calc::{aggregate, count_where, round_1};
use crate::ipc::error::{respond, HandlerError};
use crate::ipc::handlers::collection::{self, insert, Listed};
use crate::ipc::helpers::optional_str;
use crate::ipc::types::{AppState, Request};
use crate::models::{weekday_name, EventType, ScheduleEvent};
use crate::store::Repository;
use chrono::{NaiveDate, Weekday};
use serde_json::{json, Map, Value};

impl Listed for ScheduleEvent {
    fn decorate(&self, row: &mut Map<String, Value>) {
        insert(row, "day", self.day());
        insert(row, "durationMinutes", self.duration_minutes());
        insert(row, "typeColor", bands::event_type_color(self.kind));
    }
}

const WEEK: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

pub fn schedule_stats(view: &[&ScheduleEvent]) -> Value {
    let by_type: Map<String, Value> = EventType::ALL
        .iter()
        .map(|kind| {
            let n = count_where(view.iter().copied(), |e: &ScheduleEvent| e.kind == *kind);
            (kind.as_str().to_string(), json!(n))
        })
        .collect();
    let by_day: Map<String, Value> = WEEK
        .iter()
        .map(|day| {
            let name = weekday_name(*day);
            let n = count_where(view.iter().copied(), |e: &ScheduleEvent| e.day() == name);
            (name.to_string(), json!(n))
        })
        .collect();
    let minutes = aggregate(view.iter().copied(), |e: &ScheduleEvent| {
        e.duration_minutes() as f64
    });
    json!({
        "total": view.len(),
        "byType": by_type,
        "byDay": by_day,
        "totalHours": round_1(minutes.sum / 60.0),
    })
}

/// Pairs of events booked into the same room with intersecting times.
pub fn find_conflicts<'a>(events: &[&'a ScheduleEvent]) -> Vec<(&'a ScheduleEvent, &'a ScheduleEvent)> {
    let mut out = Vec::new();
    for (i, a) in events.iter().enumerate() {
        for b in &events[i + 1..] {
            if a.overlaps(b) {
                out.push((*a, *b));
            }
        }
    }
    out
}

fn handle_stats(state: &AppState, req: &Request) -> Result<Value, HandlerError> {
    let view = collection::view::<ScheduleEvent>(&state.portal, &req.params)?;
    Ok(schedule_stats(&view))
}

fn handle_conflicts(state: &AppState, req: &Request) -> Result<Value, HandlerError> {
    let on = match optional_str(&req.params, "date")? {
        Some(raw) => Some(NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|e| {
            HandlerError::bad_params(format!("date must be YYYY-MM-DD: {}", e))
                .with_details(json!({ "date": raw }))
        })?),
        None => None,
    };
    let events: Vec<&ScheduleEvent> = state
        .portal
        .schedule
        .list()
        .iter()
        .filter(|e| on.map_or(true, |d| e.date == d))
        .collect();
    let conflicts: Vec<Value> = find_conflicts(&events)
        .into_iter()
        .map(|(a, b)| {
            json!({
                "first": a.id,
                "second": b.id,
                "room": a.room,
                "date": a.date,
                "overlapStart": a.start_time.max(b.start_time),
                "overlapEnd": a.end_time.min(b.end_time),
            })
        })
        .collect();
    Ok(json!({ "conflicts": conflicts }))
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    let action = req.method.strip_prefix("schedule.")?;
    let result = match action {
        "stats" => handle_stats(state, req),
        "conflicts" => handle_conflicts(state, req),
        _ => collection::handle::<ScheduleEvent>(state, req, action)?,
    };
    Some(respond(&req.id, result))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed;

    #[test]
    fn seeded_room_101_double_booking_is_reported_once() {
        let portal = seed::demo();
        let events: Vec<&ScheduleEvent> = portal.schedule.list().iter().collect();
        let pairs: Vec<(&str, &str)> = find_conflicts(&events)
            .into_iter()
            .map(|(a, b)| (a.id.as_str(), b.id.as_str()))
            .collect();
        assert_eq!(pairs, vec![("evt-1", "evt-3")]);
    }

    #[test]
    fn stats_count_by_type_and_day() {
        let portal = seed::demo();
        let events: Vec<&ScheduleEvent> = portal.schedule.list().iter().collect();
        let stats = schedule_stats(&events);
        assert_eq!(stats["total"], json!(4));
        assert_eq!(stats["byType"]["class"], json!(2));
        assert_eq!(stats["byDay"]["monday"], json!(3));
        assert_eq!(stats["byDay"]["wednesday"], json!(1));
        // 90 + 90 + 60 + 120 minutes.
        assert_eq!(stats["totalHours"], json!(6.0));
    }
}
