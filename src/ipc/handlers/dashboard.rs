//! Per-role stat-card sets for the three portal home pages.

use crate::bands;
use crate::calc::{aggregate_present, count_where, round_1};
use crate::filter::{filter_records, Criteria, Record};
use crate::ipc::error::{respond, HandlerError};
use crate::ipc::handlers::{
    assignments::assignment_stats, classes::class_stats, grades::grade_stats,
    lessons::lesson_stats, students::student_stats, teachers::teacher_stats, users::user_stats,
};
use crate::ipc::helpers::required_str;
use crate::ipc::types::{AppState, Request};
use crate::models::{
    Assignment, AssignmentStatus, AssignmentType, ClassRecord, Grade, GradeStatus, Lesson,
    ScheduleEvent,
};
use crate::store::{Portal, Repository};
use serde_json::{json, Value};

fn all<T>(records: &[T]) -> Vec<&T> {
    records.iter().collect()
}

fn handle_admin(state: &AppState) -> Result<Value, HandlerError> {
    let p = &state.portal;
    Ok(json!({
        "users": user_stats(&all(p.users.list())),
        "students": student_stats(&all(p.students.list())),
        "teachers": teacher_stats(&all(p.teachers.list())),
        "classes": class_stats(&all(p.classes.list())),
        "assignments": assignment_stats(&all(p.assignments.list())),
        "grades": grade_stats(&all(p.grades.list())),
        "lessons": lesson_stats(&all(p.lessons.list())),
    }))
}

fn by_field<'a, T: Record>(records: &'a [T], field: &str, value: &str) -> Vec<&'a T> {
    let c = Criteria::default().with_filter(field, value);
    filter_records(records, &c, T::SEARCHABLE)
}

fn teacher_summary(p: &Portal, teacher: &str) -> Value {
    let classes: Vec<&ClassRecord> = by_field(p.classes.list(), "teacher", teacher);
    let class_ids: Vec<&str> = classes.iter().map(|c| c.id.as_str()).collect();

    let assignments: Vec<&Assignment> = p
        .assignments
        .list()
        .iter()
        .filter(|a| class_ids.contains(&a.class_id.as_str()))
        .collect();
    let grades: Vec<&Grade> = p
        .grades
        .list()
        .iter()
        .filter(|g| class_ids.contains(&g.class_id.as_str()))
        .collect();
    let lessons: Vec<&Lesson> = by_field(p.lessons.list(), "teacher", teacher);
    let events: Vec<&ScheduleEvent> = p
        .schedule
        .list()
        .iter()
        .filter(|e| e.teacher == teacher)
        .collect();

    json!({
        "teacher": teacher,
        "classes": class_stats(&classes),
        "assignments": assignment_stats(&assignments),
        "grades": grade_stats(&grades),
        "pendingGrades": count_where(grades.iter().copied(), |g: &Grade| g.status == GradeStatus::Pending),
        "lessons": lesson_stats(&lessons),
        "scheduledEvents": events.len(),
    })
}

fn handle_teacher(state: &AppState, req: &Request) -> Result<Value, HandlerError> {
    let teacher = required_str(&req.params, "teacher")?;
    let known = state.portal.teachers.list().iter().any(|t| t.name == teacher);
    if !known {
        return Err(HandlerError::not_found(format!("teacher not found: {}", teacher)));
    }
    Ok(teacher_summary(&state.portal, teacher))
}

fn student_summary(p: &Portal, student_code: &str) -> Result<Value, HandlerError> {
    let Some(student) = p
        .students
        .list()
        .iter()
        .find(|s| s.student_id == student_code)
    else {
        return Err(HandlerError::not_found(format!(
            "student not found: {}",
            student_code
        )));
    };

    let grades: Vec<&Grade> = p
        .grades
        .list()
        .iter()
        .filter(|g| g.student_id == student.student_id)
        .collect();
    let overall = aggregate_present(grades.iter().copied(), |g: &Grade| g.percentage());

    let homework: Vec<&Assignment> = p
        .assignments
        .list()
        .iter()
        .filter(|a| a.class_name == student.class_name && a.kind == AssignmentType::Homework)
        .collect();
    let homework_grade = |a: &Assignment| -> Option<f64> {
        grades
            .iter()
            .find(|g| g.assignment_id == a.id)
            .and_then(|g| g.percentage())
    };
    let homework_avg = aggregate_present(homework.iter().copied(), homework_grade);
    let upcoming = count_where(p.assignments.list(), |a: &Assignment| {
        a.class_name == student.class_name && a.status == AssignmentStatus::Published
    });

    Ok(json!({
        "studentId": student.student_id,
        "name": student.name,
        "className": student.class_name,
        "grades": {
            "graded": overall.count,
            "averagePercentage": round_1(overall.mean),
            "gradeBand": bands::GRADE.band(overall.mean),
        },
        "homework": {
            "total": homework.len(),
            "completed": homework_avg.count,
            "averageGrade": round_1(homework_avg.mean),
        },
        "openAssignments": upcoming,
        "attendanceRate": student.attendance_rate,
        "attendanceBand": bands::ATTENDANCE.band(student.attendance_rate),
        "completionPercent": round_1(student.completion_percent()),
    }))
}

fn handle_student(state: &AppState, req: &Request) -> Result<Value, HandlerError> {
    let student_code = required_str(&req.params, "studentId")?;
    student_summary(&state.portal, student_code)
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    let result = match req.method.as_str() {
        "dashboard.admin" => handle_admin(state),
        "dashboard.teacher" => handle_teacher(state, req),
        "dashboard.student" => handle_student(state, req),
        _ => return None,
    };
    Some(respond(&req.id, result))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed;

    #[test]
    fn teacher_summary_scopes_to_their_classes() {
        let p = seed::demo();
        let v = teacher_summary(&p, "Dr. Sarah Johnson");
        assert_eq!(v["classes"]["total"], json!(1));
        assert_eq!(v["assignments"]["total"], json!(2));
        assert_eq!(v["grades"]["total"], json!(3));
        assert_eq!(v["pendingGrades"], json!(0));
        assert_eq!(v["scheduledEvents"], json!(3));
    }

    #[test]
    fn teacher_without_classes_gets_zeroes_not_nan() {
        let p = seed::demo();
        let v = teacher_summary(&p, "Nobody");
        assert_eq!(v["classes"]["averageCapacity"], json!(0));
        assert_eq!(v["grades"]["averagePercentage"], json!(0.0));
        assert_eq!(v["lessons"]["averageCompletion"], json!(0.0));
    }

    #[test]
    fn student_homework_average_counts_graded_only() {
        let p = seed::demo();
        let v = student_summary(&p, "STU001").expect("student summary");
        assert_eq!(v["grades"]["graded"], json!(2));
        assert_eq!(v["grades"]["averagePercentage"], json!(93.0));
        assert_eq!(v["homework"]["total"], json!(1));
        assert_eq!(v["homework"]["completed"], json!(1));
        assert_eq!(v["homework"]["averageGrade"], json!(95.0));

        // No graded homework: the average is 0, not NaN.
        let v = student_summary(&p, "STU004").expect("student summary");
        assert_eq!(v["homework"]["completed"], json!(0));
        assert_eq!(v["homework"]["averageGrade"], json!(0.0));
    }
}
