use crate::filter::Record;
use chrono::{Datelike, NaiveDate, NaiveTime, Weekday};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    User,
    Student,
    Teacher,
    Class,
    Assignment,
    Grade,
    GradebookEntry,
    Lesson,
    ScheduleEvent,
}

impl EntityKind {
    /// Parses the method prefix used on the wire (`users`, `classes`, ...).
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "users" => Some(Self::User),
            "students" => Some(Self::Student),
            "teachers" => Some(Self::Teacher),
            "classes" => Some(Self::Class),
            "assignments" => Some(Self::Assignment),
            "grades" => Some(Self::Grade),
            "gradebook" => Some(Self::GradebookEntry),
            "lessons" => Some(Self::Lesson),
            "schedule" => Some(Self::ScheduleEvent),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::User => "users",
            Self::Student => "students",
            Self::Teacher => "teachers",
            Self::Class => "classes",
            Self::Assignment => "assignments",
            Self::Grade => "grades",
            Self::GradebookEntry => "gradebook",
            Self::Lesson => "lessons",
            Self::ScheduleEvent => "schedule",
        }
    }
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A stored record: searchable, filterable, and round-trippable through JSON.
pub trait Entity: Record + Clone + Serialize + serde::de::DeserializeOwned {
    const KIND: EntityKind;

    fn id(&self) -> &str;

    /// Secondary human-facing code that must be unique within the collection.
    fn code(&self) -> Option<&str> {
        None
    }

    /// Cross-field checks the typed shape cannot express.
    fn validate(&self) -> Result<(), String> {
        Ok(())
    }
}

fn borrowed(s: &str) -> Option<Cow<'_, str>> {
    Some(Cow::Borrowed(s))
}

fn optional(s: &Option<String>) -> Option<Cow<'_, str>> {
    s.as_deref().map(Cow::Borrowed)
}

// ---------------------------------------------------------------------------
// Users

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Teacher,
    Student,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::Admin, Role::Teacher, Role::Student];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Teacher => "teacher",
            Self::Student => "student",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserStatus {
    Active,
    Inactive,
    Suspended,
}

impl UserStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
            Self::Suspended => "suspended",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub status: UserStatus,
    #[serde(default)]
    pub phone: Option<String>,
    pub joined_at: NaiveDate,
    #[serde(default)]
    pub last_login: Option<NaiveDate>,
}

impl Record for User {
    const SEARCHABLE: &'static [&'static str] = &["name", "email"];
    const CATEGORIES: &'static [&'static str] = &["role", "status"];

    fn field(&self, name: &str) -> Option<Cow<'_, str>> {
        match name {
            "id" => borrowed(&self.id),
            "name" => borrowed(&self.name),
            "email" => borrowed(&self.email),
            "role" => borrowed(self.role.as_str()),
            "status" => borrowed(self.status.as_str()),
            "phone" => optional(&self.phone),
            _ => None,
        }
    }
}

impl Entity for User {
    const KIND: EntityKind = EntityKind::User;

    fn id(&self) -> &str {
        &self.id
    }
}

// ---------------------------------------------------------------------------
// Students

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StudentStatus {
    Active,
    Inactive,
    Graduated,
    Suspended,
}

impl StudentStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
            Self::Graduated => "graduated",
            Self::Suspended => "suspended",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Guardian {
    pub name: String,
    pub relationship: String,
    pub phone: String,
    #[serde(default)]
    pub email: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    pub id: String,
    pub student_id: String,
    pub name: String,
    pub email: String,
    /// Grade level, e.g. "10".
    pub grade: String,
    pub class_name: String,
    pub status: StudentStatus,
    pub enrollment_date: NaiveDate,
    pub average_grade: f64,
    pub attendance_rate: f64,
    pub completed_assignments: u32,
    pub total_assignments: u32,
    #[serde(default)]
    pub guardian: Option<Guardian>,
}

impl Student {
    pub fn completion_percent(&self) -> f64 {
        crate::calc::percent(
            self.completed_assignments as f64,
            self.total_assignments as f64,
        )
    }
}

impl Record for Student {
    const SEARCHABLE: &'static [&'static str] = &["name", "email", "studentId"];
    const CATEGORIES: &'static [&'static str] = &["grade", "status", "className"];

    fn field(&self, name: &str) -> Option<Cow<'_, str>> {
        match name {
            "id" => borrowed(&self.id),
            "studentId" => borrowed(&self.student_id),
            "name" => borrowed(&self.name),
            "email" => borrowed(&self.email),
            "grade" => borrowed(&self.grade),
            "className" => borrowed(&self.class_name),
            "status" => borrowed(self.status.as_str()),
            _ => None,
        }
    }
}

impl Entity for Student {
    const KIND: EntityKind = EntityKind::Student;

    fn id(&self) -> &str {
        &self.id
    }

    fn code(&self) -> Option<&str> {
        Some(&self.student_id)
    }
}

// ---------------------------------------------------------------------------
// Teachers

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TeacherStatus {
    Active,
    Inactive,
    OnLeave,
}

impl TeacherStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
            Self::OnLeave => "on-leave",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Teacher {
    pub id: String,
    pub employee_id: String,
    pub name: String,
    pub email: String,
    pub subject: String,
    pub department: String,
    pub status: TeacherStatus,
    pub class_count: u32,
    pub student_count: u32,
    pub experience_years: u32,
    pub hire_date: NaiveDate,
}

impl Record for Teacher {
    const SEARCHABLE: &'static [&'static str] = &["name", "email", "employeeId", "subject"];
    const CATEGORIES: &'static [&'static str] = &["subject", "department", "status"];

    fn field(&self, name: &str) -> Option<Cow<'_, str>> {
        match name {
            "id" => borrowed(&self.id),
            "employeeId" => borrowed(&self.employee_id),
            "name" => borrowed(&self.name),
            "email" => borrowed(&self.email),
            "subject" => borrowed(&self.subject),
            "department" => borrowed(&self.department),
            "status" => borrowed(self.status.as_str()),
            _ => None,
        }
    }
}

impl Entity for Teacher {
    const KIND: EntityKind = EntityKind::Teacher;

    fn id(&self) -> &str {
        &self.id
    }

    fn code(&self) -> Option<&str> {
        Some(&self.employee_id)
    }
}

// ---------------------------------------------------------------------------
// Classes

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClassStatus {
    Active,
    Inactive,
    Completed,
}

impl ClassStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
            Self::Completed => "completed",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleSlot {
    pub day: String,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub room: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassRecord {
    pub id: String,
    pub name: String,
    pub class_code: String,
    pub subject: String,
    pub teacher: String,
    pub room: String,
    pub current_students: u32,
    pub max_students: u32,
    pub status: ClassStatus,
    #[serde(default)]
    pub schedule: Vec<ScheduleSlot>,
    #[serde(default)]
    pub description: String,
}

impl ClassRecord {
    pub fn capacity_percent(&self) -> f64 {
        crate::calc::percent(self.current_students as f64, self.max_students as f64)
    }
}

impl Record for ClassRecord {
    const SEARCHABLE: &'static [&'static str] = &["name", "teacher", "classCode"];
    const CATEGORIES: &'static [&'static str] = &["subject", "status", "teacher"];

    fn field(&self, name: &str) -> Option<Cow<'_, str>> {
        match name {
            "id" => borrowed(&self.id),
            "name" => borrowed(&self.name),
            "classCode" => borrowed(&self.class_code),
            "subject" => borrowed(&self.subject),
            "teacher" => borrowed(&self.teacher),
            "room" => borrowed(&self.room),
            "status" => borrowed(self.status.as_str()),
            "description" => borrowed(&self.description),
            _ => None,
        }
    }
}

impl Entity for ClassRecord {
    const KIND: EntityKind = EntityKind::Class;

    fn id(&self) -> &str {
        &self.id
    }

    fn code(&self) -> Option<&str> {
        Some(&self.class_code)
    }
}

// ---------------------------------------------------------------------------
// Assignments

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssignmentType {
    Homework,
    Quiz,
    Exam,
    Project,
}

impl AssignmentType {
    pub const ALL: [AssignmentType; 4] = [
        AssignmentType::Homework,
        AssignmentType::Quiz,
        AssignmentType::Exam,
        AssignmentType::Project,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Homework => "homework",
            Self::Quiz => "quiz",
            Self::Exam => "exam",
            Self::Project => "project",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssignmentStatus {
    Draft,
    Published,
    Closed,
}

impl AssignmentStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Published => "published",
            Self::Closed => "closed",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Assignment {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub class_id: String,
    pub class_name: String,
    pub subject: String,
    #[serde(rename = "type")]
    pub kind: AssignmentType,
    pub status: AssignmentStatus,
    pub due_date: NaiveDate,
    pub total_points: f64,
    pub submissions: u32,
    pub total_students: u32,
}

impl Assignment {
    pub fn submission_rate(&self) -> f64 {
        crate::calc::percent(self.submissions as f64, self.total_students as f64)
    }
}

impl Record for Assignment {
    const SEARCHABLE: &'static [&'static str] = &["title", "className", "description"];
    const CATEGORIES: &'static [&'static str] = &["subject", "type", "status", "classId"];

    fn field(&self, name: &str) -> Option<Cow<'_, str>> {
        match name {
            "id" => borrowed(&self.id),
            "title" => borrowed(&self.title),
            "description" => borrowed(&self.description),
            "classId" => borrowed(&self.class_id),
            "className" => borrowed(&self.class_name),
            "subject" => borrowed(&self.subject),
            "type" => borrowed(self.kind.as_str()),
            "status" => borrowed(self.status.as_str()),
            _ => None,
        }
    }
}

impl Entity for Assignment {
    const KIND: EntityKind = EntityKind::Assignment;

    fn id(&self) -> &str {
        &self.id
    }
}

// ---------------------------------------------------------------------------
// Grades

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GradeStatus {
    Graded,
    Pending,
    Late,
    Missing,
}

impl GradeStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Graded => "graded",
            Self::Pending => "pending",
            Self::Late => "late",
            Self::Missing => "missing",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Grade {
    pub id: String,
    pub student_id: String,
    pub student_name: String,
    pub assignment_id: String,
    pub assignment_title: String,
    pub class_id: String,
    pub class_name: String,
    pub subject: String,
    /// `None` until the work is marked.
    #[serde(default)]
    pub score: Option<f64>,
    pub max_score: f64,
    pub status: GradeStatus,
    #[serde(default)]
    pub graded_at: Option<NaiveDate>,
    #[serde(default)]
    pub feedback: Option<String>,
}

impl Grade {
    pub fn percentage(&self) -> Option<f64> {
        self.score
            .map(|s| crate::calc::percent(s, self.max_score))
    }
}

impl Record for Grade {
    const SEARCHABLE: &'static [&'static str] = &["studentName", "assignmentTitle", "studentId"];
    const CATEGORIES: &'static [&'static str] = &["subject", "classId", "status"];

    fn field(&self, name: &str) -> Option<Cow<'_, str>> {
        match name {
            "id" => borrowed(&self.id),
            "studentId" => borrowed(&self.student_id),
            "studentName" => borrowed(&self.student_name),
            "assignmentId" => borrowed(&self.assignment_id),
            "assignmentTitle" => borrowed(&self.assignment_title),
            "classId" => borrowed(&self.class_id),
            "className" => borrowed(&self.class_name),
            "subject" => borrowed(&self.subject),
            "status" => borrowed(self.status.as_str()),
            "feedback" => optional(&self.feedback),
            _ => None,
        }
    }
}

impl Entity for Grade {
    const KIND: EntityKind = EntityKind::Grade;

    fn id(&self) -> &str {
        &self.id
    }
}

// ---------------------------------------------------------------------------
// Gradebook

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GradebookEntry {
    pub id: String,
    pub student_id: String,
    pub student_name: String,
    pub class_id: String,
    /// Assignment id to percentage; `None` where nothing is recorded yet.
    #[serde(default)]
    pub grades: BTreeMap<String, Option<f64>>,
}

impl GradebookEntry {
    pub fn average(&self) -> f64 {
        crate::calc::aggregate_present(self.grades.values(), |g: &Option<f64>| *g).mean
    }
}

impl Record for GradebookEntry {
    const SEARCHABLE: &'static [&'static str] = &["studentName", "studentId"];
    const CATEGORIES: &'static [&'static str] = &["classId"];

    fn field(&self, name: &str) -> Option<Cow<'_, str>> {
        match name {
            "id" => borrowed(&self.id),
            "studentId" => borrowed(&self.student_id),
            "studentName" => borrowed(&self.student_name),
            "classId" => borrowed(&self.class_id),
            _ => None,
        }
    }
}

impl Entity for GradebookEntry {
    const KIND: EntityKind = EntityKind::GradebookEntry;

    fn id(&self) -> &str {
        &self.id
    }
}

// ---------------------------------------------------------------------------
// Lessons

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LessonStatus {
    Draft,
    Published,
    Archived,
}

impl LessonStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Published => "published",
            Self::Archived => "archived",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lesson {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub subject: String,
    pub teacher: String,
    pub duration_minutes: u32,
    pub status: LessonStatus,
    pub views: u32,
    pub completion_rate: f64,
    pub video_url: String,
    #[serde(default)]
    pub published_at: Option<NaiveDate>,
}

impl Record for Lesson {
    const SEARCHABLE: &'static [&'static str] = &["title", "description", "teacher"];
    const CATEGORIES: &'static [&'static str] = &["subject", "status", "teacher"];

    fn field(&self, name: &str) -> Option<Cow<'_, str>> {
        match name {
            "id" => borrowed(&self.id),
            "title" => borrowed(&self.title),
            "description" => borrowed(&self.description),
            "subject" => borrowed(&self.subject),
            "teacher" => borrowed(&self.teacher),
            "status" => borrowed(self.status.as_str()),
            _ => None,
        }
    }
}

impl Entity for Lesson {
    const KIND: EntityKind = EntityKind::Lesson;

    fn id(&self) -> &str {
        &self.id
    }
}

// ---------------------------------------------------------------------------
// Schedule

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventType {
    Class,
    Exam,
    Meeting,
    Event,
}

impl EventType {
    pub const ALL: [EventType; 4] = [
        EventType::Class,
        EventType::Exam,
        EventType::Meeting,
        EventType::Event,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Class => "class",
            Self::Exam => "exam",
            Self::Meeting => "meeting",
            Self::Event => "event",
        }
    }
}

pub fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "monday",
        Weekday::Tue => "tuesday",
        Weekday::Wed => "wednesday",
        Weekday::Thu => "thursday",
        Weekday::Fri => "friday",
        Weekday::Sat => "saturday",
        Weekday::Sun => "sunday",
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleEvent {
    pub id: String,
    pub title: String,
    #[serde(rename = "type")]
    pub kind: EventType,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub room: String,
    #[serde(default)]
    pub class_id: Option<String>,
    pub teacher: String,
}

impl ScheduleEvent {
    pub fn day(&self) -> &'static str {
        weekday_name(self.date.weekday())
    }

    pub fn duration_minutes(&self) -> i64 {
        (self.end_time - self.start_time).num_minutes().max(0)
    }

    /// Same room, same date, and the half-open time ranges intersect.
    pub fn overlaps(&self, other: &ScheduleEvent) -> bool {
        self.room == other.room
            && self.date == other.date
            && self.start_time < other.end_time
            && other.start_time < self.end_time
    }
}

impl Record for ScheduleEvent {
    const SEARCHABLE: &'static [&'static str] = &["title", "room", "teacher"];
    const CATEGORIES: &'static [&'static str] = &["type", "day", "date", "classId"];

    fn field(&self, name: &str) -> Option<Cow<'_, str>> {
        match name {
            "id" => borrowed(&self.id),
            "title" => borrowed(&self.title),
            "type" => borrowed(self.kind.as_str()),
            "day" => borrowed(self.day()),
            "date" => Some(Cow::Owned(self.date.format("%Y-%m-%d").to_string())),
            "room" => borrowed(&self.room),
            "classId" => optional(&self.class_id),
            "teacher" => borrowed(&self.teacher),
            _ => None,
        }
    }
}

impl Entity for ScheduleEvent {
    const KIND: EntityKind = EntityKind::ScheduleEvent;

    fn id(&self) -> &str {
        &self.id
    }

    fn validate(&self) -> Result<(), String> {
        if self.end_time <= self.start_time {
            return Err(format!(
                "endTime {} must be after startTime {}",
                self.end_time, self.start_time
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn teacher_status_uses_kebab_case_on_the_wire() {
        let v = serde_json::to_value(TeacherStatus::OnLeave).expect("serialize");
        assert_eq!(v, json!("on-leave"));
        assert_eq!(TeacherStatus::OnLeave.as_str(), "on-leave");
    }

    #[test]
    fn assignment_type_field_is_named_type() {
        let raw = json!({
            "id": "a1",
            "title": "Lab report",
            "classId": "c1",
            "className": "Physics Fundamentals",
            "subject": "Physics",
            "type": "project",
            "status": "draft",
            "dueDate": "2024-04-01",
            "totalPoints": 50.0,
            "submissions": 0,
            "totalStudents": 0
        });
        let a: Assignment = serde_json::from_value(raw).expect("deserialize assignment");
        assert_eq!(a.kind, AssignmentType::Project);
        assert_eq!(a.field("type").as_deref(), Some("project"));
        assert_eq!(a.submission_rate(), 0.0);
    }

    #[test]
    fn schedule_event_derives_day_and_overlap() {
        let t = |h: u32, m: u32| NaiveTime::from_hms_opt(h, m, 0).expect("time");
        let date = NaiveDate::from_ymd_opt(2024, 3, 18).expect("date");
        let a = ScheduleEvent {
            id: "e1".into(),
            title: "Algebra".into(),
            kind: EventType::Class,
            date,
            start_time: t(9, 0),
            end_time: t(10, 30),
            room: "Room 101".into(),
            class_id: None,
            teacher: "Dr. Sarah Johnson".into(),
        };
        let mut b = a.clone();
        b.id = "e2".into();
        b.start_time = t(10, 30);
        b.end_time = t(11, 0);

        assert_eq!(a.day(), "monday");
        assert_eq!(a.duration_minutes(), 90);
        // Back-to-back is not a clash.
        assert!(!a.overlaps(&b));
        b.start_time = t(10, 0);
        assert!(a.overlaps(&b));
        b.room = "Lab 201".into();
        assert!(!a.overlaps(&b));
    }

    #[test]
    fn gradebook_average_skips_missing_entries() {
        let mut grades = BTreeMap::new();
        grades.insert("a1".to_string(), None);
        grades.insert("a2".to_string(), Some(88.0));
        let e = GradebookEntry {
            id: "gb".into(),
            student_id: "STU004".into(),
            student_name: "Liam Anderson".into(),
            class_id: "cls-1".into(),
            grades,
        };
        assert_eq!(e.average(), 88.0);
    }

    #[test]
    fn entity_kind_round_trips_method_prefix() {
        for kind in [
            EntityKind::User,
            EntityKind::Class,
            EntityKind::GradebookEntry,
            EntityKind::ScheduleEvent,
        ] {
            assert_eq!(EntityKind::parse(kind.as_str()), Some(kind));
        }
        assert_eq!(EntityKind::parse("chat"), None);
    }
}
