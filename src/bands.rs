//! Badge colors and threshold bands shared by every list and stat card.
//!
//! Each enumeration has exactly one color table here, and each view that
//! shades a percentage owns one threshold table. Nothing outside this module
//! decides a color.

use crate::models::{
    AssignmentStatus, ClassStatus, EventType, GradeStatus, LessonStatus, Role, StudentStatus,
    TeacherStatus, UserStatus,
};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    Green,
    Blue,
    Yellow,
    Orange,
    Red,
    Purple,
    Gray,
}

/// Descending `(minimum percent, color)` steps plus the color below the last step.
#[derive(Debug, Clone, Copy)]
pub struct Thresholds {
    pub steps: &'static [(f64, Color)],
    pub otherwise: Color,
}

impl Thresholds {
    pub fn band(&self, percent: f64) -> Color {
        if !percent.is_finite() {
            return self.otherwise;
        }
        self.steps
            .iter()
            .find(|(min, _)| percent >= *min)
            .map(|(_, c)| *c)
            .unwrap_or(self.otherwise)
    }
}

/// Classes page: a nearly full class is the warning case.
pub const CAPACITY: Thresholds = Thresholds {
    steps: &[(90.0, Color::Red), (75.0, Color::Yellow)],
    otherwise: Color::Green,
};

/// Grades, gradebook and student averages.
pub const GRADE: Thresholds = Thresholds {
    steps: &[(90.0, Color::Green), (80.0, Color::Blue), (70.0, Color::Yellow)],
    otherwise: Color::Red,
};

/// Assignment submission rate and lesson completion.
pub const PROGRESS: Thresholds = Thresholds {
    steps: &[(90.0, Color::Green), (70.0, Color::Yellow)],
    otherwise: Color::Red,
};

pub const ATTENDANCE: Thresholds = Thresholds {
    steps: &[(95.0, Color::Green), (85.0, Color::Yellow)],
    otherwise: Color::Red,
};

pub fn letter_grade(percent: f64) -> &'static str {
    if !percent.is_finite() {
        return "F";
    }
    if percent >= 90.0 {
        "A"
    } else if percent >= 80.0 {
        "B"
    } else if percent >= 70.0 {
        "C"
    } else if percent >= 60.0 {
        "D"
    } else {
        "F"
    }
}

pub fn role_color(role: Role) -> Color {
    match role {
        Role::Admin => Color::Purple,
        Role::Teacher => Color::Blue,
        Role::Student => Color::Green,
    }
}

pub fn user_status_color(status: UserStatus) -> Color {
    match status {
        UserStatus::Active => Color::Green,
        UserStatus::Inactive => Color::Gray,
        UserStatus::Suspended => Color::Red,
    }
}

pub fn student_status_color(status: StudentStatus) -> Color {
    match status {
        StudentStatus::Active => Color::Green,
        StudentStatus::Inactive => Color::Gray,
        StudentStatus::Graduated => Color::Blue,
        StudentStatus::Suspended => Color::Red,
    }
}

pub fn teacher_status_color(status: TeacherStatus) -> Color {
    match status {
        TeacherStatus::Active => Color::Green,
        TeacherStatus::Inactive => Color::Gray,
        TeacherStatus::OnLeave => Color::Yellow,
    }
}

pub fn class_status_color(status: ClassStatus) -> Color {
    match status {
        ClassStatus::Active => Color::Green,
        ClassStatus::Inactive => Color::Gray,
        ClassStatus::Completed => Color::Blue,
    }
}

pub fn assignment_status_color(status: AssignmentStatus) -> Color {
    match status {
        AssignmentStatus::Draft => Color::Gray,
        AssignmentStatus::Published => Color::Green,
        AssignmentStatus::Closed => Color::Red,
    }
}

pub fn grade_status_color(status: GradeStatus) -> Color {
    match status {
        GradeStatus::Graded => Color::Green,
        GradeStatus::Pending => Color::Yellow,
        GradeStatus::Late => Color::Orange,
        GradeStatus::Missing => Color::Red,
    }
}

pub fn lesson_status_color(status: LessonStatus) -> Color {
    match status {
        LessonStatus::Draft => Color::Gray,
        LessonStatus::Published => Color::Green,
        LessonStatus::Archived => Color::Yellow,
    }
}

pub fn event_type_color(kind: EventType) -> Color {
    match kind {
        EventType::Class => Color::Blue,
        EventType::Exam => Color::Red,
        EventType::Meeting => Color::Purple,
        EventType::Event => Color::Green,
    }
}
