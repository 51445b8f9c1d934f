use crate::models::{
    Assignment, AssignmentStatus, AssignmentType, ClassRecord, ClassStatus, EventType, Grade,
    GradeStatus, GradebookEntry, Guardian, Lesson, LessonStatus, Role, ScheduleEvent,
    ScheduleSlot, Student, StudentStatus, Teacher, TeacherStatus, User, UserStatus,
};
use crate::store::{Collection, Portal};
use chrono::{NaiveDate, NaiveTime};
use std::collections::BTreeMap;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default()
}

fn time(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).unwrap_or_default()
}

fn s(v: &str) -> String {
    v.to_string()
}

/// The portal's built-in sample data.
pub fn demo() -> Portal {
    Portal {
        users: Collection::from_seed(users()),
        students: Collection::from_seed(students()),
        teachers: Collection::from_seed(teachers()),
        classes: Collection::from_seed(classes()),
        assignments: Collection::from_seed(assignments()),
        grades: Collection::from_seed(grades()),
        gradebook: Collection::from_seed(gradebook()),
        lessons: Collection::from_seed(lessons()),
        schedule: Collection::from_seed(schedule()),
    }
}

fn user(
    id: &str,
    name: &str,
    email: &str,
    role: Role,
    status: UserStatus,
    joined_at: NaiveDate,
) -> User {
    User {
        id: s(id),
        name: s(name),
        email: s(email),
        role,
        status,
        phone: None,
        joined_at,
        last_login: None,
    }
}

fn users() -> Vec<User> {
    let mut admin = user(
        "usr-1",
        "Alice Johnson",
        "alice.johnson@school.edu",
        Role::Admin,
        UserStatus::Active,
        date(2020, 8, 1),
    );
    admin.phone = Some(s("+1 555-0100"));
    admin.last_login = Some(date(2024, 3, 15));

    vec![
        admin,
        user(
            "usr-2",
            "Dr. Sarah Johnson",
            "sarah.johnson@school.edu",
            Role::Teacher,
            UserStatus::Active,
            date(2012, 8, 20),
        ),
        user(
            "usr-3",
            "Prof. Michael Chen",
            "michael.chen@school.edu",
            Role::Teacher,
            UserStatus::Active,
            date(2016, 1, 10),
        ),
        user(
            "usr-4",
            "Emma Wilson",
            "emma.wilson@student.school.edu",
            Role::Student,
            UserStatus::Active,
            date(2023, 9, 1),
        ),
        user(
            "usr-5",
            "James Brown",
            "james.brown@student.school.edu",
            Role::Student,
            UserStatus::Inactive,
            date(2022, 9, 1),
        ),
        user(
            "usr-6",
            "Olivia Martinez",
            "olivia.martinez@student.school.edu",
            Role::Student,
            UserStatus::Suspended,
            date(2023, 9, 1),
        ),
    ]
}

fn students() -> Vec<Student> {
    vec![
        Student {
            id: s("stu-1"),
            student_id: s("STU001"),
            name: s("Emma Wilson"),
            email: s("emma.wilson@student.school.edu"),
            grade: s("10"),
            class_name: s("Advanced Mathematics"),
            status: StudentStatus::Active,
            enrollment_date: date(2023, 9, 1),
            average_grade: 92.5,
            attendance_rate: 96.0,
            completed_assignments: 18,
            total_assignments: 20,
            guardian: Some(Guardian {
                name: s("Robert Wilson"),
                relationship: s("Father"),
                phone: s("+1 555-0142"),
                email: Some(s("robert.wilson@email.com")),
            }),
        },
        Student {
            id: s("stu-2"),
            student_id: s("STU002"),
            name: s("James Brown"),
            email: s("james.brown@student.school.edu"),
            grade: s("11"),
            class_name: s("Physics Fundamentals"),
            status: StudentStatus::Inactive,
            enrollment_date: date(2022, 9, 1),
            average_grade: 78.0,
            attendance_rate: 85.5,
            completed_assignments: 15,
            total_assignments: 20,
            guardian: Some(Guardian {
                name: s("Linda Brown"),
                relationship: s("Mother"),
                phone: s("+1 555-0178"),
                email: None,
            }),
        },
        Student {
            id: s("stu-3"),
            student_id: s("STU003"),
            name: s("Olivia Martinez"),
            email: s("olivia.martinez@student.school.edu"),
            grade: s("10"),
            class_name: s("English Literature"),
            status: StudentStatus::Active,
            enrollment_date: date(2023, 9, 1),
            average_grade: 85.0,
            attendance_rate: 92.0,
            completed_assignments: 19,
            total_assignments: 20,
            guardian: None,
        },
        Student {
            id: s("stu-4"),
            student_id: s("STU004"),
            name: s("Liam Anderson"),
            email: s("liam.anderson@student.school.edu"),
            grade: s("12"),
            class_name: s("Advanced Mathematics"),
            status: StudentStatus::Graduated,
            enrollment_date: date(2021, 9, 1),
            average_grade: 88.5,
            attendance_rate: 94.5,
            completed_assignments: 20,
            total_assignments: 20,
            guardian: None,
        },
    ]
}

fn teachers() -> Vec<Teacher> {
    vec![
        Teacher {
            id: s("tch-1"),
            employee_id: s("EMP001"),
            name: s("Dr. Sarah Johnson"),
            email: s("sarah.johnson@school.edu"),
            subject: s("Mathematics"),
            department: s("Science & Math"),
            status: TeacherStatus::Active,
            class_count: 3,
            student_count: 85,
            experience_years: 12,
            hire_date: date(2012, 8, 20),
        },
        Teacher {
            id: s("tch-2"),
            employee_id: s("EMP002"),
            name: s("Prof. Michael Chen"),
            email: s("michael.chen@school.edu"),
            subject: s("Physics"),
            department: s("Science & Math"),
            status: TeacherStatus::Active,
            class_count: 2,
            student_count: 47,
            experience_years: 8,
            hire_date: date(2016, 1, 10),
        },
        Teacher {
            id: s("tch-3"),
            employee_id: s("EMP003"),
            name: s("Ms. Emily Davis"),
            email: s("emily.davis@school.edu"),
            subject: s("English"),
            department: s("Humanities"),
            status: TeacherStatus::OnLeave,
            class_count: 2,
            student_count: 60,
            experience_years: 5,
            hire_date: date(2019, 8, 15),
        },
    ]
}

fn slot(day: &str, start: NaiveTime, end: NaiveTime, room: &str) -> ScheduleSlot {
    ScheduleSlot {
        day: s(day),
        start_time: start,
        end_time: end,
        room: s(room),
    }
}

fn classes() -> Vec<ClassRecord> {
    vec![
        ClassRecord {
            id: s("cls-1"),
            name: s("Advanced Mathematics"),
            class_code: s("MATH101"),
            subject: s("Mathematics"),
            teacher: s("Dr. Sarah Johnson"),
            room: s("Room 101"),
            current_students: 28,
            max_students: 30,
            status: ClassStatus::Active,
            schedule: vec![
                slot("monday", time(9, 0), time(10, 30), "Room 101"),
                slot("wednesday", time(9, 0), time(10, 30), "Room 101"),
                slot("friday", time(9, 0), time(10, 30), "Room 101"),
            ],
            description: s("Algebra, functions and an introduction to calculus."),
        },
        ClassRecord {
            id: s("cls-2"),
            name: s("Physics Fundamentals"),
            class_code: s("PHY201"),
            subject: s("Physics"),
            teacher: s("Prof. Michael Chen"),
            room: s("Lab 201"),
            current_students: 22,
            max_students: 25,
            status: ClassStatus::Active,
            schedule: vec![
                slot("monday", time(10, 0), time(11, 30), "Lab 201"),
                slot("thursday", time(10, 0), time(11, 30), "Lab 201"),
            ],
            description: s("Mechanics, energy and waves with weekly lab work."),
        },
        ClassRecord {
            id: s("cls-3"),
            name: s("English Literature"),
            class_code: s("ENG301"),
            subject: s("English"),
            teacher: s("Ms. Emily Davis"),
            room: s("Room 305"),
            current_students: 32,
            max_students: 35,
            status: ClassStatus::Active,
            schedule: vec![
                slot("tuesday", time(13, 0), time(14, 30), "Room 305"),
                slot("thursday", time(13, 0), time(14, 30), "Room 305"),
            ],
            description: s("Close reading of drama, poetry and the novel."),
        },
    ]
}

fn assignments() -> Vec<Assignment> {
    vec![
        Assignment {
            id: s("asg-1"),
            title: s("Quadratic Equations Worksheet"),
            description: s("Solve problems 1-20 by factoring and the quadratic formula."),
            class_id: s("cls-1"),
            class_name: s("Advanced Mathematics"),
            subject: s("Mathematics"),
            kind: AssignmentType::Homework,
            status: AssignmentStatus::Published,
            due_date: date(2024, 3, 15),
            total_points: 100.0,
            submissions: 25,
            total_students: 28,
        },
        Assignment {
            id: s("asg-2"),
            title: s("Newton's Laws Quiz"),
            description: s("Short quiz on the three laws of motion."),
            class_id: s("cls-2"),
            class_name: s("Physics Fundamentals"),
            subject: s("Physics"),
            kind: AssignmentType::Quiz,
            status: AssignmentStatus::Published,
            due_date: date(2024, 3, 18),
            total_points: 50.0,
            submissions: 20,
            total_students: 22,
        },
        Assignment {
            id: s("asg-3"),
            title: s("Shakespeare Essay"),
            description: s("A 1500-word essay on the theme of ambition in Macbeth."),
            class_id: s("cls-3"),
            class_name: s("English Literature"),
            subject: s("English"),
            kind: AssignmentType::Project,
            status: AssignmentStatus::Draft,
            due_date: date(2024, 4, 1),
            total_points: 100.0,
            submissions: 0,
            total_students: 32,
        },
        Assignment {
            id: s("asg-4"),
            title: s("Midterm Exam"),
            description: s("Covers chapters 1-6."),
            class_id: s("cls-1"),
            class_name: s("Advanced Mathematics"),
            subject: s("Mathematics"),
            kind: AssignmentType::Exam,
            status: AssignmentStatus::Closed,
            due_date: date(2024, 2, 28),
            total_points: 100.0,
            submissions: 28,
            total_students: 28,
        },
    ]
}

#[allow(clippy::too_many_arguments)]
fn grade(
    id: &str,
    student: (&str, &str),
    assignment: (&str, &str),
    class: (&str, &str, &str),
    score: Option<f64>,
    max_score: f64,
    status: GradeStatus,
    graded_at: Option<NaiveDate>,
) -> Grade {
    Grade {
        id: s(id),
        student_id: s(student.0),
        student_name: s(student.1),
        assignment_id: s(assignment.0),
        assignment_title: s(assignment.1),
        class_id: s(class.0),
        class_name: s(class.1),
        subject: s(class.2),
        score,
        max_score,
        status,
        graded_at,
        feedback: None,
    }
}

fn grades() -> Vec<Grade> {
    let math = ("cls-1", "Advanced Mathematics", "Mathematics");
    let physics = ("cls-2", "Physics Fundamentals", "Physics");
    let english = ("cls-3", "English Literature", "English");

    let mut first = grade(
        "grd-1",
        ("STU001", "Emma Wilson"),
        ("asg-1", "Quadratic Equations Worksheet"),
        math,
        Some(95.0),
        100.0,
        GradeStatus::Graded,
        Some(date(2024, 3, 16)),
    );
    first.feedback = Some(s("Excellent work, clear steps throughout."));

    vec![
        first,
        grade(
            "grd-2",
            ("STU002", "James Brown"),
            ("asg-2", "Newton's Laws Quiz"),
            physics,
            Some(38.0),
            50.0,
            GradeStatus::Graded,
            Some(date(2024, 3, 19)),
        ),
        grade(
            "grd-3",
            ("STU003", "Olivia Martinez"),
            ("asg-3", "Shakespeare Essay"),
            english,
            None,
            100.0,
            GradeStatus::Pending,
            None,
        ),
        grade(
            "grd-4",
            ("STU004", "Liam Anderson"),
            ("asg-4", "Midterm Exam"),
            math,
            Some(88.0),
            100.0,
            GradeStatus::Graded,
            Some(date(2024, 3, 1)),
        ),
        grade(
            "grd-5",
            ("STU001", "Emma Wilson"),
            ("asg-4", "Midterm Exam"),
            math,
            Some(91.0),
            100.0,
            GradeStatus::Graded,
            Some(date(2024, 3, 1)),
        ),
    ]
}

fn gradebook_row(
    id: &str,
    student_id: &str,
    student_name: &str,
    class_id: &str,
    grades: &[(&str, Option<f64>)],
) -> GradebookEntry {
    GradebookEntry {
        id: s(id),
        student_id: s(student_id),
        student_name: s(student_name),
        class_id: s(class_id),
        grades: grades
            .iter()
            .map(|(k, v)| (s(k), *v))
            .collect::<BTreeMap<_, _>>(),
    }
}

fn gradebook() -> Vec<GradebookEntry> {
    vec![
        gradebook_row(
            "gb-1",
            "STU001",
            "Emma Wilson",
            "cls-1",
            &[("asg-1", Some(95.0)), ("asg-4", Some(91.0))],
        ),
        gradebook_row(
            "gb-2",
            "STU004",
            "Liam Anderson",
            "cls-1",
            &[("asg-1", None), ("asg-4", Some(88.0))],
        ),
        gradebook_row(
            "gb-3",
            "STU002",
            "James Brown",
            "cls-2",
            &[("asg-2", Some(76.0))],
        ),
    ]
}

fn lessons() -> Vec<Lesson> {
    vec![
        Lesson {
            id: s("les-1"),
            title: s("Introduction to Algebra"),
            description: s("Variables, expressions and solving linear equations."),
            subject: s("Mathematics"),
            teacher: s("Dr. Sarah Johnson"),
            duration_minutes: 45,
            status: LessonStatus::Published,
            views: 1250,
            completion_rate: 87.5,
            video_url: s("https://videos.school.edu/lessons/algebra-intro.mp4"),
            published_at: Some(date(2024, 1, 10)),
        },
        Lesson {
            id: s("les-2"),
            title: s("Newton's Laws of Motion"),
            description: s("Force, mass and acceleration with worked examples."),
            subject: s("Physics"),
            teacher: s("Prof. Michael Chen"),
            duration_minutes: 38,
            status: LessonStatus::Published,
            views: 980,
            completion_rate: 72.0,
            video_url: s("https://videos.school.edu/lessons/newtons-laws.mp4"),
            published_at: Some(date(2024, 2, 2)),
        },
        Lesson {
            id: s("les-3"),
            title: s("Poetry Analysis Basics"),
            description: s("Meter, imagery and how to annotate a poem."),
            subject: s("English"),
            teacher: s("Ms. Emily Davis"),
            duration_minutes: 52,
            status: LessonStatus::Draft,
            views: 0,
            completion_rate: 0.0,
            video_url: s("https://videos.school.edu/lessons/poetry-basics.mp4"),
            published_at: None,
        },
    ]
}

#[allow(clippy::too_many_arguments)]
fn event(
    id: &str,
    title: &str,
    kind: EventType,
    on: NaiveDate,
    start: NaiveTime,
    end: NaiveTime,
    room: &str,
    class_id: Option<&str>,
    teacher: &str,
) -> ScheduleEvent {
    ScheduleEvent {
        id: s(id),
        title: s(title),
        kind,
        date: on,
        start_time: start,
        end_time: end,
        room: s(room),
        class_id: class_id.map(s),
        teacher: s(teacher),
    }
}

fn schedule() -> Vec<ScheduleEvent> {
    vec![
        event(
            "evt-1",
            "Advanced Mathematics",
            EventType::Class,
            date(2024, 3, 18),
            time(9, 0),
            time(10, 30),
            "Room 101",
            Some("cls-1"),
            "Dr. Sarah Johnson",
        ),
        event(
            "evt-2",
            "Physics Lab",
            EventType::Class,
            date(2024, 3, 18),
            time(10, 0),
            time(11, 30),
            "Lab 201",
            Some("cls-2"),
            "Prof. Michael Chen",
        ),
        event(
            "evt-3",
            "Department Meeting",
            EventType::Meeting,
            date(2024, 3, 18),
            time(10, 0),
            time(11, 0),
            "Room 101",
            None,
            "Dr. Sarah Johnson",
        ),
        event(
            "evt-4",
            "Midterm Exam",
            EventType::Exam,
            date(2024, 3, 20),
            time(9, 0),
            time(11, 0),
            "Room 101",
            Some("cls-1"),
            "Dr. Sarah Johnson",
        ),
    ]
}
