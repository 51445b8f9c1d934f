pub mod assignments;
pub mod classes;
pub mod collection;
pub mod core;
pub mod dashboard;
pub mod drafts;
pub mod gradebook;
pub mod grades;
pub mod lessons;
pub mod schedule;
pub mod students;
pub mod teachers;
pub mod users;
