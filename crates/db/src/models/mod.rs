pub mod achievement;
pub mod event_attended;
pub mod event_organized;
pub mod internship;
pub mod leave;
pub mod online_course;
pub mod record;
pub mod scholarship;
pub mod student_details;
pub mod user;
