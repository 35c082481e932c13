//! HTTP handlers for courses, students and feedback.

pub mod course;
pub mod feedback;
pub mod student;
