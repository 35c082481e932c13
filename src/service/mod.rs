//! Course directory, student roster and feedback ledger, each holding the shared store handle.

mod course;
mod feedback;
mod student;
pub use course::{CourseDirectory, COURSE_NOT_FOUND};
pub use feedback::{submission_form, FeedbackLedger, FEEDBACK_NOT_FOUND, NOT_ENROLLED};
pub use student::{StudentRoster, STUDENT_NOT_FOUND};
