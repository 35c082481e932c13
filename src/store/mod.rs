//! Document store seam: one collection per record type, point reads and writes by key field.
//!
//! Each call is atomic on its own. Workflows that read then write (enroll, feedback submission)
//! compose several calls and are not isolated from concurrent requests.

mod memory;
mod postgres;

pub use memory::MemoryStore;
pub use postgres::{ensure_database_exists, PgStore};

use crate::error::StoreError;
use crate::model::{Course, CourseFields, Feedback, NewCourse, NewFeedback, NewStudent, Student};
use async_trait::async_trait;
use uuid::Uuid;

pub const COURSES: &str = "courses";
pub const STUDENTS: &str = "students";
pub const FEEDBACK: &str = "feedback";

#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Liveness check used by the readiness route.
    async fn ping(&self) -> Result<(), StoreError>;

    /// Insert with a generated id. Fails with [`StoreError::Duplicate`] when the code is taken.
    async fn insert_course(&self, course: NewCourse) -> Result<Course, StoreError>;
    async fn list_courses(&self) -> Result<Vec<Course>, StoreError>;
    async fn find_course(&self, code: &str) -> Result<Option<Course>, StoreError>;
    /// Overwrite title and description; `None` when no course has this code.
    async fn replace_course(&self, code: &str, fields: CourseFields) -> Result<Option<Course>, StoreError>;
    /// Returns the removed record, `None` when nothing matched.
    async fn delete_course(&self, code: &str) -> Result<Option<Course>, StoreError>;

    /// Insert with a generated id. Fails with [`StoreError::Duplicate`] when the email is taken.
    async fn insert_student(&self, student: NewStudent) -> Result<Student, StoreError>;
    async fn list_students(&self) -> Result<Vec<Student>, StoreError>;
    async fn find_student(&self, email: &str) -> Result<Option<Student>, StoreError>;
    /// Persist the full enrolled course list for a student.
    async fn save_enrollments(&self, email: &str, courses: &[String]) -> Result<Option<Student>, StoreError>;

    async fn insert_feedback(&self, feedback: NewFeedback) -> Result<Feedback, StoreError>;
    async fn feedback_for_course(&self, course_code: &str) -> Result<Vec<Feedback>, StoreError>;
    async fn update_feedback(&self, id: Uuid, text: &str) -> Result<Option<Feedback>, StoreError>;
    async fn delete_feedback(&self, id: Uuid) -> Result<Option<Feedback>, StoreError>;
}
