//! Student roster: registration, listing and the enroll workflow.

use super::course::COURSE_NOT_FOUND;
use crate::error::AppError;
use crate::model::{NewStudent, Student};
use crate::store::DocumentStore;
use std::sync::Arc;

pub const STUDENT_NOT_FOUND: &str = "Student not found";

#[derive(Clone)]
pub struct StudentRoster {
    store: Arc<dyn DocumentStore>,
}

impl StudentRoster {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        StudentRoster { store }
    }

    pub async fn create(&self, student: NewStudent) -> Result<Student, AppError> {
        let created = self
            .store
            .insert_student(student)
            .await
            .map_err(AppError::save_rejected)?;
        tracing::info!(email = %created.email, id = %created.id, "student registered");
        Ok(created)
    }

    pub async fn list_all(&self) -> Result<Vec<Student>, AppError> {
        Ok(self.store.list_students().await?)
    }

    pub async fn get_by_email(&self, email: &str) -> Result<Student, AppError> {
        self.store
            .find_student(email)
            .await?
            .ok_or_else(|| AppError::NotFound(STUDENT_NOT_FOUND.into()))
    }

    /// Append `course_code` to the student's enrolled list unless already present.
    ///
    /// Student and course are checked separately and the append is a separate write, so two
    /// concurrent calls may both append. Re-enrolling returns the current record unchanged.
    pub async fn enroll(&self, email: &str, course_code: &str) -> Result<Student, AppError> {
        let mut student = self.get_by_email(email).await?;
        if self.store.find_course(course_code).await?.is_none() {
            return Err(AppError::NotFound(COURSE_NOT_FOUND.into()));
        }
        if student.is_enrolled_in(course_code) {
            tracing::debug!(email = %email, course_code = %course_code, "already enrolled");
            return Ok(student);
        }
        student.enrolled_courses.push(course_code.to_string());
        let saved = self
            .store
            .save_enrollments(email, &student.enrolled_courses)
            .await?
            .ok_or_else(|| AppError::NotFound(STUDENT_NOT_FOUND.into()))?;
        tracing::info!(email = %email, course_code = %course_code, "student enrolled");
        Ok(saved)
    }

    /// Codes exactly as stored; they are not resolved against the course directory.
    pub async fn enrolled_courses(&self, email: &str) -> Result<Vec<String>, AppError> {
        Ok(self.get_by_email(email).await?.enrolled_courses)
    }
}
