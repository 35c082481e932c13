//! Course directory: create, list, get, replace and delete courses by code.

use crate::error::AppError;
use crate::model::{Course, CourseFields, NewCourse};
use crate::store::DocumentStore;
use std::sync::Arc;

pub const COURSE_NOT_FOUND: &str = "Course not found";

#[derive(Clone)]
pub struct CourseDirectory {
    store: Arc<dyn DocumentStore>,
}

impl CourseDirectory {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        CourseDirectory { store }
    }

    /// Insert a course. A taken code is a conflict and leaves the existing record untouched.
    pub async fn create(&self, course: NewCourse) -> Result<Course, AppError> {
        let created = self
            .store
            .insert_course(course)
            .await
            .map_err(AppError::save_rejected)?;
        tracing::info!(code = %created.code, id = %created.id, "course created");
        Ok(created)
    }

    pub async fn list_all(&self) -> Result<Vec<Course>, AppError> {
        Ok(self.store.list_courses().await?)
    }

    pub async fn get_by_code(&self, code: &str) -> Result<Course, AppError> {
        self.store
            .find_course(code)
            .await?
            .ok_or_else(|| AppError::NotFound(COURSE_NOT_FOUND.into()))
    }

    pub async fn replace_by_code(&self, code: &str, fields: CourseFields) -> Result<Course, AppError> {
        let updated = self
            .store
            .replace_course(code, fields)
            .await?
            .ok_or_else(|| AppError::NotFound(COURSE_NOT_FOUND.into()))?;
        tracing::info!(code = %code, "course replaced");
        Ok(updated)
    }

    /// Students keep the code in their enrolled list after the course is gone.
    pub async fn delete_by_code(&self, code: &str) -> Result<(), AppError> {
        self.store
            .delete_course(code)
            .await?
            .ok_or_else(|| AppError::NotFound(COURSE_NOT_FOUND.into()))?;
        tracing::info!(code = %code, "course deleted");
        Ok(())
    }
}
