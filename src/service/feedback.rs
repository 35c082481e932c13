//! Feedback ledger: enrollment-gated submission plus edit and delete by id.

use super::course::COURSE_NOT_FOUND;
use super::student::STUDENT_NOT_FOUND;
use crate::error::AppError;
use crate::model::{Feedback, NewFeedback};
use crate::store::DocumentStore;
use std::sync::Arc;
use uuid::Uuid;

pub const FEEDBACK_NOT_FOUND: &str = "Feedback not found";
pub const NOT_ENROLLED: &str = "Student not enrolled in this course";

#[derive(Clone)]
pub struct FeedbackLedger {
    store: Arc<dyn DocumentStore>,
}

impl FeedbackLedger {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        FeedbackLedger { store }
    }

    /// Checks run in order and stop at the first failure: student exists, student is
    /// enrolled in the course, course exists. An unenrolled student therefore gets the
    /// enrollment error even when the course does not exist.
    pub async fn submit(&self, submission: NewFeedback) -> Result<Feedback, AppError> {
        let student = self
            .store
            .find_student(&submission.student_email)
            .await?
            .ok_or_else(|| AppError::NotFound(STUDENT_NOT_FOUND.into()))?;
        if !student.is_enrolled_in(&submission.course_code) {
            tracing::warn!(
                email = %submission.student_email,
                course_code = %submission.course_code,
                "feedback rejected: not enrolled"
            );
            return Err(AppError::Validation(NOT_ENROLLED.into()));
        }
        if self.store.find_course(&submission.course_code).await?.is_none() {
            return Err(AppError::NotFound(COURSE_NOT_FOUND.into()));
        }
        let saved = self
            .store
            .insert_feedback(submission)
            .await
            .map_err(AppError::save_rejected)?;
        tracing::info!(id = %saved.id, course_code = %saved.course_code, "feedback submitted");
        Ok(saved)
    }

    pub async fn list_by_course(&self, course_code: &str) -> Result<Vec<Feedback>, AppError> {
        Ok(self.store.feedback_for_course(course_code).await?)
    }

    /// Ids that do not parse as UUIDs cannot match a record and report not found.
    pub async fn update_text(&self, id: &str, text: &str) -> Result<Feedback, AppError> {
        let id = parse_feedback_id(id)?;
        let updated = self
            .store
            .update_feedback(id, text)
            .await?
            .ok_or_else(|| AppError::NotFound(FEEDBACK_NOT_FOUND.into()))?;
        tracing::info!(id = %id, "feedback updated");
        Ok(updated)
    }

    pub async fn delete_by_id(&self, id: &str) -> Result<(), AppError> {
        let id = parse_feedback_id(id)?;
        self.store
            .delete_feedback(id)
            .await?
            .ok_or_else(|| AppError::NotFound(FEEDBACK_NOT_FOUND.into()))?;
        tracing::info!(id = %id, "feedback deleted");
        Ok(())
    }
}

fn parse_feedback_id(id: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(id).map_err(|_| AppError::NotFound(FEEDBACK_NOT_FOUND.into()))
}

/// Static submission form; posts urlencoded fields to `/feedback`.
pub fn submission_form() -> &'static str {
    r#"<!DOCTYPE html>
<html>
  <head><title>Course feedback</title></head>
  <body>
    <form method="POST" action="/feedback">
      <label>Student Email: <input type="email" name="studentEmail" required /></label><br/>
      <label>Course Code: <input type="text" name="courseCode" required /></label><br/>
      <label>Feedback: <textarea name="feedback" required></textarea></label><br/>
      <button type="submit">Submit Feedback</button>
    </form>
  </body>
</html>
"#
}
