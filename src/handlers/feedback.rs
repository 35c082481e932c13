//! Feedback handlers, plus the static HTML submission form.

use crate::error::AppError;
use crate::extractors::{JsonBody, JsonOrForm};
use crate::model::{FeedbackText, NewFeedback};
use crate::response::{created, message, ok};
use crate::service::submission_form;
use crate::state::AppState;
use axum::extract::{Path, State};
use axum::response::{Html, IntoResponse};

/// POST /feedback: JSON or urlencoded form fields.
pub async fn submit(
    State(state): State<AppState>,
    JsonOrForm(body): JsonOrForm<NewFeedback>,
) -> Result<impl IntoResponse, AppError> {
    Ok(created(state.feedback.submit(body).await?))
}

/// GET /feedback/:course_code
pub async fn list_by_course(
    State(state): State<AppState>,
    Path(course_code): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    Ok(ok(state.feedback.list_by_course(&course_code).await?))
}

/// PUT /feedback/:id: only the `feedback` text changes.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    JsonBody(body): JsonBody<FeedbackText>,
) -> Result<impl IntoResponse, AppError> {
    Ok(ok(state.feedback.update_text(&id, &body.feedback).await?))
}

/// DELETE /feedback/:id
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    state.feedback.delete_by_id(&id).await?;
    Ok(message("Feedback deleted"))
}

/// GET /feedback/form
pub async fn form() -> Html<&'static str> {
    Html(submission_form())
}
