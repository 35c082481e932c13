//! Student handlers: register, list, enroll, list enrolled course codes.

use crate::error::AppError;
use crate::extractors::JsonBody;
use crate::model::{EnrollRequest, NewStudent};
use crate::response::{created, ok};
use crate::state::AppState;
use axum::extract::{Path, State};
use axum::response::IntoResponse;

/// POST /students
pub async fn create(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<NewStudent>,
) -> Result<impl IntoResponse, AppError> {
    Ok(created(state.students.create(body).await?))
}

/// GET /students
pub async fn list(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    Ok(ok(state.students.list_all().await?))
}

/// POST /students/:email/enroll with `{"courseCode": ...}`
pub async fn enroll(
    State(state): State<AppState>,
    Path(email): Path<String>,
    JsonBody(body): JsonBody<EnrollRequest>,
) -> Result<impl IntoResponse, AppError> {
    Ok(ok(state.students.enroll(&email, &body.course_code).await?))
}

/// GET /students/:email/courses
pub async fn enrolled_courses(
    State(state): State<AppState>,
    Path(email): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    Ok(ok(state.students.enrolled_courses(&email).await?))
}
