//! Course handlers: create, list, read, replace, delete by code.

use crate::error::AppError;
use crate::extractors::JsonBody;
use crate::model::{CourseFields, NewCourse};
use crate::response::{created, message, ok};
use crate::state::AppState;
use axum::extract::{Path, State};
use axum::response::IntoResponse;

/// POST /courses
pub async fn create(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<NewCourse>,
) -> Result<impl IntoResponse, AppError> {
    Ok(created(state.courses.create(body).await?))
}

/// GET /courses
pub async fn list(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    Ok(ok(state.courses.list_all().await?))
}

/// GET /courses/:code
pub async fn read(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    Ok(ok(state.courses.get_by_code(&code).await?))
}

/// PUT /courses/:code
pub async fn replace(
    State(state): State<AppState>,
    Path(code): Path<String>,
    JsonBody(body): JsonBody<CourseFields>,
) -> Result<impl IntoResponse, AppError> {
    Ok(ok(state.courses.replace_by_code(&code, body).await?))
}

/// DELETE /courses/:code
pub async fn delete(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    state.courses.delete_by_code(&code).await?;
    Ok(message("Course deleted"))
}
