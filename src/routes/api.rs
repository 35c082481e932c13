//! Course, student and feedback routes.
//! `/feedback/form` is a static segment and wins over `/feedback/:key`. The `:key` segment is a
//! course code for GET and a feedback id for PUT and DELETE.

use crate::handlers::{course, feedback, student};
use crate::state::AppState;
use axum::{routing::get, routing::post, Router};

pub fn api_routes(state: AppState) -> Router {
    Router::new()
        .route("/courses", get(course::list).post(course::create))
        .route(
            "/courses/:code",
            get(course::read).put(course::replace).delete(course::delete),
        )
        .route("/students", get(student::list).post(student::create))
        .route("/students/:email/enroll", post(student::enroll))
        .route("/students/:email/courses", get(student::enrolled_courses))
        .route("/feedback", post(feedback::submit))
        .route("/feedback/form", get(feedback::form))
        .route(
            "/feedback/:key",
            get(feedback::list_by_course)
                .put(feedback::update)
                .delete(feedback::delete),
        )
        .with_state(state)
}
