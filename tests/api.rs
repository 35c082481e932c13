//! End-to-end HTTP tests over the in-memory store.

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use coursehub::{app, AppState, MemoryStore};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

const BODY_LIMIT: usize = 16 * 1024;

fn router() -> Router {
    app(AppState::new(Arc::new(MemoryStore::new())), BODY_LIMIT)
}

async fn call(app: &Router, req: Request<Body>) -> (StatusCode, Vec<u8>) {
    let resp = app.clone().oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    (status, bytes.to_vec())
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let req = match body {
        Some(v) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(serde_json::to_vec(&v).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    let (status, bytes) = call(app, req).await;
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

async fn seed(app: &Router) {
    let (status, _) = send(app, Method::POST, "/courses", Some(json!({ "code": "CS101", "title": "Intro" }))).await;
    assert_eq!(status, StatusCode::CREATED);
    let (status, _) = send(app, Method::POST, "/students", Some(json!({ "email": "a@x.com", "name": "A" }))).await;
    assert_eq!(status, StatusCode::CREATED);
}

#[tokio::test]
async fn enroll_then_submit_feedback() {
    let app = router();
    seed(&app).await;

    let (status, student) = send(
        &app,
        Method::POST,
        "/students/a@x.com/enroll",
        Some(json!({ "courseCode": "CS101" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(student["enrolledCourses"], json!(["CS101"]));

    let (status, fb) = send(
        &app,
        Method::POST,
        "/feedback",
        Some(json!({ "studentEmail": "a@x.com", "courseCode": "CS101", "feedback": "Great" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(fb["feedback"], "Great");
    assert!(fb["id"].as_str().is_some());

    let (status, list) = send(&app, Method::GET, "/feedback/CS101", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list, json!([fb]));
}

#[tokio::test]
async fn created_course_round_trips() {
    let app = router();
    let (status, created) = send(
        &app,
        Method::POST,
        "/courses",
        Some(json!({ "code": "MA200", "title": "Linear Algebra", "description": "Vectors" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert!(created["id"].as_str().is_some());

    let (status, fetched) = send(&app, Method::GET, "/courses/MA200", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, created);

    let (_, all) = send(&app, Method::GET, "/courses", None).await;
    assert_eq!(all, json!([created]));
}

#[tokio::test]
async fn duplicate_course_code_is_rejected_without_overwrite() {
    let app = router();
    seed(&app).await;
    let (status, body) = send(&app, Method::POST, "/courses", Some(json!({ "code": "CS101", "title": "Other" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("CS101"));

    let (_, course) = send(&app, Method::GET, "/courses/CS101", None).await;
    assert_eq!(course["title"], "Intro");
}

#[tokio::test]
async fn duplicate_student_email_is_rejected() {
    let app = router();
    seed(&app).await;
    let (status, body) = send(&app, Method::POST, "/students", Some(json!({ "email": "a@x.com" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
    let (_, students) = send(&app, Method::GET, "/students", None).await;
    assert_eq!(students.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn replace_and_delete_course() {
    let app = router();
    seed(&app).await;
    let (status, updated) = send(
        &app,
        Method::PUT,
        "/courses/CS101",
        Some(json!({ "title": "Intro to CS", "description": "Revised" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["code"], "CS101");
    assert_eq!(updated["title"], "Intro to CS");
    assert_eq!(updated["description"], "Revised");

    let (status, body) = send(&app, Method::DELETE, "/courses/CS101", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "message": "Course deleted" }));

    let (status, body) = send(&app, Method::GET, "/courses/CS101", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "error": "Course not found" }));
}

#[tokio::test]
async fn replace_unknown_course_is_404() {
    let app = router();
    let (status, body) = send(&app, Method::PUT, "/courses/NOPE", Some(json!({ "title": "x" }))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "error": "Course not found" }));
    let (status, _) = send(&app, Method::DELETE, "/courses/NOPE", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn enroll_twice_keeps_one_entry() {
    let app = router();
    seed(&app).await;
    for _ in 0..2 {
        let (status, _) = send(
            &app,
            Method::POST,
            "/students/a@x.com/enroll",
            Some(json!({ "courseCode": "CS101" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
    }
    let (status, codes) = send(&app, Method::GET, "/students/a@x.com/courses", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(codes, json!(["CS101"]));
}

#[tokio::test]
async fn enroll_reports_missing_student_or_course() {
    let app = router();
    seed(&app).await;
    let (status, body) = send(
        &app,
        Method::POST,
        "/students/ghost@x.com/enroll",
        Some(json!({ "courseCode": "CS101" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "error": "Student not found" }));

    let (status, body) = send(
        &app,
        Method::POST,
        "/students/a@x.com/enroll",
        Some(json!({ "courseCode": "NOPE" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "error": "Course not found" }));

    let (status, body) = send(&app, Method::GET, "/students/ghost@x.com/courses", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "error": "Student not found" }));
}

#[tokio::test]
async fn course_delete_does_not_cascade_to_students() {
    let app = router();
    seed(&app).await;
    send(&app, Method::POST, "/students/a@x.com/enroll", Some(json!({ "courseCode": "CS101" }))).await;
    send(&app, Method::DELETE, "/courses/CS101", None).await;
    let (_, codes) = send(&app, Method::GET, "/students/a@x.com/courses", None).await;
    assert_eq!(codes, json!(["CS101"]));
}

#[tokio::test]
async fn feedback_from_unenrolled_student_is_400_even_for_missing_course() {
    let app = router();
    seed(&app).await;
    for code in ["CS101", "NOPE"] {
        let (status, body) = send(
            &app,
            Method::POST,
            "/feedback",
            Some(json!({ "studentEmail": "a@x.com", "courseCode": code, "feedback": "hm" })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({ "error": "Student not enrolled in this course" }));
    }
    let (status, body) = send(
        &app,
        Method::POST,
        "/feedback",
        Some(json!({ "studentEmail": "ghost@x.com", "courseCode": "CS101", "feedback": "hm" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "error": "Student not found" }));
}

#[tokio::test]
async fn feedback_update_and_delete_by_id() {
    let app = router();
    seed(&app).await;
    send(&app, Method::POST, "/students/a@x.com/enroll", Some(json!({ "courseCode": "CS101" }))).await;
    let (_, fb) = send(
        &app,
        Method::POST,
        "/feedback",
        Some(json!({ "studentEmail": "a@x.com", "courseCode": "CS101", "feedback": "Great" })),
    )
    .await;
    let uri = format!("/feedback/{}", fb["id"].as_str().unwrap());

    let (status, updated) = send(&app, Method::PUT, &uri, Some(json!({ "feedback": "Superb" }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["feedback"], "Superb");
    assert_eq!(updated["studentEmail"], "a@x.com");

    let (status, body) = send(&app, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "message": "Feedback deleted" }));

    let (status, body) = send(&app, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "error": "Feedback not found" }));
}

#[tokio::test]
async fn unknown_feedback_id_is_404() {
    let app = router();
    let uri = format!("/feedback/{}", uuid::Uuid::new_v4());
    let (status, body) = send(&app, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "error": "Feedback not found" }));
    let (status, _) = send(&app, Method::PUT, "/feedback/not-an-id", Some(json!({ "feedback": "x" }))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn form_is_served_and_its_submission_accepted() {
    let app = router();
    seed(&app).await;
    send(&app, Method::POST, "/students/a@x.com/enroll", Some(json!({ "courseCode": "CS101" }))).await;

    let req = Request::builder().uri("/feedback/form").body(Body::empty()).unwrap();
    let (status, html) = call(&app, req).await;
    assert_eq!(status, StatusCode::OK);
    assert!(String::from_utf8(html).unwrap().contains("<form"));

    let req = Request::builder()
        .method(Method::POST)
        .uri("/feedback")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from("studentEmail=a%40x.com&courseCode=CS101&feedback=Loved+it"))
        .unwrap();
    let (status, bytes) = call(&app, req).await;
    assert_eq!(status, StatusCode::CREATED);
    let fb: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(fb["feedback"], "Loved it");
    assert_eq!(fb["studentEmail"], "a@x.com");
}

#[tokio::test]
async fn malformed_bodies_are_400_with_error() {
    let app = router();
    let req = Request::builder()
        .method(Method::POST)
        .uri("/courses")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let (status, bytes) = call(&app, req).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn course_without_code_is_stored_once() {
    let app = router();
    let (status, course) = send(&app, Method::POST, "/courses", Some(json!({ "title": "Intro" }))).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(course["code"], "");
    assert_eq!(course["title"], "Intro");

    let (status, body) = send(&app, Method::POST, "/courses", Some(json!({ "title": "Another" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn feedback_without_student_email_is_student_not_found() {
    let app = router();
    seed(&app).await;
    let (status, body) = send(
        &app,
        Method::POST,
        "/feedback",
        Some(json!({ "courseCode": "CS101", "feedback": "x" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "error": "Student not found" }));
}

#[tokio::test]
async fn enroll_without_course_code_is_course_not_found() {
    let app = router();
    seed(&app).await;
    let (status, body) = send(&app, Method::POST, "/students/a@x.com/enroll", Some(json!({}))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "error": "Course not found" }));
}

#[tokio::test]
async fn oversized_body_is_rejected() {
    let app = router();
    let big = "x".repeat(BODY_LIMIT + 1);
    let payload = serde_json::to_vec(&json!({ "code": "BIG", "description": big })).unwrap();
    let req = Request::builder()
        .method(Method::POST)
        .uri("/courses")
        .header(header::CONTENT_TYPE, "application/json")
        .header(header::CONTENT_LENGTH, payload.len())
        .body(Body::from(payload))
        .unwrap();
    let (status, _) = call(&app, req).await;
    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
}

#[tokio::test]
async fn oversized_body_without_length_header_is_rejected() {
    let app = router();
    let big = "x".repeat(BODY_LIMIT + 1);
    let payload = serde_json::to_vec(&json!({ "code": "BIG", "description": big })).unwrap();
    let req = Request::builder()
        .method(Method::POST)
        .uri("/courses")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(payload))
        .unwrap();
    let (status, bytes) = call(&app, req).await;
    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert!(body["error"].is_string());
    let (_, all) = send(&app, Method::GET, "/courses", None).await;
    assert_eq!(all, json!([]));
}

#[tokio::test]
async fn operational_routes() {
    let app = router();
    let (status, body) = send(&app, Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "status": "ok" }));
    let (status, body) = send(&app, Method::GET, "/ready", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "status": "ok", "store": "ok" }));
    let (_, body) = send(&app, Method::GET, "/version", None).await;
    assert_eq!(body["name"], "coursehub");
}
