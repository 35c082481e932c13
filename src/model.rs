//! Stored records and per-endpoint request bodies.
//!
//! Records serialize with camelCase keys. Request structs name every field
//! they accept; anything else in a body is ignored. Missing fields, identity
//! fields included, deserialize as empty strings and the store decides what happens.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    pub id: Uuid,
    pub code: String,
    pub title: String,
    pub description: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub enrolled_courses: Vec<String>,
}

impl Student {
    pub fn is_enrolled_in(&self, course_code: &str) -> bool {
        self.enrolled_courses.iter().any(|c| c == course_code)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Feedback {
    pub id: Uuid,
    pub student_email: String,
    pub course_code: String,
    pub feedback: String,
}

/// POST /courses
#[derive(Clone, Debug, Deserialize)]
pub struct NewCourse {
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
}

/// PUT /courses/:code. The code comes from the path.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct CourseFields {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
}

/// POST /students
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewStudent {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub enrolled_courses: Vec<String>,
}

/// POST /students/:email/enroll
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrollRequest {
    #[serde(default)]
    pub course_code: String,
}

/// POST /feedback, as JSON or as the urlencoded HTML form.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewFeedback {
    #[serde(default)]
    pub student_email: String,
    #[serde(default)]
    pub course_code: String,
    #[serde(default)]
    pub feedback: String,
}

/// PUT /feedback/:id
#[derive(Clone, Debug, Default, Deserialize)]
pub struct FeedbackText {
    #[serde(default)]
    pub feedback: String,
}

#[derive(Debug, Serialize)]
pub struct Message {
    pub message: &'static str,
}
