//! PostgreSQL backend. Collections are tables in a schema chosen by config (default `coursehub`).

use super::{DocumentStore, COURSES, FEEDBACK, STUDENTS};
use crate::error::StoreError;
use crate::model::{Course, CourseFields, Feedback, NewCourse, NewFeedback, NewStudent, Student};
use async_trait::async_trait;
use sqlx::postgres::{PgConnectOptions, PgConnection};
use sqlx::{ConnectOptions, PgPool};
use std::str::FromStr;
use uuid::Uuid;

const COURSE_COLUMNS: &str = "id, code, title, description";
const STUDENT_COLUMNS: &str = "id, email, name, enrolled_courses";
const FEEDBACK_COLUMNS: &str = "id, student_email, course_code, feedback";

#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
    schema: String,
}

impl PgStore {
    /// Wrap an existing pool. Tables must already exist (see [`crate::migration::apply_migrations`]).
    pub fn new(pool: PgPool, schema: impl Into<String>) -> Self {
        PgStore {
            pool,
            schema: schema.into(),
        }
    }

    /// Schema-qualified table name, e.g. "coursehub.courses".
    fn table(&self, collection: &str) -> String {
        format!("{}.{}", self.schema, collection)
    }
}

/// Map a unique-constraint violation onto [`StoreError::Duplicate`]; everything else stays a db error.
fn unique_or_db(err: sqlx::Error, collection: &'static str, field: &'static str, value: &str) -> StoreError {
    if let sqlx::Error::Database(db) = &err {
        if db.is_unique_violation() {
            return StoreError::Duplicate {
                collection,
                field,
                value: value.to_string(),
            };
        }
    }
    StoreError::Db(err)
}

#[async_trait]
impl DocumentStore for PgStore {
    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").fetch_optional(&self.pool).await?;
        Ok(())
    }

    async fn insert_course(&self, course: NewCourse) -> Result<Course, StoreError> {
        let sql = format!(
            "INSERT INTO {} (id, code, title, description) VALUES ($1, $2, $3, $4) RETURNING {}",
            self.table(COURSES),
            COURSE_COLUMNS
        );
        tracing::debug!(sql = %sql, code = %course.code, "query");
        sqlx::query_as::<_, Course>(&sql)
            .bind(Uuid::new_v4())
            .bind(&course.code)
            .bind(&course.title)
            .bind(&course.description)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| unique_or_db(e, COURSES, "code", &course.code))
    }

    async fn list_courses(&self) -> Result<Vec<Course>, StoreError> {
        let sql = format!("SELECT {} FROM {} ORDER BY seq", COURSE_COLUMNS, self.table(COURSES));
        tracing::debug!(sql = %sql, "query");
        Ok(sqlx::query_as::<_, Course>(&sql).fetch_all(&self.pool).await?)
    }

    async fn find_course(&self, code: &str) -> Result<Option<Course>, StoreError> {
        let sql = format!("SELECT {} FROM {} WHERE code = $1", COURSE_COLUMNS, self.table(COURSES));
        tracing::debug!(sql = %sql, code = %code, "query");
        Ok(sqlx::query_as::<_, Course>(&sql)
            .bind(code)
            .fetch_optional(&self.pool)
            .await?)
    }

    async fn replace_course(&self, code: &str, fields: CourseFields) -> Result<Option<Course>, StoreError> {
        let sql = format!(
            "UPDATE {} SET title = $2, description = $3 WHERE code = $1 RETURNING {}",
            self.table(COURSES),
            COURSE_COLUMNS
        );
        tracing::debug!(sql = %sql, code = %code, "query");
        Ok(sqlx::query_as::<_, Course>(&sql)
            .bind(code)
            .bind(&fields.title)
            .bind(&fields.description)
            .fetch_optional(&self.pool)
            .await?)
    }

    async fn delete_course(&self, code: &str) -> Result<Option<Course>, StoreError> {
        let sql = format!(
            "DELETE FROM {} WHERE code = $1 RETURNING {}",
            self.table(COURSES),
            COURSE_COLUMNS
        );
        tracing::debug!(sql = %sql, code = %code, "query");
        Ok(sqlx::query_as::<_, Course>(&sql)
            .bind(code)
            .fetch_optional(&self.pool)
            .await?)
    }

    async fn insert_student(&self, student: NewStudent) -> Result<Student, StoreError> {
        let sql = format!(
            "INSERT INTO {} (id, email, name, enrolled_courses) VALUES ($1, $2, $3, $4) RETURNING {}",
            self.table(STUDENTS),
            STUDENT_COLUMNS
        );
        tracing::debug!(sql = %sql, email = %student.email, "query");
        sqlx::query_as::<_, Student>(&sql)
            .bind(Uuid::new_v4())
            .bind(&student.email)
            .bind(&student.name)
            .bind(student.enrolled_courses.as_slice())
            .fetch_one(&self.pool)
            .await
            .map_err(|e| unique_or_db(e, STUDENTS, "email", &student.email))
    }

    async fn list_students(&self) -> Result<Vec<Student>, StoreError> {
        let sql = format!("SELECT {} FROM {} ORDER BY seq", STUDENT_COLUMNS, self.table(STUDENTS));
        tracing::debug!(sql = %sql, "query");
        Ok(sqlx::query_as::<_, Student>(&sql).fetch_all(&self.pool).await?)
    }

    async fn find_student(&self, email: &str) -> Result<Option<Student>, StoreError> {
        let sql = format!("SELECT {} FROM {} WHERE email = $1", STUDENT_COLUMNS, self.table(STUDENTS));
        tracing::debug!(sql = %sql, email = %email, "query");
        Ok(sqlx::query_as::<_, Student>(&sql)
            .bind(email)
            .fetch_optional(&self.pool)
            .await?)
    }

    async fn save_enrollments(&self, email: &str, courses: &[String]) -> Result<Option<Student>, StoreError> {
        let sql = format!(
            "UPDATE {} SET enrolled_courses = $2 WHERE email = $1 RETURNING {}",
            self.table(STUDENTS),
            STUDENT_COLUMNS
        );
        tracing::debug!(sql = %sql, email = %email, "query");
        Ok(sqlx::query_as::<_, Student>(&sql)
            .bind(email)
            .bind(courses)
            .fetch_optional(&self.pool)
            .await?)
    }

    async fn insert_feedback(&self, feedback: NewFeedback) -> Result<Feedback, StoreError> {
        let sql = format!(
            "INSERT INTO {} (id, student_email, course_code, feedback) VALUES ($1, $2, $3, $4) RETURNING {}",
            self.table(FEEDBACK),
            FEEDBACK_COLUMNS
        );
        tracing::debug!(sql = %sql, course_code = %feedback.course_code, "query");
        Ok(sqlx::query_as::<_, Feedback>(&sql)
            .bind(Uuid::new_v4())
            .bind(&feedback.student_email)
            .bind(&feedback.course_code)
            .bind(&feedback.feedback)
            .fetch_one(&self.pool)
            .await?)
    }

    async fn feedback_for_course(&self, course_code: &str) -> Result<Vec<Feedback>, StoreError> {
        let sql = format!(
            "SELECT {} FROM {} WHERE course_code = $1 ORDER BY seq",
            FEEDBACK_COLUMNS,
            self.table(FEEDBACK)
        );
        tracing::debug!(sql = %sql, course_code = %course_code, "query");
        Ok(sqlx::query_as::<_, Feedback>(&sql)
            .bind(course_code)
            .fetch_all(&self.pool)
            .await?)
    }

    async fn update_feedback(&self, id: Uuid, text: &str) -> Result<Option<Feedback>, StoreError> {
        let sql = format!(
            "UPDATE {} SET feedback = $2 WHERE id = $1 RETURNING {}",
            self.table(FEEDBACK),
            FEEDBACK_COLUMNS
        );
        tracing::debug!(sql = %sql, id = %id, "query");
        Ok(sqlx::query_as::<_, Feedback>(&sql)
            .bind(id)
            .bind(text)
            .fetch_optional(&self.pool)
            .await?)
    }

    async fn delete_feedback(&self, id: Uuid) -> Result<Option<Feedback>, StoreError> {
        let sql = format!(
            "DELETE FROM {} WHERE id = $1 RETURNING {}",
            self.table(FEEDBACK),
            FEEDBACK_COLUMNS
        );
        tracing::debug!(sql = %sql, id = %id, "query");
        Ok(sqlx::query_as::<_, Feedback>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?)
    }
}

/// Connect options for the maintenance `postgres` database, plus the database name the
/// url points at (if any). Host, credentials and TLS settings carry over unchanged.
fn admin_options(database_url: &str) -> Result<(PgConnectOptions, Option<String>), StoreError> {
    let opts = PgConnectOptions::from_str(database_url)?;
    let db_name = opts.get_database().map(str::to_string);
    Ok((opts.database("postgres"), db_name))
}

/// Create the database named in `database_url` when it does not exist yet. Runs CREATE DATABASE
/// over a connection to `postgres`; call before opening the main pool.
pub async fn ensure_database_exists(database_url: &str) -> Result<(), StoreError> {
    let (admin, db_name) = admin_options(database_url)?;
    let db_name = match db_name {
        Some(name) if !name.is_empty() && name != "postgres" => name,
        _ => return Ok(()),
    };
    let mut conn: PgConnection = admin.connect().await?;
    let exists: (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM pg_database WHERE datname = $1)")
        .bind(&db_name)
        .fetch_one(&mut conn)
        .await?;
    if !exists.0 {
        tracing::info!(database = %db_name, "creating database");
        sqlx::query(&format!("CREATE DATABASE {}", quote_ident(&db_name)))
            .execute(&mut conn)
            .await?;
    }
    Ok(())
}

fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}
