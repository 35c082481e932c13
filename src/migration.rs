//! Create the collection tables. Idempotent: every statement uses IF NOT EXISTS.

use crate::error::{ConfigError, StoreError};
use sqlx::PgPool;

/// Reject anything that is not a plain lowercase SQL identifier, since the schema name is
/// interpolated into DDL and queries.
pub fn validate_schema_name(schema: &str) -> Result<(), ConfigError> {
    let mut chars = schema.chars();
    let valid_start = chars.next().map(|c| c.is_ascii_lowercase() || c == '_').unwrap_or(false);
    if !valid_start || !chars.all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_') {
        return Err(ConfigError::InvalidValue {
            key: "COURSEHUB_SCHEMA",
            message: format!("'{}' is not a plain identifier", schema),
        });
    }
    Ok(())
}

/// Create schema, then the courses, students and feedback tables.
/// `seq` preserves insertion order for list queries; `code` and `email` carry the unique constraints.
pub async fn apply_migrations(pool: &PgPool, schema: &str) -> Result<(), StoreError> {
    sqlx::query(&format!("CREATE SCHEMA IF NOT EXISTS {}", schema))
        .execute(pool)
        .await?;

    let statements = [
        format!(
            r#"
            CREATE TABLE IF NOT EXISTS {}.courses (
                seq BIGSERIAL,
                id UUID PRIMARY KEY,
                code TEXT NOT NULL UNIQUE,
                title TEXT NOT NULL DEFAULT '',
                description TEXT NOT NULL DEFAULT ''
            )
            "#,
            schema
        ),
        format!(
            r#"
            CREATE TABLE IF NOT EXISTS {}.students (
                seq BIGSERIAL,
                id UUID PRIMARY KEY,
                email TEXT NOT NULL UNIQUE,
                name TEXT NOT NULL DEFAULT '',
                enrolled_courses TEXT[] NOT NULL DEFAULT '{{}}'
            )
            "#,
            schema
        ),
        format!(
            r#"
            CREATE TABLE IF NOT EXISTS {}.feedback (
                seq BIGSERIAL,
                id UUID PRIMARY KEY,
                student_email TEXT NOT NULL,
                course_code TEXT NOT NULL,
                feedback TEXT NOT NULL DEFAULT ''
            )
            "#,
            schema
        ),
        format!(
            "CREATE INDEX IF NOT EXISTS feedback_course_code_idx ON {}.feedback (course_code)",
            schema
        ),
    ];
    for ddl in &statements {
        sqlx::query(ddl).execute(pool).await?;
    }
    tracing::info!(schema = %schema, "collections ready");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("coursehub", true)]
    #[case("_private2", true)]
    #[case("", false)]
    #[case("2fast", false)]
    #[case("Course", false)]
    #[case("a; DROP TABLE x", false)]
    fn schema_names(#[case] name: &str, #[case] ok: bool) {
        assert_eq!(validate_schema_name(name).is_ok(), ok);
    }
}
