//! In-process backend with the same uniqueness rules as PostgreSQL. Vectors keep insertion order.

use super::{DocumentStore, COURSES, STUDENTS};
use crate::error::StoreError;
use crate::model::{Course, CourseFields, Feedback, NewCourse, NewFeedback, NewStudent, Student};
use async_trait::async_trait;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use uuid::Uuid;

#[derive(Default)]
struct Collections {
    courses: Vec<Course>,
    students: Vec<Student>,
    feedback: Vec<Feedback>,
}

#[derive(Default)]
pub struct MemoryStore {
    inner: RwLock<Collections>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Collections>, StoreError> {
        self.inner
            .read()
            .map_err(|_| StoreError::Unavailable("memory store lock poisoned".into()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Collections>, StoreError> {
        self.inner
            .write()
            .map_err(|_| StoreError::Unavailable("memory store lock poisoned".into()))
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn ping(&self) -> Result<(), StoreError> {
        self.read().map(|_| ())
    }

    async fn insert_course(&self, course: NewCourse) -> Result<Course, StoreError> {
        let mut db = self.write()?;
        if db.courses.iter().any(|c| c.code == course.code) {
            return Err(StoreError::Duplicate {
                collection: COURSES,
                field: "code",
                value: course.code,
            });
        }
        let stored = Course {
            id: Uuid::new_v4(),
            code: course.code,
            title: course.title,
            description: course.description,
        };
        db.courses.push(stored.clone());
        Ok(stored)
    }

    async fn list_courses(&self) -> Result<Vec<Course>, StoreError> {
        Ok(self.read()?.courses.clone())
    }

    async fn find_course(&self, code: &str) -> Result<Option<Course>, StoreError> {
        Ok(self.read()?.courses.iter().find(|c| c.code == code).cloned())
    }

    async fn replace_course(&self, code: &str, fields: CourseFields) -> Result<Option<Course>, StoreError> {
        let mut db = self.write()?;
        Ok(db.courses.iter_mut().find(|c| c.code == code).map(|c| {
            c.title = fields.title;
            c.description = fields.description;
            c.clone()
        }))
    }

    async fn delete_course(&self, code: &str) -> Result<Option<Course>, StoreError> {
        let mut db = self.write()?;
        let pos = db.courses.iter().position(|c| c.code == code);
        Ok(pos.map(|i| db.courses.remove(i)))
    }

    async fn insert_student(&self, student: NewStudent) -> Result<Student, StoreError> {
        let mut db = self.write()?;
        if db.students.iter().any(|s| s.email == student.email) {
            return Err(StoreError::Duplicate {
                collection: STUDENTS,
                field: "email",
                value: student.email,
            });
        }
        let stored = Student {
            id: Uuid::new_v4(),
            email: student.email,
            name: student.name,
            enrolled_courses: student.enrolled_courses,
        };
        db.students.push(stored.clone());
        Ok(stored)
    }

    async fn list_students(&self) -> Result<Vec<Student>, StoreError> {
        Ok(self.read()?.students.clone())
    }

    async fn find_student(&self, email: &str) -> Result<Option<Student>, StoreError> {
        Ok(self.read()?.students.iter().find(|s| s.email == email).cloned())
    }

    async fn save_enrollments(&self, email: &str, courses: &[String]) -> Result<Option<Student>, StoreError> {
        let mut db = self.write()?;
        Ok(db.students.iter_mut().find(|s| s.email == email).map(|s| {
            s.enrolled_courses = courses.to_vec();
            s.clone()
        }))
    }

    async fn insert_feedback(&self, feedback: NewFeedback) -> Result<Feedback, StoreError> {
        let stored = Feedback {
            id: Uuid::new_v4(),
            student_email: feedback.student_email,
            course_code: feedback.course_code,
            feedback: feedback.feedback,
        };
        self.write()?.feedback.push(stored.clone());
        Ok(stored)
    }

    async fn feedback_for_course(&self, course_code: &str) -> Result<Vec<Feedback>, StoreError> {
        Ok(self
            .read()?
            .feedback
            .iter()
            .filter(|f| f.course_code == course_code)
            .cloned()
            .collect())
    }

    async fn update_feedback(&self, id: Uuid, text: &str) -> Result<Option<Feedback>, StoreError> {
        let mut db = self.write()?;
        Ok(db.feedback.iter_mut().find(|f| f.id == id).map(|f| {
            f.feedback = text.to_string();
            f.clone()
        }))
    }

    async fn delete_feedback(&self, id: Uuid) -> Result<Option<Feedback>, StoreError> {
        let mut db = self.write()?;
        let pos = db.feedback.iter().position(|f| f.id == id);
        Ok(pos.map(|i| db.feedback.remove(i)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn course(code: &str, title: &str) -> NewCourse {
        NewCourse {
            code: code.into(),
            title: title.into(),
            description: String::new(),
        }
    }

    #[tokio::test]
    async fn duplicate_code_keeps_the_first_record() {
        let store = MemoryStore::new();
        store.insert_course(course("CS101", "Intro")).await.unwrap();
        let err = store.insert_course(course("CS101", "Other")).await.unwrap_err();
        assert!(matches!(err, StoreError::Duplicate { field: "code", .. }));
        let stored = store.find_course("CS101").await.unwrap().unwrap();
        assert_eq!(stored.title, "Intro");
        assert_eq!(store.list_courses().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn lists_keep_insertion_order() {
        let store = MemoryStore::new();
        for code in ["B2", "A1", "C3"] {
            store.insert_course(course(code, "")).await.unwrap();
        }
        let codes: Vec<String> = store.list_courses().await.unwrap().into_iter().map(|c| c.code).collect();
        assert_eq!(codes, ["B2", "A1", "C3"]);
    }

    #[tokio::test]
    async fn point_writes_miss_cleanly() {
        let store = MemoryStore::new();
        assert!(store.replace_course("NOPE", CourseFields::default()).await.unwrap().is_none());
        assert!(store.delete_course("NOPE").await.unwrap().is_none());
        assert!(store.save_enrollments("nobody@x.com", &[]).await.unwrap().is_none());
        assert!(store.update_feedback(Uuid::new_v4(), "x").await.unwrap().is_none());
        assert!(store.delete_feedback(Uuid::new_v4()).await.unwrap().is_none());
    }
}
