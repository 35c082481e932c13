//! Shared application state for all routes. Every component holds the same store handle.

use crate::service::{CourseDirectory, FeedbackLedger, StudentRoster};
use crate::store::DocumentStore;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn DocumentStore>,
    pub courses: CourseDirectory,
    pub students: StudentRoster,
    pub feedback: FeedbackLedger,
}

impl AppState {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        AppState {
            courses: CourseDirectory::new(store.clone()),
            students: StudentRoster::new(store.clone()),
            feedback: FeedbackLedger::new(store.clone()),
            store,
        }
    }
}
