//! Request body extractors that report rejections as `{"error": ...}` 400 responses.

mod body;
pub use body::{JsonBody, JsonOrForm};
