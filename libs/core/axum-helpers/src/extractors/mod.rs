//! Custom extractors for Axum handlers.
//!
//! Both extractors reject with an [`AppError`](crate::errors::AppError) so
//! every malformed request produces the standard error body.

pub mod json_body;
pub mod validated_json;

pub use json_body::JsonBody;
pub use validated_json::{FieldOrder, ValidatedJson, validation_messages};
