//! Shared error messages used in response bodies.

pub const VALIDATION_FAILED: &str = "validation failed";
pub const INVALID_REQUEST_FORMAT: &str = "invalid request format";
pub const NOT_FOUND_RESOURCE: &str = "resource not found";
