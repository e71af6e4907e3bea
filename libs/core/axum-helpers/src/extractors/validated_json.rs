//! JSON extractor with automatic validation using the validator crate.

use super::JsonBody;
use crate::errors::AppError;
use axum::extract::{FromRequest, Request};
use serde::de::DeserializeOwned;
use validator::{Validate, ValidationErrors};

/// Declares the order in which field errors are reported.
///
/// `validator` collects field errors in a hash map, so without an explicit
/// order the `details` array would be shuffled between runs. Fields not
/// listed are reported last, alphabetically.
pub trait FieldOrder {
    const FIELDS: &'static [&'static str] = &[];
}

/// JSON extractor that runs [`Validate`] after deserializing.
///
/// Body errors reject like [`JsonBody`]. Validation errors reject with
/// `400 {"error": "validation failed", "details": [...]}` where every
/// violated rule contributes its `message`.
///
/// # Example
/// ```ignore
/// #[derive(Deserialize, Validate)]
/// struct CreateItem {
///     #[validate(length(min = 1, message = "name is required"))]
///     name: String,
/// }
///
/// impl FieldOrder for CreateItem {
///     const FIELDS: &'static [&'static str] = &["name"];
/// }
///
/// async fn create(ValidatedJson(payload): ValidatedJson<CreateItem>) { /* ... */ }
/// ```
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate + FieldOrder,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let JsonBody(data) = JsonBody::<T>::from_request(req, state).await?;

        data.validate()
            .map_err(|e| AppError::Validation(validation_messages(&e, T::FIELDS)))?;

        Ok(ValidatedJson(data))
    }
}

/// Flattens validator field errors into messages, ordered by `order`.
pub fn validation_messages(errors: &ValidationErrors, order: &[&str]) -> Vec<String> {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by_key(|(field, _)| {
        let position = order
            .iter()
            .position(|name| *name == &**field)
            .unwrap_or(usize::MAX);
        (position, field.to_string())
    });

    fields
        .into_iter()
        .flat_map(|(field, errs)| {
            errs.iter()
                .map(|err| match &err.message {
                    Some(message) => message.to_string(),
                    None => format!("{} is invalid", field),
                })
                .collect::<Vec<_>>()
        })
        .collect()
}
