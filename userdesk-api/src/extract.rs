/// Validating request extractors
///
/// Handlers never see raw input: bodies and path parameters are decoded and
/// checked here, and any failure is rejected as `ApiError::BadRequest` before
/// the handler body (and therefore the database) is reached.
///
/// - [`ValidatedJson`]: `Json<T>` followed by `validator::Validate`
/// - [`ApiPath`]: `Path<T>` with the rejection mapped to `ApiError`
/// - [`NumericPath`]: a single path segment that must read as a finite number
///
/// # Example
///
/// ```
/// use serde::Deserialize;
/// use userdesk_api::extract::{ApiPath, ValidatedJson};
/// use validator::Validate;
///
/// #[derive(Deserialize, Validate)]
/// struct Rename {
///     #[validate(length(min = 1))]
///     name: String,
/// }
///
/// async fn rename(ApiPath(id): ApiPath<u64>, ValidatedJson(body): ValidatedJson<Rename>) {
///     let _ = (id, body.name);
/// }
/// ```

use crate::error::ApiError;
use axum::{
    async_trait,
    extract::{FromRequest, FromRequestParts, Request},
    http::request::Parts,
    Json,
};
use serde::de::DeserializeOwned;
use validator::Validate;

/// JSON body that has passed its `Validate` rules
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        value.validate()?;
        Ok(ValidatedJson(value))
    }
}

/// Path parameters whose parse failures become `ApiError::BadRequest`
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(ApiError))]
pub struct ApiPath<T>(pub T);

/// Path segment parsed as a finite number
///
/// Integer, decimal, signed and exponent forms (`42`, `1.5`, `-1`, `1e3`)
/// are accepted; anything else, `NaN` and infinities included, is a
/// `BadRequest`.
pub struct NumericPath(pub f64);

#[async_trait]
impl<S> FromRequestParts<S> for NumericPath
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let ApiPath(raw) = ApiPath::<String>::from_request_parts(parts, state).await?;
        parse_number(&raw).map(NumericPath)
    }
}

/// Parses `raw` as a finite number
pub fn parse_number(raw: &str) -> Result<f64, ApiError> {
    match raw.trim().parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(ApiError::BadRequest(format!("Expected a number, got {:?}", raw))),
    }
}
