use axum::{
    Json,
    extract::{FromRequest, FromRequestParts, Query, Request},
    http::request::Parts,
};
use serde::{Deserialize, de::DeserializeOwned};
use subtle::ConstantTimeEq;
use uuid::Uuid;
use validator::Validate;

use crate::application::pagination::{
    DEFAULT_PAGE_NUMBER, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE, Pagination,
};
use crate::bootstrap::app_context::AppContext;
use crate::presentation::http::auth::{AuthClaims, Claims, bearer_token, decode_token};
use crate::presentation::http::error::ApiError;

pub const API_KEY_HEADER: &str = "x-api-key";

fn claims_from_parts(parts: &Parts, ctx: &AppContext) -> Option<Claims> {
    if let Some(AuthClaims(claims)) = parts.extensions.get::<AuthClaims>() {
        return Some(claims.clone());
    }
    let token = bearer_token(&parts.headers)?;
    decode_token(&ctx.cfg.jwt_secret, &token).ok()
}

/// Id of the authenticated user, taken from the token subject.
#[derive(Debug, Clone, Copy)]
pub struct UserId(pub Uuid);

#[axum::async_trait]
impl FromRequestParts<AppContext> for UserId {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        ctx: &AppContext,
    ) -> Result<Self, Self::Rejection> {
        let claims = claims_from_parts(parts, ctx).ok_or_else(ApiError::unauthorized)?;
        let id = Uuid::parse_str(&claims.sub).map_err(|_| ApiError::unauthorized())?;
        Ok(UserId(id))
    }
}

/// Like [`UserId`] but never rejects; `None` for anonymous callers.
#[derive(Debug, Clone, Copy, Default)]
pub struct OptionalUserId(pub Option<Uuid>);

#[axum::async_trait]
impl FromRequestParts<AppContext> for OptionalUserId {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        ctx: &AppContext,
    ) -> Result<Self, Self::Rejection> {
        Ok(OptionalUserId(
            claims_from_parts(parts, ctx).and_then(|c| Uuid::parse_str(&c.sub).ok()),
        ))
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawPageQuery {
    page_size: Option<String>,
    page_number: Option<String>,
}

fn raw_page_query(parts: &Parts) -> Result<RawPageQuery, ApiError> {
    match Query::<RawPageQuery>::try_from_uri(&parts.uri) {
        Ok(Query(q)) => Ok(q),
        Err(rej) => Err(ApiError::Validation(rej.body_text())),
    }
}

fn positive_param(raw: Option<&str>, name: &str, default: u32) -> Result<u32, ApiError> {
    let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return Ok(default);
    };
    match raw.parse::<u32>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(ApiError::Validation(format!(
            "{name} must be a positive integer"
        ))),
    }
}

/// `pageSize` query parameter, default 10, capped at 100.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageSize(pub u32);

#[axum::async_trait]
impl<S: Send + Sync> FromRequestParts<S> for PageSize {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let q = raw_page_query(parts)?;
        let n = positive_param(q.page_size.as_deref(), "pageSize", DEFAULT_PAGE_SIZE)?;
        Ok(PageSize(n.min(MAX_PAGE_SIZE)))
    }
}

/// `pageNumber` query parameter, 1-based, default 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageNumber(pub u32);

#[axum::async_trait]
impl<S: Send + Sync> FromRequestParts<S> for PageNumber {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let q = raw_page_query(parts)?;
        let n = positive_param(q.page_number.as_deref(), "pageNumber", DEFAULT_PAGE_NUMBER)?;
        Ok(PageNumber(n))
    }
}

impl From<(PageSize, PageNumber)> for Pagination {
    fn from((PageSize(size), PageNumber(number)): (PageSize, PageNumber)) -> Self {
        Pagination::new(size, number).unwrap_or_default()
    }
}

/// Machine-to-machine access via the `x-api-key` header.
#[derive(Debug, Clone, Copy)]
pub struct ApiKeyAuth;

#[axum::async_trait]
impl FromRequestParts<AppContext> for ApiKeyAuth {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        ctx: &AppContext,
    ) -> Result<Self, Self::Rejection> {
        let Some(expected) = ctx.cfg.api_key.as_deref() else {
            tracing::warn!(uri = %parts.uri, "api_key_not_configured");
            return Err(ApiError::Unauthorized("api key required"));
        };
        let provided = parts
            .headers
            .get(API_KEY_HEADER)
            .and_then(|v| v.to_str().ok())
            .ok_or(ApiError::Unauthorized("api key required"))?;
        if bool::from(provided.as_bytes().ct_eq(expected.as_bytes())) {
            Ok(ApiKeyAuth)
        } else {
            tracing::debug!(uri = %parts.uri, "api_key_rejected");
            Err(ApiError::Unauthorized("invalid api key"))
        }
    }
}

/// JSON body that must pass `validator` rules.
#[derive(Debug, Clone)]
pub struct ValidatedJson<T>(pub T);

#[axum::async_trait]
impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rej| ApiError::Validation(rej.body_text()))?;
        value.validate()?;
        Ok(ValidatedJson(value))
    }
}

/// Query string that must pass `validator` rules.
#[derive(Debug, Clone)]
pub struct ValidatedQuery<T>(pub T);

#[axum::async_trait]
impl<S, T> FromRequestParts<S> for ValidatedQuery<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rej| ApiError::Validation(rej.body_text()))?;
        value.validate()?;
        Ok(ValidatedQuery(value))
    }
}
