use std::collections::HashSet;
use std::sync::Arc;

use axum::{
    extract::{MatchedPath, Request, State},
    http::Method,
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::presentation::http::auth::{AuthClaims, bearer_token, decode_token};
use crate::presentation::http::error::ApiError;

/// Routes that skip JWT enforcement, keyed by method and matched route path.
#[derive(Clone, Debug, Default)]
pub struct IgnoreJwt {
    routes: Arc<HashSet<(Method, String)>>,
}

impl IgnoreJwt {
    pub fn new<'a>(routes: impl IntoIterator<Item = &'a (Method, &'a str)>) -> Self {
        Self {
            routes: Arc::new(
                routes
                    .into_iter()
                    .map(|(m, p)| (m.clone(), p.to_string()))
                    .collect(),
            ),
        }
    }

    pub fn is_ignored(&self, method: &Method, path: &str) -> bool {
        self.routes.contains(&(method.clone(), path.to_string()))
    }
}

#[derive(Clone)]
pub struct JwtGuard {
    jwt_secret: Arc<str>,
    ignore: IgnoreJwt,
}

impl JwtGuard {
    pub fn new(jwt_secret: &str, ignore: IgnoreJwt) -> Self {
        Self {
            jwt_secret: Arc::from(jwt_secret),
            ignore,
        }
    }
}

/// Rejects requests without a valid token unless the matched route is in the
/// ignore table. Verified claims are stored in request extensions either way.
pub async fn jwt_guard(State(guard): State<JwtGuard>, mut req: Request, next: Next) -> Response {
    let ignored = req
        .extensions()
        .get::<MatchedPath>()
        .is_some_and(|p| guard.ignore.is_ignored(req.method(), p.as_str()));

    match bearer_token(req.headers()).map(|t| decode_token(&guard.jwt_secret, &t)) {
        Some(Ok(claims)) => {
            req.extensions_mut().insert(AuthClaims(claims));
        }
        Some(Err(err)) if !ignored => {
            tracing::debug!(error = %err, uri = %req.uri(), "jwt_rejected");
            return ApiError::unauthorized().into_response();
        }
        None if !ignored => return ApiError::unauthorized().into_response(),
        _ => {}
    }
    next.run(req).await
}
