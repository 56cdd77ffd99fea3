use crate::application::dto::users::ProfileUser;
use crate::application::services::session::{SessionState, is_logged_in};
use crate::application::use_cases::auth::login::{Login as LoginUc, LoginRequest as LoginDto};
use crate::application::use_cases::auth::me::GetMe;
use crate::application::use_cases::auth::register::{
    Register as RegisterUc, RegisterRequest as RegisterDto,
};
use crate::bootstrap::app_context::AppContext;
use crate::domain::users::Role;
use crate::presentation::http::error::ApiError;
use crate::presentation::http::extract::{OptionalUserId, UserId, ValidatedJson};
use axum::{
    Json, Router,
    extract::State,
    http::{HeaderMap, HeaderValue, Method, StatusCode, header},
    routing::{get, post},
};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

pub const IGNORE_JWT: &[(Method, &str)] = &[
    (Method::POST, "/api/auth/register"),
    (Method::POST, "/api/auth/login"),
    (Method::POST, "/api/auth/logout"),
    (Method::GET, "/api/auth/status"),
];

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[validate(email)]
    pub email: String,
    #[validate(
        length(min = 1, max = 50),
        custom(function = "crate::presentation::http::users::not_blank")
    )]
    pub user_name: String,
    #[validate(length(min = 8, max = 128))]
    pub password: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1))]
    pub password: String,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub access_token: String,
    pub user: ProfileUser,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AuthStatusResponse {
    pub is_logged_in: bool,
    pub user: Option<ProfileUser>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    #[serde(default)]
    pub role: Role,
    pub exp: usize,
}

/// Claims verified by the JWT guard for the current request.
#[derive(Debug, Clone)]
pub struct AuthClaims(pub Claims);

pub fn routes(ctx: AppContext) -> Router {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/logout", post(logout))
        .route("/me", get(me))
        .route("/status", get(status))
        .with_state(ctx)
}

#[utoipa::path(post, path = "/api/auth/register", tag = "Auth", request_body = RegisterRequest, security(()), responses(
    (status = 200, body = ProfileUser),
    (status = 409, description = "Email or user name taken")
))]
pub async fn register(
    State(ctx): State<AppContext>,
    ValidatedJson(req): ValidatedJson<RegisterRequest>,
) -> Result<Json<ProfileUser>, ApiError> {
    let repo = ctx.user_repo();
    let uc = RegisterUc {
        repo: repo.as_ref(),
    };
    let dto = RegisterDto {
        email: req.email.trim().to_string(),
        user_name: req.user_name.trim().to_string(),
        password: req.password,
    };
    let user = uc
        .execute(&dto)
        .await?
        .ok_or(ApiError::Conflict("email or user name already registered"))?;
    Ok(Json(ProfileUser::from(user)))
}

#[utoipa::path(post, path = "/api/auth/login", tag = "Auth", request_body = LoginRequest, security(()), responses(
    (status = 200, body = LoginResponse),
    (status = 401, description = "Bad credentials")
))]
pub async fn login(
    State(ctx): State<AppContext>,
    ValidatedJson(req): ValidatedJson<LoginRequest>,
) -> Result<(HeaderMap, Json<LoginResponse>), ApiError> {
    let repo = ctx.user_repo();
    let uc = LoginUc {
        repo: repo.as_ref(),
    };
    let dto = LoginDto {
        email: req.email.trim().to_string(),
        password: req.password,
    };
    let user = uc
        .execute(&dto)
        .await?
        .ok_or(ApiError::Unauthorized("invalid email or password"))?;
    let user = ProfileUser::from(user);
    let token = issue_token(&ctx.cfg.jwt_secret, ctx.cfg.jwt_expires_secs, &user)?;

    let mut headers = HeaderMap::new();
    let cookie = build_access_cookie(&token, ctx.cfg.jwt_expires_secs, ctx.cfg.secure_cookies());
    if let Ok(v) = HeaderValue::from_str(&cookie) {
        headers.insert(header::SET_COOKIE, v);
    }
    tracing::info!(user_id = %user.id, "user_logged_in");

    Ok((
        headers,
        Json(LoginResponse {
            access_token: token,
            user,
        }),
    ))
}

#[utoipa::path(get, path = "/api/auth/me", tag = "Auth", responses(
    (status = 200, body = ProfileUser),
    (status = 401, description = "Missing or invalid token")
))]
pub async fn me(
    State(ctx): State<AppContext>,
    UserId(user_id): UserId,
) -> Result<Json<ProfileUser>, ApiError> {
    let repo = ctx.user_repo();
    let uc = GetMe {
        repo: repo.as_ref(),
    };
    let profile = uc
        .execute(user_id)
        .await?
        .ok_or_else(ApiError::unauthorized)?;
    Ok(Json(profile))
}

#[utoipa::path(get, path = "/api/auth/status", tag = "Auth", security(()), responses(
    (status = 200, body = AuthStatusResponse)
))]
pub async fn status(
    State(ctx): State<AppContext>,
    OptionalUserId(user_id): OptionalUserId,
) -> Result<Json<AuthStatusResponse>, ApiError> {
    let profile = match user_id {
        Some(id) => {
            let repo = ctx.user_repo();
            GetMe {
                repo: repo.as_ref(),
            }
            .execute(id)
            .await?
        }
        None => None,
    };
    let state = SessionState::from_profile(profile);
    Ok(Json(AuthStatusResponse {
        is_logged_in: is_logged_in(&state),
        user: state.user,
    }))
}

#[utoipa::path(post, path = "/api/auth/logout", tag = "Auth", security(()), responses((status = 204)))]
pub async fn logout(State(ctx): State<AppContext>) -> (HeaderMap, StatusCode) {
    let mut headers = HeaderMap::new();
    let cookie = if ctx.cfg.secure_cookies() {
        "access_token=; HttpOnly; Secure; Path=/; Max-Age=0; SameSite=Lax"
    } else {
        "access_token=; HttpOnly; Path=/; Max-Age=0; SameSite=Lax"
    };
    headers.insert(header::SET_COOKIE, HeaderValue::from_static(cookie));
    (headers, StatusCode::NO_CONTENT)
}

// --- Token helpers ---

pub fn issue_token(secret: &str, expires_secs: i64, user: &ProfileUser) -> anyhow::Result<String> {
    let now = chrono::Utc::now().timestamp().max(0) as usize;
    let claims = Claims {
        sub: user.id.to_string(),
        role: user.role,
        exp: now + expires_secs.max(0) as usize,
    };
    let token = jsonwebtoken::encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )?;
    Ok(token)
}

pub fn decode_token(secret: &str, token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
    let data = jsonwebtoken::decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )?;
    Ok(data.claims)
}

/// Authorization header first, then the HttpOnly `access_token` cookie.
pub fn bearer_token(headers: &HeaderMap) -> Option<String> {
    if let Some(t) = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|auth| auth.strip_prefix("Bearer "))
    {
        let t = t.trim();
        if !t.is_empty() {
            return Some(t.to_string());
        }
    }
    headers
        .get(header::COOKIE)
        .and_then(|v| v.to_str().ok())
        .and_then(|cookie_hdr| get_cookie(cookie_hdr, "access_token"))
        .filter(|t| !t.is_empty())
}

fn get_cookie(cookie_header: &str, name: &str) -> Option<String> {
    for part in cookie_header.split(';') {
        let kv = part.trim();
        if let Some((k, v)) = kv.split_once('=') {
            if k.trim() == name {
                return Some(v.trim().to_string());
            }
        }
    }
    None
}

fn build_access_cookie(token: &str, max_age_secs: i64, secure: bool) -> String {
    let secure_attr = if secure { "; Secure" } else { "" };
    format!(
        "access_token={}; HttpOnly{}; Path=/; Max-Age={}; SameSite=Lax",
        token,
        secure_attr,
        max_age_secs.max(0)
    )
}
