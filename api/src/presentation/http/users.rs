use axum::{Json, Router, extract::State, http::Method, routing::get};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::{Validate, ValidationError};

use crate::application::use_cases::users::find_user_name::FindUserName;
use crate::bootstrap::app_context::AppContext;
use crate::presentation::http::error::ApiError;
use crate::presentation::http::extract::ValidatedQuery;

pub const IGNORE_JWT: &[(Method, &str)] = &[(Method::GET, "/api/users/name")];

#[derive(Debug, Deserialize, Validate, ToSchema, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct FindUserNameDto {
    #[validate(length(min = 1, max = 50), custom(function = "not_blank"))]
    pub user_name: String,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserNameAvailability {
    pub user_name: String,
    pub exists: bool,
}

/// Rejects values that are empty once surrounding whitespace is trimmed.
pub fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

pub fn routes(ctx: AppContext) -> Router {
    Router::new()
        .route("/users/name", get(find_user_name))
        .with_state(ctx)
}

#[utoipa::path(get, path = "/api/users/name", tag = "Users", params(FindUserNameDto), security(()),
    responses((status = 200, body = UserNameAvailability), (status = 400, description = "Invalid user name")))]
pub async fn find_user_name(
    State(ctx): State<AppContext>,
    ValidatedQuery(q): ValidatedQuery<FindUserNameDto>,
) -> Result<Json<UserNameAvailability>, ApiError> {
    let repo = ctx.user_repo();
    let uc = FindUserName {
        repo: repo.as_ref(),
    };
    let out = uc.execute(&q.user_name).await?;
    Ok(Json(UserNameAvailability {
        user_name: out.user_name,
        exists: out.exists,
    }))
}
