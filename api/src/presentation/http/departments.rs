use axum::{Json, Router, extract::State, routing::get};

use crate::application::use_cases::departments::get_tree::GetDepartmentTree;
use crate::bootstrap::app_context::AppContext;
use crate::domain::departments::DepartmentNode;
use crate::presentation::http::error::ApiError;
use crate::presentation::http::extract::UserId;

pub fn routes(ctx: AppContext) -> Router {
    Router::new()
        .route("/departments/tree", get(get_tree))
        .with_state(ctx)
}

#[utoipa::path(get, path = "/api/departments/tree", tag = "Departments", responses(
    (status = 200, body = [DepartmentNode]),
    (status = 401, description = "Missing or invalid token")
))]
pub async fn get_tree(
    State(ctx): State<AppContext>,
    UserId(_user): UserId,
) -> Result<Json<Vec<DepartmentNode>>, ApiError> {
    let repo = ctx.department_repo();
    let uc = GetDepartmentTree {
        repo: repo.as_ref(),
    };
    Ok(Json(uc.execute().await?))
}
