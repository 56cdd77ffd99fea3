use axum::{Json, Router, extract::State, http::Method, routing::get};
use serde::Serialize;
use sqlx::PgPool;
use utoipa::ToSchema;

pub const IGNORE_JWT: &[(Method, &str)] = &[(Method::GET, "/api/health")];

#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResp {
    /// `ok` when the database answers, `degraded` otherwise.
    pub status: &'static str,
    pub database: bool,
    pub version: &'static str,
}

#[utoipa::path(
    get,
    path = "/api/health",
    tag = "Health",
    security(()),
    responses((status = 200, body = HealthResp))
)]
pub async fn health(State(pool): State<PgPool>) -> Json<HealthResp> {
    let database = match sqlx::query_scalar::<_, i32>("SELECT 1").fetch_one(&pool).await {
        Ok(_) => true,
        Err(err) => {
            tracing::warn!(error = ?err, "health_db_unreachable");
            false
        }
    };
    Json(HealthResp {
        status: if database { "ok" } else { "degraded" },
        database,
        version: env!("CARGO_PKG_VERSION"),
    })
}

pub fn routes(pool: PgPool) -> Router {
    Router::new().route("/health", get(health)).with_state(pool)
}
