pub mod auth;
pub mod departments;
pub mod error;
pub mod extract;
pub mod feeds;
pub mod files;
pub mod guard;
pub mod health;
pub mod posts;
pub mod throttle;
pub mod users;

use axum::{Router, middleware};

use crate::bootstrap::app_context::AppContext;
use guard::{IgnoreJwt, JwtGuard, jwt_guard};

/// Every API route served from the shared `AppContext`, mounted under `/api`.
pub fn routes(ctx: AppContext) -> Router {
    Router::new()
        .nest("/api/auth", auth::routes(ctx.clone()))
        .nest("/api", users::routes(ctx.clone()))
        .nest("/api", feeds::routes(ctx.clone()))
        .nest("/api", posts::routes(ctx.clone()))
        .nest("/api", departments::routes(ctx.clone()))
        .nest("/api", files::routes(ctx))
}

/// Routes reachable without a token.
pub fn ignore_jwt() -> IgnoreJwt {
    IgnoreJwt::new(
        auth::IGNORE_JWT
            .iter()
            .chain(users::IGNORE_JWT)
            .chain(feeds::IGNORE_JWT)
            .chain(posts::IGNORE_JWT)
            .chain(health::IGNORE_JWT),
    )
}

/// Applies the JWT guard to every route currently in `router`.
pub fn protect(router: Router, jwt_secret: &str) -> Router {
    router.layer(middleware::from_fn_with_state(
        JwtGuard::new(jwt_secret, ignore_jwt()),
        jwt_guard,
    ))
}
