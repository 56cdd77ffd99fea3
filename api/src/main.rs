use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::{DefaultBodyLimit, MatchedPath};
use axum::middleware;
use dotenvy::dotenv;
use http::{HeaderName, HeaderValue, Method};
use tokio::time::Duration;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::{error, info};
use utoipa::openapi::security::{ApiKey, ApiKeyValue, HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

use api::bootstrap::app_context::{AppContext, AppServices};
use api::bootstrap::config::Config;
use api::infrastructure::db::repositories::{
    department_repository_sqlx::SqlxDepartmentRepository,
    feed_repository_sqlx::SqlxFeedRepository, files_repository_sqlx::SqlxFilesRepository,
    post_repository_sqlx::SqlxPostRepository, user_repository_sqlx::SqlxUserRepository,
};
use api::infrastructure::storage::FsStoragePort;
use api::presentation::http::extract::API_KEY_HEADER;
use api::presentation::http::throttle::{ThrottleLimiter, throttle};

#[derive(OpenApi)]
#[openapi(
        paths(
            api::presentation::http::auth::register,
            api::presentation::http::auth::login,
            api::presentation::http::auth::logout,
            api::presentation::http::auth::me,
            api::presentation::http::auth::status,
            api::presentation::http::users::find_user_name,
            api::presentation::http::feeds::register_feed,
            api::presentation::http::feeds::list_feeds,
            api::presentation::http::feeds::rss,
            api::presentation::http::posts::list_posts,
            api::presentation::http::posts::ingest_posts,
            api::presentation::http::departments::get_tree,
            api::presentation::http::files::upload_file,
            api::presentation::http::files::get_file,
            api::presentation::http::health::health,
        ),
        components(schemas(
            api::presentation::http::auth::RegisterRequest,
            api::presentation::http::auth::LoginRequest,
            api::presentation::http::auth::LoginResponse,
            api::presentation::http::auth::AuthStatusResponse,
            api::application::dto::users::ProfileUser,
            api::domain::users::Role,
            api::presentation::http::users::FindUserNameDto,
            api::presentation::http::users::UserNameAvailability,
            api::presentation::http::feeds::FeedDto,
            api::presentation::http::feeds::Feed,
            api::presentation::http::feeds::FeedListResponse,
            api::presentation::http::posts::Post,
            api::presentation::http::posts::PostListResponse,
            api::presentation::http::posts::IngestPostItem,
            api::presentation::http::posts::IngestPostsRequest,
            api::presentation::http::posts::IngestPostsResponse,
            api::domain::departments::DepartmentNode,
            api::domain::files::UploadFolder,
            api::presentation::http::files::UploadFileResponse,
            api::presentation::http::files::UploadFileMultipart,
            api::presentation::http::error::ErrorBody,
            api::presentation::http::health::HealthResp,
        )),
        modifiers(&SecurityAddon),
        security(("bearer" = [])),
        tags(
            (name = "Auth", description = "Authentication"),
            (name = "Users", description = "User lookups"),
            (name = "Feeds", description = "Feed registration and RSS output"),
            (name = "Posts", description = "Collected posts"),
            (name = "Departments", description = "Department hierarchy"),
            (name = "Files", description = "File uploads"),
            (name = "Health", description = "System health checks")
        )
    )]
struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
            components.add_security_scheme(
                "api_key",
                SecurityScheme::ApiKey(ApiKey::Header(ApiKeyValue::new(API_KEY_HEADER))),
            );
        }
    }
}

fn build_cors(cfg: &Config) -> CorsLayer {
    let base = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::PATCH,
            Method::OPTIONS,
        ])
        .allow_headers([
            http::header::CONTENT_TYPE,
            http::header::AUTHORIZATION,
            HeaderName::from_static(API_KEY_HEADER),
        ]);
    match cfg.frontend_url.as_deref().map(HeaderValue::from_str) {
        Some(Ok(origin)) => base.allow_origin(origin).allow_credentials(true),
        // FRONTEND_URL is mandatory in production, so only a bad value lands here
        _ if cfg.is_production => {
            base.allow_origin(AllowOrigin::exact(HeaderValue::from_static("http://invalid")))
        }
        _ => base
            .allow_origin(AllowOrigin::mirror_request())
            .allow_credentials(true),
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = ?e, "shutdown_signal_failed");
    }
    info!("shutdown_requested");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "api=debug,rssboard=debug,axum=info,tower_http=info".into()),
        )
        .init();

    let cfg = Config::from_env()?;
    info!(
        port = cfg.api_port,
        uploads_dir = %cfg.uploads_dir,
        production = cfg.is_production,
        api_key_configured = cfg.api_key.is_some(),
        "Starting rssboard backend"
    );

    // Database
    let pool =
        api::infrastructure::db::connect_pool(&cfg.database_url, cfg.db_max_connections).await?;
    api::infrastructure::db::migrate(&pool).await?;

    if let Err(e) = tokio::fs::create_dir_all(&cfg.uploads_dir).await {
        tracing::warn!(error = ?e, dir = %cfg.uploads_dir, "Failed to create uploads dir");
    }

    let services = AppServices::new(
        Arc::new(SqlxUserRepository::new(pool.clone())),
        Arc::new(SqlxFeedRepository::new(pool.clone())),
        Arc::new(SqlxPostRepository::new(pool.clone())),
        Arc::new(SqlxDepartmentRepository::new(pool.clone())),
        Arc::new(SqlxFilesRepository::new(pool.clone())),
        Arc::new(FsStoragePort::new(&cfg.uploads_dir)),
    );
    let ctx = AppContext::new(cfg.clone(), services);

    let limiter = ThrottleLimiter::default();
    let cleanup_handle = limiter.spawn_cleanup(Duration::from_secs(60));

    // Guarded API first; docs and static uploads are merged outside the guard
    let api_router = api::presentation::http::routes(ctx.clone())
        .nest("/api", api::presentation::http::health::routes(pool.clone()));
    let app = api::presentation::http::protect(api_router, &cfg.jwt_secret)
        .merge(SwaggerUi::new("/api/docs").url("/api/openapi.json", ApiDoc::openapi()))
        .nest_service("/api/uploads", ServeDir::new(&cfg.uploads_dir))
        .layer(middleware::from_fn_with_state(limiter, throttle))
        .layer(build_cors(&cfg))
        .layer(DefaultBodyLimit::max(cfg.upload_max_bytes))
        .layer(
            TraceLayer::new_for_http().make_span_with(|req: &http::Request<_>| {
                let method = req.method().clone();
                let uri = req.uri().clone();
                let matched = req
                    .extensions()
                    .get::<MatchedPath>()
                    .map(|p| p.as_str().to_string())
                    .unwrap_or_default();
                tracing::info_span!("http", %method, %uri, matched_path = %matched)
            }),
        );

    let api_addr = SocketAddr::from(([0, 0, 0, 0], cfg.api_port));
    info!(%api_addr, "HTTP API listening");
    let listener = tokio::net::TcpListener::bind(api_addr).await?;

    let served = axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await;

    cleanup_handle.abort();
    if let Err(e) = served {
        error!(?e, "API server failed");
        return Err(e.into());
    }
    Ok(())
}
