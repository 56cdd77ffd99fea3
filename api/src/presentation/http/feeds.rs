use axum::{
    Json, Router,
    extract::State,
    http::{HeaderValue, Method, StatusCode, header},
    response::{IntoResponse, Response},
    routing::get,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::application::pagination::Pagination;
use crate::application::ports::feed_repository::NewFeed;
use crate::application::services::rss::RssChannel;
use crate::application::use_cases::feeds::list_feeds::ListFeeds;
use crate::application::use_cases::feeds::register_feed::RegisterFeed;
use crate::application::use_cases::feeds::render_rss::RenderRss;
use crate::bootstrap::app_context::AppContext;
use crate::domain::feeds::feed::Feed as DomainFeed;
use crate::presentation::http::error::ApiError;
use crate::presentation::http::extract::{PageNumber, PageSize, ValidatedJson};

pub const IGNORE_JWT: &[(Method, &str)] = &[
    (Method::POST, "/api/feeds"),
    (Method::GET, "/api/feeds"),
    (Method::GET, "/api/feeds/rss"),
];

/// Feed registration request submitted by a blog owner.
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FeedDto {
    #[validate(length(min = 1, max = 100))]
    pub blog: String,
    #[validate(length(min = 1, max = 50))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    #[validate(url)]
    pub rss_url: String,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Feed {
    pub id: Uuid,
    pub blog: String,
    pub name: String,
    pub rss_url: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl From<DomainFeed> for Feed {
    fn from(f: DomainFeed) -> Self {
        Feed {
            id: f.id,
            blog: f.blog,
            name: f.name,
            rss_url: f.rss_url,
            created_at: f.created_at,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FeedListResponse {
    pub items: Vec<Feed>,
    pub total: i64,
    pub page_size: u32,
    pub page_number: u32,
}

pub fn routes(ctx: AppContext) -> Router {
    Router::new()
        .route("/feeds", get(list_feeds).post(register_feed))
        .route("/feeds/rss", get(rss))
        .with_state(ctx)
}

#[utoipa::path(post, path = "/api/feeds", tag = "Feeds", request_body = FeedDto, security(()), responses(
    (status = 201, body = Feed),
    (status = 400, description = "Invalid feed"),
    (status = 409, description = "RSS URL already registered")
))]
pub async fn register_feed(
    State(ctx): State<AppContext>,
    ValidatedJson(dto): ValidatedJson<FeedDto>,
) -> Result<(StatusCode, Json<Feed>), ApiError> {
    let repo = ctx.feed_repo();
    let uc = RegisterFeed {
        repo: repo.as_ref(),
    };
    let created = uc
        .execute(NewFeed {
            blog: dto.blog,
            name: dto.name,
            email: dto.email,
            rss_url: dto.rss_url,
        })
        .await?
        .ok_or(ApiError::Conflict("rss url already registered"))?;
    Ok((StatusCode::CREATED, Json(created.into())))
}

#[utoipa::path(get, path = "/api/feeds", tag = "Feeds", security(()),
    params(
        ("pageSize" = Option<u32>, Query, description = "Items per page (1..=100, default 10)"),
        ("pageNumber" = Option<u32>, Query, description = "1-based page (default 1)")
    ),
    responses((status = 200, body = FeedListResponse)))]
pub async fn list_feeds(
    State(ctx): State<AppContext>,
    size: PageSize,
    number: PageNumber,
) -> Result<Json<FeedListResponse>, ApiError> {
    let repo = ctx.feed_repo();
    let uc = ListFeeds {
        repo: repo.as_ref(),
    };
    let page = uc.execute(Pagination::from((size, number))).await?;
    Ok(Json(FeedListResponse {
        items: page.items.into_iter().map(Feed::from).collect(),
        total: page.total,
        page_size: page.page_size,
        page_number: page.page_number,
    }))
}

#[utoipa::path(get, path = "/api/feeds/rss", tag = "Feeds", security(()), responses(
    (status = 200, description = "RSS 2.0 document", content_type = "application/rss+xml", body = String)
))]
pub async fn rss(State(ctx): State<AppContext>) -> Result<Response, ApiError> {
    let repo = ctx.post_repo();
    let uc = RenderRss {
        repo: repo.as_ref(),
        channel: RssChannel {
            title: ctx.cfg.rss_title.clone(),
            link: ctx.cfg.rss_link.clone(),
            description: format!("Latest posts collected by {}", ctx.cfg.rss_title),
        },
    };
    let xml = uc.execute().await?;
    let mut resp = xml.into_response();
    resp.headers_mut().insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("application/rss+xml; charset=utf-8"),
    );
    Ok(resp)
}
