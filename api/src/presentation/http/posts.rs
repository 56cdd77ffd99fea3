use axum::{
    Json, Router,
    extract::State,
    http::Method,
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::application::dto::posts::IngestPostInput;
use crate::application::pagination::Pagination;
use crate::application::use_cases::posts::ingest_posts::IngestPosts;
use crate::application::use_cases::posts::list_posts::ListPosts;
use crate::bootstrap::app_context::AppContext;
use crate::domain::feeds::post::Post as DomainPost;
use crate::presentation::http::error::{ApiError, NoPostException};
use crate::presentation::http::extract::{ApiKeyAuth, PageNumber, PageSize, ValidatedJson};

pub const IGNORE_JWT: &[(Method, &str)] = &[
    (Method::GET, "/api/posts"),
    (Method::POST, "/api/posts/ingest"),
];

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: Uuid,
    pub feed_id: Uuid,
    pub blog: String,
    pub title: String,
    pub link: String,
    pub summary: Option<String>,
    pub thumbnail: Option<String>,
    pub checksum: String,
    pub published_at: chrono::DateTime<chrono::Utc>,
}

impl From<DomainPost> for Post {
    fn from(p: DomainPost) -> Self {
        Post {
            id: p.id,
            feed_id: p.feed_id,
            blog: p.blog,
            title: p.title,
            link: p.link,
            summary: p.summary,
            thumbnail: p.thumbnail,
            checksum: p.checksum,
            published_at: p.published_at,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PostListResponse {
    pub items: Vec<Post>,
    pub total: i64,
    pub page_size: u32,
    pub page_number: u32,
}

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct IngestPostItem {
    #[validate(length(min = 1, max = 300))]
    pub title: String,
    #[validate(url)]
    pub link: String,
    pub summary: Option<String>,
    #[validate(url)]
    pub thumbnail: Option<String>,
    pub published_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct IngestPostsRequest {
    pub feed_id: Uuid,
    #[validate(length(max = 500))]
    #[validate(nested)]
    pub posts: Vec<IngestPostItem>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct IngestPostsResponse {
    pub inserted: u32,
    pub skipped: u32,
}

pub fn routes(ctx: AppContext) -> Router {
    Router::new()
        .route("/posts", get(list_posts))
        .route("/posts/ingest", post(ingest_posts))
        .with_state(ctx)
}

#[utoipa::path(get, path = "/api/posts", tag = "Posts", security(()),
    params(
        ("pageSize" = Option<u32>, Query, description = "Items per page (1..=100, default 10)"),
        ("pageNumber" = Option<u32>, Query, description = "1-based page (default 1)")
    ),
    responses(
        (status = 200, body = PostListResponse),
        (status = 500, description = "No posts on the requested page", body = crate::presentation::http::error::ErrorBody)
    ))]
pub async fn list_posts(
    State(ctx): State<AppContext>,
    size: PageSize,
    number: PageNumber,
) -> Result<Json<PostListResponse>, ApiError> {
    let repo = ctx.post_repo();
    let uc = ListPosts {
        repo: repo.as_ref(),
    };
    let page = uc
        .execute(Pagination::from((size, number)))
        .await?
        .ok_or(NoPostException)?;
    Ok(Json(PostListResponse {
        items: page.items.into_iter().map(Post::from).collect(),
        total: page.total,
        page_size: page.page_size,
        page_number: page.page_number,
    }))
}

#[utoipa::path(post, path = "/api/posts/ingest", tag = "Posts", request_body = IngestPostsRequest,
    security(("api_key" = [])),
    responses(
        (status = 200, body = IngestPostsResponse),
        (status = 401, description = "Missing or invalid API key"),
        (status = 404, description = "Unknown feed")
    ))]
pub async fn ingest_posts(
    State(ctx): State<AppContext>,
    _key: ApiKeyAuth,
    ValidatedJson(req): ValidatedJson<IngestPostsRequest>,
) -> Result<Json<IngestPostsResponse>, ApiError> {
    let feeds = ctx.feed_repo();
    let posts = ctx.post_repo();
    let uc = IngestPosts {
        feeds: feeds.as_ref(),
        posts: posts.as_ref(),
    };
    let items = req
        .posts
        .into_iter()
        .map(|p| IngestPostInput {
            title: p.title,
            link: p.link,
            summary: p.summary,
            thumbnail: p.thumbnail,
            published_at: p.published_at,
        })
        .collect();
    let summary = uc
        .execute(req.feed_id, items)
        .await?
        .ok_or(ApiError::NotFound("feed not found"))?;
    Ok(Json(IngestPostsResponse {
        inserted: summary.inserted,
        skipped: summary.skipped,
    }))
}
