use axum::{
    Extension, Json, Router,
    extract::{Multipart, Path as AxumPath, State},
    http::{HeaderMap, HeaderName, HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::application::use_cases::files::get_file::{GetFile, GetFileOutcome};
use crate::application::use_cases::files::upload_file::UploadFile;
use crate::bootstrap::app_context::AppContext;
use crate::domain::files::UploadFolder;
use crate::presentation::http::error::ApiError;
use crate::presentation::http::extract::UserId;

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UploadFileResponse {
    pub id: Uuid,
    pub url: String,
    pub filename: String,
    pub content_type: Option<String>,
    pub size: i64,
}

#[derive(ToSchema)]
#[allow(dead_code)]
pub struct UploadFileMultipart {
    /// File to upload
    #[schema(value_type = String, format = Binary)]
    file: String,
}

fn upload_route(folder: UploadFolder) -> axum::routing::MethodRouter<AppContext> {
    post(upload_file).layer(Extension(folder))
}

pub fn routes(ctx: AppContext) -> Router {
    Router::new()
        .route("/files/profile", upload_route(UploadFolder::Profile))
        .route("/files/post", upload_route(UploadFolder::Post))
        .route("/files/feed", upload_route(UploadFolder::Feed))
        .route("/files/department", upload_route(UploadFolder::Department))
        .route("/files/:id", get(get_file))
        .with_state(ctx)
}

/// POST /api/files/{folder} (multipart/form-data, field `file`)
#[utoipa::path(
    post,
    path = "/api/files/{folder}",
    tag = "Files",
    params(("folder" = UploadFolder, Path, description = "profile | post | feed | department")),
    request_body(content = UploadFileMultipart, content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "File uploaded", body = UploadFileResponse),
        (status = 400, description = "Missing file field"),
        (status = 413, description = "File too large")
    )
)]
pub async fn upload_file(
    State(ctx): State<AppContext>,
    Extension(folder): Extension<UploadFolder>,
    UserId(user_id): UserId,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<UploadFileResponse>), ApiError> {
    let mut file_bytes: Option<Vec<u8>> = None;
    let mut orig_filename: Option<String> = None;
    let mut content_type: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::Validation(e.body_text()))?
    {
        if field.name() != Some("file") {
            continue;
        }
        orig_filename = field.file_name().map(str::to_string);
        content_type = field.content_type().map(str::to_string);
        let data = field.bytes().await.map_err(|e| {
            if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
                ApiError::PayloadTooLarge {
                    limit: ctx.cfg.upload_max_bytes,
                }
            } else {
                ApiError::Validation(e.body_text())
            }
        })?;
        if data.len() > ctx.cfg.upload_max_bytes {
            return Err(ApiError::PayloadTooLarge {
                limit: ctx.cfg.upload_max_bytes,
            });
        }
        file_bytes = Some(data.to_vec());
    }

    let bytes = file_bytes.ok_or_else(|| ApiError::Validation("file: field is required".into()))?;

    let repo = ctx.files_repo();
    let storage = ctx.storage_port();
    let uc = UploadFile {
        repo: repo.as_ref(),
        storage: storage.as_ref(),
        public_base_url: ctx.cfg.public_base_url.clone(),
    };
    let f = uc
        .execute(user_id, folder, bytes, orig_filename, content_type)
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(UploadFileResponse {
            id: f.id,
            url: f.url,
            filename: f.filename,
            content_type: f.content_type,
            size: f.size,
        }),
    ))
}

/// GET /api/files/{id} -> bytes
#[utoipa::path(
    get,
    path = "/api/files/{id}",
    tag = "Files",
    params(("id" = Uuid, Path, description = "File ID")),
    responses(
        (status = 200, description = "OK", body = Vec<u8>, content_type = "application/octet-stream"),
        (status = 403, description = "Not the owner"),
        (status = 404, description = "Unknown file")
    )
)]
pub async fn get_file(
    State(ctx): State<AppContext>,
    UserId(user_id): UserId,
    AxumPath(id): AxumPath<Uuid>,
) -> Result<Response, ApiError> {
    let repo = ctx.files_repo();
    let storage = ctx.storage_port();
    let uc = GetFile {
        repo: repo.as_ref(),
        storage: storage.as_ref(),
    };
    let file = match uc.execute(user_id, id).await? {
        GetFileOutcome::Found(file) => file,
        GetFileOutcome::NotFound => return Err(ApiError::NotFound("file not found")),
        GetFileOutcome::Forbidden => return Err(ApiError::Forbidden("forbidden")),
    };
    let mut headers = HeaderMap::new();
    let ct = file
        .content_type
        .as_deref()
        .and_then(|ct| HeaderValue::from_str(ct).ok())
        .unwrap_or(HeaderValue::from_static("application/octet-stream"));
    headers.insert(header::CONTENT_TYPE, ct);
    headers.insert(
        HeaderName::from_static("x-content-type-options"),
        HeaderValue::from_static("nosniff"),
    );
    Ok((headers, file.bytes).into_response())
}
