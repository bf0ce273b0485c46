use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::application::post_service::{PostDetail, PostSummary};
use crate::domain::page::{Page, PageRequest};
use crate::domain::post::{PostCreateRequest, PostId, PostUpdateRequest};
use crate::domain::search::PostSearchCriteria;
use crate::presentation::AppState;
use crate::presentation::app_error::AppResult;

const DEFAULT_PAGE_SIZE: u32 = 20;

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CreatePostDto {
    #[validate(length(min = 1, max = 255))]
    pub(crate) title: String,
    #[validate(length(min = 1))]
    pub(crate) content: String,
    #[validate(length(min = 1, max = 64))]
    pub(crate) created_by: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct UpdatePostDto {
    #[validate(length(min = 1, max = 255))]
    pub(crate) title: String,
    #[validate(length(min = 1))]
    pub(crate) content: String,
    #[validate(length(min = 1, max = 64))]
    pub(crate) updated_by: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct DeletePostQuery {
    #[validate(length(min = 1, max = 64))]
    pub(crate) created_by: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ListPostsQuery {
    pub(crate) page: Option<u32>,
    #[validate(range(min = 1, max = 100))]
    pub(crate) size: Option<u32>,
    pub(crate) title: Option<String>,
    pub(crate) created_by: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct PostIdDto {
    pub(crate) id: i64,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PostDetailDto {
    pub(crate) id: i64,
    pub(crate) title: String,
    pub(crate) content: String,
    pub(crate) created_by: String,
    pub(crate) created_at: DateTime<Utc>,
    pub(crate) updated_by: Option<String>,
    pub(crate) updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PostSummaryDto {
    pub(crate) id: i64,
    pub(crate) title: String,
    pub(crate) created_by: String,
    pub(crate) created_at: DateTime<Utc>,
    pub(crate) updated_by: Option<String>,
    pub(crate) updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PostPageDto {
    pub(crate) content: Vec<PostSummaryDto>,
    pub(crate) page: u32,
    pub(crate) size: u32,
    pub(crate) number_of_elements: usize,
    pub(crate) total_elements: u64,
    pub(crate) total_pages: u64,
    pub(crate) has_next: bool,
    pub(crate) first: bool,
    pub(crate) last: bool,
}

impl From<PostDetail> for PostDetailDto {
    fn from(post: PostDetail) -> Self {
        Self {
            id: post.id,
            title: post.title,
            content: post.content,
            created_by: post.created_by,
            created_at: post.created_at,
            updated_by: post.updated_by,
            updated_at: post.updated_at,
        }
    }
}

impl From<PostSummary> for PostSummaryDto {
    fn from(post: PostSummary) -> Self {
        Self {
            id: post.id,
            title: post.title,
            created_by: post.created_by,
            created_at: post.created_at,
            updated_by: post.updated_by,
            updated_at: post.updated_at,
        }
    }
}

impl From<Page<PostSummary>> for PostPageDto {
    fn from(page: Page<PostSummary>) -> Self {
        let number_of_elements = page.number_of_elements();
        let total_pages = page.total_pages();
        let has_next = page.has_next();
        let first = page.is_first();
        let last = page.is_last();
        Self {
            content: page.content.into_iter().map(PostSummaryDto::from).collect(),
            page: page.page,
            size: page.size,
            number_of_elements,
            total_elements: page.total_elements,
            total_pages,
            has_next,
            first,
            last,
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/posts",
    tag = "posts",
    params(
        ("page" = Option<u32>, Query, description = "Zero-based page index (default 0)"),
        ("size" = Option<u32>, Query, description = "Items per page (1..=100, default 20)"),
        ("title" = Option<String>, Query, description = "Substring the title must contain"),
        ("createdBy" = Option<String>, Query, description = "Exact author")
    ),
    responses(
        (status = 200, description = "Posts listed", body = PostPageDto),
        (status = 400, description = "Validation error"),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn list_posts(
    State(state): State<AppState>,
    Query(query): Query<ListPostsQuery>,
) -> AppResult<(StatusCode, Json<PostPageDto>)> {
    query.validate()?;
    let request = PageRequest::new(
        query.page.unwrap_or(0),
        query.size.unwrap_or(DEFAULT_PAGE_SIZE),
    )?;
    let criteria = PostSearchCriteria::new(query.title, query.created_by);

    let page = state.post_service.find_page(request, criteria).await?;

    Ok((StatusCode::OK, Json(PostPageDto::from(page))))
}

#[utoipa::path(
    get,
    path = "/api/posts/{id}",
    tag = "posts",
    params(
        ("id" = i64, Path, description = "Post id")
    ),
    responses(
        (status = 200, description = "Post found", body = PostDetailDto),
        (status = 404, description = "Post not found"),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn get_post(
    State(state): State<AppState>,
    Path(id): Path<PostId>,
) -> AppResult<(StatusCode, Json<PostDetailDto>)> {
    let post = state.post_service.get_post(id).await?;

    Ok((StatusCode::OK, Json(PostDetailDto::from(post))))
}

#[utoipa::path(
    post,
    path = "/api/posts",
    tag = "posts",
    request_body = CreatePostDto,
    responses(
        (status = 201, description = "Post created", body = PostIdDto),
        (status = 400, description = "Validation error"),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn create_post(
    State(state): State<AppState>,
    Json(dto): Json<CreatePostDto>,
) -> AppResult<(StatusCode, Json<PostIdDto>)> {
    dto.validate()?;
    let post = PostCreateRequest {
        title: dto.title,
        content: dto.content,
        created_by: dto.created_by,
    }
    .into_entity();

    let id = state.post_service.create_post(post).await?;
    Ok((StatusCode::CREATED, Json(PostIdDto { id })))
}

#[utoipa::path(
    put,
    path = "/api/posts/{id}",
    tag = "posts",
    params(
        ("id" = i64, Path, description = "Post id")
    ),
    request_body = UpdatePostDto,
    responses(
        (status = 200, description = "Post updated", body = PostIdDto),
        (status = 400, description = "Validation error"),
        (status = 403, description = "Acting user is not the author"),
        (status = 404, description = "Post not found"),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn update_post(
    State(state): State<AppState>,
    Path(id): Path<PostId>,
    Json(dto): Json<UpdatePostDto>,
) -> AppResult<(StatusCode, Json<PostIdDto>)> {
    dto.validate()?;
    let req = PostUpdateRequest {
        title: dto.title,
        content: dto.content,
        updated_by: dto.updated_by,
    };

    let id = state.post_service.update_post(id, req).await?;
    Ok((StatusCode::OK, Json(PostIdDto { id })))
}

#[utoipa::path(
    delete,
    path = "/api/posts/{id}",
    tag = "posts",
    params(
        ("id" = i64, Path, description = "Post id"),
        ("createdBy" = String, Query, description = "Acting user; must be the author")
    ),
    responses(
        (status = 200, description = "Post deleted", body = PostIdDto),
        (status = 400, description = "Validation error"),
        (status = 403, description = "Acting user is not the author"),
        (status = 404, description = "Post not found"),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn delete_post(
    State(state): State<AppState>,
    Path(id): Path<PostId>,
    Query(query): Query<DeletePostQuery>,
) -> AppResult<(StatusCode, Json<PostIdDto>)> {
    query.validate()?;

    let id = state.post_service.delete_post(id, &query.created_by).await?;
    Ok((StatusCode::OK, Json(PostIdDto { id })))
}
