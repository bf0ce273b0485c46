use chrono::{DateTime, Utc};
use tracing::{info, instrument, warn};

use crate::data::post_repository::PostRepository;
use crate::domain::error::DomainError;
use crate::domain::page::{Page, PageRequest};
use crate::domain::post::{Post, PostId, PostUpdateRequest};
use crate::domain::search::PostSearchCriteria;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct PostDetail {
    pub(crate) id: PostId,
    pub(crate) title: String,
    pub(crate) content: String,
    pub(crate) created_by: String,
    pub(crate) created_at: DateTime<Utc>,
    pub(crate) updated_by: Option<String>,
    pub(crate) updated_at: Option<DateTime<Utc>>,
}

/// List item shape; content is left out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct PostSummary {
    pub(crate) id: PostId,
    pub(crate) title: String,
    pub(crate) created_by: String,
    pub(crate) created_at: DateTime<Utc>,
    pub(crate) updated_by: Option<String>,
    pub(crate) updated_at: Option<DateTime<Utc>>,
}

pub(crate) struct PostService<R: PostRepository> {
    repo: R,
}

impl<R: PostRepository> PostService<R> {
    pub(crate) fn new(repo: R) -> Self {
        Self { repo }
    }

    #[instrument(skip_all, fields(created_by = %post.created_by()))]
    pub(crate) async fn create_post(&self, post: Post) -> Result<PostId, DomainError> {
        let mut tx = self.repo.begin().await?;
        let id = tx.save(&post).await?;
        tx.commit().await?;

        info!(post_id = id, "post created");
        Ok(id)
    }

    #[instrument(skip(self, req), fields(updated_by = %req.updated_by))]
    pub(crate) async fn update_post(
        &self,
        id: PostId,
        req: PostUpdateRequest,
    ) -> Result<PostId, DomainError> {
        let mut tx = self.repo.begin().await?;
        let mut post = tx
            .find_by_id_for_update(id)
            .await?
            .ok_or_else(|| DomainError::post_not_found(id))?;

        if let Err(err) = post.apply_update(req) {
            warn!(post_id = id, "update rejected: acting user is not the author");
            return Err(err);
        }

        tx.save(&post).await?;
        tx.commit().await?;

        info!(post_id = id, "post updated");
        Ok(id)
    }

    #[instrument(skip(self))]
    pub(crate) async fn delete_post(
        &self,
        id: PostId,
        deleted_by: &str,
    ) -> Result<PostId, DomainError> {
        let mut tx = self.repo.begin().await?;
        let post = tx
            .find_by_id_for_update(id)
            .await?
            .ok_or_else(|| DomainError::post_not_found(id))?;

        if !post.is_owned_by(deleted_by) {
            warn!(post_id = id, "delete rejected: acting user is not the author");
            return Err(DomainError::NotDeletable);
        }

        tx.delete(&post).await?;
        tx.commit().await?;

        info!(post_id = id, "post deleted");
        Ok(id)
    }

    #[instrument(skip(self))]
    pub(crate) async fn get_post(&self, id: PostId) -> Result<PostDetail, DomainError> {
        let post = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::post_not_found(id))?;

        to_detail(post)
    }

    #[instrument(skip(self))]
    pub(crate) async fn find_page(
        &self,
        request: PageRequest,
        criteria: PostSearchCriteria,
    ) -> Result<Page<PostSummary>, DomainError> {
        self.repo
            .find_page(request, &criteria)
            .await?
            .try_map(to_summary)
    }
}

fn stored_id(post: &Post) -> Result<PostId, DomainError> {
    post.id()
        .ok_or_else(|| DomainError::Persistence("stored post has no id".to_string()))
}

fn to_detail(post: Post) -> Result<PostDetail, DomainError> {
    Ok(PostDetail {
        id: stored_id(&post)?,
        title: post.title().to_string(),
        content: post.content().to_string(),
        created_by: post.created_by().to_string(),
        created_at: post.created_at(),
        updated_by: post.updated_by().map(str::to_string),
        updated_at: post.updated_at(),
    })
}

fn to_summary(post: Post) -> Result<PostSummary, DomainError> {
    Ok(PostSummary {
        id: stored_id(&post)?,
        title: post.title().to_string(),
        created_by: post.created_by().to_string(),
        created_at: post.created_at(),
        updated_by: post.updated_by().map(str::to_string),
        updated_at: post.updated_at(),
    })
}
