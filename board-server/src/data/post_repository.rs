use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::error::DomainError;
use crate::domain::page::{Page, PageRequest};
use crate::domain::post::{Post, PostId};
use crate::domain::search::PostSearchCriteria;

/// Storage port for posts.
///
/// Reads go straight to storage. Writes happen inside a [`PostTransaction`]
/// obtained from [`PostRepository::begin`], so that load, check and write
/// are applied as one unit.
#[async_trait]
pub(crate) trait PostRepository: Send + Sync {
    async fn begin(&self) -> Result<Box<dyn PostTransaction>, DomainError>;

    async fn find_by_id(&self, id: PostId) -> Result<Option<Post>, DomainError>;

    /// Posts matching `criteria`, ordered by id ascending.
    async fn find_page(
        &self,
        request: PageRequest,
        criteria: &PostSearchCriteria,
    ) -> Result<Page<Post>, DomainError>;
}

/// A unit of work against post storage.
///
/// Dropping the transaction without calling [`PostTransaction::commit`]
/// discards every change made through it.
#[async_trait]
pub(crate) trait PostTransaction: Send {
    /// Loads a post and locks it against concurrent writers until the
    /// transaction ends.
    async fn find_by_id_for_update(&mut self, id: PostId) -> Result<Option<Post>, DomainError>;

    /// Inserts a post without id, or overwrites the mutable fields of a
    /// stored one. Returns the id.
    async fn save(&mut self, post: &Post) -> Result<PostId, DomainError>;

    async fn delete(&mut self, post: &Post) -> Result<(), DomainError>;

    async fn commit(self: Box<Self>) -> Result<(), DomainError>;
}

#[async_trait]
impl<R> PostRepository for Arc<R>
where
    R: PostRepository + ?Sized,
{
    async fn begin(&self) -> Result<Box<dyn PostTransaction>, DomainError> {
        (**self).begin().await
    }

    async fn find_by_id(&self, id: PostId) -> Result<Option<Post>, DomainError> {
        (**self).find_by_id(id).await
    }

    async fn find_page(
        &self,
        request: PageRequest,
        criteria: &PostSearchCriteria,
    ) -> Result<Page<Post>, DomainError> {
        (**self).find_page(request, criteria).await
    }
}
