//! In-memory post storage.
//!
//! Used when `STORAGE_BACKEND=memory` and by tests. Data is lost on process
//! restart.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::{Mutex, OwnedMutexGuard};

use crate::data::post_repository::{PostRepository, PostTransaction};
use crate::domain::error::DomainError;
use crate::domain::page::{Page, PageRequest};
use crate::domain::post::{Post, PostId};
use crate::domain::search::PostSearchCriteria;

#[derive(Debug, Clone, Default)]
struct Store {
    last_id: PostId,
    posts: BTreeMap<PostId, Post>,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct InMemoryPostRepository {
    store: Arc<Mutex<Store>>,
}

impl InMemoryPostRepository {
    pub(crate) fn new() -> Self {
        Self::default()
    }
}

/// Holds the store lock for its whole lifetime, so writers are serialized.
/// Changes go to `working` and are published on commit.
pub(crate) struct InMemoryPostTransaction {
    guard: OwnedMutexGuard<Store>,
    working: Store,
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn begin(&self) -> Result<Box<dyn PostTransaction>, DomainError> {
        let guard = Arc::clone(&self.store).lock_owned().await;
        let working = guard.clone();
        Ok(Box::new(InMemoryPostTransaction { guard, working }))
    }

    async fn find_by_id(&self, id: PostId) -> Result<Option<Post>, DomainError> {
        let store = self.store.lock().await;
        Ok(store.posts.get(&id).cloned())
    }

    async fn find_page(
        &self,
        request: PageRequest,
        criteria: &PostSearchCriteria,
    ) -> Result<Page<Post>, DomainError> {
        let store = self.store.lock().await;
        let matching = store
            .posts
            .values()
            .filter(|post| criteria.matches(post));

        let total = matching.clone().count() as u64;
        let offset = usize::try_from(request.offset()).unwrap_or(usize::MAX);
        let content = matching
            .skip(offset)
            .take(request.size() as usize)
            .cloned()
            .collect();

        Ok(Page::new(content, request, total))
    }
}

#[async_trait]
impl PostTransaction for InMemoryPostTransaction {
    async fn find_by_id_for_update(&mut self, id: PostId) -> Result<Option<Post>, DomainError> {
        Ok(self.working.posts.get(&id).cloned())
    }

    async fn save(&mut self, post: &Post) -> Result<PostId, DomainError> {
        match post.id() {
            None => {
                let id = self.working.last_id + 1;
                let stored = Post::restore(
                    id,
                    post.title(),
                    post.content(),
                    post.created_by(),
                    post.created_at(),
                    post.updated_by().map(str::to_string),
                    post.updated_at(),
                )?;
                self.working.last_id = id;
                self.working.posts.insert(id, stored);
                Ok(id)
            }
            Some(id) => match self.working.posts.get_mut(&id) {
                Some(slot) => {
                    *slot = post.clone();
                    Ok(id)
                }
                None => Err(DomainError::post_not_found(id)),
            },
        }
    }

    async fn delete(&mut self, post: &Post) -> Result<(), DomainError> {
        let Some(id) = post.id() else {
            return Err(DomainError::Validation {
                field: "id",
                message: "post was never stored",
            });
        };

        self.working
            .posts
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| DomainError::post_not_found(id))
    }

    async fn commit(self: Box<Self>) -> Result<(), DomainError> {
        let Self { mut guard, working } = *self;
        *guard = working;
        Ok(())
    }
}
