use std::sync::Arc;

use crate::application::post_service::PostService;
use crate::data::post_repository::PostRepository;

pub(crate) mod app_error;
pub(crate) mod handlers;
pub(crate) mod http_handlers;
pub(crate) mod middleware;
pub(crate) mod openapi;
pub(crate) mod routes;

pub(crate) type SharedPostService = Arc<PostService<Arc<dyn PostRepository>>>;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) post_service: SharedPostService,
}

impl AppState {
    pub(crate) fn new(repo: Arc<dyn PostRepository>) -> Self {
        Self {
            post_service: Arc::new(PostService::new(repo)),
        }
    }
}
