use utoipa::OpenApi;

use crate::presentation::handlers::posts::{
    CreatePostDto, DeletePostQuery, ListPostsQuery, PostDetailDto, PostIdDto, PostPageDto,
    PostSummaryDto, UpdatePostDto,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::presentation::handlers::posts::list_posts,
        crate::presentation::handlers::posts::get_post,
        crate::presentation::handlers::posts::create_post,
        crate::presentation::handlers::posts::update_post,
        crate::presentation::handlers::posts::delete_post
    ),
    components(
        schemas(
            CreatePostDto,
            UpdatePostDto,
            DeletePostQuery,
            ListPostsQuery,
            PostIdDto,
            PostDetailDto,
            PostSummaryDto,
            PostPageDto
        )
    ),
    tags(
        (name = "posts", description = "Bulletin board post endpoints")
    )
)]
pub(crate) struct ApiDoc;

#[cfg(test)]
mod tests {
    use utoipa::OpenApi;

    use super::ApiDoc;

    #[test]
    fn document_lists_post_routes() {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key("/api/posts"));
        assert!(doc.paths.paths.contains_key("/api/posts/{id}"));
    }
}
