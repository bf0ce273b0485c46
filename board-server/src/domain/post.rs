use chrono::{DateTime, Utc};

use super::error::DomainError;

pub(crate) type PostId = i64;

/// Who last edited a post and when. Stored as one value so the two audit
/// fields can only ever be set together.
#[derive(Debug, Clone, PartialEq, Eq)]
struct UpdateStamp {
    updated_by: String,
    updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Post {
    id: Option<PostId>,
    title: String,
    content: String,
    created_by: String,
    created_at: DateTime<Utc>,
    last_update: Option<UpdateStamp>,
}

#[derive(Debug, Clone)]
pub(crate) struct PostCreateRequest {
    pub(crate) title: String,
    pub(crate) content: String,
    pub(crate) created_by: String,
}

impl PostCreateRequest {
    pub(crate) fn into_entity(self) -> Post {
        Post::new(self.created_by, self.title, self.content)
    }
}

#[derive(Debug, Clone)]
pub(crate) struct PostUpdateRequest {
    pub(crate) title: String,
    pub(crate) content: String,
    pub(crate) updated_by: String,
}

impl Post {
    /// Builds a post that has not been stored yet. The id is assigned by
    /// storage on the first save.
    pub(crate) fn new(
        created_by: impl Into<String>,
        title: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            id: None,
            title: title.into(),
            content: content.into(),
            created_by: created_by.into(),
            created_at: Utc::now(),
            last_update: None,
        }
    }

    /// Rehydrates a stored post. Used by repository adapters only.
    pub(crate) fn restore(
        id: PostId,
        title: impl Into<String>,
        content: impl Into<String>,
        created_by: impl Into<String>,
        created_at: DateTime<Utc>,
        updated_by: Option<String>,
        updated_at: Option<DateTime<Utc>>,
    ) -> Result<Self, DomainError> {
        if id <= 0 {
            return Err(DomainError::Validation {
                field: "id",
                message: "must be > 0",
            });
        }

        let last_update = match (updated_by, updated_at) {
            (None, None) => None,
            (Some(updated_by), Some(updated_at)) => {
                if updated_at < created_at {
                    return Err(DomainError::Validation {
                        field: "updated_at",
                        message: "must be >= created_at",
                    });
                }
                Some(UpdateStamp {
                    updated_by,
                    updated_at,
                })
            }
            _ => {
                return Err(DomainError::Validation {
                    field: "updated_by",
                    message: "updated_by and updated_at must be set together",
                });
            }
        };

        Ok(Self {
            id: Some(id),
            title: title.into(),
            content: content.into(),
            created_by: created_by.into(),
            created_at,
            last_update,
        })
    }

    /// Replaces title and content on behalf of `update.updated_by`.
    ///
    /// Only the author may edit. On mismatch the post is left untouched and
    /// `DomainError::NotUpdatable` is returned.
    pub(crate) fn apply_update(&mut self, update: PostUpdateRequest) -> Result<(), DomainError> {
        if update.updated_by != self.created_by {
            return Err(DomainError::NotUpdatable);
        }

        let now = Utc::now();
        self.title = update.title;
        self.content = update.content;
        self.last_update = Some(UpdateStamp {
            updated_by: update.updated_by,
            // clock skew must not move the stamp before creation
            updated_at: now.max(self.created_at),
        });
        Ok(())
    }

    pub(crate) fn is_owned_by(&self, user: &str) -> bool {
        self.created_by == user
    }

    pub(crate) fn id(&self) -> Option<PostId> {
        self.id
    }

    pub(crate) fn title(&self) -> &str {
        &self.title
    }

    pub(crate) fn content(&self) -> &str {
        &self.content
    }

    pub(crate) fn created_by(&self) -> &str {
        &self.created_by
    }

    pub(crate) fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub(crate) fn updated_by(&self) -> Option<&str> {
        self.last_update
            .as_ref()
            .map(|stamp| stamp.updated_by.as_str())
    }

    pub(crate) fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.last_update.as_ref().map(|stamp| stamp.updated_at)
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};

    use super::{DomainError, Post, PostCreateRequest, PostUpdateRequest};

    #[test]
    fn new_post_has_no_id_and_no_update_stamp() {
        let post = Post::new("harris", "제목", "내용");

        assert_eq!(post.id(), None);
        assert_eq!(post.created_by(), "harris");
        assert_eq!(post.title(), "제목");
        assert_eq!(post.content(), "내용");
        assert!(post.updated_by().is_none());
        assert!(post.updated_at().is_none());
    }

    #[test]
    fn create_request_maps_fields_into_entity() {
        let req = PostCreateRequest {
            title: "title".to_string(),
            content: "content".to_string(),
            created_by: "justo".to_string(),
        };

        let post = req.into_entity();
        assert_eq!(post.title(), "title");
        assert_eq!(post.content(), "content");
        assert_eq!(post.created_by(), "justo");
    }

    #[test]
    fn apply_update_by_author_stamps_audit_fields() {
        let mut post = Post::new("justo", "sollicitudin", "tristique");

        post.apply_update(update("instructior", "ad", "justo"))
            .expect("author must be able to update");

        assert_eq!(post.title(), "instructior");
        assert_eq!(post.content(), "ad");
        assert_eq!(post.created_by(), "justo");
        assert_eq!(post.updated_by(), Some("justo"));
        let updated_at = post.updated_at().expect("updated_at must be set");
        assert!(updated_at >= post.created_at());
    }

    #[test]
    fn apply_update_by_other_user_leaves_post_unchanged() {
        let mut post = Post::new("justo", "sollicitudin", "tristique");
        let before = post.clone();

        let err = post
            .apply_update(update("saperet", "natoque", "update justo"))
            .expect_err("non-author must be rejected");

        assert!(matches!(err, DomainError::NotUpdatable));
        assert_eq!(post, before);
    }

    #[test]
    fn restore_rejects_half_set_audit_pair() {
        let err = Post::restore(
            1,
            "title",
            "content",
            "harris",
            Utc::now(),
            Some("harris".to_string()),
            None,
        )
        .expect_err("audit fields must be paired");
        assert_validation_field(err, "updated_by");
    }

    #[test]
    fn restore_rejects_update_before_creation() {
        let created_at = Utc::now();
        let err = Post::restore(
            1,
            "title",
            "content",
            "harris",
            created_at,
            Some("harris".to_string()),
            Some(created_at - Duration::seconds(1)),
        )
        .expect_err("updated_at < created_at must fail");
        assert_validation_field(err, "updated_at");
    }

    #[test]
    fn restore_rejects_non_positive_id() {
        let err = Post::restore(0, "title", "content", "harris", Utc::now(), None, None)
            .expect_err("id must be > 0");
        assert_validation_field(err, "id");
    }

    fn update(title: &str, content: &str, updated_by: &str) -> PostUpdateRequest {
        PostUpdateRequest {
            title: title.to_string(),
            content: content.to_string(),
            updated_by: updated_by.to_string(),
        }
    }

    fn assert_validation_field(err: DomainError, expected_field: &'static str) {
        match err {
            DomainError::Validation { field, .. } => assert_eq!(field, expected_field),
            _ => panic!("expected DomainError::Validation"),
        }
    }
}
