use super::post::Post;

/// Optional filters for a post listing. Absent fields do not filter; present
/// fields are combined with AND.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct PostSearchCriteria {
    title: Option<String>,
    created_by: Option<String>,
}

impl PostSearchCriteria {
    pub(crate) fn new(title: Option<String>, created_by: Option<String>) -> Self {
        Self {
            title: normalize_filter(title),
            created_by: normalize_filter(created_by),
        }
    }

    /// Substring that the title must contain.
    pub(crate) fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Author that must match exactly.
    pub(crate) fn created_by(&self) -> Option<&str> {
        self.created_by.as_deref()
    }

    pub(crate) fn matches(&self, post: &Post) -> bool {
        let title_ok = self
            .title()
            .is_none_or(|needle| post.title().contains(needle));
        let author_ok = self
            .created_by()
            .is_none_or(|author| post.created_by() == author);
        title_ok && author_ok
    }
}

/// Blank filters are dropped; anything else is matched verbatim.
fn normalize_filter(value: Option<String>) -> Option<String> {
    value.filter(|value| !value.trim().is_empty())
}
