use super::error::DomainError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct PageRequest {
    page: u32,
    size: u32,
}

impl PageRequest {
    /// `page` is zero-based.
    pub(crate) fn new(page: u32, size: u32) -> Result<Self, DomainError> {
        if size == 0 {
            return Err(DomainError::Validation {
                field: "size",
                message: "must be > 0",
            });
        }
        Ok(Self { page, size })
    }

    pub(crate) fn page(&self) -> u32 {
        self.page
    }

    pub(crate) fn size(&self) -> u32 {
        self.size
    }

    pub(crate) fn offset(&self) -> u64 {
        u64::from(self.page) * u64::from(self.size)
    }
}

/// One slice of an ordered result set plus the numbers needed to walk it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Page<T> {
    pub(crate) content: Vec<T>,
    pub(crate) page: u32,
    pub(crate) size: u32,
    pub(crate) total_elements: u64,
}

impl<T> Page<T> {
    pub(crate) fn new(content: Vec<T>, request: PageRequest, total_elements: u64) -> Self {
        Self {
            content,
            page: request.page(),
            size: request.size(),
            total_elements,
        }
    }

    pub(crate) fn number_of_elements(&self) -> usize {
        self.content.len()
    }

    pub(crate) fn total_pages(&self) -> u64 {
        if self.size == 0 {
            return 0;
        }
        self.total_elements.div_ceil(u64::from(self.size))
    }

    pub(crate) fn has_next(&self) -> bool {
        u64::from(self.page) + 1 < self.total_pages()
    }

    pub(crate) fn is_first(&self) -> bool {
        self.page == 0
    }

    pub(crate) fn is_last(&self) -> bool {
        !self.has_next()
    }

    /// Converts every item, keeping the metadata. Stops at the first error.
    pub(crate) fn try_map<U, E>(self, f: impl FnMut(T) -> Result<U, E>) -> Result<Page<U>, E> {
        Ok(Page {
            content: self.content.into_iter().map(f).collect::<Result<_, _>>()?,
            page: self.page,
            size: self.size,
            total_elements: self.total_elements,
        })
    }
}
