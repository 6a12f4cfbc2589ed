use serde::{Deserialize, Serialize};

/// One page of a paginated listing. `number` is zero-based.
///
/// Extra Spring `Page` fields (`pageable`, `sort`, …) are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub content: Vec<T>,
    pub total_elements: u64,
    pub total_pages: u32,
    pub size: u32,
    pub number: u32,
    pub first: bool,
    pub last: bool,
}

impl<T> Page<T> {
    /// The page returned for a disabled read: no content, first and last.
    pub fn empty() -> Self {
        Self {
            content: Vec::new(),
            total_elements: 0,
            total_pages: 0,
            size: 0,
            number: 0,
            first: true,
            last: true,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    pub fn len(&self) -> usize {
        self.content.len()
    }

    /// Index of the next page, if there is one.
    pub fn next_page(&self) -> Option<u32> {
        (!self.last).then(|| self.number + 1)
    }

    /// Index of the previous page, if there is one.
    pub fn previous_page(&self) -> Option<u32> {
        (!self.first && self.number > 0).then(|| self.number - 1)
    }
}

impl<T> Default for Page<T> {
    fn default() -> Self {
        Self::empty()
    }
}
