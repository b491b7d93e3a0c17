//! Offset pagination types shared by stores and the API

use serde::{Deserialize, Serialize};

use crate::domain::DomainError;

/// Zero-based page request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: u32,
    size: u32,
}

impl PageRequest {
    /// Create a page request; size must be at least one
    pub fn new(page: u32, size: u32) -> Result<Self, DomainError> {
        if size == 0 {
            return Err(DomainError::validation("Page size must not be less than one"));
        }

        Ok(Self { page, size })
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    /// Number of records to skip
    pub fn offset(&self) -> u64 {
        u64::from(self.page) * u64::from(self.size)
    }
}

/// One page of results plus the totals needed to navigate the rest
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page<T> {
    pub content: Vec<T>,
    pub page: u32,
    pub size: u32,
    pub total_elements: u64,
    pub total_pages: u64,
}

impl<T> Page<T> {
    pub fn new(content: Vec<T>, request: PageRequest, total_elements: u64) -> Self {
        let size = u64::from(request.size());

        Self {
            content,
            page: request.page(),
            size: request.size(),
            total_elements,
            total_pages: total_elements.div_ceil(size),
        }
    }

    /// Slice an already ordered, fully materialized result set
    pub fn from_ordered(items: Vec<T>, request: PageRequest) -> Self {
        let total = items.len() as u64;
        let content = items
            .into_iter()
            .skip(usize::try_from(request.offset()).unwrap_or(usize::MAX))
            .take(request.size() as usize)
            .collect();

        Self::new(content, request, total)
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            content: self.content.into_iter().map(f).collect(),
            page: self.page,
            size: self.size,
            total_elements: self.total_elements,
            total_pages: self.total_pages,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_size_rejected() {
        let result = PageRequest::new(0, 0);
        assert!(matches!(result, Err(DomainError::Validation { .. })));
    }

    #[test]
    fn test_offset() {
        assert_eq!(PageRequest::new(0, 10).unwrap().offset(), 0);
        assert_eq!(PageRequest::new(3, 10).unwrap().offset(), 30);
        assert_eq!(
            PageRequest::new(u32::MAX, u32::MAX).unwrap().offset(),
            u64::from(u32::MAX) * u64::from(u32::MAX)
        );
    }

    #[test]
    fn test_total_pages() {
        let request = PageRequest::new(0, 10).unwrap();

        assert_eq!(Page::<u8>::new(vec![], request, 0).total_pages, 0);
        assert_eq!(Page::<u8>::new(vec![], request, 10).total_pages, 1);
        assert_eq!(Page::<u8>::new(vec![], request, 11).total_pages, 2);
    }

    #[test]
    fn test_from_ordered_slices() {
        let items: Vec<u32> = (1..=25).collect();

        let first = Page::from_ordered(items.clone(), PageRequest::new(0, 10).unwrap());
        assert_eq!(first.content, (1..=10).collect::<Vec<_>>());
        assert_eq!(first.page, 0);

        let last = Page::from_ordered(items.clone(), PageRequest::new(2, 10).unwrap());
        assert_eq!(last.content, vec![21, 22, 23, 24, 25]);
        assert_eq!(last.total_elements, 25);
        assert_eq!(last.total_pages, 3);
    }

    #[test]
    fn test_page_past_end_is_empty() {
        let page = Page::from_ordered(vec![1, 2, 3], PageRequest::new(5, 10).unwrap());

        assert!(page.content.is_empty());
        assert_eq!(page.total_elements, 3);
        assert_eq!(page.total_pages, 1);
    }

    #[test]
    fn test_map_keeps_totals() {
        let page = Page::from_ordered(vec![1, 2, 3], PageRequest::new(0, 2).unwrap());
        let mapped = page.map(|n| n.to_string());

        assert_eq!(mapped.content, vec!["1".to_string(), "2".to_string()]);
        assert_eq!(mapped.total_elements, 3);
        assert_eq!(mapped.total_pages, 2);
    }
}
