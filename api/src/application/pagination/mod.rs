pub const DEFAULT_PAGE_SIZE: u32 = 10;
pub const DEFAULT_PAGE_NUMBER: u32 = 1;
pub const MAX_PAGE_SIZE: u32 = 100;

/// A validated page request. Both values are 1-based and positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page_size: u32,
    pub page_number: u32,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            page_number: DEFAULT_PAGE_NUMBER,
        }
    }
}

impl Pagination {
    /// Page sizes above `MAX_PAGE_SIZE` are clamped; zero is rejected.
    pub fn new(page_size: u32, page_number: u32) -> Option<Self> {
        if page_size == 0 || page_number == 0 {
            return None;
        }
        Some(Self {
            page_size: page_size.min(MAX_PAGE_SIZE),
            page_number,
        })
    }

    pub fn limit(&self) -> i64 {
        i64::from(self.page_size)
    }

    pub fn offset(&self) -> i64 {
        i64::from(self.page_number - 1) * i64::from(self.page_size)
    }
}
