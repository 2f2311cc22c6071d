use serde::{Deserialize, Serialize};

/// Normalised page request (1-based page, bounded page size)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    pub page: u64,
    pub per_page: u64,
}

impl PageRequest {
    /// Build a page request from optional query values.
    ///
    /// Missing values fall back to page 1 and `default_per_page`; the page size is
    /// clamped to `1..=max_per_page`.
    pub fn new(page: Option<u64>, per_page: Option<u64>, default_per_page: u64, max_per_page: u64) -> Self {
        let max_per_page = max_per_page.max(1);
        Self {
            page: page.unwrap_or(1).max(1),
            per_page: per_page.unwrap_or(default_per_page).clamp(1, max_per_page),
        }
    }

    pub fn offset(&self) -> u64 {
        (self.page - 1).saturating_mul(self.per_page)
    }

    pub fn limit(&self) -> u64 {
        self.per_page
    }

    /// Slice the requested page out of an already ordered set
    pub fn slice<T: Clone>(&self, items: &[T]) -> Vec<T> {
        let start = usize::try_from(self.offset()).unwrap_or(usize::MAX).min(items.len());
        let end = start
            .saturating_add(usize::try_from(self.per_page).unwrap_or(usize::MAX))
            .min(items.len());
        items[start..end].to_vec()
    }
}

/// Метаданные пагинации
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationMeta {
    pub current_page: u64,
    pub per_page: u64,
    pub total: u64,
    pub last_page: u64,
    /// 1-based position of the first item on the page, `None` for an empty page
    pub from: Option<u64>,
    pub to: Option<u64>,
}

impl PaginationMeta {
    pub fn new(request: &PageRequest, total: u64, items_on_page: u64) -> Self {
        let last_page = total.div_ceil(request.per_page).max(1);
        let (from, to) = if items_on_page == 0 {
            (None, None)
        } else {
            let first = request.offset() + 1;
            (Some(first), Some(first + items_on_page - 1))
        };

        Self {
            current_page: request.page,
            per_page: request.per_page,
            total,
            last_page,
            from,
            to,
        }
    }
}

/// Страница отчёта вместе с метаданными пагинации
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PagedResponse<T> {
    pub data: Vec<T>,
    pub pagination: PaginationMeta,
}
