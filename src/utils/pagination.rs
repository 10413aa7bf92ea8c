//! Paginación por número de página
//!
//! Las páginas empiezan en 1. Una colección vacía tiene igualmente una
//! página (vacía); pedir una página fuera de rango es un 404.

use serde::Serialize;

use crate::utils::errors::{bad_request_error, AppError, AppResult};

pub const DEFAULT_PAGE_SIZE: i64 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: i64,
    pub page_size: i64,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl PageRequest {
    pub fn new(page: Option<i64>, page_size: Option<i64>) -> AppResult<Self> {
        let page_size = page_size.unwrap_or(DEFAULT_PAGE_SIZE);
        if page_size < 1 {
            return Err(bad_request_error("page_size must be a positive integer"));
        }

        let page = page.unwrap_or(1);
        if page < 1 {
            return Err(invalid_page());
        }

        Ok(Self { page, page_size })
    }

    pub fn limit(&self) -> i64 {
        self.page_size
    }

    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.page_size)
    }

    pub fn total_pages(&self, total_items: i64) -> i64 {
        if total_items <= 0 {
            1
        } else {
            (total_items - 1) / self.page_size + 1
        }
    }

    /// Falla si la página pedida no existe para `total_items` elementos
    pub fn ensure_in_range(&self, total_items: i64) -> AppResult<()> {
        if self.page > self.total_pages(total_items) {
            return Err(invalid_page());
        }
        Ok(())
    }
}

fn invalid_page() -> AppError {
    AppError::NotFound("Invalid page.".to_string())
}

/// Sobre de respuesta de los listados paginados
#[derive(Debug, Serialize)]
pub struct Page<T> {
    pub success: bool,
    pub total_items: i64,
    pub total_pages: i64,
    pub current_page: i64,
    pub results: Vec<T>,
}

impl<T> Page<T> {
    pub fn new(request: PageRequest, total_items: i64, results: Vec<T>) -> Self {
        Self {
            success: true,
            total_items,
            total_pages: request.total_pages(total_items),
            current_page: request.page,
            results,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let request = PageRequest::new(None, None).unwrap();
        assert_eq!(request, PageRequest::default());
        assert_eq!(request.offset(), 0);
        assert_eq!(request.limit(), 10);
    }

    #[test]
    fn test_offset_and_total_pages() {
        let request = PageRequest::new(Some(3), Some(4)).unwrap();
        assert_eq!(request.offset(), 8);
        assert_eq!(request.total_pages(9), 3);
        assert_eq!(request.total_pages(12), 3);
        assert_eq!(request.total_pages(13), 4);
        assert_eq!(request.total_pages(0), 1);
    }

    #[test]
    fn test_total_pages_with_huge_page_size() {
        let request = PageRequest::new(None, Some(i64::MAX)).unwrap();
        assert_eq!(request.total_pages(2), 1);
        assert_eq!(request.total_pages(i64::MAX), 1);
        assert!(request.ensure_in_range(2).is_ok());
        assert_eq!(request.offset(), 0);
    }

    #[test]
    fn test_out_of_range_page() {
        let request = PageRequest::new(Some(2), Some(10)).unwrap();
        assert!(request.ensure_in_range(10).is_err());
        assert!(request.ensure_in_range(11).is_ok());
        assert!(PageRequest::default().ensure_in_range(0).is_ok());
    }

    #[test]
    fn test_rejects_invalid_sizes() {
        assert!(matches!(PageRequest::new(None, Some(0)), Err(AppError::BadRequest(_))));
        assert!(matches!(PageRequest::new(Some(0), None), Err(AppError::NotFound(_))));
    }
}
