use serde::{Deserialize, Serialize};

use crate::utils::validation::normalize_search;

// Parámetros de query de los listados
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub page: Option<i64>,
    pub page_size: Option<i64>,
    pub search: Option<String>,
    pub order_by: Option<String>,
}

impl ListQuery {
    pub fn search_term(&self) -> Option<String> {
        normalize_search(self.search.clone())
    }
}

// Response genérica de update / delete
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub success: bool,
    pub message: String,
}

impl MessageResponse {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }
}

// Response de listados completos sin paginar
#[derive(Debug, Serialize)]
pub struct ListAllResponse<T> {
    pub success: bool,
    pub results: Vec<T>,
}

impl<T> ListAllResponse<T> {
    pub fn new(results: Vec<T>) -> Self {
        Self {
            success: true,
            results,
        }
    }
}
