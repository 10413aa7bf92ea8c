//! Utilidades de validación
//!
//! Los endpoints de creación comprueban la presencia de cada clave del
//! payload, no que el valor sea distinto de vacío.

use crate::utils::errors::AppError;

/// Acumula los campos obligatorios ausentes de un payload
#[derive(Debug, Default)]
pub struct RequiredFields {
    missing: Vec<&'static str>,
}

impl RequiredFields {
    pub fn new() -> Self {
        Self::default()
    }

    /// Devuelve el valor tal cual y anota el campo si falta.
    pub fn check<T>(&mut self, field: &'static str, value: Option<T>) -> Option<T> {
        if value.is_none() {
            self.missing.push(field);
        }
        value
    }

    pub fn missing(&self) -> &[&'static str] {
        &self.missing
    }

    pub fn into_error(self) -> AppError {
        AppError::MissingFields(self.missing)
    }
}

/// Normaliza el término de búsqueda: vacío equivale a sin búsqueda
pub fn normalize_search(search: Option<String>) -> Option<String> {
    search
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Patrón ILIKE que trata `%`, `_` y `\` del usuario como literales
pub fn like_pattern(search: &str) -> String {
    let mut escaped = String::with_capacity(search.len() + 2);
    escaped.push('%');
    for c in search.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_fields_collects_missing() {
        let mut required = RequiredFields::new();
        let name = required.check("name", Some("Matheus"));
        let phone: Option<&str> = required.check("phone", None);

        assert_eq!(name, Some("Matheus"));
        assert!(phone.is_none());
        assert_eq!(required.missing(), &["phone"]);
        assert_eq!(required.into_error().to_string(), "Missing required fields");
    }

    #[test]
    fn test_empty_string_is_present() {
        let mut required = RequiredFields::new();
        required.check("name", Some(String::new()));
        assert!(required.missing().is_empty());
    }

    #[test]
    fn test_normalize_search() {
        assert_eq!(normalize_search(Some("  fusca ".into())), Some("fusca".into()));
        assert_eq!(normalize_search(Some("   ".into())), None);
        assert_eq!(normalize_search(None), None);
    }

    #[test]
    fn test_like_pattern_escapes_wildcards() {
        assert_eq!(like_pattern("ABC"), "%ABC%");
        assert_eq!(like_pattern("10%_off"), "%10\\%\\_off%");
    }
}
