//! # Mapa de Headers HTTP
//! src/http/headers.rs
//!
//! Mapa `nombre → valor` usado tanto en requests como en responses.
//!
//! - Orden determinístico (BTreeMap) para que la serialización sea estable
//! - Nombres duplicados: gana la última escritura
//! - Búsqueda exacta primero y luego sin distinguir mayúsculas

use serde::Serialize;
use std::collections::BTreeMap;

/// Headers HTTP con orden determinístico
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Headers {
    entries: BTreeMap<String, String>,
}

impl Headers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserta un header; si el nombre exacto ya existe, se sobrescribe
    ///
    /// # Ejemplo
    /// ```
    /// use mycurl::http::Headers;
    ///
    /// let mut headers = Headers::new();
    /// headers.insert("X-Id", "1");
    /// headers.insert("X-Id", "2");
    /// assert_eq!(headers.get("X-Id"), Some("2"));
    /// assert_eq!(headers.len(), 1);
    /// ```
    pub fn insert(&mut self, name: &str, value: &str) {
        self.entries.insert(name.to_string(), value.to_string());
    }

    /// Obtiene el valor de un header
    ///
    /// Los nombres de header no distinguen mayúsculas en el protocolo,
    /// así que si no hay coincidencia exacta se compara en ASCII sin caso.
    pub fn get(&self, name: &str) -> Option<&str> {
        if let Some(value) = self.entries.get(name) {
            return Some(value.as_str());
        }

        self.entries
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Itera en orden alfabético de nombre
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_last_write_wins() {
        let mut headers = Headers::new();
        headers.insert("Set-Cookie", "a=1");
        headers.insert("Set-Cookie", "b=2");

        assert_eq!(headers.get("Set-Cookie"), Some("b=2"));
        assert_eq!(headers.len(), 1);
    }

    #[test]
    fn test_case_insensitive_lookup() {
        let mut headers = Headers::new();
        headers.insert("content-length", "5");

        assert_eq!(headers.get("Content-Length"), Some("5"));
        assert!(headers.contains("CONTENT-LENGTH"));
        assert!(!headers.contains("Transfer-Encoding"));
    }

    #[test]
    fn test_exact_match_preferred() {
        let mut headers = Headers::new();
        headers.insert("x-mode", "lower");
        headers.insert("X-Mode", "exact");

        assert_eq!(headers.get("X-Mode"), Some("exact"));
        assert_eq!(headers.get("x-mode"), Some("lower"));
    }

    #[test]
    fn test_iteration_is_sorted() {
        let mut headers = Headers::new();
        headers.insert("User-Agent", "mycurl");
        headers.insert("Content-Type", "text/plain");
        headers.insert("Accept", "*/*");

        let names: Vec<&str> = headers.iter().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["Accept", "Content-Type", "User-Agent"]);
    }

    #[test]
    fn test_serialize_as_object() {
        let mut headers = Headers::new();
        headers.insert("Content-Length", "5");

        let json = serde_json::to_string(&headers).unwrap();
        assert_eq!(json, r#"{"Content-Length":"5"}"#);
    }
}
