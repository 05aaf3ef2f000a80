//! Ordered query parameter multi-map.
//!
//! Predicates and options write into a [`QueryParams`]. Entries keep the
//! position of their first write so that the encoded query is a pure function
//! of the order in which predicates were applied.

use serde::{Deserialize, Serialize};

/// A single parameter name with all of its values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Param {
    pub name: String,
    pub values: Vec<String>,
}

/// An ordered multi-map of query parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QueryParams {
    entries: Vec<Param>,
}

impl QueryParams {
    /// Create an empty parameter map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace every value of `name` with `value`.
    ///
    /// An existing entry keeps its position; a new one goes last.
    pub fn set(&mut self, name: &str, value: impl Into<String>) {
        let value = value.into();
        match self.entry_mut(name) {
            Some(param) => param.values = vec![value],
            None => self.entries.push(Param {
                name: name.to_string(),
                values: vec![value],
            }),
        }
    }

    /// Add `value` to the values of `name`, keeping earlier ones.
    pub fn append(&mut self, name: &str, value: impl Into<String>) {
        let value = value.into();
        match self.entry_mut(name) {
            Some(param) => param.values.push(value),
            None => self.entries.push(Param {
                name: name.to_string(),
                values: vec![value],
            }),
        }
    }

    /// First value of `name`, if any.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entry(name)
            .and_then(|p| p.values.first())
            .map(String::as_str)
    }

    /// All values of `name`, in insertion order.
    pub fn get_all(&self, name: &str) -> &[String] {
        self.entry(name).map(|p| p.values.as_slice()).unwrap_or(&[])
    }

    /// Check whether `name` has been written.
    pub fn contains(&self, name: &str) -> bool {
        self.entry(name).is_some()
    }

    /// Number of distinct parameter names.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check whether no parameter has been written.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over `(name, value)` pairs, one per value.
    pub fn pairs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().flat_map(|p| {
            p.values
                .iter()
                .map(move |v| (p.name.as_str(), v.as_str()))
        })
    }

    /// Apply every entry of `other` on top of this map with set semantics
    /// for the first value and append semantics for the rest.
    pub fn extend_from(&mut self, other: &QueryParams) {
        for param in &other.entries {
            let mut values = param.values.iter();
            if let Some(first) = values.next() {
                self.set(&param.name, first.clone());
            }
            for value in values {
                self.append(&param.name, value.clone());
            }
        }
    }

    /// Render as `application/x-www-form-urlencoded`.
    pub fn encode(&self) -> String {
        url::form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.pairs())
            .finish()
    }

    fn entry(&self, name: &str) -> Option<&Param> {
        self.entries.iter().find(|p| p.name == name)
    }

    fn entry_mut(&mut self, name: &str) -> Option<&mut Param> {
        self.entries.iter_mut().find(|p| p.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_overwrites_in_place() {
        let mut params = QueryParams::new();
        params.set("a", "1");
        params.set("b", "2");
        params.set("a", "3");

        assert_eq!(params.get("a"), Some("3"));
        assert_eq!(params.get_all("a"), ["3"]);
        assert_eq!(params.encode(), "a=3&b=2");
    }

    #[test]
    fn append_keeps_all_values() {
        let mut params = QueryParams::new();
        params.append("country", "Frankrike");
        params.set("size", "30");
        params.append("country", "Italien");

        assert_eq!(params.get_all("country"), ["Frankrike", "Italien"]);
        assert_eq!(params.len(), 2);
        assert_eq!(
            params.encode(),
            "country=Frankrike&country=Italien&size=30"
        );
    }

    #[test]
    fn set_after_append_collapses() {
        let mut params = QueryParams::new();
        params.append("vintage", "2019");
        params.append("vintage", "2020");
        params.set("vintage", "2021");

        assert_eq!(params.get_all("vintage"), ["2021"]);
    }

    #[test]
    fn encode_escapes_values() {
        let mut params = QueryParams::new();
        params.set("textQuery", "röd & vit");
        params.set("categoryLevel1", "Öl");

        assert_eq!(
            params.encode(),
            "textQuery=r%C3%B6d+%26+vit&categoryLevel1=%C3%96l"
        );
    }

    #[test]
    fn missing_names() {
        let params = QueryParams::new();
        assert!(params.is_empty());
        assert_eq!(params.get("nope"), None);
        assert!(params.get_all("nope").is_empty());
        assert!(!params.contains("nope"));
    }

    #[test]
    fn extend_from_overlays() {
        let mut base = QueryParams::new();
        base.set("size", "30");
        base.set("page", "1");

        let mut overlay = QueryParams::new();
        overlay.set("page", "2");
        overlay.append("grapes", "Syrah");
        overlay.append("grapes", "Merlot");

        base.extend_from(&overlay);
        assert_eq!(base.encode(), "size=30&page=2&grapes=Syrah&grapes=Merlot");
    }
}
