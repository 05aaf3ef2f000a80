//! Opaque search result records.
//!
//! The vendor's product schema changes without notice, so records are kept as
//! a mapping from field name to JSON value. Field order is the order the
//! server sent them in.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A single search result, e.g. a product.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record(Map<String, Value>);

impl Record {
    /// Create an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a field by name.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    /// Get a string field by name.
    pub fn get_str(&self, field: &str) -> Option<&str> {
        self.0.get(field).and_then(Value::as_str)
    }

    /// Set a field, returning the previous value.
    pub fn insert(&mut self, field: impl Into<String>, value: Value) -> Option<Value> {
        self.0.insert(field.into(), value)
    }

    /// Iterate over fields in server order.
    pub fn fields(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Unwrap into the underlying map.
    pub fn into_inner(self) -> Map<String, Value> {
        self.0
    }
}

impl From<Map<String, Value>> for Record {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl From<Record> for Value {
    fn from(record: Record) -> Self {
        Value::Object(record.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn unknown_fields_pass_through() {
        let raw = r#"{"productId":"1004489","productNameBold":"Ardbeg","price":1299.0,"tasteClocks":[{"key":"TasteClockSmokiness","value":12}]}"#;
        let record: Record = serde_json::from_str(raw).unwrap();

        assert_eq!(record.len(), 4);
        assert_eq!(record.get_str("productNameBold"), Some("Ardbeg"));
        assert_eq!(record.get("price"), Some(&json!(1299.0)));
        assert!(record.get("color").is_none());

        assert_eq!(serde_json::to_string(&record).unwrap(), raw);
    }

    #[test]
    fn field_order_is_preserved() {
        let record: Record = serde_json::from_str(r#"{"z":1,"a":2,"m":3}"#).unwrap();
        let names: Vec<_> = record.fields().map(|(k, _)| k.as_str()).collect();
        assert_eq!(names, ["z", "a", "m"]);
    }

    #[test]
    fn insert_and_convert() {
        let mut record = Record::new();
        assert!(record.is_empty());
        assert_eq!(record.insert("name", json!("Pilsner")), None);
        assert_eq!(
            record.insert("name", json!("Lager")),
            Some(json!("Pilsner"))
        );

        let value: Value = record.into();
        assert_eq!(value, json!({"name": "Lager"}));
    }
}
