//! Stored submission records.
//!
//! A record is the persisted outcome of one accepted form submission: an
//! opaque mapping of field labels to submitted values, addressed by an
//! integer identity assigned by the store on creation.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A single persisted form submission.
///
/// Records are immutable once stored; the store contract exposes no update
/// operation and `intid` is stable for the lifetime of the record.
#[derive(PartialEq, Clone, Debug, Deserialize, Serialize)]
pub struct StoredRecord {
    /// Integer identity assigned by the store on creation.
    pub intid: i64,
    /// Submitted field values, keyed by field label in submission order.
    pub attrs: Map<String, Value>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_record_serialization_roundtrip() {
        let mut attrs = Map::new();
        attrs.insert("Message".to_string(), json!("just want to say hi"));
        attrs.insert("Name".to_string(), json!("John"));

        let record = StoredRecord { intid: 7, attrs };

        let serialized = serde_json::to_string(&record).unwrap();
        let deserialized: StoredRecord = serde_json::from_str(&serialized).unwrap();
        assert_eq!(record, deserialized);
    }

    #[test]
    fn test_record_attrs_preserve_insertion_order() {
        let mut attrs = Map::new();
        attrs.insert("zeta".to_string(), json!(1));
        attrs.insert("alpha".to_string(), json!(2));

        let record = StoredRecord { intid: 1, attrs };
        let keys: Vec<&String> = record.attrs.keys().collect();
        assert_eq!(keys, vec!["zeta", "alpha"]);
    }
}
