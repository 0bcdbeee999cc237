//! Typed models and their serialized `Record` form.
//!
//! # Invariants
//! - `Record::from_model` copies `T::MODEL_NAME` and `T::id()` verbatim.
//! - Record equality is structural over model, id and payload.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// Contract for domain types that can be persisted through a repository.
pub trait Model: Serialize + DeserializeOwned {
    /// Registry name of this model, e.g. `"Place"`.
    const MODEL_NAME: &'static str;

    /// Stable identifier, unique within the model.
    fn id(&self) -> &str;
}

/// Entity as seen by the repository: model name, identifier and JSON payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub model: String,
    pub id: String,
    pub data: Value,
}

impl Record {
    /// Creates a record with a freshly generated identifier.
    pub fn new(model: impl Into<String>, data: Value) -> Self {
        Self::with_id(model, Uuid::new_v4().to_string(), data)
    }

    /// Creates a record with a caller-provided identifier.
    pub fn with_id(model: impl Into<String>, id: impl Into<String>, data: Value) -> Self {
        Self {
            model: model.into(),
            id: id.into(),
            data,
        }
    }

    /// Serializes a typed model into a record.
    pub fn from_model<T: Model>(model: &T) -> Result<Self, serde_json::Error> {
        Ok(Self::with_id(T::MODEL_NAME, model.id(), serde_json::to_value(model)?))
    }

    /// Deserializes the payload back into `T`.
    ///
    /// Fails when the payload does not match `T`'s shape. The model name is
    /// not checked here; callers that mix models should compare `self.model`.
    pub fn to_model<T: Model>(&self) -> Result<T, serde_json::Error> {
        T::deserialize(&self.data)
    }

    /// Returns whether this record belongs to `T`.
    pub fn is_model<T: Model>(&self) -> bool {
        self.model == T::MODEL_NAME
    }
}

#[cfg(test)]
mod tests {
    use super::{Model, Record};
    use serde::{Deserialize, Serialize};
    use serde_json::json;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Amenity {
        id: String,
        name: String,
    }

    impl Model for Amenity {
        const MODEL_NAME: &'static str = "Amenity";

        fn id(&self) -> &str {
            &self.id
        }
    }

    #[test]
    fn new_generates_distinct_ids() {
        let first = Record::new("Amenity", json!({}));
        let second = Record::new("Amenity", json!({}));
        assert_ne!(first.id, second.id);
        assert_eq!(first.model, "Amenity");
    }

    #[test]
    fn typed_model_converts_both_ways() {
        let amenity = Amenity {
            id: "wifi".to_string(),
            name: "Wi-Fi".to_string(),
        };

        let record = Record::from_model(&amenity).unwrap();
        assert_eq!(record.model, "Amenity");
        assert_eq!(record.id, "wifi");
        assert_eq!(record.data["name"], "Wi-Fi");
        assert!(record.is_model::<Amenity>());

        let decoded: Amenity = record.to_model().unwrap();
        assert_eq!(decoded, amenity);
    }

    #[test]
    fn mismatched_payload_fails_to_decode() {
        let record = Record::with_id("Amenity", "pool", json!({ "title": "Pool" }));
        assert!(record.to_model::<Amenity>().is_err());
    }
}
