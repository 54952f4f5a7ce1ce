use std::collections::HashMap;

use serde_json::{Value, json};

use crate::Serializable;

/// Envelope returned by mutating endpoints (create/update/delete).
///
/// Wire shape: `{"success": bool, "description": string, "data": {..}}`.
/// Decoding is best-effort like every [`Serializable`] implementation: fields
/// absent from the body keep their defaults, and `data` values that are not
/// JSON strings are rendered to their JSON text. A fresh envelope is decoded
/// per response; the type is a transient value object.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GenericResponse {
    pub success: bool,
    pub description: String,
    pub data: HashMap<String, String>,
}

impl GenericResponse {
    /// Decodes a response body into a fresh envelope.
    pub fn from_value(input: &Value) -> Self {
        let mut response = Self::default();
        response.deserialize(input);
        response
    }
}

impl Serializable for GenericResponse {
    fn serialize(&self) -> Value {
        json!({
            "success": self.success,
            "description": self.description,
            "data": self.data,
        })
    }

    fn deserialize(&mut self, input: &Value) {
        if let Some(success) = input.get("success").and_then(Value::as_bool) {
            self.success = success;
        }
        if let Some(description) = input.get("description").and_then(Value::as_str) {
            self.description = description.to_owned();
        }
        if let Some(data) = input.get("data").and_then(Value::as_object) {
            for (key, value) in data {
                let rendered = match value.as_str() {
                    Some(text) => text.to_owned(),
                    None => value.to_string(),
                };
                self.data.insert(key.clone(), rendered);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use serde_json::json;

    use super::GenericResponse;
    use crate::Serializable;

    #[test]
    fn decodes_full_envelope() {
        let body = json!({
            "success": true,
            "description": "created",
            "data": {"id": "7", "location": "/items/7"},
        });

        let response = GenericResponse::from_value(&body);
        assert!(response.success);
        assert_eq!(response.description, "created");
        assert_eq!(response.data.len(), 2);
        assert_eq!(response.data.get("id").map(String::as_str), Some("7"));
        assert_eq!(
            response.data.get("location").map(String::as_str),
            Some("/items/7")
        );
    }

    #[test]
    fn missing_fields_keep_defaults() {
        let response = GenericResponse::from_value(&json!({}));
        assert!(!response.success);
        assert_eq!(response.description, "");
        assert!(response.data.is_empty());
    }

    #[test]
    fn tolerates_wrongly_typed_fields() {
        let body = json!({"success": "yes", "description": 12, "data": []});
        let response = GenericResponse::from_value(&body);
        assert!(!response.success);
        assert_eq!(response.description, "");
        assert!(response.data.is_empty());
    }

    #[test]
    fn non_string_data_values_render_as_json_text() {
        let body = json!({"data": {"count": 3}});
        let response = GenericResponse::from_value(&body);
        assert_eq!(response.data.get("count").map(String::as_str), Some("3"));
    }

    #[test]
    fn serialize_round_trips_through_deserialize() {
        let original = GenericResponse {
            success: true,
            description: "deleted".to_owned(),
            data: HashMap::from([("id".to_owned(), "42".to_owned())]),
        };

        let decoded = GenericResponse::from_value(&original.serialize());
        assert_eq!(decoded, original);
    }
}
