use std::marker::PhantomData;

use reqwest::Method;
use serde_json::Value;

use crate::{BaseService, BlockingBaseService, ClientError, GenericResponse, Serializable};

/// Async CRUD client for one resource type.
///
/// `T` supplies the wire mapping via [`Serializable`] and the empty-instance
/// constructor via [`Default`]; a fresh instance is materialized for every
/// decoded element. The service holds no per-call state, so one instance can
/// serve any number of concurrent calls.
///
/// Each operation takes `path: Option<&str>`; `None` resolves to the default
/// resource path configured with [`Self::with_base_path`].
#[derive(Clone, Debug)]
pub struct RestService<T> {
    inner: BaseService,
    base_path: String,
    entity: PhantomData<fn() -> T>,
}

impl<T: Serializable + Default> RestService<T> {
    /// Creates a CRUD client over an existing base service.
    ///
    /// The default resource path starts empty; configure it with
    /// [`Self::with_base_path`] or pass an explicit path on every call.
    pub fn new(inner: BaseService) -> Self {
        Self {
            inner,
            base_path: String::new(),
            entity: PhantomData,
        }
    }

    /// Returns a service with the given default resource path.
    #[must_use]
    pub fn with_base_path(mut self, path: impl Into<String>) -> Self {
        self.base_path = path.into();
        self
    }

    /// Returns the default resource path used when a call passes no path.
    pub fn base_url_path(&self) -> &str {
        &self.base_path
    }

    /// Lists resources, optionally filtered by query parameters.
    ///
    /// An empty response body is an empty result set, not an error. Response
    /// order is preserved.
    pub async fn query(
        &self,
        parameters: &[(&str, &str)],
        path: Option<&str>,
    ) -> Result<Vec<T>, ClientError> {
        let body = self
            .inner
            .request_json_with_query(Method::GET, self.resolve_path(path), parameters, None)
            .await?;
        decode_list(&body)
    }

    /// Fetches a single resource by id, or the singleton resource at the path
    /// when `id` is `None`.
    ///
    /// Absence is not an error: an empty body, an empty array, a body with
    /// `"success": false`, and a body with a non-null `"error"` field all
    /// resolve to `Ok(None)`.
    pub async fn get_one(
        &self,
        id: Option<i64>,
        path: Option<&str>,
    ) -> Result<Option<T>, ClientError> {
        let url = item_path(self.resolve_path(path), id);
        let body = self.inner.request_json(Method::GET, &url, None).await?;
        Ok(decode_single(&body))
    }

    /// Creates a resource from the model's wire form via `POST`.
    pub async fn create_one(
        &self,
        model: &T,
        path: Option<&str>,
    ) -> Result<GenericResponse, ClientError> {
        self.inner
            .post(model.serialize(), self.resolve_path(path))
            .await
    }

    /// Updates a resource from the model's wire form via `PUT`.
    pub async fn update_one(
        &self,
        model: &T,
        path: Option<&str>,
    ) -> Result<GenericResponse, ClientError> {
        let body = self
            .inner
            .request_json(Method::PUT, self.resolve_path(path), Some(model.serialize()))
            .await?;
        Ok(GenericResponse::from_value(&body))
    }

    /// Deletes a resource by id via `DELETE` and returns the envelope.
    ///
    /// With `id` of `None` the request targets the resource path itself.
    pub async fn delete_one(
        &self,
        id: Option<i64>,
        path: Option<&str>,
    ) -> Result<GenericResponse, ClientError> {
        let url = item_path(self.resolve_path(path), id);
        let body = self.inner.request_json(Method::DELETE, &url, None).await?;
        Ok(GenericResponse::from_value(&body))
    }

    fn resolve_path<'a>(&'a self, path: Option<&'a str>) -> &'a str {
        path.unwrap_or(&self.base_path)
    }
}

/// Blocking CRUD client for one resource type.
///
/// This is the synchronous counterpart of [`RestService`].
#[derive(Clone, Debug)]
pub struct BlockingRestService<T> {
    inner: BlockingBaseService,
    base_path: String,
    entity: PhantomData<fn() -> T>,
}

impl<T: Serializable + Default> BlockingRestService<T> {
    /// Creates a CRUD client over an existing blocking base service.
    ///
    /// The default resource path starts empty; configure it with
    /// [`Self::with_base_path`] or pass an explicit path on every call.
    pub fn new(inner: BlockingBaseService) -> Self {
        Self {
            inner,
            base_path: String::new(),
            entity: PhantomData,
        }
    }

    /// Returns a service with the given default resource path.
    #[must_use]
    pub fn with_base_path(mut self, path: impl Into<String>) -> Self {
        self.base_path = path.into();
        self
    }

    /// Returns the default resource path used when a call passes no path.
    pub fn base_url_path(&self) -> &str {
        &self.base_path
    }

    /// Lists resources, optionally filtered by query parameters.
    ///
    /// An empty response body is an empty result set, not an error. Response
    /// order is preserved.
    pub fn query(
        &self,
        parameters: &[(&str, &str)],
        path: Option<&str>,
    ) -> Result<Vec<T>, ClientError> {
        let body = self.inner.request_json_with_query(
            Method::GET,
            self.resolve_path(path),
            parameters,
            None,
        )?;
        decode_list(&body)
    }

    /// Fetches a single resource by id, or the singleton resource at the path
    /// when `id` is `None`.
    ///
    /// Absence is not an error: an empty body, an empty array, a body with
    /// `"success": false`, and a body with a non-null `"error"` field all
    /// resolve to `Ok(None)`.
    pub fn get_one(&self, id: Option<i64>, path: Option<&str>) -> Result<Option<T>, ClientError> {
        let url = item_path(self.resolve_path(path), id);
        let body = self.inner.request_json(Method::GET, &url, None)?;
        Ok(decode_single(&body))
    }

    /// Creates a resource from the model's wire form via `POST`.
    pub fn create_one(&self, model: &T, path: Option<&str>) -> Result<GenericResponse, ClientError> {
        self.inner.post(model.serialize(), self.resolve_path(path))
    }

    /// Updates a resource from the model's wire form via `PUT`.
    pub fn update_one(&self, model: &T, path: Option<&str>) -> Result<GenericResponse, ClientError> {
        let body = self.inner.request_json(
            Method::PUT,
            self.resolve_path(path),
            Some(model.serialize()),
        )?;
        Ok(GenericResponse::from_value(&body))
    }

    /// Deletes a resource by id via `DELETE` and returns the envelope.
    ///
    /// With `id` of `None` the request targets the resource path itself.
    pub fn delete_one(
        &self,
        id: Option<i64>,
        path: Option<&str>,
    ) -> Result<GenericResponse, ClientError> {
        let url = item_path(self.resolve_path(path), id);
        let body = self.inner.request_json(Method::DELETE, &url, None)?;
        Ok(GenericResponse::from_value(&body))
    }

    fn resolve_path<'a>(&'a self, path: Option<&'a str>) -> &'a str {
        path.unwrap_or(&self.base_path)
    }
}

fn item_path(base: &str, id: Option<i64>) -> String {
    match id {
        Some(id) => format!("{base}/{id}"),
        None => base.to_owned(),
    }
}

fn decode_list<T: Serializable + Default>(body: &Value) -> Result<Vec<T>, ClientError> {
    match body {
        // Empty response body: no results.
        Value::Null => Ok(Vec::new()),
        Value::Array(elements) => Ok(elements
            .iter()
            .map(|element| {
                let mut model = T::default();
                model.deserialize(element);
                model
            })
            .collect()),
        other => Err(ClientError::UnexpectedBody {
            expected: "a JSON array",
            body: other.to_string(),
        }),
    }
}

fn decode_single<T: Serializable + Default>(body: &Value) -> Option<T> {
    if is_not_found(body) {
        return None;
    }
    let mut model = T::default();
    model.deserialize(body);
    Some(model)
}

/// Not-found sentinels: empty body, empty array, `"success": false`, or a
/// non-null `"error"` field. Servers in the wild use all four.
fn is_not_found(body: &Value) -> bool {
    match body {
        Value::Null => true,
        Value::Array(elements) => elements.is_empty(),
        Value::Object(fields) => {
            fields.get("success").and_then(Value::as_bool) == Some(false)
                || fields.get("error").is_some_and(|error| !error.is_null())
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use serde_json::{Value, json};

    use super::{RestService, decode_list, decode_single, is_not_found, item_path};
    use crate::{BaseService, Serializable};

    #[derive(Debug, Default, PartialEq, Eq)]
    struct Item {
        id: i64,
        name: String,
    }

    impl Serializable for Item {
        fn serialize(&self) -> Value {
            json!({"id": self.id, "name": self.name})
        }

        fn deserialize(&mut self, input: &Value) {
            if let Some(id) = input.get("id").and_then(Value::as_i64) {
                self.id = id;
            }
            if let Some(name) = input.get("name").and_then(Value::as_str) {
                self.name = name.to_owned();
            }
        }
    }

    #[test]
    fn item_path_appends_id_when_present() {
        assert_eq!(item_path("/items", Some(42)), "/items/42");
        assert_eq!(item_path("/items", None), "/items");
    }

    #[test]
    fn resolve_path_prefers_explicit_argument() {
        let service: RestService<Item> =
            RestService::new(BaseService::new("https://example.com").expect("valid url"))
                .with_base_path("/items");

        assert_eq!(service.resolve_path(None), "/items");
        assert_eq!(service.resolve_path(Some("/archived")), "/archived");
    }

    #[test]
    fn base_path_defaults_to_empty() {
        let service: RestService<Item> =
            RestService::new(BaseService::new("https://example.com").expect("valid url"));
        assert_eq!(service.base_url_path(), "");
    }

    #[test]
    fn decode_list_preserves_response_order() {
        let body = json!([{"id": 1, "name": "a"}, {"id": 2, "name": "b"}]);
        let items: Vec<Item> = decode_list(&body).expect("array decodes");
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].id, 1);
        assert_eq!(items[1].id, 2);
    }

    #[test]
    fn decode_list_treats_empty_body_as_no_results() {
        let items: Vec<Item> = decode_list(&Value::Null).expect("empty body decodes");
        assert!(items.is_empty());
    }

    #[test]
    fn decode_list_rejects_non_array_body() {
        let result: Result<Vec<Item>, _> = decode_list(&json!({"id": 1}));
        assert!(result.is_err());
    }

    #[test]
    fn decode_list_tolerates_partial_elements() {
        let body = json!([{"id": 3}]);
        let items: Vec<Item> = decode_list(&body).expect("array decodes");
        assert_eq!(items[0].id, 3);
        assert_eq!(items[0].name, "");
    }

    #[test]
    fn not_found_sentinels() {
        assert!(is_not_found(&Value::Null));
        assert!(is_not_found(&json!([])));
        assert!(is_not_found(&json!({"success": false})));
        assert!(is_not_found(&json!({"error": "missing"})));
    }

    #[test]
    fn populated_bodies_are_not_sentinels() {
        assert!(!is_not_found(&json!({"id": 7, "name": "present"})));
        assert!(!is_not_found(&json!({"success": true})));
        assert!(!is_not_found(&json!({"error": null, "id": 7})));
        assert!(!is_not_found(&json!([{"id": 1}])));
    }

    #[test]
    fn decode_single_builds_model_from_object_body() {
        let decoded: Option<Item> = decode_single(&json!({"id": 7, "name": "seven"}));
        assert_eq!(
            decoded,
            Some(Item {
                id: 7,
                name: "seven".to_owned()
            })
        );
    }

    #[test]
    fn decode_single_maps_sentinels_to_none() {
        let decoded: Option<Item> = decode_single(&json!({"success": false}));
        assert_eq!(decoded, None);
    }
}
