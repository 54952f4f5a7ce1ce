use log::debug;
use reqwest::{Method, RequestBuilder, Url};
use serde_json::Value;

use crate::{ClientError, GenericResponse};

/// Generic async JSON HTTP wrapper.
///
/// This service is transport-focused: it builds query strings, issues the
/// call, and decodes the JSON body. For typed CRUD operations over a resource
/// path, use [`crate::RestService`].
#[derive(Clone, Debug)]
pub struct BaseService {
    base_url: Url,
    http: reqwest::Client,
}

impl BaseService {
    /// Creates a new service with the given base URL and its own HTTP client.
    ///
    /// The URL is normalized to include a trailing slash, so relative endpoint
    /// paths join correctly.
    pub fn new(base_url: impl AsRef<str>) -> Result<Self, ClientError> {
        Self::with_http_client(base_url, reqwest::Client::new())
    }

    /// Creates a new service sharing a host-provided HTTP client.
    ///
    /// The client is used read-only; cloning a `reqwest::Client` shares its
    /// connection pool, so one client can back many services.
    pub fn with_http_client(
        base_url: impl AsRef<str>,
        http: reqwest::Client,
    ) -> Result<Self, ClientError> {
        let parsed = Url::parse(base_url.as_ref())
            .map_err(|_| ClientError::InvalidBaseUrl(base_url.as_ref().to_owned()))?;

        Ok(Self {
            base_url: ensure_trailing_slash(parsed),
            http,
        })
    }

    /// Sends a `GET` request and decodes the response envelope.
    ///
    /// `parameters` is attached as a query string; an empty slice appends
    /// nothing.
    pub async fn get(
        &self,
        parameters: &[(&str, &str)],
        path: &str,
    ) -> Result<GenericResponse, ClientError> {
        let body = self
            .request_json_with_query(Method::GET, path, parameters, None)
            .await?;
        Ok(GenericResponse::from_value(&body))
    }

    /// Sends a `POST` request with a JSON body and decodes the response envelope.
    pub async fn post(&self, body: Value, path: &str) -> Result<GenericResponse, ClientError> {
        let response = self.request_json(Method::POST, path, Some(body)).await?;
        Ok(GenericResponse::from_value(&response))
    }

    /// Attaches `parameters` to `request` as a query string.
    ///
    /// An empty parameter set returns the builder unchanged, so no `?` is
    /// appended to the URL. The builder is consumed and returned.
    pub fn with_query_parameters(
        request: RequestBuilder,
        parameters: &[(&str, &str)],
    ) -> RequestBuilder {
        if parameters.is_empty() {
            request
        } else {
            request.query(parameters)
        }
    }

    /// Sends a request and parses the response as JSON.
    ///
    /// Use [`Self::request_json_with_query`] when query parameters are needed.
    pub async fn request_json(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> Result<Value, ClientError> {
        self.request_json_with_query(method, path, &[], body).await
    }

    /// Sends a request with query parameters and parses the response as JSON.
    ///
    /// Returns [`Value::Null`] for successful responses with an empty body.
    pub async fn request_json_with_query(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, &str)],
        body: Option<Value>,
    ) -> Result<Value, ClientError> {
        let url = self.build_url(path)?;
        debug!("{method} {url}");

        let mut request = Self::with_query_parameters(
            self.http
                .request(method, url)
                .header(reqwest::header::ACCEPT, "application/json"),
            query,
        );

        if let Some(json_body) = body {
            request = request.json(&json_body);
        }

        let response = request.send().await?;
        let status = response.status();
        let payload = response.text().await?;
        debug!("response status {status}, body of {} bytes", payload.len());

        if !status.is_success() {
            return Err(ClientError::HttpStatus {
                status,
                body: payload,
            });
        }

        if payload.trim().is_empty() {
            Ok(Value::Null)
        } else {
            Ok(serde_json::from_str(&payload)?)
        }
    }

    fn build_url(&self, path: &str) -> Result<Url, ClientError> {
        let relative = path.trim_start_matches('/');
        self.base_url
            .join(relative)
            .map_err(|_| ClientError::InvalidPath(path.to_owned()))
    }
}

pub(crate) fn ensure_trailing_slash(mut url: Url) -> Url {
    if !url.path().ends_with('/') {
        let mut path = url.path().to_owned();
        path.push('/');
        url.set_path(&path);
    }
    url
}

#[cfg(test)]
mod tests {
    use super::BaseService;

    #[test]
    fn joins_paths_from_base_with_nested_prefix() {
        let service = BaseService::new("https://example.com/api/v1").expect("valid url");
        let resolved = service.build_url("items").expect("valid path");
        assert_eq!(resolved.as_str(), "https://example.com/api/v1/items");
    }

    #[test]
    fn rejects_invalid_base_url() {
        assert!(BaseService::new("not a url").is_err());
    }

    #[test]
    fn query_parameters_attach_to_url() {
        let request = reqwest::Client::new().get("https://example.com/items");
        let request =
            BaseService::with_query_parameters(request, &[("name", "a"), ("page", "2")]);
        let built = request.build().expect("valid request");
        assert_eq!(built.url().query(), Some("name=a&page=2"));
    }

    #[test]
    fn empty_parameters_leave_url_untouched() {
        let request = reqwest::Client::new().get("https://example.com/items");
        let request = BaseService::with_query_parameters(request, &[]);
        let built = request.build().expect("valid request");
        assert_eq!(built.url().query(), None);
    }
}
