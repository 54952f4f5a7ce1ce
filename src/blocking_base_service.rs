use log::debug;
use reqwest::{Method, Url};
use reqwest::blocking::RequestBuilder;
use serde_json::Value;

use crate::base_service::ensure_trailing_slash;
use crate::{ClientError, GenericResponse};

/// Generic blocking JSON HTTP wrapper.
///
/// This is the synchronous counterpart of [`crate::BaseService`].
#[derive(Clone, Debug)]
pub struct BlockingBaseService {
    base_url: Url,
    http: reqwest::blocking::Client,
}

impl BlockingBaseService {
    /// Creates a new service with the given base URL and its own HTTP client.
    ///
    /// The URL is normalized to include a trailing slash, so relative endpoint
    /// paths join correctly.
    pub fn new(base_url: impl AsRef<str>) -> Result<Self, ClientError> {
        Self::with_http_client(base_url, reqwest::blocking::Client::new())
    }

    /// Creates a new service sharing a host-provided HTTP client.
    ///
    /// The client is used read-only; cloning a `reqwest::blocking::Client`
    /// shares its connection pool, so one client can back many services.
    pub fn with_http_client(
        base_url: impl AsRef<str>,
        http: reqwest::blocking::Client,
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
    pub fn get(
        &self,
        parameters: &[(&str, &str)],
        path: &str,
    ) -> Result<GenericResponse, ClientError> {
        let body = self.request_json_with_query(Method::GET, path, parameters, None)?;
        Ok(GenericResponse::from_value(&body))
    }

    /// Sends a `POST` request with a JSON body and decodes the response envelope.
    pub fn post(&self, body: Value, path: &str) -> Result<GenericResponse, ClientError> {
        let response = self.request_json(Method::POST, path, Some(body))?;
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
    pub fn request_json(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> Result<Value, ClientError> {
        self.request_json_with_query(method, path, &[], body)
    }

    /// Sends a request with query parameters and parses the response as JSON.
    ///
    /// Returns [`Value::Null`] for successful responses with an empty body.
    pub fn request_json_with_query(
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

        let response = request.send()?;
        let status = response.status();
        let payload = response.text()?;
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
