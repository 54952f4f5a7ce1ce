//! Generic CRUD client library for JSON REST APIs.
//!
//! Public API layers:
//! - [`BaseService`]/[`BlockingBaseService`]: generic JSON HTTP verb wrappers.
//! - [`RestService`]/[`BlockingRestService`]: typed CRUD clients bound to one
//!   resource type and path.
//! - [`Serializable`]: wire-mapping contract implemented by domain entities.
//! - [`GenericResponse`]: envelope returned by mutating endpoints.
//! - [`ClientError`]: unified error type used by all services.
//!
//! The library owns exactly one responsibility: translate a typed CRUD call
//! into one HTTP round trip and decode its JSON body. Retries, caching,
//! authentication, and pagination belong to the hosting application.

mod base_service;
mod blocking_base_service;
mod error;
mod response;
mod rest_service;
mod serialize;

/// Generic async JSON HTTP wrapper.
pub use base_service::BaseService;
/// Generic blocking JSON HTTP wrapper.
pub use blocking_base_service::BlockingBaseService;
/// Error type returned by all service operations.
pub use error::ClientError;
/// Envelope returned by mutating endpoints.
pub use response::GenericResponse;
/// Typed CRUD clients over a resource path.
pub use rest_service::{BlockingRestService, RestService};
/// Wire-mapping contract for domain entities.
pub use serialize::Serializable;
