// src/core/mod.rs
//! Transport layer: the service client and its error type

pub mod error;
pub mod service_client;

pub use error::ApiError;
pub use service_client::{Document, Payload, RequestOptions, ResponseKind, ServiceClient};
