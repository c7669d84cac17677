//! REST API client module for the PocketBase backend.
//!
//! This module provides the `PocketBaseClient` for querying collection
//! records, the `RecordSource` trait it implements, and the query
//! parameter and filter builders.

pub mod client;
pub mod error;
pub mod query;

pub use client::{PocketBaseClient, RecordSource, DEFAULT_BASE_URL};
pub use error::ApiError;
pub use query::{Filter, QueryParams};
