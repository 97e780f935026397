//! REST client for the community graph backend.

pub mod client;
pub mod error;
pub mod models;
pub mod scope;

pub use client::{ApiClient, RetryPolicy};
pub use error::ApiError;
pub use models::*;
pub use scope::RequestScope;
