//! HTTP plumbing for the portal client.
//!
//! This crate provides:
//! - `ApiClient`, the single HTTP surface every feature talks through
//! - `TokenProviderBridge`, the mutable access-token getter slot that lets
//!   the client attach `Authorization: Bearer` headers without depending on
//!   the session manager
//! - `ApiError`, carrying the HTTP status and the server-provided message

mod client;
mod error;
mod token_provider;

pub use client::ApiClient;
pub use error::{ApiError, ApiResult};
pub use token_provider::{TokenGetter, TokenProviderBridge};
