/// Remote data gateway
///
/// The media API is the only durable store. This module provides the
/// abstraction the controllers talk to, plus the HTTP implementation used in
/// production. Every call is single-shot: no retry, no timeout.
use crate::{
    error::AppResult,
    models::{Media, MediaId, MediaPage},
};

pub mod http;

pub use http::HttpGateway;

/// Trait for media persistence backends
///
/// Implementations report failures through `AppResult`. The controllers are
/// the boundary that logs and absorbs them.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait MediaGateway: Send + Sync {
    /// Fetch one page of records plus the total page count
    async fn list_page(&self, page: u32, limit: u32) -> AppResult<MediaPage>;

    /// Persist a new record. Any `id` on the input is not sent.
    async fn create(&self, media: &Media) -> AppResult<Media>;

    /// Replace the record stored under `id`
    async fn update(&self, id: MediaId, media: &Media) -> AppResult<Media>;

    /// Remove the record stored under `id`
    async fn delete_by_id(&self, id: MediaId) -> AppResult<()>;

    /// Gateway name for logging and debugging
    fn name(&self) -> &'static str;
}
