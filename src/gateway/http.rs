/// HTTP gateway for the media API
///
/// Endpoints, all relative to the configured base URL:
/// - `GET    /api/media?page=N&limit=L` → `{ media, totalPages }`
/// - `POST   /api/media`                → persisted record
/// - `PUT    /api/media/{id}`           → persisted record
/// - `DELETE /api/media/{id}`           → body ignored
use crate::{
    error::{AppError, AppResult},
    gateway::MediaGateway,
    models::{Media, MediaId, MediaPage},
};
use reqwest::{Client as HttpClient, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use uuid::Uuid;

/// Header carrying the per-call correlation id
pub const REQUEST_ID_HEADER: &str = "x-request-id";

const MEDIA_PATH: &str = "/api/media";

#[derive(Clone)]
pub struct HttpGateway {
    http_client: HttpClient,
    api_url: String,
}

impl HttpGateway {
    pub fn new(api_url: impl Into<String>) -> Self {
        Self::with_client(HttpClient::new(), api_url)
    }

    pub fn with_client(http_client: HttpClient, api_url: impl Into<String>) -> Self {
        let api_url = api_url.into().trim_end_matches('/').to_string();
        Self {
            http_client,
            api_url,
        }
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    fn collection_url(&self) -> String {
        format!("{}{}", self.api_url, MEDIA_PATH)
    }

    fn item_url(&self, id: MediaId) -> String {
        format!("{}{}/{}", self.api_url, MEDIA_PATH, id)
    }

    /// Sends the request tagged with a fresh request id and checks the status
    async fn send(&self, request: RequestBuilder) -> AppResult<Response> {
        let request_id = Uuid::new_v4();
        tracing::Span::current().record("request_id", tracing::field::display(request_id));

        let response = request
            .header(REQUEST_ID_HEADER, request_id.to_string())
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Status { status, body });
        }

        Ok(response)
    }

    async fn send_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> AppResult<T> {
        let response = self.send(request).await?;
        Ok(response.json::<T>().await?)
    }
}

#[async_trait::async_trait]
impl MediaGateway for HttpGateway {
    #[tracing::instrument(skip(self), fields(request_id = tracing::field::Empty))]
    async fn list_page(&self, page: u32, limit: u32) -> AppResult<MediaPage> {
        let request = self
            .http_client
            .get(self.collection_url())
            .query(&[("page", page), ("limit", limit)]);

        let media_page: MediaPage = self.send_json(request).await?;

        tracing::debug!(
            page,
            records = media_page.media.len(),
            total_pages = media_page.total_pages,
            gateway = self.name(),
            "Media page fetched"
        );

        Ok(media_page)
    }

    #[tracing::instrument(skip_all, fields(title = %media.title, request_id = tracing::field::Empty))]
    async fn create(&self, media: &Media) -> AppResult<Media> {
        let request = self
            .http_client
            .post(self.collection_url())
            .json(&media.without_id());

        let created: Media = self.send_json(request).await?;

        tracing::info!(id = ?created.id, gateway = self.name(), "Media created");

        Ok(created)
    }

    #[tracing::instrument(skip(self, media), fields(request_id = tracing::field::Empty))]
    async fn update(&self, id: MediaId, media: &Media) -> AppResult<Media> {
        let request = self.http_client.put(self.item_url(id)).json(media);

        let updated: Media = self.send_json(request).await?;

        tracing::info!(id, gateway = self.name(), "Media updated");

        Ok(updated)
    }

    #[tracing::instrument(skip(self), fields(request_id = tracing::field::Empty))]
    async fn delete_by_id(&self, id: MediaId) -> AppResult<()> {
        self.send(self.http_client.delete(self.item_url(id))).await?;

        tracing::info!(id, gateway = self.name(), "Media deleted");

        Ok(())
    }

    fn name(&self) -> &'static str {
        "http"
    }
}
