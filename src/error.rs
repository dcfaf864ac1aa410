use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::models::{MediaField, MediaId};

/// Failures of a media API call, on either side of the wire
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    /// Connection failure or a body that is not the expected JSON
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The API answered with a non-2xx status
    #[error("API returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("No media with id {0}")]
    NotFound(MediaId),

    /// A record was submitted with required fields left empty
    #[error("Missing required fields: {}", field_list(.0))]
    MissingFields(Vec<MediaField>),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

fn field_list(fields: &[MediaField]) -> String {
    fields
        .iter()
        .map(MediaField::label)
        .collect::<Vec<_>>()
        .join(", ")
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            AppError::MissingFields(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Transport(_) | AppError::Status { .. } => StatusCode::BAD_GATEWAY,
        };

        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;
