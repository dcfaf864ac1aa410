use serde::{Deserialize, Serialize};
use std::fmt::Display;

use super::MediaField;

/// Server-assigned identifier of a persisted watchlist entry
pub type MediaId = i64;

/// Kind of watchlist entry
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum MediaType {
    #[default]
    Movie,
    #[serde(rename = "TV Show")]
    TvShow,
}

impl MediaType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MediaType::Movie => "Movie",
            MediaType::TvShow => "TV Show",
        }
    }

    /// Parses the user-facing label, accepting a few spellings of "TV Show"
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "movie" => Some(MediaType::Movie),
            "tv show" | "tv" | "tvshow" | "show" => Some(MediaType::TvShow),
            _ => None,
        }
    }
}

impl Display for MediaType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A movie or TV show on the watchlist
///
/// Every descriptive field is free-form text. `id` is only present once the
/// API has persisted the entry, and is left out of the JSON body otherwise.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Media {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<MediaId>,
    pub title: String,
    #[serde(rename = "type")]
    pub media_type: MediaType,
    pub director: String,
    pub budget: String,
    pub location: String,
    pub duration: String,
    pub year: String,
}

impl Media {
    /// Empty draft used by the form in create mode
    pub fn blank() -> Self {
        Self::default()
    }

    /// Returns the same entry without its identifier
    pub fn without_id(&self) -> Self {
        Self {
            id: None,
            ..self.clone()
        }
    }

    /// Required fields that are empty or whitespace only
    pub fn missing_fields(&self) -> Vec<MediaField> {
        MediaField::ALL
            .iter()
            .copied()
            .filter(|field| field.is_required() && field.get(self).trim().is_empty())
            .collect()
    }
}
