use serde::{Deserialize, Serialize};

pub mod field;
pub mod media;

pub use field::MediaField;
pub use media::{Media, MediaId, MediaType};

/// One page of the media list as returned by `GET /api/media`
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MediaPage {
    pub media: Vec<Media>,
    pub total_pages: u32,
}

/// Page coordinates of a list fetch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    /// 1-based page number
    pub page: u32,
    pub limit: u32,
}
