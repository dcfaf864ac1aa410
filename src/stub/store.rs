use crate::{
    error::{AppError, AppResult},
    models::{Media, MediaId, MediaPage},
};

/// In-memory media table backing the stub API
///
/// Rows keep insertion order; ids are assigned from 1 upwards and never reused.
#[derive(Debug, Clone)]
pub struct MediaStore {
    records: Vec<Media>,
    next_id: MediaId,
}

impl Default for MediaStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MediaStore {
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
            next_id: 1,
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, id: MediaId) -> Option<&Media> {
        self.records.iter().find(|media| media.id == Some(id))
    }

    /// Stores `draft` under a fresh id, ignoring any id it carries
    pub fn insert(&mut self, draft: Media) -> Media {
        let media = Media {
            id: Some(self.next_id),
            ..draft
        };
        self.next_id += 1;
        self.records.push(media.clone());
        media
    }

    pub fn replace(&mut self, id: MediaId, media: Media) -> AppResult<Media> {
        let slot = self
            .records
            .iter_mut()
            .find(|existing| existing.id == Some(id))
            .ok_or(AppError::NotFound(id))?;

        *slot = Media {
            id: Some(id),
            ..media
        };
        Ok(slot.clone())
    }

    pub fn remove(&mut self, id: MediaId) -> AppResult<()> {
        let index = self
            .records
            .iter()
            .position(|media| media.id == Some(id))
            .ok_or(AppError::NotFound(id))?;

        self.records.remove(index);
        Ok(())
    }

    /// Slice of rows for a 1-based page; pages past the end are empty
    pub fn page(&self, page: u32, limit: u32) -> AppResult<MediaPage> {
        if page == 0 {
            return Err(AppError::InvalidInput("page must be at least 1".to_string()));
        }
        if limit == 0 {
            return Err(AppError::InvalidInput("limit must be at least 1".to_string()));
        }

        let limit = limit as usize;
        let total_pages = self.records.len().div_ceil(limit) as u32;
        let start = (page as usize - 1).saturating_mul(limit);

        let media = self
            .records
            .iter()
            .skip(start)
            .take(limit)
            .cloned()
            .collect();

        Ok(MediaPage { media, total_pages })
    }
}
