use crate::{
    gateway::MediaGateway,
    models::{Media, MediaField},
};

/// Whether the form creates a new entry or edits a persisted one
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit,
}

/// Result of submitting the form
#[derive(Debug, Clone, PartialEq)]
pub enum FormOutcome {
    /// The gateway persisted the draft
    Saved(Media),
    /// Required fields were empty, nothing was sent
    Incomplete(Vec<MediaField>),
    /// The gateway call failed; the draft is untouched
    Failed,
}

/// Draft of one watchlist entry being created or edited
#[derive(Debug, Clone, PartialEq)]
pub struct FormController {
    draft: Media,
}

impl FormController {
    /// Blank form for a new entry
    pub fn create() -> Self {
        Self {
            draft: Media::blank(),
        }
    }

    /// Form pre-filled with an existing entry
    pub fn edit(record: Media) -> Self {
        Self { draft: record }
    }

    pub fn mode(&self) -> FormMode {
        if self.draft.id.is_some() {
            FormMode::Edit
        } else {
            FormMode::Create
        }
    }

    pub fn draft(&self) -> &Media {
        &self.draft
    }

    pub fn set_field(&mut self, field: MediaField, value: &str) -> Result<(), String> {
        field.set(&mut self.draft, value)
    }

    /// Sends the draft: update when it carries an id, create otherwise
    pub async fn submit(&self, gateway: &dyn MediaGateway) -> FormOutcome {
        let missing = self.draft.missing_fields();
        if !missing.is_empty() {
            tracing::debug!(?missing, "Form submitted with empty required fields");
            return FormOutcome::Incomplete(missing);
        }

        let result = match self.draft.id {
            Some(id) => gateway.update(id, &self.draft).await,
            None => gateway.create(&self.draft).await,
        };

        match result {
            Ok(saved) => FormOutcome::Saved(saved),
            Err(e) => {
                tracing::error!(
                    error = %e,
                    mode = ?self.mode(),
                    gateway = gateway.name(),
                    "Error submitting form"
                );
                FormOutcome::Failed
            }
        }
    }
}
