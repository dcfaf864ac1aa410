use crate::models::MediaId;

/// Holds at most one delete waiting for the user's answer
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ConfirmationGate {
    target: Option<MediaId>,
}

/// Proof that the user confirmed deleting `id`
///
/// Only [`ConfirmationGate::confirm`] hands these out, so a delete can't run
/// without a pending target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Confirmed {
    id: MediaId,
}

impl Confirmed {
    pub fn id(&self) -> MediaId {
        self.id
    }
}

impl ConfirmationGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Asks for confirmation, replacing any earlier pending target
    pub fn request(&mut self, id: MediaId) {
        tracing::debug!(id, "Delete awaiting confirmation");
        self.target = Some(id);
    }

    pub fn pending(&self) -> Option<MediaId> {
        self.target
    }

    pub fn is_open(&self) -> bool {
        self.target.is_some()
    }

    /// The target stays pending until [`resolve`](Self::resolve) so a failed
    /// delete keeps the prompt open.
    pub fn confirm(&self) -> Option<Confirmed> {
        self.target.map(|id| Confirmed { id })
    }

    /// Clears the target after the delete went through
    pub fn resolve(&mut self, confirmed: Confirmed) {
        if self.target == Some(confirmed.id) {
            self.target = None;
        }
    }

    pub fn cancel(&mut self) {
        if let Some(id) = self.target.take() {
            tracing::debug!(id, "Delete cancelled");
        }
    }
}
