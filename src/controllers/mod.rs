//! Controllers owning the watchlist UI state.
//!
//! Each one absorbs gateway failures at its own boundary: errors are logged
//! and the state stays at its last good value.

pub mod confirm;
pub mod form;
pub mod list;

pub use confirm::{ConfirmationGate, Confirmed};
pub use form::{FormController, FormMode, FormOutcome};
pub use list::{ListController, ListState};
