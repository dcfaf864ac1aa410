//! Watchlist client for movies and TV shows.
//!
//! Talks to a remote media API through a [`gateway::MediaGateway`], keeps an
//! incrementally loaded list of entries, and edits them through a form with a
//! confirmation step for deletes. The [`shell`] module puts these together in
//! a terminal UI; [`stub`] serves the same API from memory.

pub mod config;
pub mod controllers;
pub mod error;
pub mod gateway;
pub mod models;
pub mod shell;
pub mod stub;
pub mod visibility;

pub use config::Config;
pub use error::{AppError, AppResult};
