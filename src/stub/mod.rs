//! Stub implementation of the media API.
//!
//! Serves the four `/api/media` endpoints from memory so the shell can run
//! locally and [`HttpGateway`](crate::gateway::HttpGateway) can be exercised
//! end to end in tests.

pub mod handlers;
pub mod request_id;
pub mod routes;
pub mod state;
pub mod store;

pub use routes::create_router;
pub use state::StubState;
pub use store::MediaStore;
