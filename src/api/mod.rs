//! HTTP API module: service endpoints, the versioned agent registry API and
//! its OpenAPI documentation.

pub mod agents;
pub mod docs;
pub mod handlers;
pub mod response;
pub mod routes;

pub use handlers::AppState;
pub use response::{ApiError, ApiResponse};
pub use routes::{create_app, create_router};
