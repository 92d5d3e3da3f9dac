//! AI agent service.
//!
//! An HTTP front for an agent: a root description, a health endpoint that
//! always answers 200 with the agent's status in the body, and a versioned
//! API hosting the agent registry.
//!
//! # Modules
//!
//! - [`config`]: Configuration loading from environment
//! - [`error`]: Unified error types
//! - [`agent`]: The agent collaborator and its health reports
//! - [`health`]: Failure-proof health probing
//! - [`registry`]: In-memory agent registry
//! - [`api`]: HTTP API, CORS and OpenAPI docs
//! - [`server`]: Startup, serving and shutdown
//! - [`metrics`]: Prometheus metrics
//! - [`utils`]: Utility functions

pub mod agent;
pub mod api;
pub mod config;
pub mod error;
pub mod health;
pub mod metrics;
pub mod registry;
pub mod server;
pub mod utils;

pub use config::Config;
pub use error::{Result, ServiceError};
