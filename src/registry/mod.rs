//! Agent registry: the catalogue of agent definitions served under
//! `/api/v1/agents`.

pub mod store;
pub mod types;

pub use store::AgentRegistry;
pub use types::{AgentPayload, AgentRecord, AgentStatus};
