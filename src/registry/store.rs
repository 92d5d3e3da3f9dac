//! In-memory agent registry.

use std::sync::atomic::{AtomicU64, Ordering};

use chrono::Utc;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use tracing::{debug, info, instrument};

use crate::error::RegistryError;
use crate::metrics;

use super::types::{AgentPayload, AgentRecord, AgentStatus};

/// Concurrent catalogue of agent definitions.
///
/// Lock order: a `records` shard may be held while touching `names`, never
/// the reverse.
#[derive(Debug)]
pub struct AgentRegistry {
    /// All records, including soft-deleted ones.
    records: DashMap<u64, AgentRecord>,
    /// Live name -> id index.
    names: DashMap<String, u64>,
    /// Next id to hand out.
    next_id: AtomicU64,
}

impl Default for AgentRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl AgentRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            records: DashMap::new(),
            names: DashMap::new(),
            next_id: AtomicU64::new(1),
        }
    }

    /// Register a new agent. Its status always starts as ACTIVE.
    #[instrument(skip(self, payload), fields(name = %payload.name))]
    pub fn create(&self, payload: AgentPayload) -> Result<AgentRecord, RegistryError> {
        payload.validate()?;

        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        self.reserve_name(&payload.name, id)?;

        let record = AgentRecord::from_payload(id, payload, Utc::now());
        self.records.insert(id, record.clone());

        metrics::inc_registry_mutation("create");
        info!(id, "Agent created");
        Ok(record)
    }

    /// Fetch a live agent by id.
    pub fn get(&self, id: u64) -> Result<AgentRecord, RegistryError> {
        let record = self.records.get(&id).ok_or(RegistryError::NotFound(id))?;
        if record.deleted {
            return Err(RegistryError::Deleted(id));
        }
        Ok(record.clone())
    }

    /// Fetch a live agent by exact name.
    pub fn get_by_name(&self, name: &str) -> Result<AgentRecord, RegistryError> {
        let id = self
            .names
            .get(name)
            .map(|r| *r.value())
            .ok_or_else(|| RegistryError::NameNotFound(name.to_string()))?;
        // The name may be reserved by a create that has not inserted yet.
        self.get(id)
            .map_err(|_| RegistryError::NameNotFound(name.to_string()))
    }

    /// All live agents, newest first.
    pub fn list_all(&self) -> Vec<AgentRecord> {
        self.live(|_| true)
    }

    /// Live agents of the given type, newest first.
    pub fn list_by_type(&self, agent_type: &str) -> Vec<AgentRecord> {
        self.live(|r| r.agent_type == agent_type)
    }

    /// Live agents in the given status, newest first.
    pub fn list_by_status(&self, status: AgentStatus) -> Vec<AgentRecord> {
        self.live(|r| r.status == status)
    }

    /// Live agents whose name contains `fragment`, case-insensitively.
    pub fn search_by_name(&self, fragment: &str) -> Vec<AgentRecord> {
        let needle = fragment.to_lowercase();
        self.live(|r| r.name.to_lowercase().contains(&needle))
    }

    /// Replace an agent's editable fields.
    ///
    /// Status is only changed when the payload carries one.
    #[instrument(skip(self, payload), fields(name = %payload.name))]
    pub fn update(&self, id: u64, payload: AgentPayload) -> Result<AgentRecord, RegistryError> {
        payload.validate()?;

        let mut record = self.records.get_mut(&id).ok_or(RegistryError::NotFound(id))?;
        if record.deleted {
            return Err(RegistryError::Deleted(id));
        }

        if record.name != payload.name {
            self.reserve_name(&payload.name, id)?;
            self.names.remove_if(&record.name, |_, owner| *owner == id);
            debug!(old = %record.name, "Agent renamed");
        }

        record.name = payload.name;
        record.description = payload.description;
        record.agent_type = payload.agent_type;
        if let Some(status) = payload.status {
            record.status = status;
        }
        record.config = payload.config;
        record.updated_by = payload.updated_by;
        record.touch(Utc::now());

        metrics::inc_registry_mutation("update");
        info!(id, "Agent updated");
        Ok(record.clone())
    }

    /// Soft-delete an agent, freeing its name.
    #[instrument(skip(self))]
    pub fn delete(&self, id: u64) -> Result<(), RegistryError> {
        let mut record = self.records.get_mut(&id).ok_or(RegistryError::NotFound(id))?;
        if record.deleted {
            return Err(RegistryError::Deleted(id));
        }

        record.deleted = true;
        record.touch(Utc::now());
        self.names.remove_if(&record.name, |_, owner| *owner == id);

        metrics::inc_registry_mutation("delete");
        info!(id, "Agent deleted");
        Ok(())
    }

    /// Mark an agent ACTIVE.
    pub fn activate(&self, id: u64) -> Result<AgentRecord, RegistryError> {
        self.set_status(id, AgentStatus::Active)
    }

    /// Mark an agent INACTIVE.
    pub fn deactivate(&self, id: u64) -> Result<AgentRecord, RegistryError> {
        self.set_status(id, AgentStatus::Inactive)
    }

    /// Number of live agents of the given type.
    pub fn count_by_type(&self, agent_type: &str) -> u64 {
        self.count(|r| r.agent_type == agent_type)
    }

    /// Number of live agents in the given status.
    pub fn count_by_status(&self, status: AgentStatus) -> u64 {
        self.count(|r| r.status == status)
    }

    #[instrument(skip(self))]
    fn set_status(&self, id: u64, status: AgentStatus) -> Result<AgentRecord, RegistryError> {
        let mut record = self.records.get_mut(&id).ok_or(RegistryError::NotFound(id))?;
        if record.deleted {
            return Err(RegistryError::Deleted(id));
        }

        record.status = status;
        record.touch(Utc::now());

        metrics::inc_registry_mutation("set_status");
        info!(id, %status, "Agent status changed");
        Ok(record.clone())
    }

    fn reserve_name(&self, name: &str, id: u64) -> Result<(), RegistryError> {
        match self.names.entry(name.to_string()) {
            Entry::Occupied(_) => Err(RegistryError::DuplicateName(name.to_string())),
            Entry::Vacant(slot) => {
                slot.insert(id);
                Ok(())
            }
        }
    }

    fn live(&self, pred: impl Fn(&AgentRecord) -> bool) -> Vec<AgentRecord> {
        let mut out: Vec<AgentRecord> = self
            .records
            .iter()
            .filter(|r| !r.deleted && pred(r.value()))
            .map(|r| r.value().clone())
            .collect();
        out.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        out
    }

    fn count(&self, pred: impl Fn(&AgentRecord) -> bool) -> u64 {
        self.records
            .iter()
            .filter(|r| !r.deleted && pred(r.value()))
            .count() as u64
    }
}
