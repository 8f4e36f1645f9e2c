use std::collections::HashSet;
use std::path::Path;
use tracing::{debug, info};

use crate::model::machine::{CategoryFilter, Machine, MachineCategory};
use crate::repository::repository_error::{RepositoryError, RepositoryResult};

const EMBEDDED_CATALOG: &str = include_str!("../../data/machines.json");

/// Read-only access to the machine catalog
pub trait MachineCatalog: Send + Sync {
    fn find_by_id(&self, id: &str) -> Option<Machine>;
    /// Every machine, in catalog order
    fn list(&self) -> Vec<Machine>;

    fn list_by_category(&self, category: MachineCategory) -> Vec<Machine> {
        self.list()
            .into_iter()
            .filter(|m| m.category == category)
            .collect()
    }

    fn filter(&self, filter: CategoryFilter) -> Vec<Machine> {
        match filter {
            CategoryFilter::All => self.list(),
            CategoryFilter::Only(category) => self.list_by_category(category),
        }
    }
}

/// Catalog held in memory, loaded once from static JSON
pub struct StaticMachineCatalog {
    machines: Vec<Machine>,
}

impl StaticMachineCatalog {
    /// The catalog compiled into the binary.
    pub fn embedded() -> RepositoryResult<Self> {
        Self::from_json(EMBEDDED_CATALOG)
    }

    pub fn from_file(path: impl AsRef<Path>) -> RepositoryResult<Self> {
        let path = path.as_ref();
        info!("Loading machine catalog from {}", path.display());
        let raw = std::fs::read_to_string(path)?;
        Self::from_json(&raw)
    }

    pub fn from_json(raw: &str) -> RepositoryResult<Self> {
        let machines: Vec<Machine> = serde_json::from_str(raw)?;
        Self::new(machines)
    }

    pub fn new(machines: Vec<Machine>) -> RepositoryResult<Self> {
        {
            let mut seen = HashSet::new();
            for machine in &machines {
                if machine.id.trim().is_empty() {
                    return Err(RepositoryError::validation("Machine id cannot be empty"));
                }
                if !seen.insert(machine.id.as_str()) {
                    return Err(RepositoryError::already_exists(format!("Duplicate machine id: {}", machine.id)));
                }
            }
        }
        debug!("Machine catalog holds {} entries", machines.len());
        Ok(StaticMachineCatalog { machines })
    }
}

impl MachineCatalog for StaticMachineCatalog {
    fn find_by_id(&self, id: &str) -> Option<Machine> {
        self.machines.iter().find(|m| m.id == id).cloned()
    }

    fn list(&self) -> Vec<Machine> {
        self.machines.clone()
    }
}
