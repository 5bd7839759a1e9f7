//! Application state store
//!
//! The snapshot builder only ever sees state through [`StateView`], a
//! read-only surface. [`AppState`] is the owned store used by the CLI and by
//! tests; a front-end can implement the trait over its own container.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::info;

use crate::error::ExportError;
use crate::types::{
    Asset, Assignment, AuditLogEntry, Client, Driver, SimCard, Theme, User, UserRole, Vehicle,
};

/// Read access to everything a snapshot captures
///
/// Collections that were never loaded are reported as empty slices.
pub trait StateView {
    fn current_user(&self) -> Option<&User>;
    fn user_role(&self) -> Option<UserRole>;
    /// Active theme preference, `None` if the user never picked one
    fn theme(&self) -> Option<Theme>;

    fn drivers(&self) -> &[Driver];
    fn vehicles(&self) -> &[Vehicle];
    fn assets(&self) -> &[Asset];
    fn sim_cards(&self) -> &[SimCard];
    fn clients(&self) -> &[Client];
    fn assignments(&self) -> &[Assignment];
    fn audit_logs(&self) -> &[AuditLogEntry];
}

/// In-memory application state
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppState {
    #[serde(default)]
    pub current_user: Option<User>,
    #[serde(default)]
    pub user_role: Option<UserRole>,
    #[serde(default)]
    pub theme: Option<Theme>,
    #[serde(default)]
    pub drivers: Vec<Driver>,
    #[serde(default)]
    pub vehicles: Vec<Vehicle>,
    #[serde(default)]
    pub assets: Vec<Asset>,
    // The store calls this collection `sims`; exports call it `simCards`
    #[serde(default, alias = "sims")]
    pub sim_cards: Vec<SimCard>,
    #[serde(default)]
    pub clients: Vec<Client>,
    #[serde(default)]
    pub assignments: Vec<Assignment>,
    #[serde(default)]
    pub audit_logs: Vec<AuditLogEntry>,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a saved state file (JSON)
    pub fn load(path: &Path) -> Result<Self, ExportError> {
        let contents = fs::read_to_string(path).map_err(|e| ExportError::io(path, e))?;
        let state: AppState = serde_json::from_str(&contents).map_err(|source| {
            ExportError::Parse {
                path: path.to_path_buf(),
                source,
            }
        })?;

        info!(
            path = %path.display(),
            drivers = state.drivers.len(),
            vehicles = state.vehicles.len(),
            "Loaded application state"
        );
        Ok(state)
    }
}

impl StateView for AppState {
    fn current_user(&self) -> Option<&User> {
        self.current_user.as_ref()
    }

    fn user_role(&self) -> Option<UserRole> {
        self.user_role
    }

    fn theme(&self) -> Option<Theme> {
        self.theme
    }

    fn drivers(&self) -> &[Driver] {
        &self.drivers
    }

    fn vehicles(&self) -> &[Vehicle] {
        &self.vehicles
    }

    fn assets(&self) -> &[Asset] {
        &self.assets
    }

    fn sim_cards(&self) -> &[SimCard] {
        &self.sim_cards
    }

    fn clients(&self) -> &[Client] {
        &self.clients
    }

    fn assignments(&self) -> &[Assignment] {
        &self.assignments
    }

    fn audit_logs(&self) -> &[AuditLogEntry] {
        &self.audit_logs
    }
}
