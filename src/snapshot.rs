//! State snapshot builder
//!
//! Turns whatever the state store currently holds into an [`ExportDocument`]:
//! a versioned, timestamped, self-describing copy of every collection plus
//! per-collection counts.

use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::{ExportConfig, NotificationSettings};
use crate::constants::schema;
use crate::error::ExportError;
use crate::state::StateView;
use crate::types::{
    Asset, Assignment, AuditLogEntry, Client, Driver, SimCard, Theme, User, UserRole, Vehicle,
};

/// User preferences recorded alongside the data
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    pub theme: Theme,
    pub notifications: NotificationSettings,
    pub language: String,
    pub timezone: String,
}

/// Number of entries in each collection of a document
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataCounts {
    pub drivers: usize,
    pub vehicles: usize,
    pub assets: usize,
    pub sim_cards: usize,
    pub clients: usize,
    pub assignments: usize,
    pub audit_logs: usize,
}

impl DataCounts {
    /// Counts keyed by their JSON field name, in document order
    pub fn entries(&self) -> [(&'static str, usize); 7] {
        [
            ("drivers", self.drivers),
            ("vehicles", self.vehicles),
            ("assets", self.assets),
            ("simCards", self.sim_cards),
            ("clients", self.clients),
            ("assignments", self.assignments),
            ("auditLogs", self.audit_logs),
        ]
    }
}

/// Full export of the application state at one instant
///
/// Fields are private: a document is only produced by [`build_snapshot`] or
/// by parsing, and is never edited afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportDocument {
    version: String,
    #[serde(with = "export_date")]
    export_date: DateTime<Utc>,
    exported_by: String,
    #[serde(default)]
    current_user: Option<User>,
    #[serde(default)]
    user_role: Option<UserRole>,
    settings: Settings,
    #[serde(default)]
    drivers: Vec<Driver>,
    #[serde(default)]
    vehicles: Vec<Vehicle>,
    #[serde(default)]
    assets: Vec<Asset>,
    #[serde(default)]
    sim_cards: Vec<SimCard>,
    #[serde(default)]
    clients: Vec<Client>,
    #[serde(default)]
    assignments: Vec<Assignment>,
    #[serde(default)]
    audit_logs: Vec<AuditLogEntry>,
    data_counts: DataCounts,
}

impl ExportDocument {
    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn export_date(&self) -> DateTime<Utc> {
        self.export_date
    }

    pub fn exported_by(&self) -> &str {
        &self.exported_by
    }

    pub fn current_user(&self) -> Option<&User> {
        self.current_user.as_ref()
    }

    pub fn user_role(&self) -> Option<UserRole> {
        self.user_role
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn drivers(&self) -> &[Driver] {
        &self.drivers
    }

    pub fn vehicles(&self) -> &[Vehicle] {
        &self.vehicles
    }

    pub fn assets(&self) -> &[Asset] {
        &self.assets
    }

    pub fn sim_cards(&self) -> &[SimCard] {
        &self.sim_cards
    }

    pub fn clients(&self) -> &[Client] {
        &self.clients
    }

    pub fn assignments(&self) -> &[Assignment] {
        &self.assignments
    }

    pub fn audit_logs(&self) -> &[AuditLogEntry] {
        &self.audit_logs
    }

    pub fn data_counts(&self) -> &DataCounts {
        &self.data_counts
    }

    /// Counts recomputed from the collections actually present
    fn collection_lengths(&self) -> DataCounts {
        DataCounts {
            drivers: self.drivers.len(),
            vehicles: self.vehicles.len(),
            assets: self.assets.len(),
            sim_cards: self.sim_cards.len(),
            clients: self.clients.len(),
            assignments: self.assignments.len(),
            audit_logs: self.audit_logs.len(),
        }
    }

    /// Check a document read back from disk: known schema, honest counts
    pub fn verify(&self) -> Result<(), ExportError> {
        if self.version != schema::VERSION {
            return Err(ExportError::UnsupportedVersion {
                found: self.version.clone(),
                expected: schema::VERSION.to_string(),
            });
        }

        let actual = self.collection_lengths();
        for ((collection, recorded), (_, actual)) in
            self.data_counts.entries().into_iter().zip(actual.entries())
        {
            if recorded != actual {
                return Err(ExportError::CountMismatch {
                    collection,
                    recorded,
                    actual,
                });
            }
        }
        Ok(())
    }
}

/// Build a snapshot stamped with the current time
pub fn build_snapshot(state: &impl StateView, config: &ExportConfig) -> ExportDocument {
    build_snapshot_at(state, config, Utc::now())
}

/// Build a snapshot stamped with `at` (truncated to milliseconds)
pub fn build_snapshot_at(
    state: &impl StateView,
    config: &ExportConfig,
    at: DateTime<Utc>,
) -> ExportDocument {
    let current_user = state.current_user().cloned();
    let exported_by = current_user
        .as_ref()
        .map(|user| user.email.clone())
        .unwrap_or_else(|| schema::SYSTEM_EXPORTER.to_string());

    let settings = Settings {
        theme: state.theme().unwrap_or(config.default_theme),
        notifications: config.notifications,
        language: config.language.clone(),
        timezone: config.timezone.clone(),
    };

    let mut document = ExportDocument {
        version: schema::VERSION.to_string(),
        export_date: at.trunc_subsecs(3),
        exported_by,
        current_user,
        user_role: state.user_role(),
        settings,
        drivers: state.drivers().to_vec(),
        vehicles: state.vehicles().to_vec(),
        assets: state.assets().to_vec(),
        sim_cards: state.sim_cards().to_vec(),
        clients: state.clients().to_vec(),
        assignments: state.assignments().to_vec(),
        audit_logs: state.audit_logs().to_vec(),
        data_counts: DataCounts::default(),
    };
    // Counted from the copies above, never from the store
    document.data_counts = document.collection_lengths();

    debug!(
        exported_by = %document.exported_by,
        export_date = %document.export_date,
        counts = ?document.data_counts,
        "Built export snapshot"
    );
    document
}

/// `exportDate` as RFC 3339 with millisecond precision and a `Z` suffix
mod export_date {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&value.to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        let date = DateTime::parse_from_rfc3339(&raw)
            .map(|date| date.with_timezone(&Utc))
            .map_err(serde::de::Error::custom)?;

        // Only the exact form `serialize` writes, so a parsed document re-serializes byte for byte
        if date.to_rfc3339_opts(SecondsFormat::Millis, true) != raw {
            return Err(serde::de::Error::custom(format!(
                "exportDate {raw:?} is not UTC with millisecond precision"
            )));
        }
        Ok(date)
    }
}
