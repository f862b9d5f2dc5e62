//! Snapshot and restore of a machine's position.
//!
//! A snapshot records which state is current, the default state, the
//! machine status, the tick counter and the change history. Actions and
//! their internal data are code, not data, and are never serialized: a
//! snapshot is restored into a machine built from the same definition.

use crate::core::{StateHistory, StateId};
use crate::fsm::FsmStatus;
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub mod error;

pub use error::CheckpointError;

/// Version identifier for snapshot format
pub const CHECKPOINT_VERSION: u32 = 1;

/// Serializable position of an [`Fsm`](crate::fsm::Fsm).
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FsmSnapshot<Id> {
    /// Snapshot format version
    pub version: u32,

    /// Machine the snapshot was taken from
    pub fsm_id: Uuid,

    /// When the snapshot was taken
    pub timestamp: DateTime<Utc>,

    pub status: FsmStatus,

    pub current: Option<Id>,

    pub default: Option<Id>,

    pub ticks: u64,

    pub history: StateHistory<Id>,
}

impl<Id: StateId> FsmSnapshot<Id> {
    /// Check the snapshot is internally consistent and of a known version.
    pub fn validate(&self) -> Result<(), CheckpointError> {
        if self.version != CHECKPOINT_VERSION {
            return Err(CheckpointError::UnsupportedVersion {
                found: self.version,
                supported: CHECKPOINT_VERSION,
            });
        }
        let active = self.status == FsmStatus::Active;
        if active != self.current.is_some() {
            return Err(CheckpointError::ValidationFailed(format!(
                "status {:?} does not match current state {:?}",
                self.status,
                self.current.as_ref().map(|id| id.name())
            )));
        }
        Ok(())
    }
}

impl<Id> FsmSnapshot<Id>
where
    Id: StateId + Serialize + DeserializeOwned,
{
    pub fn to_json(&self) -> Result<String, CheckpointError> {
        serde_json::to_string_pretty(self)
            .map_err(|e| CheckpointError::SerializationFailed(e.to_string()))
    }

    pub fn from_json(json: &str) -> Result<Self, CheckpointError> {
        let snapshot: Self = serde_json::from_str(json)
            .map_err(|e| CheckpointError::DeserializationFailed(e.to_string()))?;
        snapshot.validate()?;
        Ok(snapshot)
    }

    pub fn to_binary(&self) -> Result<Vec<u8>, CheckpointError> {
        bincode::serialize(self).map_err(|e| CheckpointError::SerializationFailed(e.to_string()))
    }

    pub fn from_binary(bytes: &[u8]) -> Result<Self, CheckpointError> {
        let snapshot: Self = bincode::deserialize(bytes)
            .map_err(|e| CheckpointError::DeserializationFailed(e.to_string()))?;
        snapshot.validate()?;
        Ok(snapshot)
    }
}
