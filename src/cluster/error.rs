use std::fmt;

use thiserror::Error;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Entity {
    Slave,
    Client,
    Job,
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Slave => "slave",
            Self::Client => "client",
            Self::Job => "job",
        })
    }
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ClusterError {
    #[error("{entity} {key} already exists")]
    DuplicateEntity { entity: Entity, key: String },

    #[error("{entity} {key} does not exist")]
    UnknownEntity { entity: Entity, key: String },

    #[error("{entity} {key}: {detail}")]
    InvariantViolation {
        entity: Entity,
        key: String,
        detail: &'static str,
    },
}

impl ClusterError {
    pub fn entity(&self) -> Entity {
        match self {
            Self::DuplicateEntity { entity, .. }
            | Self::UnknownEntity { entity, .. }
            | Self::InvariantViolation { entity, .. } => *entity,
        }
    }

    pub fn key(&self) -> &str {
        match self {
            Self::DuplicateEntity { key, .. }
            | Self::UnknownEntity { key, .. }
            | Self::InvariantViolation { key, .. } => key,
        }
    }

    pub(super) fn duplicate(entity: Entity, key: impl Into<String>) -> Self {
        Self::DuplicateEntity {
            entity,
            key: key.into(),
        }
    }

    pub(super) fn unknown(entity: Entity, key: impl Into<String>) -> Self {
        Self::UnknownEntity {
            entity,
            key: key.into(),
        }
    }
}
