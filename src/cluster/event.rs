use std::fmt;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

pub type JobId = u64;

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SlaveAddr {
    pub ip: String,
    pub port: u16,
}

impl SlaveAddr {
    pub fn new(ip: impl Into<String>, port: u16) -> Self {
        Self {
            ip: ip.into(),
            port,
        }
    }

    pub fn key(&self) -> String {
        format!("{}:{}", self.ip, self.port)
    }
}

impl fmt::Display for SlaveAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.ip, self.port)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientInfo {
    pub ip: String,
    #[serde(default)]
    pub name: String,
}

impl ClientInfo {
    pub fn new(ip: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            ip: ip.into(),
            name: name.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.ip
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobStart {
    pub id: JobId,
    pub slave: SlaveAddr,
    pub client: ClientInfo,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ClusterEvent {
    SlaveAdded(SlaveAddr),
    #[serde(alias = "slaveRemove")]
    SlaveRemoved(SlaveAddr),
    JobStarted(JobStart),
    JobFinished { id: JobId },
    JobAborted { id: JobId },
}

impl ClusterEvent {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::SlaveAdded(_) => "slaveAdded",
            Self::SlaveRemoved(_) => "slaveRemoved",
            Self::JobStarted(_) => "jobStarted",
            Self::JobFinished { .. } => "jobFinished",
            Self::JobAborted { .. } => "jobAborted",
        }
    }
}

/// Decodes one line of the newline-delimited event feed. Blank lines yield `None`.
pub fn parse_event_line(line: &str) -> Result<Option<ClusterEvent>> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    let event = serde_json::from_str(trimmed)
        .with_context(|| format!("invalid cluster event: {trimmed}"))?;
    Ok(Some(event))
}
