use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub type RequestId = u64;

/// Body of `POST /generate-plan`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneratePlanRequest {
    pub goal: String,
}

/// Body returned by `POST /generate-plan`. Every field is optional.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct GeneratePlanResponse {
    #[serde(default)]
    pub plan: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub plan_id: Option<String>,
}

/// A plan as stored by the service (`GET /plans`, `GET /plan/<id>`).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StoredPlan {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub goal: String,
    #[serde(default)]
    pub plan: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    PlanCompleted {
        request_id: RequestId,
        result: Result<GeneratePlanResponse, TransportError>,
    },
}

/// Failure below the service's own error reporting: no response, or one we cannot use.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct TransportError {
    pub kind: FailureKind,
    pub message: String,
}

impl TransportError {
    pub fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn status(code: u16) -> Self {
        Self::new(
            FailureKind::HttpStatus(code),
            format!("Request failed with status code {code}"),
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    InvalidEndpoint,
    HttpStatus(u16),
    Timeout,
    Network,
    Decode,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidEndpoint => write!(f, "invalid endpoint"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::Network => write!(f, "network error"),
            FailureKind::Decode => write!(f, "undecodable response"),
        }
    }
}

#[derive(Debug, Error)]
pub enum EngineError {
    #[error(transparent)]
    Client(#[from] TransportError),
    #[error("failed to start async runtime: {0}")]
    Runtime(#[source] std::io::Error),
    #[error("failed to spawn engine thread: {0}")]
    Spawn(#[source] std::io::Error),
    #[error("engine worker has stopped")]
    Stopped,
}
