use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AdmissionReason {
    Ok,
    TooEarly,
    TooLate,
    NotAuthorized,
}

/// Point-in-time answer to "may this identity join this session right now".
/// A denial is a normal outcome, not an error.
#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq)]
pub struct AdmissionDecision {
    pub allowed: bool,
    pub reason: AdmissionReason,
}

impl AdmissionDecision {
    pub fn allow() -> Self {
        Self { allowed: true, reason: AdmissionReason::Ok }
    }

    pub fn deny(reason: AdmissionReason) -> Self {
        Self { allowed: false, reason }
    }
}

/// Credential issued by the video collaborator for one identity in one room.
#[derive(Debug, Serialize, Clone)]
pub struct VideoCredential {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}
