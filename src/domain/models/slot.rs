use chrono::{DateTime, Local};
use serde::Serialize;

/// A candidate bookable interval, produced fresh per request and never
/// persisted. `is_business_hours` is presentation metadata carried only on
/// admin-role responses.
#[derive(Debug, Serialize, Clone)]
pub struct TimeSlot {
    pub start: DateTime<Local>,
    pub end: DateTime<Local>,
    pub available: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_business_hours: Option<bool>,
}
