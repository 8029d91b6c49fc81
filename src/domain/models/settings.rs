use chrono::{DateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

pub const DEFAULT_SLOT_DURATION_MINUTES: i32 = 30;

/// Per-organization scheduling configuration. Mutated only through the
/// settings collaborator; this core reads it.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct MeetingSettings {
    pub organization_id: String,
    pub slot_duration_minutes: i32,
    pub business_hours_start: NaiveTime,
    pub business_hours_end: NaiveTime,
    pub admin_24h_enabled: bool,
    pub updated_at: DateTime<Utc>,
}

impl MeetingSettings {
    /// Documented defaults for an organization that never configured
    /// scheduling: 30-minute slots, 09:00-17:00, admin mode off. An
    /// explicitly requested admin role is still honored per call.
    pub fn defaults_for(organization_id: &str) -> Self {
        Self {
            organization_id: organization_id.to_string(),
            slot_duration_minutes: DEFAULT_SLOT_DURATION_MINUTES,
            business_hours_start: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            business_hours_end: NaiveTime::from_hms_opt(17, 0, 0).unwrap(),
            admin_24h_enabled: false,
            updated_at: Utc::now(),
        }
    }
}
