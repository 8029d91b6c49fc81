use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::models::{
    admission::AdmissionReason, booking::Booking, role::Role, slot::TimeSlot,
};
use crate::domain::services::availability::EffectiveSettings;

#[derive(Serialize)]
pub struct AvailabilityResponse {
    pub date: String,
    pub slots: Vec<TimeSlot>,
    pub settings: EffectiveSettings,
}

#[derive(Serialize)]
pub struct JoinGrantedResponse {
    pub allowed: bool,
    pub booking: Booking,
    pub role: Role,
    pub room_id: String,
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

#[derive(Serialize)]
pub struct JoinDeniedResponse {
    pub allowed: bool,
    pub reason: AdmissionReason,
}
