use crate::domain::models::{
    admission::VideoCredential,
    booking::{Booking, BookingStatus},
    role::Role,
    settings::MeetingSettings,
};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Scheduling configuration collaborator. `Ok(None)` is a confirmed absence
/// (defaults apply); an `Err` is an infrastructure failure and must never be
/// papered over with defaults.
#[async_trait]
pub trait SettingsStore: Send + Sync {
    async fn get(&self, organization_id: &str) -> Result<Option<MeetingSettings>, AppError>;
    async fn upsert(&self, settings: &MeetingSettings) -> Result<MeetingSettings, AppError>;
}

#[async_trait]
pub trait BookingStore: Send + Sync {
    async fn create(&self, booking: &Booking) -> Result<Booking, AppError>;
    async fn find_by_id(&self, organization_id: &str, id: &str) -> Result<Option<Booking>, AppError>;
    /// All bookings whose occupied interval intersects `[start, end)`,
    /// regardless of status. Callers fetch a day once and reuse it.
    async fn list_in_window(
        &self,
        organization_id: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<Booking>, AppError>;
    /// Conditional status update: applies `next` and merges `metadata_patch`
    /// only when the stored status still equals `expected`. Returns whether
    /// this caller won the swap.
    async fn compare_and_swap_status(
        &self,
        organization_id: &str,
        booking_id: &str,
        expected: BookingStatus,
        next: BookingStatus,
        metadata_patch: &serde_json::Value,
    ) -> Result<bool, AppError>;
}

#[async_trait]
pub trait IdentityResolver: Send + Sync {
    async fn role_of(
        &self,
        identity: &str,
        organization_id: &str,
        booking: &Booking,
    ) -> Result<Role, AppError>;
}

#[async_trait]
pub trait CredentialIssuer: Send + Sync {
    async fn issue(&self, identity: &str, room_id: &str) -> Result<VideoCredential, AppError>;
}
