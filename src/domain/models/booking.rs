use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use thiserror::Error;
use uuid::Uuid;

/// Closed set of booking lifecycle states. Every status write goes through
/// [`BookingStatus::transition`]; the only transition this service performs
/// on its own is `Waiting -> InProgress` when a host starts the session.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum BookingStatus {
    Scheduled,
    Waiting,
    InProgress,
    Completed,
    Cancelled,
    NoShow,
}

/// Lifecycle events. `SessionStarted` is owned by the admission controller;
/// the rest arrive from outside (cancellation screens, no-show marking, the
/// customer-side join routing into the waiting room) and are accepted as given.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingEvent {
    CustomerArrived,
    SessionStarted,
    SessionEnded,
    Cancelled,
    MarkedNoShow,
}

#[derive(Error, Debug)]
#[error("cannot apply {event:?} to a booking in status {current:?}")]
pub struct InvalidTransition {
    pub current: BookingStatus,
    pub event: BookingEvent,
}

#[derive(Error, Debug)]
#[error("unknown booking status: {0}")]
pub struct UnknownStatus(String);

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Scheduled => "scheduled",
            BookingStatus::Waiting => "waiting",
            BookingStatus::InProgress => "in_progress",
            BookingStatus::Completed => "completed",
            BookingStatus::Cancelled => "cancelled",
            BookingStatus::NoShow => "no_show",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            BookingStatus::Completed | BookingStatus::Cancelled | BookingStatus::NoShow
        )
    }

    /// A booking in this status occupies its interval for availability
    /// purposes. Cancelled and no-show bookings free the slot.
    pub fn occupies_interval(&self) -> bool {
        !matches!(self, BookingStatus::Cancelled | BookingStatus::NoShow)
    }

    /// The single transition function: (current, event) -> next, or a
    /// rejection. No other code path may compute a next status.
    pub fn transition(self, event: BookingEvent) -> Result<BookingStatus, InvalidTransition> {
        use BookingEvent::*;
        use BookingStatus::*;

        let next = match (self, event) {
            (Scheduled, CustomerArrived) => Waiting,
            (Waiting, SessionStarted) => InProgress,
            (InProgress, SessionEnded) => Completed,
            (Scheduled | Waiting | InProgress, BookingEvent::Cancelled) => BookingStatus::Cancelled,
            (Scheduled | Waiting, MarkedNoShow) => NoShow,
            (current, event) => return Err(InvalidTransition { current, event }),
        };
        Ok(next)
    }
}

impl TryFrom<String> for BookingStatus {
    type Error = UnknownStatus;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.as_str() {
            "scheduled" => Ok(BookingStatus::Scheduled),
            "waiting" => Ok(BookingStatus::Waiting),
            "in_progress" => Ok(BookingStatus::InProgress),
            "completed" => Ok(BookingStatus::Completed),
            "cancelled" => Ok(BookingStatus::Cancelled),
            "no_show" => Ok(BookingStatus::NoShow),
            _ => Err(UnknownStatus(value)),
        }
    }
}

/// Free-form booking metadata. The admission controller stamps the session
/// start audit fields here; everything else is carried through untouched.
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct BookingMetadata {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub started_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub started_by: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Booking {
    pub id: String,
    pub organization_id: String,
    pub scheduled_at: DateTime<Utc>,
    pub duration_minutes: i32,
    #[sqlx(try_from = "String")]
    pub status: BookingStatus,
    pub host_identity: String,
    pub customer_identity: String,
    pub metadata: Json<BookingMetadata>,
    pub created_at: DateTime<Utc>,
}

pub struct NewBookingParams {
    pub organization_id: String,
    pub scheduled_at: DateTime<Utc>,
    pub duration_minutes: i32,
    pub host_identity: String,
    pub customer_identity: String,
}

impl Booking {
    pub fn new(params: NewBookingParams) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            organization_id: params.organization_id,
            scheduled_at: params.scheduled_at,
            duration_minutes: params.duration_minutes,
            status: BookingStatus::Scheduled,
            host_identity: params.host_identity,
            customer_identity: params.customer_identity,
            metadata: Json(BookingMetadata::default()),
            created_at: Utc::now(),
        }
    }

    /// End of the booking's occupied interval (half-open).
    pub fn end_time(&self) -> DateTime<Utc> {
        self.scheduled_at + Duration::minutes(self.duration_minutes as i64)
    }
}
