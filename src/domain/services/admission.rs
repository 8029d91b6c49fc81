use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use serde_json::json;
use tracing::{debug, info};

use crate::domain::models::{
    admission::{AdmissionDecision, AdmissionReason, VideoCredential},
    booking::{Booking, BookingEvent, BookingStatus},
    role::Role,
};
use crate::domain::ports::{BookingStore, CredentialIssuer, IdentityResolver};
use crate::error::AppError;

/// Customers may join this many minutes before the scheduled start.
pub const CUSTOMER_EARLY_JOIN_MINUTES: i64 = 15;

/// The admission policy, evaluated fresh on every request and never cached.
///
/// Hosts and admins are admitted from any status up until session end, with
/// no lower bound. Customers are admitted while the session is in progress
/// (rejoin) or inside `[scheduled_at - 15min, end)`. Anyone else is denied.
pub fn evaluate_admission(booking: &Booking, role: Role, now: DateTime<Utc>) -> AdmissionDecision {
    let end = booking.end_time();
    match role {
        Role::Host | Role::Admin => {
            if now < end {
                AdmissionDecision::allow()
            } else {
                AdmissionDecision::deny(AdmissionReason::TooLate)
            }
        }
        Role::Customer => {
            if booking.status == BookingStatus::InProgress {
                return AdmissionDecision::allow();
            }
            let opens = booking.scheduled_at - Duration::minutes(CUSTOMER_EARLY_JOIN_MINUTES);
            if now < opens {
                AdmissionDecision::deny(AdmissionReason::TooEarly)
            } else if now >= end {
                AdmissionDecision::deny(AdmissionReason::TooLate)
            } else {
                AdmissionDecision::allow()
            }
        }
        Role::Unauthorized => AdmissionDecision::deny(AdmissionReason::NotAuthorized),
    }
}

/// Room names are a pure function of the booking id so every join for the
/// same booking addresses the same room.
pub fn room_id_for(booking_id: &str) -> String {
    format!("meeting-{booking_id}")
}

#[derive(Debug)]
pub struct AdmissionGrant {
    pub booking: Booking,
    pub role: Role,
    pub room_id: String,
    pub credential: VideoCredential,
}

#[derive(Debug)]
pub enum AdmissionOutcome {
    Granted(Box<AdmissionGrant>),
    Denied(AdmissionDecision),
}

/// Decides admission per request and owns the single automatic lifecycle
/// transition, `Waiting -> InProgress`.
pub struct AdmissionService {
    booking_store: Arc<dyn BookingStore>,
    identity_resolver: Arc<dyn IdentityResolver>,
    credential_issuer: Arc<dyn CredentialIssuer>,
}

impl AdmissionService {
    pub fn new(
        booking_store: Arc<dyn BookingStore>,
        identity_resolver: Arc<dyn IdentityResolver>,
        credential_issuer: Arc<dyn CredentialIssuer>,
    ) -> Self {
        Self { booking_store, identity_resolver, credential_issuer }
    }

    pub async fn request_admission(
        &self,
        organization_id: &str,
        booking_id: &str,
        identity: &str,
        apply_transition: bool,
        now: DateTime<Utc>,
    ) -> Result<AdmissionOutcome, AppError> {
        let booking = self
            .booking_store
            .find_by_id(organization_id, booking_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Booking not found".into()))?;

        let role = self.identity_resolver.role_of(identity, organization_id, &booking).await?;
        let decision = evaluate_admission(&booking, role, now);

        if !decision.allowed {
            debug!(booking_id, identity, ?role, reason = ?decision.reason, "admission denied");
            return Ok(AdmissionOutcome::Denied(decision));
        }

        // A host starting a waiting session is the one transition this
        // service performs on its own. Anything else (Scheduled included)
        // stays untouched so the customer-side waiting room flow keeps
        // ownership of Scheduled -> Waiting.
        let booking = if apply_transition
            && role.is_privileged()
            && booking.status == BookingStatus::Waiting
        {
            self.start_session(organization_id, booking, identity, now).await?
        } else {
            booking
        };

        let room_id = room_id_for(&booking.id);
        let credential = self.credential_issuer.issue(identity, &room_id).await?;

        info!(booking_id, identity, ?role, room_id, "admission granted");
        Ok(AdmissionOutcome::Granted(Box::new(AdmissionGrant {
            booking,
            role,
            room_id,
            credential,
        })))
    }

    async fn start_session(
        &self,
        organization_id: &str,
        booking: Booking,
        identity: &str,
        now: DateTime<Utc>,
    ) -> Result<Booking, AppError> {
        let next = booking
            .status
            .transition(BookingEvent::SessionStarted)
            .map_err(|_| AppError::Internal)?;

        let patch = json!({
            "started_at": now,
            "started_by": identity,
        });

        let won = self
            .booking_store
            .compare_and_swap_status(
                organization_id,
                &booking.id,
                BookingStatus::Waiting,
                next,
                &patch,
            )
            .await?;

        if won {
            info!(booking_id = %booking.id, started_by = identity, "session started");
        } else {
            // A concurrent host won the swap; the stamp is theirs.
            debug!(booking_id = %booking.id, "session already started by a concurrent join");
        }

        self.booking_store
            .find_by_id(organization_id, &booking.id)
            .await?
            .ok_or_else(|| AppError::NotFound("Booking not found".into()))
    }
}
