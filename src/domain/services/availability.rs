use std::sync::Arc;

use chrono::{DateTime, Days, Local, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use serde::Serialize;
use tracing::debug;

use crate::domain::models::{
    booking::Booking, role::Role, settings::MeetingSettings, slot::TimeSlot,
};
use crate::domain::ports::{BookingStore, SettingsStore};
use crate::domain::services::slots::generate_slots;
use crate::error::AppError;

#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Regime {
    Admin24Hour,
    BusinessHours,
}

/// Echo of the settings actually used, so a caller can tell "no slots because
/// nothing configured" from "non-default hours".
#[derive(Debug, Serialize, Clone)]
pub struct EffectiveSettings {
    pub slot_duration_minutes: i32,
    pub business_hours_start: NaiveTime,
    pub business_hours_end: NaiveTime,
    pub regime: Regime,
    pub defaults_applied: bool,
}

#[derive(Debug, Serialize, Clone)]
pub struct DayAvailability {
    pub date: NaiveDate,
    pub slots: Vec<TimeSlot>,
    pub settings: EffectiveSettings,
}

/// Occupied intervals for one day's bookings. Cancelled and no-show bookings
/// do not occupy their interval.
pub fn occupied_intervals(bookings: &[Booking]) -> Vec<(DateTime<Utc>, DateTime<Utc>)> {
    bookings
        .iter()
        .filter(|b| b.status.occupies_interval())
        .map(|b| (b.scheduled_at, b.end_time()))
        .collect()
}

/// Half-open overlap test: `[start, end)` conflicts with `[bs, be)` iff
/// `start < be && end > bs`. Touching endpoints do not conflict.
pub fn slot_is_free(
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    occupied: &[(DateTime<Utc>, DateTime<Utc>)],
) -> bool {
    !occupied.iter().any(|(bs, be)| start < *be && end > *bs)
}

/// Requested days are server-local calendar days, midnight to midnight.
/// A naive local time skipped by a DST jump resolves to nothing and the
/// caller drops the slot; an ambiguous one resolves to the earlier instant.
fn local_to_utc(naive: NaiveDateTime) -> Option<DateTime<Utc>> {
    Local
        .from_local_datetime(&naive)
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
}

fn local_day_bounds(date: NaiveDate) -> Result<(DateTime<Utc>, DateTime<Utc>), AppError> {
    let midnight = NaiveTime::from_hms_opt(0, 0, 0).unwrap();
    let next = date
        .checked_add_days(Days::new(1))
        .ok_or_else(|| AppError::Validation("Date out of range".into()))?;
    let start = local_to_utc(date.and_time(midnight))
        .ok_or_else(|| AppError::Validation("Invalid local day start".into()))?;
    let end = local_to_utc(next.and_time(midnight))
        .ok_or_else(|| AppError::Validation("Invalid local day end".into()))?;
    Ok((start, end))
}

/// Read-only orchestration of settings resolution, slot generation, conflict
/// marking and past-filtering. Stateless; safe to call concurrently.
pub struct AvailabilityService {
    settings_store: Arc<dyn SettingsStore>,
    booking_store: Arc<dyn BookingStore>,
}

impl AvailabilityService {
    pub fn new(settings_store: Arc<dyn SettingsStore>, booking_store: Arc<dyn BookingStore>) -> Self {
        Self { settings_store, booking_store }
    }

    pub async fn day_availability(
        &self,
        organization_id: &str,
        date: NaiveDate,
        role: Role,
        now: DateTime<Utc>,
    ) -> Result<DayAvailability, AppError> {
        // A store error propagates; only a confirmed absence falls back to
        // the documented defaults.
        let (settings, defaults_applied) = match self.settings_store.get(organization_id).await? {
            Some(settings) => (settings, false),
            None => (MeetingSettings::defaults_for(organization_id), true),
        };

        let candidates = generate_slots(date, role, &settings);

        // One snapshot of the day's bookings, reused for every slot.
        let (day_start, day_end) = local_day_bounds(date)?;
        let bookings = self
            .booking_store
            .list_in_window(organization_id, day_start, day_end)
            .await?;
        let occupied = occupied_intervals(&bookings);

        let privileged = role.is_privileged();
        let mut slots = Vec::with_capacity(candidates.len());
        for window in candidates {
            let (Some(start), Some(end)) = (local_to_utc(window.start), local_to_utc(window.end))
            else {
                // DST gap swallowed this wall-clock time on this date.
                continue;
            };
            if start < now {
                continue;
            }
            slots.push(TimeSlot {
                start: start.with_timezone(&Local),
                end: end.with_timezone(&Local),
                available: slot_is_free(start, end, &occupied),
                is_business_hours: privileged.then_some(window.business_hours),
            });
        }

        debug!(
            organization_id,
            %date,
            ?role,
            total = slots.len(),
            booked = occupied.len(),
            "computed day availability"
        );

        Ok(DayAvailability {
            date,
            slots,
            settings: EffectiveSettings {
                slot_duration_minutes: settings.slot_duration_minutes,
                business_hours_start: settings.business_hours_start,
                business_hours_end: settings.business_hours_end,
                regime: if privileged { Regime::Admin24Hour } else { Regime::BusinessHours },
                defaults_applied,
            },
        })
    }
}
