use chrono::{Days, NaiveDate, NaiveDateTime, NaiveTime};

use crate::domain::models::{role::Role, settings::MeetingSettings};

pub const MINUTES_PER_DAY: u32 = 1440;

/// One candidate slot in naive local time, before booking conflicts and
/// past-filtering are applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotWindow {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub business_hours: bool,
}

fn minute_of_day(t: NaiveTime) -> u32 {
    use chrono::Timelike;
    t.hour() * 60 + t.minute()
}

fn time_at(minute: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(minute / 60, minute % 60, 0).unwrap()
}

fn datetime_at(date: NaiveDate, minute: u32) -> NaiveDateTime {
    if minute == MINUTES_PER_DAY {
        // Slot ending exactly at midnight belongs to the next calendar day.
        let next = date.checked_add_days(Days::new(1)).unwrap_or(date);
        next.and_time(NaiveTime::from_hms_opt(0, 0, 0).unwrap())
    } else {
        date.and_time(time_at(minute))
    }
}

/// Candidate slots for one calendar day, ascending, whole slots only.
///
/// A privileged role gets the full day `[00:00, 24:00)` — the generator
/// trusts the role it is given, `admin_24h_enabled` gates who may request
/// admin mode upstream. A customer gets `[business_hours_start,
/// business_hours_end)`. A slot whose end would exceed the window is dropped
/// entirely, never truncated.
pub fn generate_slots(date: NaiveDate, role: Role, settings: &MeetingSettings) -> Vec<SlotWindow> {
    if settings.slot_duration_minutes <= 0 {
        return Vec::new();
    }
    let duration = settings.slot_duration_minutes as u32;

    let bh_start = minute_of_day(settings.business_hours_start);
    let bh_end = minute_of_day(settings.business_hours_end);

    let (win_start, win_end) = if role.is_privileged() {
        (0, MINUTES_PER_DAY)
    } else {
        (bh_start, bh_end)
    };

    let mut slots = Vec::new();
    let mut cursor = win_start;
    while cursor + duration <= win_end {
        let end_minute = cursor + duration;
        slots.push(SlotWindow {
            start: datetime_at(date, cursor),
            end: datetime_at(date, end_minute),
            business_hours: cursor >= bh_start && end_minute <= bh_end,
        });
        cursor += duration;
    }
    slots
}
