//! Network-free market status derived from the exchange's local clock.
//!
//! The reference exchange is NYSE/Nasdaq, so local time is US Eastern with
//! the US daylight-saving rule (second Sunday of March through the first
//! Sunday of November, switching at 02:00 local).
//!
//! Sessions are decided on the local hour alone; minutes are ignored, so the
//! 09:30 open reads as OPEN from 09:00.

use time::macros::offset;
use time::{Date, Month, OffsetDateTime, Time, UtcOffset, Weekday};

use crate::data_source::Clock;
use crate::{MarketStatus, SessionState, UtcDateTime};

const EASTERN_STANDARD: UtcOffset = offset!(-5);
const EASTERN_DAYLIGHT: UtcOffset = offset!(-4);

/// Wall-clock time from the operating system.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> UtcDateTime {
        UtcDateTime::now()
    }
}

/// Clock pinned to one instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub UtcDateTime);

impl Clock for FixedClock {
    fn now(&self) -> UtcDateTime {
        self.0
    }
}

/// Classifies `now` into an exchange session. Never fails.
pub fn market_status(now: UtcDateTime) -> MarketStatus {
    let local = exchange_local_time(now);

    MarketStatus {
        state: classify_session(local.weekday(), local.hour()),
        local_time_label: local_time_label(local),
    }
}

/// Session precedence: weekend, open, pre-market, after-hours, closed.
pub fn classify_session(weekday: Weekday, hour: u8) -> SessionState {
    if matches!(weekday, Weekday::Saturday | Weekday::Sunday) {
        SessionState::Weekend
    } else if (9..16).contains(&hour) {
        SessionState::Open
    } else if (4..9).contains(&hour) {
        SessionState::PreMarket
    } else if (16..20).contains(&hour) {
        SessionState::AfterHours
    } else {
        SessionState::Closed
    }
}

/// `now` expressed in US Eastern time.
pub fn exchange_local_time(now: UtcDateTime) -> OffsetDateTime {
    let utc = now.into_inner();
    utc.to_offset(eastern_offset(utc))
}

fn eastern_offset(utc: OffsetDateTime) -> UtcOffset {
    let year = utc.year();
    // 02:00 EST is 07:00 UTC; 02:00 EDT is 06:00 UTC.
    let transitions = nth_sunday(year, Month::March, 2)
        .zip(nth_sunday(year, Month::November, 1))
        .map(|(start, end)| {
            (
                start.with_time(Time::MIDNIGHT).assume_utc() + time::Duration::hours(7),
                end.with_time(Time::MIDNIGHT).assume_utc() + time::Duration::hours(6),
            )
        });

    match transitions {
        Some((start, end)) if utc >= start && utc < end => EASTERN_DAYLIGHT,
        _ => EASTERN_STANDARD,
    }
}

fn nth_sunday(year: i32, month: Month, n: u8) -> Option<Date> {
    let first = Date::from_calendar_date(year, month, 1).ok()?;
    let to_sunday = (7 - first.weekday().number_days_from_sunday()) % 7;
    let day = 1 + to_sunday + 7 * (n - 1);
    Date::from_calendar_date(year, month, day).ok()
}

fn local_time_label(local: OffsetDateTime) -> String {
    let hour = local.hour();
    let hour12 = match hour % 12 {
        0 => 12,
        h => h,
    };
    let period = if hour < 12 { "AM" } else { "PM" };

    format!(
        "{} {hour12:02}:{:02} {period}",
        weekday_short(local.weekday()),
        local.minute()
    )
}

fn weekday_short(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Monday => "Mon",
        Weekday::Tuesday => "Tue",
        Weekday::Wednesday => "Wed",
        Weekday::Thursday => "Thu",
        Weekday::Friday => "Fri",
        Weekday::Saturday => "Sat",
        Weekday::Sunday => "Sun",
    }
}
