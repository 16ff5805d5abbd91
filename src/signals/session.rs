//! Exchange session clock (India Standard Time, UTC+05:30).

use chrono::{DateTime, NaiveDateTime, NaiveTime, TimeDelta, Utc};

const IST_OFFSET_MINUTES: i64 = 330;

pub const SESSION_OPEN: (u32, u32) = (9, 15);
pub const SESSION_CLOSE: (u32, u32) = (15, 30);

/// Wall-clock time in IST.
pub fn ist_local(now: DateTime<Utc>) -> NaiveDateTime {
    now.naive_utc() + TimeDelta::minutes(IST_OFFSET_MINUTES)
}

/// True when `now` falls inside 09:15-15:30 IST, both ends inclusive.
pub fn is_session_open(now: DateTime<Utc>) -> bool {
    let t = ist_local(now).time();
    let (open_h, open_m) = SESSION_OPEN;
    let (close_h, close_m) = SESSION_CLOSE;
    match (
        NaiveTime::from_hms_opt(open_h, open_m, 0),
        NaiveTime::from_hms_opt(close_h, close_m, 0),
    ) {
        (Some(open), Some(close)) => open <= t && t <= close,
        _ => false,
    }
}

/// `2025-10-01 11:05 IST`
pub fn format_ist(now: DateTime<Utc>) -> String {
    format!("{} IST", ist_local(now).format("%Y-%m-%d %H:%M"))
}
