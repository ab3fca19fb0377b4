//! View-only formatting helpers.

use std::fmt::Display;

use chrono::{DateTime, Local, TimeZone, Utc};

const CREATED_AT_FORMAT: &str = "%b %-d, %I:%M %p";

/// Renders a creation timestamp as e.g. `Jan 5, 03:07 PM` in local time.
pub fn format_created_at(created_at: &DateTime<Utc>) -> String {
    format_created_at_in(created_at, &Local)
}

pub fn format_created_at_in<Tz>(created_at: &DateTime<Utc>, zone: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    created_at
        .with_timezone(zone)
        .format(CREATED_AT_FORMAT)
        .to_string()
}
