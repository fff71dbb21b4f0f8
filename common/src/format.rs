//! Human-readable formatting of listing values.

use std::fmt;

use crate::DateTimeOf;

/// Formats an area in square meters, like `40 m²`.
#[must_use]
pub fn area(square_meters: impl fmt::Display) -> String {
    format!("{square_meters} m\u{b2}")
}

/// Formats a distance, switching to kilometers with one decimal from `1000`
/// meters on.
#[must_use]
pub fn distance(meters: u32) -> String {
    if meters < 1000 {
        format!("{meters} m")
    } else {
        format!("{:.1} km", f64::from(meters) / 1000.0)
    }
}

/// Truncates the `text` to `max_chars` characters, trimming trailing
/// whitespace and appending `...` if anything was cut off.
#[must_use]
pub fn truncate(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        None => text.to_owned(),
        Some((end, _)) => format!("{}...", text[..end].trim_end()),
    }
}

/// Returns up to two uppercase initials of the provided `name`.
#[must_use]
pub fn initials(name: &str) -> String {
    name.split(' ')
        .filter_map(|part| part.chars().next())
        .flat_map(char::to_uppercase)
        .take(2)
        .collect()
}

/// Describes how long ago `then` happened relative to `now`, like
/// `5 min ago`, falling back to a short date (`Jan 10`) after a week.
#[must_use]
pub fn relative_time<A: ?Sized, B: ?Sized>(
    then: DateTimeOf<A>,
    now: DateTimeOf<B>,
) -> String {
    const MINUTE: i64 = 60;
    const HOUR: i64 = 60 * MINUTE;
    const DAY: i64 = 24 * HOUR;
    const WEEK: i64 = 7 * DAY;

    match now.unix_timestamp() - then.unix_timestamp() {
        secs if secs < MINUTE => "Just now".to_owned(),
        secs if secs < HOUR => format!("{} min ago", secs / MINUTE),
        secs if secs < DAY => format!("{} hours ago", secs / HOUR),
        secs if secs < WEEK => format!("{} days ago", secs / DAY),
        _ => {
            let date = then.date();
            format!("{} {}", date.month_short(), date.day())
        }
    }
}

#[cfg(test)]
mod spec {
    use crate::DateTime;

    use super::{area, distance, initials, relative_time, truncate};

    #[test]
    fn formats_area_and_distance() {
        assert_eq!(area(40), "40 m\u{b2}");
        assert_eq!(distance(350), "350 m");
        assert_eq!(distance(1000), "1.0 km");
        assert_eq!(distance(2460), "2.5 km");
    }

    #[test]
    fn truncates_by_chars() {
        assert_eq!(truncate("Cozy room", 20), "Cozy room");
        assert_eq!(truncate("Cozy room near campus", 10), "Cozy room...");
        assert_eq!(truncate("Qo\u{2018}ratosh", 3), "Qo\u{2018}...");
    }

    #[test]
    fn takes_two_initials() {
        assert_eq!(initials("Aziza Karimova"), "AK");
        assert_eq!(initials("rustam aliyev bek"), "RA");
        assert_eq!(initials("Dilnoza"), "D");
    }

    #[test]
    fn describes_relative_time() {
        let then = DateTime::from_rfc3339("2026-01-10T10:00:00Z").unwrap();
        let at = |s: &str| DateTime::from_rfc3339(s).unwrap();

        assert_eq!(relative_time(then, at("2026-01-10T10:00:30Z")), "Just now");
        assert_eq!(
            relative_time(then, at("2026-01-10T10:05:00Z")),
            "5 min ago",
        );
        assert_eq!(
            relative_time(then, at("2026-01-10T13:00:00Z")),
            "3 hours ago",
        );
        assert_eq!(
            relative_time(then, at("2026-01-12T10:00:00Z")),
            "2 days ago",
        );
        assert_eq!(relative_time(then, at("2026-02-10T10:00:00Z")), "Jan 10");
    }
}
