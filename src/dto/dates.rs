//! Sentinel-aware date helpers.
//!
//! The backend stores placeholder dates instead of nulls so that its ordered
//! queries keep every document: unannounced releases sit on 2100-01-01 and
//! unplayed games on the Unix epoch.

use time::{
    Date, Duration, Month, OffsetDateTime, UtcOffset,
    format_description::BorrowedFormatItem,
    macros::{datetime, format_description},
};

/// Placeholder release date for games without an announced release.
pub const RELEASE_DATE_SENTINEL: OffsetDateTime = datetime!(2100-01-01 0:00 UTC);
/// Placeholder play date for games that were never played.
pub const DATE_PLAYED_SENTINEL: OffsetDateTime = OffsetDateTime::UNIX_EPOCH;

/// Label shown for unknown release dates.
pub const TBD: &str = "TBD";

const LONG_DATE: &[BorrowedFormatItem<'static>] =
    format_description!("[month repr:long] [day padding:none], [year]");

/// Whether `date` is the release-date sentinel.
///
/// Both 2099 and 2100 match so that a sentinel shifted by a negative UTC offset
/// is still recognised.
pub fn is_release_date_sentinel(date: OffsetDateTime) -> bool {
    let utc_year = date.to_offset(UtcOffset::UTC).year();
    matches!(utc_year, 2099 | 2100) || matches!(date.year(), 2099 | 2100)
}

/// Whether `date` is the date-played sentinel (the epoch, or anything on 1970-01-01).
pub fn is_date_played_sentinel(date: OffsetDateTime) -> bool {
    if date.unix_timestamp() == 0 {
        return true;
    }
    let day = date.to_offset(UtcOffset::UTC).date();
    day.year() == 1970 && day.month() == Month::January && day.day() == 1
}

/// Format a release date as `Month D, YYYY` using its UTC calendar date, or `TBD`.
pub fn format_release_date(date: Option<OffsetDateTime>) -> String {
    match date {
        Some(date) if !is_release_date_sentinel(date) && date.year() < 2099 => {
            format_utc_date(date)
        }
        _ => TBD.to_string(),
    }
}

/// Format a play date as `Month D, YYYY`, or `None` when the game was not played.
pub fn format_date_played(date: Option<OffsetDateTime>) -> Option<String> {
    date.filter(|date| !is_date_played_sentinel(*date))
        .map(format_utc_date)
}

/// Same instant shifted back by `months` calendar months.
///
/// A day of month missing from the target month spills into the following one,
/// so `2023-03-31` minus one month is `2023-03-03`.
pub fn months_before(now: OffsetDateTime, months: u8) -> OffsetDateTime {
    let mut year = now.year();
    let mut month = now.month();
    for _ in 0..months {
        if month == Month::January {
            year -= 1;
        }
        month = month.previous();
    }

    match Date::from_calendar_date(year, month, 1) {
        Ok(first) => now.replace_date(first) + Duration::days(i64::from(now.day()) - 1),
        Err(_) => now,
    }
}

fn format_utc_date(date: OffsetDateTime) -> String {
    let day = date.to_offset(UtcOffset::UTC).date();
    day.format(LONG_DATE).unwrap_or_else(|_| day.to_string())
}

#[cfg(test)]
mod tests {
    use time::macros::{datetime, offset};

    use super::*;

    #[test]
    fn release_sentinel_matches_shifted_values() {
        assert!(is_release_date_sentinel(RELEASE_DATE_SENTINEL));
        assert!(is_release_date_sentinel(
            RELEASE_DATE_SENTINEL.to_offset(offset!(-5))
        ));
        assert!(!is_release_date_sentinel(datetime!(2025-10-10 0:00 UTC)));
    }

    #[test]
    fn played_sentinel_matches_epoch_day() {
        assert!(is_date_played_sentinel(DATE_PLAYED_SENTINEL));
        assert!(is_date_played_sentinel(datetime!(1970-01-01 13:45 UTC)));
        assert!(!is_date_played_sentinel(datetime!(1970-01-02 0:00 UTC)));
    }

    #[test]
    fn formats_release_dates() {
        assert_eq!(
            format_release_date(Some(datetime!(2023-05-12 0:00 UTC))),
            "May 12, 2023"
        );
        assert_eq!(format_release_date(Some(RELEASE_DATE_SENTINEL)), TBD);
        assert_eq!(format_release_date(None), TBD);
    }

    #[test]
    fn release_date_uses_utc_calendar_day() {
        // 2023-05-12T00:00Z seen from UTC-5 is still May 12 for display.
        let shifted = datetime!(2023-05-12 0:00 UTC).to_offset(offset!(-5));
        assert_eq!(format_release_date(Some(shifted)), "May 12, 2023");
    }

    #[test]
    fn formats_played_dates() {
        assert_eq!(
            format_date_played(Some(datetime!(2023-01-15 0:00 UTC))),
            Some("January 15, 2023".to_string())
        );
        assert_eq!(format_date_played(Some(DATE_PLAYED_SENTINEL)), None);
        assert_eq!(format_date_played(None), None);
    }

    #[test]
    fn months_before_spills_missing_days_forward() {
        assert_eq!(
            months_before(datetime!(2024-03-31 8:30 UTC), 1),
            datetime!(2024-03-02 8:30 UTC)
        );
        assert_eq!(
            months_before(datetime!(2023-03-31 0:00 UTC), 1),
            datetime!(2023-03-03 0:00 UTC)
        );
        assert_eq!(
            months_before(datetime!(2024-05-31 0:00 UTC), 1),
            datetime!(2024-05-01 0:00 UTC)
        );
        assert_eq!(
            months_before(datetime!(2024-03-29 0:00 UTC), 1),
            datetime!(2024-02-29 0:00 UTC)
        );
        assert_eq!(
            months_before(datetime!(2025-01-15 0:00 UTC), 1),
            datetime!(2024-12-15 0:00 UTC)
        );
        assert_eq!(
            months_before(datetime!(2025-05-20 0:00 UTC), 0),
            datetime!(2025-05-20 0:00 UTC)
        );
    }
}
