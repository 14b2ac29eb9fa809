//! Calendar-agnostic civil date-time value.
//!
//! The formatting facade takes wall-clock values, not instants: callers
//! resolve time zones before handing a value in (the optional `time_zone`
//! option is a rendering label, not a conversion). Proleptic Gregorian
//! calendar throughout.

use std::fmt;

/// A civil (wall-clock) date and time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CivilDateTime {
    /// Proleptic Gregorian year.
    pub year: i32,
    /// Month, 1–12.
    pub month: u8,
    /// Day of month, 1–31.
    pub day: u8,
    /// Hour, 0–23.
    pub hour: u8,
    /// Minute, 0–59.
    pub minute: u8,
    /// Second, 0–59.
    pub second: u8,
}

impl CivilDateTime {
    /// A date at midnight.
    #[must_use]
    pub const fn date(year: i32, month: u8, day: u8) -> Self {
        Self {
            year,
            month,
            day,
            hour: 0,
            minute: 0,
            second: 0,
        }
    }

    /// A full date-time.
    #[must_use]
    pub const fn new(year: i32, month: u8, day: u8, hour: u8, minute: u8, second: u8) -> Self {
        Self {
            year,
            month,
            day,
            hour,
            minute,
            second,
        }
    }

    /// Day of week, 0 = Sunday … 6 = Saturday.
    #[must_use]
    pub fn day_of_week(&self) -> u8 {
        // 1970-01-01 was a Thursday.
        let days = days_from_civil(self.year, self.month, self.day);
        ((days + 4).rem_euclid(7)) as u8
    }
}

impl fmt::Display for CivilDateTime {
    /// ISO-like `YYYY-MM-DD HH:MM:SS` rendering, used as the deterministic
    /// fallback when a date formatter cannot be constructed.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:04}-{:02}-{:02} {:02}:{:02}:{:02}",
            self.year, self.month, self.day, self.hour, self.minute, self.second
        )
    }
}

/// Days since 1970-01-01 for a proleptic Gregorian civil date.
fn days_from_civil(year: i32, month: u8, day: u8) -> i64 {
    let y = i64::from(year) - i64::from(month <= 2);
    let era = if y >= 0 { y } else { y - 399 } / 400;
    let yoe = y - era * 400;
    let m = i64::from(month);
    let d = i64::from(day);
    let doy = (153 * (if m > 2 { m - 3 } else { m + 9 }) + 2) / 5 + d - 1;
    let doe = yoe * 365 + yoe / 4 - yoe / 100 + doy;
    era * 146_097 + doe - 719_468
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn epoch_is_thursday() {
        assert_eq!(CivilDateTime::date(1970, 1, 1).day_of_week(), 4);
    }

    #[test]
    fn known_weekdays() {
        // 2020-01-02 was a Thursday.
        assert_eq!(CivilDateTime::date(2020, 1, 2).day_of_week(), 4);
        // 2000-01-01 was a Saturday.
        assert_eq!(CivilDateTime::date(2000, 1, 1).day_of_week(), 6);
        // 1900-01-01 was a Monday (pre-epoch).
        assert_eq!(CivilDateTime::date(1900, 1, 1).day_of_week(), 1);
    }

    #[test]
    fn display_is_iso_like() {
        let dt = CivilDateTime::new(2020, 1, 2, 3, 4, 5);
        assert_eq!(dt.to_string(), "2020-01-02 03:04:05");
    }

    #[test]
    fn ordering_follows_chronology() {
        assert!(CivilDateTime::date(2019, 12, 31) < CivilDateTime::date(2020, 1, 1));
        assert!(
            CivilDateTime::new(2020, 1, 1, 0, 0, 0) < CivilDateTime::new(2020, 1, 1, 0, 0, 1)
        );
    }
}
