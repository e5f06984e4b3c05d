use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime, Utc};

/// Which pivot-year rule applies to a 6-digit MRZ date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateKind {
    Birth,
    Expiry,
}

pub struct DateDeriver;

impl DateDeriver {
    /// Parse a YYMMDD field into a calendar date. Returns `None` unless the
    /// field is exactly 6 digits forming a real date.
    ///
    /// Pivot rules: expiry years above 60 fall into the 1900s (documents are
    /// assumed never to expire in the distant past); birth years beyond the
    /// current two-digit year fall into the 1900s (nobody is born in the
    /// future).
    pub fn parse_mrz_date(raw: &str, kind: DateKind) -> Option<NaiveDate> {
        let current_yy = (Utc::now().year() % 100) as u32;
        Self::parse_with_pivot(raw, kind, current_yy)
    }

    fn parse_with_pivot(raw: &str, kind: DateKind, current_yy: u32) -> Option<NaiveDate> {
        if raw.len() != 6 || !raw.chars().all(|c| c.is_ascii_digit()) {
            return None;
        }
        let yy: u32 = raw[0..2].parse().ok()?;
        let month: u32 = raw[2..4].parse().ok()?;
        let day: u32 = raw[4..6].parse().ok()?;
        let century = match kind {
            DateKind::Expiry => {
                if yy > 60 {
                    1900
                } else {
                    2000
                }
            }
            DateKind::Birth => {
                if yy > current_yy {
                    1900
                } else {
                    2000
                }
            }
        };
        NaiveDate::from_ymd_opt((century + yy) as i32, month, day)
    }

    /// Whole days until the expiry date; negative once expired.
    pub fn days_until_expiry(expiry: NaiveDate) -> i64 {
        expiry
            .signed_duration_since(Utc::now().date_naive())
            .num_days()
    }

    /// Age as the UTC-year distance between now-minus-birthdate and the
    /// epoch. Ignores exact month/day; a known coarseness, kept as is.
    pub fn age(birth: NaiveDate) -> i32 {
        let elapsed = Utc::now().naive_utc() - birth.and_time(NaiveTime::MIN);
        let shifted = NaiveDateTime::UNIX_EPOCH + elapsed;
        shifted.year() - 1970
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_valid_dates_with_pivot() {
        let d = DateDeriver::parse_with_pivot("740812", DateKind::Birth, 26).unwrap();
        assert_eq!((d.year(), d.month(), d.day()), (1974, 8, 12));

        let d = DateDeriver::parse_with_pivot("120415", DateKind::Expiry, 26).unwrap();
        assert_eq!(d.year(), 2012);

        // Expiry years above 60 fall back a century.
        let d = DateDeriver::parse_with_pivot("991231", DateKind::Expiry, 26).unwrap();
        assert_eq!(d.year(), 1999);

        // Birth year at the pivot stays in the 2000s.
        let d = DateDeriver::parse_with_pivot("260101", DateKind::Birth, 26).unwrap();
        assert_eq!(d.year(), 2026);
    }

    #[test]
    fn rejects_malformed_fields() {
        assert!(DateDeriver::parse_with_pivot("12345", DateKind::Birth, 26).is_none());
        assert!(DateDeriver::parse_with_pivot("1234567", DateKind::Birth, 26).is_none());
        assert!(DateDeriver::parse_with_pivot("12O415", DateKind::Expiry, 26).is_none());
        assert!(DateDeriver::parse_with_pivot("<<<<<<", DateKind::Expiry, 26).is_none());
    }

    #[test]
    fn rejects_impossible_calendar_dates() {
        // 1999 was not a leap year.
        assert!(DateDeriver::parse_with_pivot("990229", DateKind::Birth, 26).is_none());
        assert!(DateDeriver::parse_with_pivot("991301", DateKind::Birth, 26).is_none());
        assert!(DateDeriver::parse_with_pivot("990132", DateKind::Birth, 26).is_none());
    }

    #[test]
    fn expired_documents_count_negative_days() {
        let past = NaiveDate::from_ymd_opt(2000, 1, 1).unwrap();
        assert!(DateDeriver::days_until_expiry(past) < 0);
    }

    #[test]
    fn age_is_roughly_year_distance() {
        let birth = NaiveDate::from_ymd_opt(1974, 8, 12).unwrap();
        let age = DateDeriver::age(birth);
        assert!((50..=52).contains(&age), "unexpected age {}", age);
    }
}
