//! Calendar month value object
//!
//! A budget month is just a year and a month number. Day of month and time
//! of day never take part in comparison or storage, so two dates in the same
//! month always normalize to the same `BudgetMonth`.

use chrono::{DateTime, Datelike, Duration, Local, NaiveDate, TimeZone};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// A calendar month, normalized to its first day
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BudgetMonth {
    year: i32,
    month: u32,
}

impl BudgetMonth {
    /// Create a month, returning `None` when `month` is outside 1..=12
    pub fn new(year: i32, month: u32) -> Option<Self> {
        if (1..=12).contains(&month) {
            Some(Self { year, month })
        } else {
            None
        }
    }

    /// The month containing `date`
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// The month containing a timestamp, in that timestamp's own zone
    pub fn from_datetime<Tz: TimeZone>(at: &DateTime<Tz>) -> Self {
        Self::from_date(at.date_naive())
    }

    /// The current calendar month in local time
    pub fn current() -> Self {
        Self::from_date(Local::now().date_naive())
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    /// The first day of this month
    pub fn first_day(&self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap_or(NaiveDate::MIN)
    }

    /// The last day of this month
    pub fn last_day(&self) -> NaiveDate {
        self.next().first_day() - Duration::days(1)
    }

    /// Number of days in this month
    pub fn days(&self) -> u32 {
        self.last_day().day()
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        Self::from_date(date) == *self
    }

    pub fn next(&self) -> Self {
        self.add_months(1)
    }

    pub fn prev(&self) -> Self {
        self.add_months(-1)
    }

    /// Shift by a signed number of months
    pub fn add_months(&self, delta: i32) -> Self {
        let index = self.year * 12 + (self.month as i32 - 1) + delta;
        Self {
            year: index.div_euclid(12),
            month: index.rem_euclid(12) as u32 + 1,
        }
    }

    /// Human-readable label, e.g. "March 2025"
    pub fn label(&self) -> String {
        format!("{} {}", MONTH_NAMES[(self.month - 1) as usize], self.year)
    }

    /// Parse a "Month YYYY" label back into a month
    ///
    /// Accepts full or three-letter English month names in any case
    /// ("March 2025", "mar 2025", "Sept 2025").
    pub fn parse_label(label: &str) -> Result<Self, MonthParseError> {
        let invalid = || MonthParseError::InvalidLabel(label.to_string());

        let mut parts = label.split_whitespace();
        let name = parts.next().ok_or_else(invalid)?.to_lowercase();
        let year_str = parts.next().ok_or_else(invalid)?;
        if parts.next().is_some() {
            return Err(invalid());
        }

        let month = MONTH_NAMES
            .iter()
            .position(|full| {
                let full = full.to_lowercase();
                name == full || name == full[..3] || (name == "sept" && full == "september")
            })
            .ok_or_else(invalid)? as u32
            + 1;

        if year_str.len() != 4 || !year_str.chars().all(|c| c.is_ascii_digit()) {
            return Err(invalid());
        }
        let year: i32 = year_str.parse().map_err(|_| invalid())?;

        Ok(Self { year, month })
    }
}

impl Default for BudgetMonth {
    fn default() -> Self {
        Self::current()
    }
}

/// Storage key form: `YYYY-MM`
impl fmt::Display for BudgetMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for BudgetMonth {
    type Err = MonthParseError;

    /// Parses `YYYY-MM`, or a full `YYYY-MM-DD` date which is normalized
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();

        if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
            return Ok(Self::from_date(date));
        }

        let (year, month) = s
            .split_once('-')
            .ok_or_else(|| MonthParseError::InvalidKey(s.to_string()))?;
        let year: i32 = year
            .parse()
            .map_err(|_| MonthParseError::InvalidKey(s.to_string()))?;
        let month: u32 = month
            .parse()
            .map_err(|_| MonthParseError::InvalidKey(s.to_string()))?;

        Self::new(year, month).ok_or(MonthParseError::InvalidMonth(month))
    }
}

impl Serialize for BudgetMonth {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for BudgetMonth {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Error type for month parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MonthParseError {
    InvalidLabel(String),
    InvalidKey(String),
    InvalidMonth(u32),
}

impl fmt::Display for MonthParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidLabel(s) => write!(f, "Invalid month label: {}", s),
            Self::InvalidKey(s) => write!(f, "Invalid month key: {}", s),
            Self::InvalidMonth(m) => write!(f, "Invalid month: {}", m),
        }
    }
}

impl std::error::Error for MonthParseError {}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, Utc};

    fn month(year: i32, month: u32) -> BudgetMonth {
        BudgetMonth::new(year, month).unwrap()
    }

    #[test]
    fn test_normalization_discards_day() {
        let mid = NaiveDate::from_ymd_opt(2025, 3, 17).unwrap();
        let first = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
        assert_eq!(BudgetMonth::from_date(mid), BudgetMonth::from_date(first));
        assert_eq!(BudgetMonth::from_date(mid).first_day(), first);
    }

    #[test]
    fn test_normalization_idempotent() {
        let d = NaiveDate::from_ymd_opt(2024, 2, 29).unwrap();
        let once = BudgetMonth::from_date(d);
        let twice = BudgetMonth::from_date(once.first_day());
        assert_eq!(once, twice);
    }

    #[test]
    fn test_datetime_uses_its_own_zone() {
        let tz = FixedOffset::west_opt(5 * 3600).unwrap();
        let late = tz.with_ymd_and_hms(2025, 1, 31, 23, 30, 0).unwrap();
        assert_eq!(BudgetMonth::from_datetime(&late), month(2025, 1));

        let utc = Utc.with_ymd_and_hms(2025, 2, 1, 0, 0, 0).unwrap();
        assert_eq!(BudgetMonth::from_datetime(&utc), month(2025, 2));
    }

    #[test]
    fn test_navigation_wraps_years() {
        assert_eq!(month(2024, 12).next(), month(2025, 1));
        assert_eq!(month(2025, 1).prev(), month(2024, 12));
        assert_eq!(month(2025, 3).add_months(-15), month(2023, 12));
        assert_eq!(month(2025, 3).add_months(22), month(2027, 1));
    }

    #[test]
    fn test_next_prev_inverse() {
        let mut m = month(2019, 1);
        for _ in 0..40 {
            assert_eq!(m.prev().next(), m);
            assert_eq!(m.next().prev(), m);
            m = m.next();
        }
    }

    #[test]
    fn test_last_day() {
        assert_eq!(month(2024, 2).days(), 29);
        assert_eq!(month(2025, 2).days(), 28);
        assert_eq!(
            month(2025, 12).last_day(),
            NaiveDate::from_ymd_opt(2025, 12, 31).unwrap()
        );
    }

    #[test]
    fn test_contains() {
        let jan = month(2025, 1);
        assert!(jan.contains(NaiveDate::from_ymd_opt(2025, 1, 31).unwrap()));
        assert!(!jan.contains(NaiveDate::from_ymd_opt(2025, 2, 1).unwrap()));
    }

    #[test]
    fn test_label_round_trip() {
        let m = month(2025, 3);
        assert_eq!(m.label(), "March 2025");
        assert_eq!(BudgetMonth::parse_label("March 2025").unwrap(), m);
        assert_eq!(BudgetMonth::parse_label("  mar   2025 ").unwrap(), m);
        assert_eq!(BudgetMonth::parse_label("Sept 2025").unwrap(), month(2025, 9));
    }

    #[test]
    fn test_parse_label_rejects_garbage() {
        assert!(BudgetMonth::parse_label("").is_err());
        assert!(BudgetMonth::parse_label("Smarch 2025").is_err());
        assert!(BudgetMonth::parse_label("March").is_err());
        assert!(BudgetMonth::parse_label("March 25").is_err());
        assert!(BudgetMonth::parse_label("March 2025 extra").is_err());
    }

    #[test]
    fn test_key_parse() {
        assert_eq!("2025-03".parse::<BudgetMonth>().unwrap(), month(2025, 3));
        assert_eq!("2025-03-19".parse::<BudgetMonth>().unwrap(), month(2025, 3));
        assert_eq!(
            "2025-13".parse::<BudgetMonth>(),
            Err(MonthParseError::InvalidMonth(13))
        );
        assert!("March".parse::<BudgetMonth>().is_err());
    }

    #[test]
    fn test_serializes_as_key() {
        let json = serde_json::to_string(&month(2025, 3)).unwrap();
        assert_eq!(json, "\"2025-03\"");
        let back: BudgetMonth = serde_json::from_str(&json).unwrap();
        assert_eq!(back, month(2025, 3));
    }

    #[test]
    fn test_ordering() {
        assert!(month(2024, 12) < month(2025, 1));
        assert!(month(2025, 2) > month(2025, 1));
    }
}
