use chrono::{Datelike, Months, NaiveDate};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::errors::{LedgerError, Result};

/// sentinel for open-ended rent periods with no end date
pub const FAR_FUTURE: NaiveDate = NaiveDate::MAX;

/// day of month used as the representative date when resolving a month's rent
pub const REPRESENTATIVE_DAY: u32 = 15;

/// a calendar month, the `YYYY-MM` label payments are credited against
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearMonth {
    year: i32,
    month: u32,
}

impl YearMonth {
    /// create a validated year-month
    pub fn new(year: i32, month: u32) -> Result<Self> {
        if !(1..=12).contains(&month) || !(1..=9999).contains(&year) {
            return Err(LedgerError::InvalidMonthLabel {
                label: format!("{year:04}-{month:02}"),
            });
        }
        Ok(Self { year, month })
    }

    /// the month containing a calendar date
    pub fn containing(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    /// first calendar day of the month
    pub fn first_day(&self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap_or(NaiveDate::MIN)
    }

    /// last calendar day of the month, accounting for month length and leap years
    pub fn last_day(&self) -> NaiveDate {
        self.first_day()
            .checked_add_months(Months::new(1))
            .and_then(|d| d.pred_opt())
            .unwrap_or(FAR_FUTURE)
    }

    /// mid-month representative date; a schedule change effective on or
    /// before this day governs the whole month's expected rent
    pub fn mid_month(&self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.month, REPRESENTATIVE_DAY)
            .unwrap_or_else(|| self.first_day())
    }

    /// whether a date falls inside this month
    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }

    /// the month `n` whole months earlier, anchored to day 1 so day-of-month
    /// rollover cannot skew the result
    pub fn minus_months(&self, n: u32) -> Option<Self> {
        self.first_day()
            .checked_sub_months(Months::new(n))
            .map(Self::containing)
    }

    /// human label, e.g. "June 2024"
    pub fn label(&self) -> String {
        self.first_day().format("%B %Y").to_string()
    }

    /// inclusive first/last day of the month plus display label
    pub fn date_range(&self) -> MonthDateRange {
        MonthDateRange {
            start: self.first_day(),
            end: self.last_day(),
            label: self.label(),
        }
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for YearMonth {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || LedgerError::InvalidMonthLabel {
            label: s.to_string(),
        };
        let (year, month) = s.split_once('-').ok_or_else(invalid)?;
        if year.len() != 4 || month.len() != 2 {
            return Err(invalid());
        }
        let year: i32 = year.parse().map_err(|_| invalid())?;
        let month: u32 = month.parse().map_err(|_| invalid())?;
        Self::new(year, month).map_err(|_| invalid())
    }
}

// serialized as the wire label, e.g. "2024-06"
impl Serialize for YearMonth {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for YearMonth {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let label = String::deserialize(deserializer)?;
        label.parse().map_err(de::Error::custom)
    }
}

/// inclusive date range of one calendar month
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthDateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub label: String,
}

impl MonthDateRange {
    /// en-GB formatted start date, dd/mm/yyyy
    pub fn formatted_start(&self) -> String {
        self.start.format("%d/%m/%Y").to_string()
    }

    /// en-GB formatted end date, dd/mm/yyyy
    pub fn formatted_end(&self) -> String {
        self.end.format("%d/%m/%Y").to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ym(s: &str) -> YearMonth {
        s.parse().unwrap()
    }

    #[test]
    fn test_parse_and_display_round_trip() {
        let month = ym("2024-06");
        assert_eq!(month.year(), 2024);
        assert_eq!(month.month(), 6);
        assert_eq!(month.to_string(), "2024-06");
    }

    #[test]
    fn test_parse_rejects_malformed_labels() {
        assert!("2024-13".parse::<YearMonth>().is_err());
        assert!("2024-00".parse::<YearMonth>().is_err());
        assert!("24-06".parse::<YearMonth>().is_err());
        assert!("2024-6".parse::<YearMonth>().is_err());
        assert!("June 2024".parse::<YearMonth>().is_err());
        assert!("2024-06-01".parse::<YearMonth>().is_err());
    }

    #[test]
    fn test_leap_year_end_dates() {
        assert_eq!(
            ym("2024-02").last_day(),
            NaiveDate::from_ymd_opt(2024, 2, 29).unwrap()
        );
        assert_eq!(
            ym("2023-02").last_day(),
            NaiveDate::from_ymd_opt(2023, 2, 28).unwrap()
        );
        assert_eq!(
            ym("2024-12").last_day(),
            NaiveDate::from_ymd_opt(2024, 12, 31).unwrap()
        );
    }

    #[test]
    fn test_date_range_stays_within_month() {
        let month = ym("2024-02");
        let range = month.date_range();
        assert!(month.contains(range.start));
        assert!(month.contains(range.end));
        assert_eq!(range.label, "February 2024");
        assert_eq!(range.formatted_start(), "01/02/2024");
        assert_eq!(range.formatted_end(), "29/02/2024");
    }

    #[test]
    fn test_mid_month_representative_date() {
        assert_eq!(
            ym("2024-06").mid_month(),
            NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
        );
    }

    #[test]
    fn test_minus_months_crosses_year_boundary() {
        assert_eq!(ym("2024-01").minus_months(1), Some(ym("2023-12")));
        assert_eq!(ym("2024-03").minus_months(14), Some(ym("2023-01")));
        assert_eq!(ym("2024-03").minus_months(0), Some(ym("2024-03")));
    }

    #[test]
    fn test_containing_ignores_day_of_month() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 31).unwrap();
        assert_eq!(YearMonth::containing(date), ym("2024-01"));
    }

    #[test]
    fn test_ordering() {
        assert!(ym("2024-02") > ym("2024-01"));
        assert!(ym("2024-01") > ym("2023-12"));
    }

    #[test]
    fn test_serde_uses_wire_label() {
        let month = ym("2024-06");
        assert_eq!(serde_json::to_string(&month).unwrap(), "\"2024-06\"");
        let back: YearMonth = serde_json::from_str("\"2024-06\"").unwrap();
        assert_eq!(back, month);
    }
}
