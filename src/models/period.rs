//! Query periods
//!
//! Named periods (`day`, `month`, `year`, `all`) and explicit selectors
//! (`since`, `from`/`to`) resolve to a [`DateRange`] with inclusive bounds,
//! relative to a given "today".

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime};
use std::fmt;
use std::str::FromStr;

use crate::error::{FinError, FinResult};

/// Date format accepted on input
pub const INPUT_DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse a `YYYY-MM-DD` date
pub fn parse_date(s: &str) -> FinResult<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), INPUT_DATE_FORMAT).map_err(|_| {
        FinError::Validation(format!("Invalid date format: '{}'. Use YYYY-MM-DD", s))
    })
}

/// First instant of a day
pub fn start_of_day(date: NaiveDate) -> NaiveDateTime {
    date.and_time(NaiveTime::MIN)
}

/// Last instant of a day
pub fn end_of_day(date: NaiveDate) -> NaiveDateTime {
    let last = NaiveTime::from_hms_nano_opt(23, 59, 59, 999_999_999).unwrap_or(NaiveTime::MIN);
    date.and_time(last)
}

/// An optional-bounded, inclusive range of timestamps
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DateRange {
    pub start: Option<NaiveDateTime>,
    pub end: Option<NaiveDateTime>,
}

impl DateRange {
    /// No bounds: matches everything
    pub fn all() -> Self {
        Self::default()
    }

    pub fn new(start: Option<NaiveDateTime>, end: Option<NaiveDateTime>) -> Self {
        Self { start, end }
    }

    /// From the start of `date`, open-ended
    pub fn since(date: NaiveDate) -> Self {
        Self {
            start: Some(start_of_day(date)),
            end: None,
        }
    }

    /// Whole days from `from` through `to`
    pub fn days(from: NaiveDate, to: NaiveDate) -> Self {
        Self {
            start: Some(start_of_day(from)),
            end: Some(end_of_day(to)),
        }
    }

    pub fn is_unbounded(&self) -> bool {
        self.start.is_none() && self.end.is_none()
    }

    /// Inclusive on both ends
    pub fn contains(&self, date: NaiveDateTime) -> bool {
        self.start.map_or(true, |start| date >= start) && self.end.map_or(true, |end| date <= end)
    }

    pub fn start_date(&self) -> Option<NaiveDate> {
        self.start.map(|s| s.date())
    }

    pub fn end_date(&self) -> Option<NaiveDate> {
        self.end.map(|e| e.date())
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.start_date(), self.end_date()) {
            (None, None) => write!(f, "all time"),
            (Some(s), None) => write!(f, "since {}", s),
            (None, Some(e)) => write!(f, "until {}", e),
            (Some(s), Some(e)) => write!(f, "{} to {}", s, e),
        }
    }
}

/// Named period relative to today
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NamedPeriod {
    Day,
    Month,
    Year,
    All,
}

impl NamedPeriod {
    pub fn resolve(&self, today: NaiveDate) -> DateRange {
        match self {
            Self::Day => DateRange::days(today, today),
            Self::Month => {
                let first = today.with_day(1).unwrap_or(today);
                let next_first = if today.month() == 12 {
                    NaiveDate::from_ymd_opt(today.year() + 1, 1, 1)
                } else {
                    NaiveDate::from_ymd_opt(today.year(), today.month() + 1, 1)
                };
                let last = next_first.map_or(today, |d| d - Duration::days(1));
                DateRange::days(first, last)
            }
            Self::Year => {
                let first = NaiveDate::from_ymd_opt(today.year(), 1, 1).unwrap_or(today);
                let last = NaiveDate::from_ymd_opt(today.year(), 12, 31).unwrap_or(today);
                DateRange::days(first, last)
            }
            Self::All => DateRange::all(),
        }
    }
}

impl FromStr for NamedPeriod {
    type Err = FinError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "day" | "today" => Ok(Self::Day),
            "month" => Ok(Self::Month),
            "year" => Ok(Self::Year),
            "all" => Ok(Self::All),
            other => Err(FinError::Validation(format!(
                "Unknown period '{}'. Use day, month, year or all",
                other
            ))),
        }
    }
}

/// How the user asked to restrict a view or report
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PeriodSelector {
    Named(NamedPeriod),
    Since(NaiveDate),
    Until(NaiveDate),
    Between { from: NaiveDate, to: NaiveDate },
}

impl Default for PeriodSelector {
    fn default() -> Self {
        Self::Named(NamedPeriod::All)
    }
}

impl PeriodSelector {
    /// Build a selector from raw command-line values
    ///
    /// At most one of `period`, `since` and `from`/`to` may be given. Date text
    /// is validated here; nothing is resolved against the clock yet.
    pub fn from_args(
        period: Option<NamedPeriod>,
        since: Option<&str>,
        from: Option<&str>,
        to: Option<&str>,
    ) -> FinResult<Self> {
        let explicit = since.is_some() || from.is_some() || to.is_some();
        if period.is_some() && explicit {
            return Err(FinError::Validation(
                "Use either a named period or explicit dates, not both".into(),
            ));
        }
        if since.is_some() && (from.is_some() || to.is_some()) {
            return Err(FinError::Validation(
                "Use either --since or --from/--to, not both".into(),
            ));
        }

        if let Some(period) = period {
            return Ok(Self::Named(period));
        }
        if let Some(since) = since {
            return Ok(Self::Since(parse_date(since)?));
        }

        match (from.map(parse_date).transpose()?, to.map(parse_date).transpose()?) {
            (Some(from), Some(to)) => {
                if from > to {
                    return Err(FinError::Validation(format!(
                        "Start date {} is after end date {}",
                        from, to
                    )));
                }
                Ok(Self::Between { from, to })
            }
            (Some(from), None) => Ok(Self::Since(from)),
            (None, Some(to)) => Ok(Self::Until(to)),
            (None, None) => Ok(Self::default()),
        }
    }

    pub fn resolve(&self, today: NaiveDate) -> DateRange {
        match *self {
            Self::Named(period) => period.resolve(today),
            Self::Since(date) => DateRange::since(date),
            Self::Until(date) => DateRange::new(None, Some(end_of_day(date))),
            Self::Between { from, to } => DateRange::days(from, to),
        }
    }
}
