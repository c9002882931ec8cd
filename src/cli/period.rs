//! Period selection arguments shared by `view` and `report`

use chrono::{Local, NaiveDate};
use clap::Args;

use crate::error::FinResult;
use crate::models::{DateRange, NamedPeriod, PeriodSelector};

/// Date range selection
#[derive(Args, Debug, Clone, Default)]
pub struct PeriodArgs {
    /// Named period: day, month, year or all
    #[arg(short, long)]
    pub period: Option<String>,

    /// Everything from this date on (YYYY-MM-DD)
    #[arg(long)]
    pub since: Option<String>,

    /// Start date (YYYY-MM-DD), inclusive
    #[arg(long)]
    pub from: Option<String>,

    /// End date (YYYY-MM-DD), inclusive
    #[arg(long)]
    pub to: Option<String>,
}

impl PeriodArgs {
    /// Validate the arguments into a selector
    pub fn selector(&self) -> FinResult<PeriodSelector> {
        let period = self
            .period
            .as_deref()
            .map(str::parse::<NamedPeriod>)
            .transpose()?;

        PeriodSelector::from_args(
            period,
            self.since.as_deref(),
            self.from.as_deref(),
            self.to.as_deref(),
        )
    }

    /// Validate and resolve against `today`
    pub fn resolve(&self, today: NaiveDate) -> FinResult<DateRange> {
        Ok(self.selector()?.resolve(today))
    }

    /// Validate and resolve against the local date
    pub fn resolve_now(&self) -> FinResult<DateRange> {
        self.resolve(Local::now().date_naive())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_no_arguments_is_all() {
        let range = PeriodArgs::default().resolve(date(2024, 1, 1)).unwrap();
        assert!(range.is_unbounded());
    }

    #[test]
    fn test_named_period() {
        let args = PeriodArgs {
            period: Some("month".into()),
            ..Default::default()
        };
        let range = args.resolve(date(2024, 12, 15)).unwrap();
        assert_eq!(range.start_date(), Some(date(2024, 12, 1)));
        assert_eq!(range.end_date(), Some(date(2024, 12, 31)));
    }

    #[test]
    fn test_unknown_period_is_validation_error() {
        let args = PeriodArgs {
            period: Some("fortnight".into()),
            ..Default::default()
        };
        assert!(args.selector().unwrap_err().is_validation());
    }

    #[test]
    fn test_malformed_date_is_validation_error() {
        let args = PeriodArgs {
            since: Some("2024/01/01".into()),
            ..Default::default()
        };
        assert!(args.selector().unwrap_err().is_validation());
    }

    #[test]
    fn test_from_to() {
        let args = PeriodArgs {
            from: Some("2024-01-01".into()),
            to: Some("2024-01-31".into()),
            ..Default::default()
        };
        let range = args.resolve(date(2024, 6, 1)).unwrap();
        assert_eq!(range.start_date(), Some(date(2024, 1, 1)));
        assert_eq!(range.end_date(), Some(date(2024, 1, 31)));
    }
}
