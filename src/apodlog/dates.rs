//! APOD date parsing and the availability window.
//!
//! Dates are kept as ISO-8601 strings inside records; because that format sorts
//! lexically in calendar order, stores compare the strings directly and only
//! user input goes through [`chrono::NaiveDate`].

use crate::error::{ApodError, Result};
use chrono::{Local, NaiveDate};

/// First day the APOD archive has an entry for.
pub fn apod_start_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(1995, 6, 16).unwrap_or(NaiveDate::MIN)
}

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Parses `YYYY-MM-DD`. Whitespace or slashes between the parts are accepted
/// so `2013 10 01` and `2013/10/01` work from the prompt too.
pub fn parse_date(input: &str) -> Result<NaiveDate> {
    let normalized: String = input
        .trim()
        .split(|c: char| c == '-' || c == '/' || c.is_whitespace())
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("-");

    NaiveDate::parse_from_str(&normalized, "%Y-%m-%d")
        .map_err(|_| ApodError::InvalidDate(format!("'{}' is not a YYYY-MM-DD date.", input.trim())))
}

pub fn check_apod_date(date: NaiveDate, today: NaiveDate) -> Result<()> {
    let start = apod_start_date();
    if date < start {
        return Err(ApodError::InvalidDate(format!(
            "APOD is available starting {}.",
            start
        )));
    }
    if date > today {
        return Err(ApodError::InvalidDate(format!(
            "Please enter a date on or before {}.",
            today
        )));
    }
    Ok(())
}

/// Parses and validates in one step.
pub fn parse_apod_date(input: &str, today: NaiveDate) -> Result<NaiveDate> {
    let date = parse_date(input)?;
    check_apod_date(date, today)?;
    Ok(date)
}
