//! Booking-window rules shared by the submission handler and the form.
//!
//! Dates are compared as calendar days only. "Today" is supplied by the
//! caller so the same inputs always yield the same outcome.

use chrono::{Days, NaiveDate};

use crate::common::ValidationResult;

/// Error field tag for lead-time violations.
pub const CHECK_IN_RULE: &str = "checkIn";
/// Error field tag for ordering violations.
pub const CHECK_OUT_RULE: &str = "checkOut";

pub const CHECK_OUT_AFTER_CHECK_IN: &str = "Check-out must be after check-in.";

/// Parses `YYYY-MM-DD`. Exactly three all-digit components are required and
/// the day must exist on the calendar (`2026-02-30` is rejected).
pub fn parse_date_value(value: &str) -> Option<NaiveDate> {
    let parts: Vec<&str> = value.trim().split('-').collect();
    if parts.len() != 3
        || parts
            .iter()
            .any(|p| p.is_empty() || !p.bytes().all(|b| b.is_ascii_digit()))
    {
        return None;
    }

    let year = parts[0].parse::<i32>().ok()?;
    let month = parts[1].parse::<u32>().ok()?;
    let day = parts[2].parse::<u32>().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}

pub fn format_date_value(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReservationPolicy {
    min_lead_days: u32,
}

impl ReservationPolicy {
    pub fn new(min_lead_days: u32) -> Self {
        Self { min_lead_days }
    }

    pub fn min_lead_days(&self) -> u32 {
        self.min_lead_days
    }

    pub fn earliest_check_in(&self, today: NaiveDate) -> NaiveDate {
        today
            .checked_add_days(Days::new(u64::from(self.min_lead_days)))
            .unwrap_or(NaiveDate::MAX)
    }

    pub fn earliest_check_out(&self, today: NaiveDate) -> NaiveDate {
        self.earliest_check_in(today)
            .succ_opt()
            .unwrap_or(NaiveDate::MAX)
    }

    /// Applies both rules to already-parsed dates. Each rule is independent,
    /// so zero, one or two errors come back.
    pub fn evaluate_dates(
        &self,
        check_in: NaiveDate,
        check_out: NaiveDate,
        today: NaiveDate,
    ) -> ValidationResult {
        let mut result = ValidationResult::new();

        let earliest = self.earliest_check_in(today);
        if check_in < earliest {
            let unit = if self.min_lead_days == 1 { "day" } else { "days" };
            result.add_error(
                CHECK_IN_RULE,
                format!(
                    "Check-in must be at least {} {} from today ({} or later).",
                    self.min_lead_days,
                    unit,
                    format_date_value(earliest)
                ),
            );
        }

        if check_out <= check_in {
            result.add_error(CHECK_OUT_RULE, CHECK_OUT_AFTER_CHECK_IN);
        }

        result
    }

    /// Raw-string entry point. Returns no errors when either date fails to
    /// parse; presence and format are reported by the caller.
    pub fn evaluate(&self, check_in: &str, check_out: &str, today: NaiveDate) -> ValidationResult {
        match (parse_date_value(check_in), parse_date_value(check_out)) {
            (Some(check_in), Some(check_out)) => self.evaluate_dates(check_in, check_out, today),
            _ => ValidationResult::new(),
        }
    }
}
