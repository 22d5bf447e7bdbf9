use chrono::NaiveDate;
use regex::Regex;
use std::sync::OnceLock;

use super::models::{ReservationRequest, CHECK_IN, CHECK_OUT, EMAIL, REQUIRED_FIELDS};
use super::policy::{parse_date_value, ReservationPolicy};
use crate::common::{ValidationResult, Validator};

// ============================================================================
// Reservation Validator
// ============================================================================

/// Full submission check: presence, date format, booking window, email shape.
/// Every failing rule is reported; nothing short-circuits.
pub struct ReservationValidator {
    pub policy: ReservationPolicy,
    pub today: NaiveDate,
}

impl ReservationValidator {
    pub fn new(policy: ReservationPolicy, today: NaiveDate) -> Self {
        Self { policy, today }
    }
}

impl Validator<ReservationRequest> for ReservationValidator {
    fn validate(&self, data: &ReservationRequest) -> ValidationResult {
        let mut result = ValidationResult::new();

        for field in REQUIRED_FIELDS.iter() {
            if data.present(field.key).is_none() {
                result.add_error(field.key, format!("{} is required.", field.label));
            }
        }

        // Blank dates were already reported as missing above.
        let check_in = data.present(CHECK_IN);
        let check_out = data.present(CHECK_OUT);
        let check_in_date = check_in.as_deref().and_then(parse_date_value);
        let check_out_date = check_out.as_deref().and_then(parse_date_value);

        if check_in.is_some() && check_in_date.is_none() {
            result.add_error(CHECK_IN, "Check-in must be a valid date.");
        }
        if check_out.is_some() && check_out_date.is_none() {
            result.add_error(CHECK_OUT, "Check-out must be a valid date.");
        }

        if let (Some(check_in), Some(check_out)) = (check_in_date, check_out_date) {
            result.merge(self.policy.evaluate_dates(check_in, check_out, self.today));
        }

        // Presence is judged on the trimmed value, the shape on the raw one.
        if let Some(email) = data.field(EMAIL).filter(|v| !v.trim().is_empty()) {
            if !is_valid_email(&email) {
                result.add_error(EMAIL, "Email must be valid.");
            }
        }

        result
    }
}

// ============================================================================
// Helper Functions
// ============================================================================

fn email_pattern() -> &'static Regex {
    static EMAIL_RE: OnceLock<Regex> = OnceLock::new();
    EMAIL_RE.get_or_init(|| {
        Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is a valid regex")
    })
}

/// Accepts `local@domain.tld` shapes: one `@`, a dot after it, no whitespace.
pub fn is_valid_email(email: &str) -> bool {
    email_pattern().is_match(email)
}
