use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};

// ============================================================================
// Wire field names
// ============================================================================

pub const OWNER_NAME: &str = "owner-name";
pub const EMAIL: &str = "email";
pub const PET_NAME: &str = "hamster-name";
pub const CHECK_IN: &str = "check-in";
pub const CHECK_OUT: &str = "check-out";

/// A form field together with the label used in messages about it.
#[derive(Debug, Clone, Copy)]
pub struct ReservationField {
    pub key: &'static str,
    pub label: &'static str,
}

/// Fields every submission must carry, in the order errors are reported.
pub const REQUIRED_FIELDS: [ReservationField; 5] = [
    ReservationField { key: OWNER_NAME, label: "Owner name" },
    ReservationField { key: EMAIL, label: "Email" },
    ReservationField { key: PET_NAME, label: "Hamster name" },
    ReservationField { key: CHECK_IN, label: "Check-in" },
    ReservationField { key: CHECK_OUT, label: "Check-out" },
];

// ============================================================================
// Request / record models
// ============================================================================

/// A decoded submission. Keeps every field as received so the stored record
/// mirrors the payload exactly; unknown fields are carried but never inspected.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReservationRequest {
    fields: Map<String, Value>,
}

impl ReservationRequest {
    pub fn from_fields(fields: Map<String, Value>) -> Self {
        Self { fields }
    }

    /// String view of a field. Numbers and booleans read as their JSON text;
    /// null and missing fields read as absent.
    pub fn field(&self, key: &str) -> Option<String> {
        match self.fields.get(key)? {
            Value::Null => None,
            Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// The trimmed value of a field, or `None` when it is missing or blank.
    pub fn present(&self, key: &str) -> Option<String> {
        self.field(key)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }

    #[cfg(test)]
    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }
}

/// One line of the append-only reservation log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationRecord {
    #[serde(serialize_with = "serialize_timestamp")]
    pub created_at: DateTime<Utc>,
    pub reservation: ReservationRequest,
}

impl ReservationRecord {
    pub fn new(created_at: DateTime<Utc>, reservation: ReservationRequest) -> Self {
        Self {
            created_at,
            reservation,
        }
    }
}

fn serialize_timestamp<S>(ts: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&ts.to_rfc3339_opts(SecondsFormat::Millis, true))
}

// ============================================================================
// Responses
// ============================================================================

pub const SUBMITTED_MESSAGE: &str = "Reservation request submitted successfully. We will confirm availability within one business day.";

#[derive(Debug, Serialize, Deserialize)]
pub struct SubmissionResponse {
    pub message: String,
}

/// Booking window handed to the interactive form.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PolicyResponse {
    pub min_lead_days: u32,
    pub today: NaiveDate,
    pub earliest_check_in: NaiveDate,
    pub earliest_check_out: NaiveDate,
}
