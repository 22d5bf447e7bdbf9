use axum::{
    body::Body,
    extract::Extension,
    http::{header, HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use std::sync::Arc;
use tracing::{info, warn};

use super::decode::{collect_body, decode_reservation};
use super::models::{
    PolicyResponse, ReservationRecord, SubmissionResponse, EMAIL, SUBMITTED_MESSAGE,
};
use super::validators::ReservationValidator;
use crate::common::{safe_email_log, ApiError, AppState, Clock, Validator};

/// POST /api/reservations - Submit a reservation request (public endpoint)
pub async fn submit_reservation(
    Extension(state): Extension<Arc<AppState>>,
    headers: HeaderMap,
    body: Body,
) -> Result<impl IntoResponse, ApiError> {
    let limit = state.config.max_body_bytes;

    // Declared oversize bodies are refused without reading a byte.
    let declared_len = headers
        .get(header::CONTENT_LENGTH)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse::<usize>().ok());
    if declared_len.is_some_and(|len| len > limit) {
        return Err(ApiError::PayloadTooLarge(limit));
    }

    let raw = collect_body(body, limit).await?;

    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok());
    let reservation = decode_reservation(content_type, &raw)?;

    let today = state.clock.today();
    let validator = ReservationValidator::new(state.policy, today);
    let result = validator.validate(&reservation);
    if !result.is_valid() {
        info!(
            error_count = result.errors.len(),
            primary = result.primary_message().unwrap_or_default(),
            "Reservation request rejected"
        );
        return Err(result.into());
    }

    let email = reservation.present(EMAIL).unwrap_or_default();
    let record = ReservationRecord::new(state.clock.now(), reservation);

    // The outcome is already decided; a failed append is logged, never returned.
    if let Err(e) = state.reservation_log.append(&record).await {
        warn!(
            error = %e,
            path = %state.reservation_log.path().display(),
            "Failed to append reservation to log"
        );
    } else {
        info!(
            email = %safe_email_log(&email),
            created_at = %record.created_at,
            "Reservation request accepted"
        );
    }

    Ok((
        StatusCode::CREATED,
        Json(SubmissionResponse {
            message: SUBMITTED_MESSAGE.to_string(),
        }),
    ))
}

/// GET /api/reservations/policy - Booking window for the reservation form
pub async fn reservation_policy(
    Extension(state): Extension<Arc<AppState>>,
) -> Json<PolicyResponse> {
    let today = state.clock.today();
    Json(PolicyResponse {
        min_lead_days: state.policy.min_lead_days(),
        today,
        earliest_check_in: state.policy.earliest_check_in(today),
        earliest_check_out: state.policy.earliest_check_out(today),
    })
}

/// Any unsupported method on an API route.
pub async fn method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed
}
