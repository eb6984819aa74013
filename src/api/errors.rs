use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::fx::converter::FxError;

#[derive(Serialize)]
pub struct ErrorDetails {
    pub currency: Option<String>,
}

#[derive(Serialize)]
pub struct ErrorResponse {
    status: u16,                   // HTTP status code
    error: String,                 // Short error identifier
    message: String,               // Human-readable error message
    details: Option<ErrorDetails>, // Optional details for debugging
}

impl ErrorResponse {
    pub fn new(
        status: StatusCode,
        error: &str,
        message: &str,
        details: Option<ErrorDetails>,
    ) -> Self {
        ErrorResponse {
            status: status.as_u16(),
            error: error.to_string(),
            message: message.to_string(),
            details,
        }
    }

    pub fn bad_request(message: &str) -> Self {
        Self::new(StatusCode::BAD_REQUEST, "invalid_input", message, None)
    }

    pub fn not_found(message: &str) -> Self {
        Self::new(StatusCode::NOT_FOUND, "not_found", message, None)
    }

    pub fn conflict(message: &str) -> Self {
        Self::new(StatusCode::CONFLICT, "conflict", message, None)
    }

    pub fn internal(message: &str) -> Self {
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            "internal_error",
            message,
            None,
        )
    }

    pub fn from_fx_error(error: &FxError) -> Self {
        match error {
            FxError::UnknownCurrency(code) => Self::new(
                StatusCode::UNPROCESSABLE_ENTITY,
                "unknown_currency",
                &error.to_string(),
                Some(ErrorDetails {
                    currency: Some(code.clone()),
                }),
            ),
            // A bad stored rate is a data-integrity fault, not a caller mistake.
            FxError::InvalidRate { code, .. } => Self::new(
                StatusCode::INTERNAL_SERVER_ERROR,
                "invalid_rate",
                &error.to_string(),
                Some(ErrorDetails {
                    currency: Some(code.clone()),
                }),
            ),
        }
    }
}

impl IntoResponse for ErrorResponse {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn duplicate_plan_lines_map_to_conflict() {
        let response = ErrorResponse::conflict("a plan line with id abc already exists");
        assert_eq!(response.status, StatusCode::CONFLICT.as_u16());
        assert_eq!(response.error, "conflict");
    }

    #[test]
    fn fx_errors_map_to_the_right_status_codes() {
        let unknown = ErrorResponse::from_fx_error(&FxError::UnknownCurrency("XYZ".to_string()));
        assert_eq!(unknown.status, StatusCode::UNPROCESSABLE_ENTITY.as_u16());

        let invalid = ErrorResponse::from_fx_error(&FxError::InvalidRate {
            code: "JPY".to_string(),
            value: dec!(0),
        });
        assert_eq!(invalid.status, StatusCode::INTERNAL_SERVER_ERROR.as_u16());
    }
}
