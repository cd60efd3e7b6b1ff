//! HTTP adapter mapping for domain errors.
//!
//! The domain error type stays HTTP-agnostic; this module decides status
//! codes and keeps internal failure details away from clients.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use tracing::error;

use crate::domain::{Error, ErrorCode, TRACE_ID_HEADER};

/// Convenient result alias for HTTP handlers.
pub type ApiResult<T> = Result<T, Error>;

/// Status code for each error category.
///
/// A duplicate email is reported as 400, and shape validation as 422.
pub(crate) fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::ValidationFailed => StatusCode::UNPROCESSABLE_ENTITY,
        ErrorCode::Conflict => StatusCode::BAD_REQUEST,
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

pub(crate) fn redact_if_internal(error: &Error) -> Error {
    if matches!(error.code(), ErrorCode::InternalError) {
        let mut redacted = Error::internal("Internal server error");
        if let Some(id) = error.trace_id() {
            redacted = redacted.with_trace_id(id.to_owned());
        }
        redacted
    } else {
        error.clone()
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        status_for(self.code())
    }

    fn error_response(&self) -> HttpResponse {
        if matches!(self.code(), ErrorCode::InternalError) {
            error!(message = self.message(), trace_id = ?self.trace_id(), "internal error");
        }

        let mut builder = HttpResponse::build(self.status_code());
        if let Some(id) = self.trace_id() {
            builder.insert_header((TRACE_ID_HEADER, id.to_owned()));
        }

        builder.json(redact_if_internal(self))
    }
}

#[cfg(test)]
mod tests {
    //! Tests for HTTP error mapping.
    use super::*;
    use actix_web::body::to_bytes;
    use rstest::{fixture, rstest};
    use serde_json::json;

    const TRACE_ID: &str = "00000000-0000-0000-0000-000000000000";

    #[fixture]
    fn internal_error() -> Error {
        Error::internal("connection string postgres://secret")
            .with_trace_id(TRACE_ID)
            .with_details(json!({"secret": "x"}))
    }

    async fn assert_error_response(
        error: Error,
        expected_status: StatusCode,
        expected_trace_id: Option<&str>,
    ) -> Error {
        let response = ResponseError::error_response(&error);
        assert_eq!(response.status(), expected_status);

        let header = response
            .headers()
            .get(TRACE_ID_HEADER)
            .map(|value| value.to_str().expect("trace id is ASCII").to_owned());
        assert_eq!(header.as_deref(), expected_trace_id);

        let bytes = to_bytes(response.into_body())
            .await
            .expect("reading response body succeeds");
        serde_json::from_slice(&bytes).expect("Error JSON deserialisation succeeds")
    }

    #[rstest]
    #[case(Error::validation_failed("bad"), StatusCode::UNPROCESSABLE_ENTITY)]
    #[case(Error::conflict("Email already exists"), StatusCode::BAD_REQUEST)]
    #[case(Error::not_found("User not found"), StatusCode::NOT_FOUND)]
    #[case(Error::service_unavailable("down"), StatusCode::SERVICE_UNAVAILABLE)]
    #[case(Error::internal("boom"), StatusCode::INTERNAL_SERVER_ERROR)]
    fn status_code_matches_error_code(#[case] error: Error, #[case] expected: StatusCode) {
        assert_eq!(ResponseError::status_code(&error), expected);
    }

    #[rstest]
    #[actix_web::test]
    async fn internal_errors_are_redacted(internal_error: Error) {
        let payload = assert_error_response(
            internal_error,
            StatusCode::INTERNAL_SERVER_ERROR,
            Some(TRACE_ID),
        )
        .await;

        assert_eq!(payload.code(), ErrorCode::InternalError);
        assert_eq!(payload.message(), "Internal server error");
        assert!(payload.details().is_none());
        assert_eq!(payload.trace_id(), Some(TRACE_ID));
    }

    #[rstest]
    #[actix_web::test]
    async fn conflict_payload_keeps_message() {
        let payload = assert_error_response(
            Error::conflict("Email already exists"),
            StatusCode::BAD_REQUEST,
            None,
        )
        .await;

        assert_eq!(payload.code(), ErrorCode::Conflict);
        assert_eq!(payload.message(), "Email already exists");
        assert_eq!(payload.trace_id(), None);
    }

    #[rstest]
    #[actix_web::test]
    async fn validation_payload_keeps_details() {
        let error = Error::validation_failed("name must not be empty")
            .with_details(json!({"field": "name", "code": "empty_name"}));

        let payload =
            assert_error_response(error, StatusCode::UNPROCESSABLE_ENTITY, None).await;

        assert_eq!(
            payload.details(),
            Some(&json!({"field": "name", "code": "empty_name"}))
        );
    }
}
