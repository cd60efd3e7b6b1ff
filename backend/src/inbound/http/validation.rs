//! Request validation for the user endpoints.
//!
//! Rejections are raised before any store access. Malformed input becomes a
//! `ValidationFailed` error (HTTP 422); ids that are integers but cannot name
//! a stored row become `NotFound`.

use actix_web::error::{JsonPayloadError, PathError};
use actix_web::{HttpRequest, web};
use serde_json::json;
use tracing::debug;

use crate::domain::{Error, UserDraft, UserId, UserValidationError, USER_NOT_FOUND_MESSAGE};

/// Validation error codes for malformed requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum RejectionCode {
    MalformedBody,
    InvalidPathId,
}

impl RejectionCode {
    fn as_str(self) -> &'static str {
        match self {
            Self::MalformedBody => "malformed_body",
            Self::InvalidPathId => "invalid_path_id",
        }
    }
}

/// Map a field-level validation failure to a 422 error with details.
pub(crate) fn user_validation_error(err: &UserValidationError) -> Error {
    Error::validation_failed(err.to_string()).with_details(json!({
        "field": err.field(),
        "code": err.code(),
    }))
}

/// Validate a `{name, email}` body into a draft.
pub(crate) fn parse_user_draft(name: String, email: String) -> Result<UserDraft, Error> {
    UserDraft::try_from_strings(name, email).map_err(|err| user_validation_error(&err))
}

/// Resolve a path identifier.
///
/// Non-positive integers can never match a stored row, so they are reported
/// as missing users rather than malformed requests.
pub(crate) fn parse_user_id(raw: i64) -> Result<UserId, Error> {
    UserId::new(raw).map_err(|_| {
        Error::not_found(USER_NOT_FOUND_MESSAGE).with_details(json!({ "id": raw }))
    })
}

fn json_payload_error(err: &JsonPayloadError) -> Error {
    debug!(error = %err, "rejected JSON payload");
    Error::validation_failed("request body must be a JSON object with name and email")
        .with_details(json!({
            "code": RejectionCode::MalformedBody.as_str(),
            "reason": err.to_string(),
        }))
}

/// Optional sign followed by ASCII digits, whatever the magnitude.
fn is_integer_literal(raw: &str) -> bool {
    let digits = raw.strip_prefix(['+', '-']).unwrap_or(raw);
    !digits.is_empty() && digits.bytes().all(|byte| byte.is_ascii_digit())
}

fn path_error(err: &PathError, req: &HttpRequest) -> Error {
    debug!(error = %err, "rejected path parameter");
    let raw = req.match_info().get("id").unwrap_or_default();
    if is_integer_literal(raw) {
        return Error::not_found(USER_NOT_FOUND_MESSAGE).with_details(json!({ "id": raw }));
    }
    Error::validation_failed("id must be an integer").with_details(json!({
        "field": "id",
        "code": RejectionCode::InvalidPathId.as_str(),
    }))
}

/// JSON extractor configuration reporting malformed bodies as 422.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .error_handler(|err, _req| json_payload_error(&err).into())
}

/// Path extractor configuration reporting non-integer ids as 422 and
/// out-of-range integer ids as 404.
pub fn path_config() -> web::PathConfig {
    web::PathConfig::default().error_handler(|err, req| path_error(&err, req).into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use rstest::rstest;

    #[rstest]
    #[case("", "ok@example.com", "name", "empty_name")]
    #[case("Ada", "invalid-email", "email", "invalid_email")]
    #[case("Ada", "", "email", "empty_email")]
    fn draft_failures_carry_field_details(
        #[case] name: &str,
        #[case] email: &str,
        #[case] field: &str,
        #[case] code: &str,
    ) {
        let err = parse_user_draft(name.to_owned(), email.to_owned()).expect_err("invalid");

        assert_eq!(err.code(), ErrorCode::ValidationFailed);
        assert_eq!(err.details(), Some(&json!({ "field": field, "code": code })));
    }

    #[rstest]
    #[case(0)]
    #[case(-1)]
    fn non_positive_ids_are_not_found(#[case] raw: i64) {
        let err = parse_user_id(raw).expect_err("no such id");
        assert_eq!(err.code(), ErrorCode::NotFound);
    }

    #[rstest]
    #[case("99999999999999999999", true)]
    #[case("-99999999999999999999", true)]
    #[case("+12", true)]
    #[case("abc", false)]
    #[case("12abc", false)]
    #[case("-", false)]
    #[case("", false)]
    fn recognises_integer_literals(#[case] raw: &str, #[case] expected: bool) {
        assert_eq!(is_integer_literal(raw), expected);
    }

    #[rstest]
    fn positive_ids_resolve() {
        assert_eq!(parse_user_id(12).map(UserId::get), Ok(12));
    }
}
