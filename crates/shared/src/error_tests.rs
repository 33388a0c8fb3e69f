//! Tests for application-wide error types.

use super::*;

#[test]
fn test_error_status_codes() {
    assert_eq!(AppError::Unauthorized(String::new()).status_code(), 401);
    assert_eq!(AppError::Forbidden(String::new()).status_code(), 403);
    assert_eq!(AppError::NotFound(String::new()).status_code(), 404);
    assert_eq!(AppError::Validation(String::new()).status_code(), 400);
    assert_eq!(AppError::Conflict(String::new()).status_code(), 409);
    assert_eq!(AppError::Database(String::new()).status_code(), 500);
    assert_eq!(AppError::Internal(String::new()).status_code(), 500);
}

#[test]
fn test_error_codes() {
    assert_eq!(
        AppError::Unauthorized(String::new()).error_code(),
        "UNAUTHORIZED"
    );
    assert_eq!(AppError::Forbidden(String::new()).error_code(), "FORBIDDEN");
    assert_eq!(AppError::NotFound(String::new()).error_code(), "NOT_FOUND");
    assert_eq!(
        AppError::Validation(String::new()).error_code(),
        "VALIDATION_ERROR"
    );
    assert_eq!(AppError::Conflict(String::new()).error_code(), "CONFLICT");
    assert_eq!(
        AppError::Database(String::new()).error_code(),
        "DATABASE_ERROR"
    );
    assert_eq!(
        AppError::Internal(String::new()).error_code(),
        "INTERNAL_ERROR"
    );
}

#[test]
fn test_error_display() {
    assert_eq!(
        AppError::Unauthorized("msg".into()).to_string(),
        "Authentication failed: msg"
    );
    assert_eq!(
        AppError::NotFound("msg".into()).to_string(),
        "Not found: msg"
    );
    assert_eq!(
        AppError::Validation("msg".into()).to_string(),
        "Validation error: msg"
    );
    assert_eq!(
        AppError::Database("msg".into()).to_string(),
        "Database error: msg"
    );
}
