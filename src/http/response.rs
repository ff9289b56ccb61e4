//! The response envelope shared by every endpoint.
//!
//! Success and failure both serialize to
//! `{ success, data?, message?, error?, errors?, pagination? }`.
//! Read failures surface as 500, write failures as 400, with not-found
//! (including ownership mismatches) and validation shapes carved out.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::error::Error;
use crate::pagination::Pagination;

/// Successful envelope; carries its status code out of band
#[derive(Debug, Serialize)]
pub struct Success<T> {
    #[serde(skip)]
    status: StatusCode,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pagination: Option<Pagination>,
}

impl<T: Serialize> Success<T> {
    pub fn data(data: T) -> Self {
        Self {
            status: StatusCode::OK,
            success: true,
            data: Some(data),
            message: None,
            pagination: None,
        }
    }

    pub fn with_status(mut self, status: StatusCode) -> Self {
        self.status = status;
        self
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn with_pagination(mut self, pagination: Pagination) -> Self {
        self.pagination = Some(pagination);
        self
    }
}

impl Success<()> {
    /// Envelope with a message and no data (delete success)
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::OK,
            success: true,
            data: None,
            message: Some(message.into()),
            pagination: None,
        }
    }
}

impl<T: Serialize> IntoResponse for Success<T> {
    fn into_response(self) -> Response {
        (self.status, Json(self)).into_response()
    }
}

/// Failure envelope with its status code
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
    error: Option<String>,
    errors: Option<Vec<String>>,
}

impl ApiError {
    pub fn not_found(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: message.into(),
            error: None,
            errors: None,
        }
    }

    pub fn unauthorized() -> Self {
        Self {
            status: StatusCode::UNAUTHORIZED,
            message: "Unauthorized".to_string(),
            error: None,
            errors: None,
        }
    }

    /// Map a failure on a read path: not-found keeps its shape, anything
    /// else is unexpected and reports 500 with the underlying message.
    pub fn read(context: &str, err: Error) -> Self {
        match err {
            Error::NotFound => Self::not_found("Todo not found"),
            err => Self {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                message: context.to_string(),
                error: Some(err.to_string()),
                errors: None,
            },
        }
    }

    /// Map a failure on a write path: caller-correctable, so everything
    /// that is not a not-found reports 400.
    pub fn write(context: &str, err: Error) -> Self {
        match err {
            Error::NotFound => Self::not_found("Todo not found"),
            Error::Validation(errors) => Self {
                status: StatusCode::BAD_REQUEST,
                message: "Validation error".to_string(),
                error: None,
                errors: Some(errors),
            },
            Error::InvalidId(_) => Self {
                status: StatusCode::BAD_REQUEST,
                message: "Invalid todo ID format".to_string(),
                error: None,
                errors: None,
            },
            err => Self {
                status: StatusCode::BAD_REQUEST,
                message: context.to_string(),
                error: Some(err.to_string()),
                errors: None,
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        #[derive(Serialize)]
        struct Body {
            success: bool,
            message: String,
            #[serde(skip_serializing_if = "Option::is_none")]
            error: Option<String>,
            #[serde(skip_serializing_if = "Option::is_none")]
            errors: Option<Vec<String>>,
        }

        let body = Body {
            success: false,
            message: self.message,
            error: self.error,
            errors: self.errors,
        };
        (self.status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_mapping_keeps_not_found() {
        let err = ApiError::read("Error fetching todo", Error::NotFound);
        assert_eq!(err.status, StatusCode::NOT_FOUND);
    }

    #[test]
    fn read_mapping_reports_500_for_everything_else() {
        let err = ApiError::read("Error fetching todo", Error::InvalidId("x".into()));
        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.message, "Error fetching todo");
    }

    #[test]
    fn write_mapping_exposes_validation_list() {
        let err = ApiError::write(
            "Error updating todo",
            Error::Validation(vec!["Title is required".into()]),
        );
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(err.errors.as_deref(), Some(&["Title is required".to_string()][..]));
    }

    #[test]
    fn write_mapping_names_bad_ids() {
        let err = ApiError::write("Error updating todo", Error::InvalidId("x".into()));
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(err.message, "Invalid todo ID format");
    }
}
