use std::fmt;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Request fields that are missing or malformed.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ValidationError {
    pub fields: Vec<&'static str>,
}

impl ValidationError {
    pub fn push(&mut self, field: &'static str) {
        self.fields.push(field);
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid fields: {}", self.fields.join(", "))
    }
}

/// Diary service domain error variants.
#[derive(Debug, thiserror::Error)]
pub enum DiaryServiceError {
    #[error("diet not found")]
    DietNotFound,
    #[error("trainer comment not found")]
    CommentNotFound,
    #[error("unsupported notification type")]
    UnsupportedNotificationType,
    #[error("invalid request")]
    InvalidRequest(ValidationError),
    #[error("invalid image")]
    InvalidImage,
    #[error("forbidden")]
    Forbidden,
    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

impl DiaryServiceError {
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::DietNotFound => "DIET_NOT_FOUND",
            Self::CommentNotFound => "TRAINER_COMMENT_NOT_FOUND",
            Self::UnsupportedNotificationType => "UNSUPPORTED_NOTIFICATION_TYPE",
            Self::InvalidRequest(_) => "INVALID_REQUEST",
            Self::InvalidImage => "INVALID_IMAGE",
            Self::Forbidden => "FORBIDDEN",
            Self::Internal(_) => "INTERNAL",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::DietNotFound | Self::CommentNotFound => StatusCode::NOT_FOUND,
            Self::InvalidRequest(_) | Self::InvalidImage => StatusCode::BAD_REQUEST,
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::UnsupportedNotificationType | Self::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for DiaryServiceError {
    fn into_response(self) -> Response {
        let status = self.status();
        // 4xx are client errors and already visible in the TraceLayer span.
        match &self {
            Self::Internal(e) => {
                tracing::error!(error = %e, error_code = "INTERNAL", "internal error");
            }
            Self::UnsupportedNotificationType => {
                tracing::error!(error_code = self.error_code(), "no template for notification");
            }
            _ => {}
        }
        let mut body = serde_json::json!({
            "errorCode": self.error_code(),
            "message": self.to_string(),
        });
        if let Self::InvalidRequest(ref v) = self {
            body["fields"] = serde_json::json!(v.fields);
        }
        (status, axum::Json(body)).into_response()
    }
}
