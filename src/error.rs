use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

#[derive(Debug)]
pub enum ApiError {
    Validation(String),
    DuplicateUser,
    NotFound,
    InvalidCredentials,
    /// Store or hashing failure; `details` is the raw error text
    Internal {
        context: &'static str,
        details: String,
    },
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

impl ApiError {
    /// `map_err` adapter that tags a failure with what the handler was doing.
    pub fn internal<E: std::fmt::Display>(context: &'static str) -> impl FnOnce(E) -> ApiError {
        move |err| ApiError::Internal {
            context,
            details: err.to_string(),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        let body = match self {
            ApiError::Validation(message) => ErrorResponse {
                error: "Validation failed".to_string(),
                details: Some(message),
            },
            ApiError::DuplicateUser => ErrorResponse {
                error: "Username already exists".to_string(),
                details: None,
            },
            ApiError::NotFound => ErrorResponse {
                error: "User not found".to_string(),
                details: None,
            },
            ApiError::InvalidCredentials => ErrorResponse {
                error: "Invalid password".to_string(),
                details: None,
            },
            ApiError::Internal { context, details } => {
                tracing::error!(%details, "{}", context);
                ErrorResponse {
                    error: context.to_string(),
                    details: Some(details),
                }
            }
        };

        (status, Json(body)).into_response()
    }
}

/// Unparseable or wrong-typed JSON bodies render as validation failures.
impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::Validation(rejection.body_text())
    }
}
