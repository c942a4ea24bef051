//! Web error type and its HTTP rendering.

use axum::{
    Json,
    http::{HeaderValue, StatusCode, header},
    response::IntoResponse,
};
use journal_auth::error::Error as AuthError;
use serde_json::json;
use tracing::{debug, error};

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error("Missing Credentials")]
    MissingCredentials,

    #[error("Context Missing")]
    CtxMissing,
}

impl Error {
    fn status_and_message(&self) -> (StatusCode, &'static str) {
        match self {
            Error::MissingCredentials | Error::CtxMissing => {
                (StatusCode::UNAUTHORIZED, "Missing credentials")
            }
            Error::Auth(err) => match err {
                AuthError::NotFound => (StatusCode::NOT_FOUND, "Journal not found"),
                AuthError::InvalidCredentials => (StatusCode::UNAUTHORIZED, "Invalid credentials"),
                AuthError::DuplicateAccount => (StatusCode::CONFLICT, "Journal already exists"),
                AuthError::TokenMissing => (StatusCode::UNAUTHORIZED, "Authentication required"),
                AuthError::TokenExpired => (StatusCode::UNAUTHORIZED, "Expired token"),
                AuthError::TokenMalformed | AuthError::UnknownSubject => {
                    (StatusCode::UNAUTHORIZED, "Invalid authorization")
                }
                AuthError::TokenExpiryOutOfRange
                | AuthError::UnsupportedAlgorithm(_)
                | AuthError::TokenCreation(_)
                | AuthError::PasswordHash(_) => {
                    (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
                }
            },
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = self.status_and_message();
        if status.is_server_error() {
            error!("Creating API error response for error: {:?}", self);
        } else {
            debug!("Rejecting request: {self}");
        }

        let body = Json(json!({
            "error": {
                "message": message,
                "status": status.as_u16()
            }
        }));
        let mut response = (status, body).into_response();
        if status == StatusCode::UNAUTHORIZED {
            response
                .headers_mut()
                .insert(header::WWW_AUTHENTICATE, HeaderValue::from_static("Bearer"));
        }
        response
    }
}
