use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use log::{error, warn};
use serde_json::json;

/// Utility enum that covers all possible errors while serving cluster status
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Any error originating from the `kube-rs` crate
    #[error("Kubernetes reported error: {source}")]
    KubeError {
        #[from]
        source: kube::Error,
    },

    /// Missing or malformed service configuration, typically an unset environment variable.
    #[error("Invalid configuration: {0}")]
    ConfigError(String),

    #[error("Serialization error: {source}")]
    SerializationError {
        #[from]
        source: serde_json::Error,
    },

    #[error("I/O error: {source}")]
    IoError {
        #[from]
        source: std::io::Error,
    },
}

impl Error {
    /// HTTP status for this error. Error codes reported by the hub are passed through,
    /// everything else is a server error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Error::KubeError {
                source: kube::Error::Api(response),
            } => match StatusCode::from_u16(response.code) {
                Ok(code) if code.is_client_error() || code.is_server_error() => code,
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            },
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

fn error_name(status: StatusCode) -> &'static str {
    match status {
        StatusCode::BAD_REQUEST => "InputError",
        StatusCode::UNAUTHORIZED => "AuthenticationError",
        StatusCode::FORBIDDEN => "NotAllowedError",
        StatusCode::NOT_FOUND => "NotFoundError",
        StatusCode::CONFLICT => "ConflictError",
        _ => "Error",
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = self.to_string();

        if status.is_client_error() {
            warn!("Request failed with {}: {}", status, message);
        } else {
            error!("Request failed with {}: {}", status, message);
        }

        let body = Json(json!({
            "error": {
                "name": error_name(status),
                "message": message,
            },
            "response": {
                "statusCode": status.as_u16(),
            }
        }));

        (status, body).into_response()
    }
}
