use salvo::prelude::*;
use std::fmt;
use thiserror::Error;

/// A non-2xx response from the Power BI REST API.
#[derive(Debug, Clone)]
pub struct ApiError {
    pub status: u16,
    pub status_text: String,
    pub body: String,
    pub request_id: Option<String>,
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.status, self.status_text)
    }
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Authentication failed: {0}")]
    Authentication(String),

    #[error("Power BI API error: {0}")]
    Api(ApiError),

    #[error("HTTP transport error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP status error: {0}")]
    StatusError(#[from] salvo::http::StatusError),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Authentication(_) => StatusCode::UNAUTHORIZED,
            AppError::Api(err) => {
                StatusCode::from_u16(err.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
            }
            AppError::StatusError(status_error) => status_error.code,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// The multi-line error message surfaced to the embedding front-end.
    /// Status, status text, response body and request id are embedded so
    /// that a failed call can be traced against the Power BI service logs.
    pub fn embed_message(&self) -> String {
        match self {
            AppError::Api(err) => format!(
                "Error while retrieving report embed details\r\nStatus: {} {}\r\nResponse: {}\r\nRequestId: {}",
                err.status,
                err.status_text,
                err.body,
                err.request_id.as_deref().unwrap_or("N/A"),
            ),
            other => format!(
                "Error while retrieving report embed details\r\nStatus: {}\r\nResponse: {}\r\nRequestId: N/A",
                self.status_code().as_u16(),
                other,
            ),
        }
    }

    /// The `{status, error}` payload callers always receive on failure.
    pub fn to_embed_error(&self) -> serde_json::Value {
        serde_json::json!({
            "status": self.status_code().as_u16(),
            "error": self.embed_message(),
        })
    }
}

#[async_trait]
impl Writer for AppError {
    async fn write(mut self, _req: &mut Request, _depot: &mut Depot, res: &mut Response) {
        res.status_code(self.status_code());
        res.render(Json(self.to_embed_error()));
    }
}
