use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::models::ErrorEnvelope;

pub type WebResult<T> = std::result::Result<T, WebError>;

/// Failures at the persistence-gateway boundary.
#[derive(thiserror::Error, Debug)]
pub enum StoreError {
    #[error("invalid recipe id: {0}")]
    InvalidId(String),
    #[error("recipe store unavailable: {0}")]
    Unavailable(String),
    #[error(transparent)]
    Unknown(#[from] anyhow::Error),
}

impl From<mongodb::error::Error> for StoreError {
    fn from(err: mongodb::error::Error) -> Self {
        use mongodb::error::ErrorKind;
        match *err.kind {
            ErrorKind::ServerSelection { .. } | ErrorKind::Io(_) => {
                StoreError::Unavailable(err.to_string())
            }
            _ => StoreError::Unknown(err.into()),
        }
    }
}

/// Failures at the HTTP boundary. Every variant renders as the
/// `{"errorMessage": ...}` envelope with the matching status code.
#[derive(thiserror::Error, Debug)]
pub enum WebError {
    #[error("Recipe not found.")]
    NotFound,
    #[error("{0}")]
    InvalidInput(String),
    #[error("Error while talking to the recipe store.")]
    Store(#[source] StoreError),
}

impl From<StoreError> for WebError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::InvalidId(id) => WebError::InvalidInput(format!("Invalid recipe id: {id}")),
            other => WebError::Store(other),
        }
    }
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        let status = match &self {
            WebError::NotFound => StatusCode::NOT_FOUND,
            WebError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            WebError::Store(source) => {
                // Operator visibility; the client only gets the generic message.
                tracing::error!(error = %source, "persistence operation failed");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        let body = Json(ErrorEnvelope {
            error_message: self.to_string(),
        });
        (status, body).into_response()
    }
}
