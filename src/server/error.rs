use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use database::database::request_manager::RequestManagerError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Body of every JSON error the api returns
#[derive(Serialize, Deserialize, Debug, PartialEq)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("info missing")]
    InfoMissing,

    /// A constraint rejected the change, e.g. the name is already taken
    #[error("{0}")]
    ConstraintViolation(String),

    /// No record at the requested position, answered with an empty body
    #[error("person not found")]
    PersonNotFound,

    #[error("unknown endpoint")]
    UnknownEndpoint,

    #[error("{0}")]
    Database(RequestManagerError),
}

impl From<RequestManagerError> for ApiError {
    fn from(err: RequestManagerError) -> Self {
        match err {
            RequestManagerError::Rollback(message) => ApiError::ConstraintViolation(message),
            other => ApiError::Database(other),
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::InfoMissing | ApiError::ConstraintViolation(_) => StatusCode::BAD_REQUEST,
            ApiError::PersonNotFound | ApiError::UnknownEndpoint => StatusCode::NOT_FOUND,
            ApiError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        match self {
            ApiError::PersonNotFound => HttpResponse::NotFound().finish(),
            ApiError::Database(err) => {
                log::error!("Database request failed: {}", err);

                HttpResponse::build(self.status_code()).json(ErrorResponse {
                    error: self.to_string(),
                })
            }
            _ => HttpResponse::build(self.status_code()).json(ErrorResponse {
                error: self.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rollback_becomes_a_bad_request() {
        let err = ApiError::from(RequestManagerError::Rollback(
            "the name already exists in the phonebook".to_string(),
        ));

        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.to_string(), "the name already exists in the phonebook");
    }

    #[test]
    fn timeout_is_a_server_error() {
        let err = ApiError::from(RequestManagerError::DatabaseTimeout);

        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
