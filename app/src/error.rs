use thiserror::Error;
use warp::http::StatusCode;

#[derive(Debug, Error)]
pub enum DBError {
    #[error(transparent)]
    SQLError(#[from] sqlx::Error),
    #[error(transparent)]
    MigrateError(#[from] sqlx::migrate::MigrateError),
}

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("Unable to load env file: {0}")]
    EnvFile(#[from] dotenv::Error),
    #[error(transparent)]
    Database(#[from] DBError),
    #[error("Unable to bind webserver: {0}")]
    Bind(#[from] warp::Error),
}

/// Every failure a request can end in. The display string is what the
/// client receives in the `Error` field.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Invalid request: {0}")]
    InvalidClientRequest(String),
    #[error("{0} not found: {1}")]
    NotFound(&'static str, i64),
    #[error("Internal server error: {0}")]
    InternalServerError(String),
    #[error("Not yet implemented")]
    EndpointNotImplemented,
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::InvalidClientRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_, _) => StatusCode::NOT_FOUND,
            ApiError::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::EndpointNotImplemented => StatusCode::NOT_IMPLEMENTED,
        }
    }
}

impl warp::reject::Reject for ApiError {}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_status_codes() {
        let invalid = ApiError::InvalidClientRequest("'name' field missing".to_owned());
        assert_eq!(StatusCode::BAD_REQUEST, invalid.status_code());
        assert_eq!("Invalid request: 'name' field missing", invalid.to_string());

        let missing = ApiError::NotFound("Vessel", 3);
        assert_eq!(StatusCode::NOT_FOUND, missing.status_code());
        assert_eq!("Vessel not found: 3", missing.to_string());

        let internal = ApiError::InternalServerError("Unable to create vessel".to_owned());
        assert_eq!(StatusCode::INTERNAL_SERVER_ERROR, internal.status_code());
        assert_eq!(
            "Internal server error: Unable to create vessel",
            internal.to_string()
        );

        assert_eq!(
            StatusCode::NOT_IMPLEMENTED,
            ApiError::EndpointNotImplemented.status_code()
        );
    }
}
