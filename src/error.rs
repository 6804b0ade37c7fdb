use axum::http::StatusCode;
use thiserror::Error;

/// Rejections raised before any seat is handed out.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("no students found for selected subjects")]
    NoStudents,
    #[error("no rooms available")]
    NoRooms,
    #[error("room {0} is listed more than once")]
    DuplicateRoom(String),
    #[error("no invigilators available")]
    NoInvigilators,
    #[error("missing allocation input: {0}")]
    MissingField(&'static str),
}

/// Failures surfaced by the HTTP layer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    #[error(transparent)]
    Input(#[from] InputError),
    #[error("no allocation preview available")]
    NoPreview,
    #[error("no allocation data found")]
    NoConfirmedAllocation,
    #[error("no allocation found for {0}")]
    NotAllocated(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Input(_) => StatusCode::BAD_REQUEST,
            ApiError::NoPreview | ApiError::NoConfirmedAllocation | ApiError::NotAllocated(_) => {
                StatusCode::NOT_FOUND
            }
        }
    }
}

impl From<ApiError> for (StatusCode, String) {
    fn from(e: ApiError) -> Self {
        (e.status(), e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_errors_are_bad_requests() {
        let (status, message): (StatusCode, String) = ApiError::from(InputError::NoRooms).into();
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(message, "no rooms available");

        let err = ApiError::from(InputError::DuplicateRoom("H1".to_string()));
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.to_string(), "room H1 is listed more than once");
    }

    #[test]
    fn test_missing_records_are_not_found() {
        let err = ApiError::NotAllocated("12345".to_string());
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
        assert_eq!(err.to_string(), "no allocation found for 12345");
    }
}
