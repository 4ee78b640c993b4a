/// Application error codes following the pattern E{area}{sequence}
///
/// Ranges:
/// - E0xxx: Shared/infrastructure errors
/// - E1xxx: User, profile and follow errors
/// - E2xxx: Post, comment and rating errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    // Shared (E0xxx)
    InternalError,
    ValidationError,
    NotFound,
    Conflict,
    ServiceUnavailable,
    InvalidReference,

    // User (E1xxx)
    UserAlreadyExists,
    CannotFollowSelf,

    // Post (E2xxx)
    InvalidRating,
}

impl ErrorCode {
    pub fn code(&self) -> &'static str {
        match self {
            // Shared
            Self::InternalError => "E0001",
            Self::ValidationError => "E0002",
            Self::NotFound => "E0003",
            Self::Conflict => "E0004",
            Self::ServiceUnavailable => "E0005",
            Self::InvalidReference => "E0006",

            // User
            Self::UserAlreadyExists => "E1001",
            Self::CannotFollowSelf => "E1002",

            // Post
            Self::InvalidRating => "E2001",
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{message}")]
    Known { code: ErrorCode, message: String },

    #[error("database error: {0}")]
    Database(#[from] diesel::result::Error),
}

impl AppError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self::Known {
            code,
            message: message.into(),
        }
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Conflict, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }

    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ServiceUnavailable, message)
    }

    /// The error code reported to callers, collapsing the untyped variants.
    pub fn code(&self) -> ErrorCode {
        match self {
            AppError::Known { code, .. } => *code,
            AppError::Database(diesel::result::Error::NotFound) => ErrorCode::NotFound,
            AppError::Database(_) => ErrorCode::InternalError,
        }
    }
}

pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_error_displays_its_message() {
        let err = AppError::new(ErrorCode::CannotFollowSelf, "Cannot follow yourself");
        assert_eq!(err.to_string(), "Cannot follow yourself");
        assert_eq!(err.code(), ErrorCode::CannotFollowSelf);
        assert_eq!(err.code().code(), "E1002");
    }

    #[test]
    fn database_not_found_maps_to_not_found_code() {
        let err = AppError::from(diesel::result::Error::NotFound);
        assert_eq!(err.code(), ErrorCode::NotFound);
    }

    #[test]
    fn conflict_helper_carries_message() {
        let err = AppError::conflict("duplicate key");
        assert_eq!(err.code().code(), "E0004");
        assert_eq!(err.to_string(), "duplicate key");
    }
}
