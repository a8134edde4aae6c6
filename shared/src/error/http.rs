//! HTTP status code mapping for error codes

use super::codes::ErrorCode;
use http::StatusCode;

impl ErrorCode {
    /// Get the appropriate HTTP status code for this error code
    pub fn http_status(&self) -> StatusCode {
        match self {
            // 404 Not Found
            Self::NotFound
            | Self::SpecialistNotFound
            | Self::VenueNotFound
            | Self::DayRecordNotFound
            | Self::SlotNotFound
            | Self::UserNotFound => StatusCode::NOT_FOUND,

            // 409 Conflict
            Self::AlreadyExists
            | Self::SpecialistCodeExists
            | Self::SpecialistInUse
            | Self::VenueCodeExists
            | Self::VenueInUse
            | Self::DayRecordExists
            | Self::UserLoginExists => StatusCode::CONFLICT,

            // 401 Unauthorized
            Self::NotAuthenticated
            | Self::InvalidCredentials
            | Self::TokenExpired
            | Self::TokenInvalid
            | Self::AccountDisabled => StatusCode::UNAUTHORIZED,

            // 403 Forbidden
            Self::PermissionDenied | Self::CannotModifyAdmin | Self::CannotDeleteAdmin => {
                StatusCode::FORBIDDEN
            }

            // 422 Unprocessable Entity (business rules on a well-formed request)
            Self::VenueAppearanceMissing
            | Self::VenueAppearanceConflict
            | Self::DuplicateSlot
            | Self::DayOutsideWeek
            | Self::EmptySubmission
            | Self::PasswordRequired => StatusCode::UNPROCESSABLE_ENTITY,

            // 500 Internal Server Error
            Self::InternalError | Self::DatabaseError => StatusCode::INTERNAL_SERVER_ERROR,

            // 400 Bad Request (default for validation errors)
            _ => StatusCode::BAD_REQUEST,
        }
    }
}
