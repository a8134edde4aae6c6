//! Unified error codes for the roster backend
//!
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 1xxx: Authentication errors
//! - 2xxx: Permission errors
//! - 3xxx: Specialist errors
//! - 4xxx: Venue errors
//! - 5xxx: Roster errors
//! - 6xxx: User errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values so the admin UI can
/// switch on them without parsing messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Resource already exists
    AlreadyExists = 4,

    // ==================== 1xxx: Auth ====================
    /// User is not authenticated
    NotAuthenticated = 1001,
    /// Invalid credentials (login/password)
    InvalidCredentials = 1002,
    /// Token has expired
    TokenExpired = 1003,
    /// Token is invalid
    TokenInvalid = 1004,
    /// Account is disabled
    AccountDisabled = 1007,

    // ==================== 2xxx: Permission ====================
    /// Permission denied
    PermissionDenied = 2001,
    /// Cannot modify admin user
    CannotModifyAdmin = 2004,
    /// Cannot delete admin user
    CannotDeleteAdmin = 2005,

    // ==================== 3xxx: Specialist ====================
    /// Specialist not found
    SpecialistNotFound = 3001,
    /// Specialist code already exists
    SpecialistCodeExists = 3002,
    /// Specialist still has roster entries
    SpecialistInUse = 3003,

    // ==================== 4xxx: Venue ====================
    /// Venue not found
    VenueNotFound = 4001,
    /// Venue code already exists
    VenueCodeExists = 4002,
    /// Venue has neither color nor icon
    VenueAppearanceMissing = 4003,
    /// Venue has both color and icon
    VenueAppearanceConflict = 4004,
    /// Venue is referenced by roster slots
    VenueInUse = 4005,

    // ==================== 5xxx: Roster ====================
    /// Day record not found
    DayRecordNotFound = 5001,
    /// Slot not found in its day record
    SlotNotFound = 5002,
    /// Same venue and time submitted twice for one day
    DuplicateSlot = 5003,
    /// Day record already exists for specialist and date
    DayRecordExists = 5004,
    /// Day falls outside the submitted week
    DayOutsideWeek = 5005,
    /// Submission contains no days
    EmptySubmission = 5006,

    // ==================== 6xxx: User ====================
    /// User not found
    UserNotFound = 6001,
    /// User login already exists
    UserLoginExists = 6002,
    /// Password is required
    PasswordRequired = 6003,

    // ==================== 9xxx: System ====================
    /// Internal server error
    InternalError = 9001,
    /// Database error
    DatabaseError = 9002,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Get the developer-facing English message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::NotFound => "Resource not found",
            ErrorCode::AlreadyExists => "Resource already exists",

            // Auth
            ErrorCode::NotAuthenticated => "User is not authenticated",
            ErrorCode::InvalidCredentials => "Invalid login or password",
            ErrorCode::TokenExpired => "Authentication token has expired",
            ErrorCode::TokenInvalid => "Authentication token is invalid",
            ErrorCode::AccountDisabled => "Account is disabled",

            // Permission
            ErrorCode::PermissionDenied => "Permission denied",
            ErrorCode::CannotModifyAdmin => "Cannot modify administrator login",
            ErrorCode::CannotDeleteAdmin => "Cannot delete administrator",

            // Specialist
            ErrorCode::SpecialistNotFound => "Specialist not found",
            ErrorCode::SpecialistCodeExists => "Specialist code already exists",
            ErrorCode::SpecialistInUse => "Specialist has roster entries",

            // Venue
            ErrorCode::VenueNotFound => "Venue not found",
            ErrorCode::VenueCodeExists => "Venue code already exists",
            ErrorCode::VenueAppearanceMissing => "Venue requires a color or an icon",
            ErrorCode::VenueAppearanceConflict => "Venue cannot have both a color and an icon",
            ErrorCode::VenueInUse => "Venue is referenced by roster slots",

            // Roster
            ErrorCode::DayRecordNotFound => "Day record not found",
            ErrorCode::SlotNotFound => "Slot not found",
            ErrorCode::DuplicateSlot => "Duplicate slot for venue and time",
            ErrorCode::DayRecordExists => "Day record already exists",
            ErrorCode::DayOutsideWeek => "Day is outside the submitted week",
            ErrorCode::EmptySubmission => "Submission contains no days",

            // User
            ErrorCode::UserNotFound => "User not found",
            ErrorCode::UserLoginExists => "User login already exists",
            ErrorCode::PasswordRequired => "Password is required",

            // System
            ErrorCode::InternalError => "Internal server error",
            ErrorCode::DatabaseError => "Database error",
        }
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error when converting from an invalid u16 to ErrorCode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            // General
            2 => Ok(ErrorCode::ValidationFailed),
            3 => Ok(ErrorCode::NotFound),
            4 => Ok(ErrorCode::AlreadyExists),

            // Auth
            1001 => Ok(ErrorCode::NotAuthenticated),
            1002 => Ok(ErrorCode::InvalidCredentials),
            1003 => Ok(ErrorCode::TokenExpired),
            1004 => Ok(ErrorCode::TokenInvalid),
            1007 => Ok(ErrorCode::AccountDisabled),

            // Permission
            2001 => Ok(ErrorCode::PermissionDenied),
            2004 => Ok(ErrorCode::CannotModifyAdmin),
            2005 => Ok(ErrorCode::CannotDeleteAdmin),

            // Specialist
            3001 => Ok(ErrorCode::SpecialistNotFound),
            3002 => Ok(ErrorCode::SpecialistCodeExists),
            3003 => Ok(ErrorCode::SpecialistInUse),

            // Venue
            4001 => Ok(ErrorCode::VenueNotFound),
            4002 => Ok(ErrorCode::VenueCodeExists),
            4003 => Ok(ErrorCode::VenueAppearanceMissing),
            4004 => Ok(ErrorCode::VenueAppearanceConflict),
            4005 => Ok(ErrorCode::VenueInUse),

            // Roster
            5001 => Ok(ErrorCode::DayRecordNotFound),
            5002 => Ok(ErrorCode::SlotNotFound),
            5003 => Ok(ErrorCode::DuplicateSlot),
            5004 => Ok(ErrorCode::DayRecordExists),
            5005 => Ok(ErrorCode::DayOutsideWeek),
            5006 => Ok(ErrorCode::EmptySubmission),

            // User
            6001 => Ok(ErrorCode::UserNotFound),
            6002 => Ok(ErrorCode::UserLoginExists),
            6003 => Ok(ErrorCode::PasswordRequired),

            // System
            9001 => Ok(ErrorCode::InternalError),
            9002 => Ok(ErrorCode::DatabaseError),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
