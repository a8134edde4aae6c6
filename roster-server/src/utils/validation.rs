//! Input validation helpers
//!
//! Text length limits and checks shared by the CRUD handlers. SQLite TEXT
//! has no length enforcement of its own.

use crate::utils::AppError;

// ── Text length limits ──────────────────────────────────────────────

/// Specialist, venue and user display names
pub const MAX_NAME_LEN: usize = 60;

/// Specialist initials shown in the roster grid
pub const MAX_SPECIALIST_CODE_LEN: usize = 3;

/// Venue short code
pub const MAX_VENUE_CODE_LEN: usize = 5;

/// User login
pub const MAX_LOGIN_LEN: usize = 60;

/// Passwords (before hashing)
pub const MAX_PASSWORD_LEN: usize = 128;

/// Icons are stored inline; keep them small
pub const MAX_ICON_BYTES: usize = 64 * 1024;

// ── Validation helpers ──────────────────────────────────────────────

/// Validate that a required string is non-empty and within the length limit.
pub fn validate_required_text(value: &str, field: &str, max_len: usize) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::validation(format!("{field} must not be empty")));
    }
    let len = value.trim().chars().count();
    if len > max_len {
        return Err(AppError::validation(format!(
            "{field} is too long ({len} chars, max {max_len})"
        )));
    }
    Ok(())
}

/// Validate that an optional string, if present, is within the length limit.
pub fn validate_optional_text(
    value: &Option<String>,
    field: &str,
    max_len: usize,
) -> Result<(), AppError> {
    if let Some(v) = value {
        let len = v.trim().chars().count();
        if len > max_len {
            return Err(AppError::validation(format!(
                "{field} is too long ({len} chars, max {max_len})"
            )));
        }
    }
    Ok(())
}

/// `#RRGGBB`
pub fn validate_color(color: &str) -> Result<(), AppError> {
    let valid = color.len() == 7
        && color.starts_with('#')
        && color[1..].chars().all(|c| c.is_ascii_hexdigit());
    if !valid {
        return Err(AppError::validation(format!(
            "color must be #RRGGBB, got '{color}'"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn required_text() {
        assert!(validate_required_text("Jane", "name", MAX_NAME_LEN).is_ok());
        assert!(validate_required_text("   ", "name", MAX_NAME_LEN).is_err());
        assert!(validate_required_text("ABCD", "code", MAX_SPECIALIST_CODE_LEN).is_err());
        // counted in chars, not bytes
        assert!(validate_required_text("ÉÉÉ", "code", MAX_SPECIALIST_CODE_LEN).is_ok());
    }

    #[test]
    fn optional_text() {
        assert!(validate_optional_text(&None, "code", MAX_VENUE_CODE_LEN).is_ok());
        assert!(validate_optional_text(&Some("ICU".into()), "code", MAX_VENUE_CODE_LEN).is_ok());
        assert!(validate_optional_text(&Some("TOOLONG".into()), "code", MAX_VENUE_CODE_LEN).is_err());
    }

    #[test]
    fn colors() {
        assert!(validate_color("#1a2B3c").is_ok());
        assert!(validate_color("1a2B3c").is_err());
        assert!(validate_color("#1a2B3").is_err());
        assert!(validate_color("#GGGGGG").is_err());
    }
}
