//! Venue Model

use serde::{Deserialize, Serialize};

/// Venue entity (hospital or clinic a slot is worked at)
///
/// Exactly one of `color` and `icon` is set. The icon is raw image bytes in
/// storage and base64 on the wire.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Venue {
    pub id: i64,
    pub name: String,
    pub code: Option<String>,
    /// `#RRGGBB`
    pub color: Option<String>,
    #[serde(default, with = "crate::serde_helpers::base64_opt")]
    pub icon: Option<Vec<u8>>,
    pub is_active: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Create venue payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VenueCreate {
    pub name: String,
    pub code: Option<String>,
    pub color: Option<String>,
    #[serde(default, with = "crate::serde_helpers::base64_opt")]
    pub icon: Option<Vec<u8>>,
    pub is_active: Option<bool>,
}

/// Update venue payload
///
/// Supplying `color` or `icon` replaces the venue's appearance as a whole.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VenueUpdate {
    pub name: Option<String>,
    pub code: Option<String>,
    pub color: Option<String>,
    #[serde(default, with = "crate::serde_helpers::base64_opt")]
    pub icon: Option<Vec<u8>>,
    pub is_active: Option<bool>,
}
