//! Specialist Model

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Specialist entity (on-call physician listed in the roster)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Specialist {
    pub id: i64,
    pub name: String,
    /// Short code shown in the roster grid (max 3 chars, unique)
    pub code: String,
    pub is_active: bool,
    /// Date the specialist joined the group; orders the daily grid
    pub associated_on: NaiveDate,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Create specialist payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpecialistCreate {
    pub name: String,
    pub code: String,
    pub is_active: Option<bool>,
    pub associated_on: Option<NaiveDate>,
}

/// Update specialist payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SpecialistUpdate {
    pub name: Option<String>,
    pub code: Option<String>,
    pub is_active: Option<bool>,
    pub associated_on: Option<NaiveDate>,
}
