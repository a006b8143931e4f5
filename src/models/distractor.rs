// src/models/distractor.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Represents the 'distractor_lines' table: a shared pool of decoy code,
/// unique by `line_code` and not tied to any question.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct DistractorLine {
    pub id: i64,
    pub line_code: String,
    pub register_date: DateTime<Utc>,
}
