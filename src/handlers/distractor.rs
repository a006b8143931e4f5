// src/handlers/distractor.rs

use axum::{Json, extract::State, response::IntoResponse};
use sqlx::PgPool;

use crate::{error::AppError, models::distractor::DistractorLine};

/// Returns the whole distractor pool.
pub async fn list_distractors(State(pool): State<PgPool>) -> Result<impl IntoResponse, AppError> {
    let lines = sqlx::query_as::<_, DistractorLine>(
        "SELECT id, line_code, register_date FROM distractor_lines ORDER BY id",
    )
    .fetch_all(&pool)
    .await
    .map_err(|e| {
        tracing::error!("Failed to fetch distractor lines: {:?}", e);
        AppError::from(e)
    })?;

    tracing::debug!("Loaded {} distractor lines", lines.len());

    Ok(Json(lines))
}
