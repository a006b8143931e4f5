// src/handlers/submission.rs

use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use sqlx::PgPool;
use validator::Validate;

use crate::{
    error::AppError,
    extractors::AppJson,
    models::submission::{
        ChapterQuery, Submission, SubmissionQuestionRow, SubmissionWithQuestion,
        SubmitAnswerRequest,
    },
    utils::chapter::require_chapter,
};

/// Records a student completing a question.
/// The question id is stored as given; it is not checked against `questions`.
pub async fn submit_answer(
    State(pool): State<PgPool>,
    AppJson(payload): AppJson<SubmitAnswerRequest>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let submission = sqlx::query_as::<_, Submission>(
        r#"
        INSERT INTO submissions (name, student_id, completed_question)
        VALUES ($1, $2, $3)
        RETURNING id, name, student_id, completed_question, register_date
        "#,
    )
    .bind(&payload.name)
    .bind(&payload.student_id)
    .bind(payload.question_id)
    .fetch_one(&pool)
    .await
    .map_err(|e| {
        tracing::error!("Failed to store submission: {:?}", e);
        AppError::from(e)
    })?;

    Ok((StatusCode::CREATED, Json(submission)))
}

/// Lists submissions whose question belongs to the requested chapter,
/// each with the joined question attached.
pub async fn submissions_by_chapter(
    State(pool): State<PgPool>,
    Query(params): Query<ChapterQuery>,
) -> Result<impl IntoResponse, AppError> {
    let chapter = require_chapter(params.chapter.as_deref())?;

    let rows = sqlx::query_as::<_, SubmissionQuestionRow>(
        r#"
        SELECT
            s.id,
            s.name,
            s.student_id,
            s.completed_question,
            s.register_date,
            q.name AS q_name,
            q.description AS q_description,
            q.solution_code_lines AS q_solution_code_lines,
            q.distraction_code_lines AS q_distraction_code_lines,
            q.chapter AS q_chapter,
            q.register_date AS q_register_date
        FROM submissions s
        JOIN questions q ON s.completed_question = q.id
        WHERE q.chapter = $1
        ORDER BY s.id
        "#,
    )
    .bind(chapter)
    .fetch_all(&pool)
    .await
    .map_err(|e| {
        tracing::error!("Failed to list submissions for chapter {}: {:?}", chapter, e);
        AppError::from(e)
    })?;

    let submissions: Vec<SubmissionWithQuestion> = rows.into_iter().map(Into::into).collect();

    Ok(Json(submissions))
}

/// Deletes exactly the submissions whose question belongs to the requested chapter.
pub async fn delete_submissions_by_chapter(
    State(pool): State<PgPool>,
    Query(params): Query<ChapterQuery>,
) -> Result<impl IntoResponse, AppError> {
    let chapter = require_chapter(params.chapter.as_deref())?;

    let result = sqlx::query(
        r#"
        DELETE FROM submissions s
        USING questions q
        WHERE s.completed_question = q.id
          AND q.chapter = $1
        "#,
    )
    .bind(chapter)
    .execute(&pool)
    .await
    .map_err(|e| {
        tracing::error!("Failed to delete submissions for chapter {}: {:?}", chapter, e);
        AppError::from(e)
    })?;

    let deleted = result.rows_affected();
    tracing::info!("Deleted {} submissions for chapter {}", deleted, chapter);

    Ok(Json(serde_json::json!({
        "message": format!("{} submissions deleted successfully.", deleted),
        "deleted_count": deleted,
    })))
}
