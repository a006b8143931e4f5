// src/handlers/question.rs

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use sqlx::{PgPool, Postgres, QueryBuilder, types::Json as SqlJson};
use validator::Validate;

use crate::{
    config::Config,
    error::AppError,
    extractors::AppJson,
    models::question::{CreateQuestionRequest, Question, UpdateQuestionRequest},
    utils::chapter::{group_by_chapter, parse_chapter, parse_question_id},
};

const QUESTION_COLUMNS: &str =
    "id, name, description, solution_code_lines, distraction_code_lines, chapter, register_date";

/// Creates a question and adds each of its distraction lines to the distractor pool.
///
/// Both writes share one transaction: if any distraction line is already in the
/// pool the whole request fails with 400 and nothing is stored.
pub async fn create_question(
    State(pool): State<PgPool>,
    AppJson(payload): AppJson<CreateQuestionRequest>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let mut tx = pool.begin().await.map_err(|e| {
        tracing::error!("Failed to begin transaction: {:?}", e);
        AppError::from(e)
    })?;

    let question = sqlx::query_as::<_, Question>(&format!(
        r#"
        INSERT INTO questions
        (name, description, solution_code_lines, distraction_code_lines, chapter)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING {}
        "#,
        QUESTION_COLUMNS
    ))
    .bind(&payload.name)
    .bind(&payload.description)
    .bind(SqlJson(&payload.solution_code_lines))
    .bind(SqlJson(&payload.distraction_code_lines))
    .bind(payload.chapter)
    .fetch_one(&mut *tx)
    .await
    .map_err(|e| {
        tracing::error!("Failed to create question: {:?}", e);
        AppError::from(e)
    })?;

    for line in &payload.distraction_code_lines {
        sqlx::query("INSERT INTO distractor_lines (line_code) VALUES ($1)")
            .bind(&line.line_code)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                tracing::warn!("Rejected distractor line {:?}: {}", line.line_code, e);
                AppError::from(e)
            })?;
    }

    tx.commit().await.map_err(|e| {
        tracing::error!("Failed to commit question: {:?}", e);
        AppError::from(e)
    })?;

    tracing::info!(
        "Created question {} in chapter {} with {} distractor lines",
        question.id,
        question.chapter,
        payload.distraction_code_lines.len()
    );

    Ok((StatusCode::CREATED, Json(question)))
}

/// Lists every question bucketed by chapter.
/// Chapters 1 through the configured count are always present.
pub async fn questions_by_chapter(
    State(pool): State<PgPool>,
    State(config): State<Config>,
) -> Result<impl IntoResponse, AppError> {
    let questions = sqlx::query_as::<_, Question>(&format!(
        "SELECT {} FROM questions ORDER BY id",
        QUESTION_COLUMNS
    ))
    .fetch_all(&pool)
    .await
    .map_err(|e| {
        tracing::error!("Failed to list questions: {:?}", e);
        AppError::from(e)
    })?;

    Ok(Json(group_by_chapter(questions, config.chapter_count)))
}

pub async fn questions_in_chapter(
    State(pool): State<PgPool>,
    Path(chapter_number): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let chapter = parse_chapter(&chapter_number)?;

    let questions = sqlx::query_as::<_, Question>(&format!(
        "SELECT {} FROM questions WHERE chapter = $1 ORDER BY id",
        QUESTION_COLUMNS
    ))
    .bind(chapter)
    .fetch_all(&pool)
    .await
    .map_err(|e| {
        tracing::error!("Failed to list questions for chapter {}: {:?}", chapter, e);
        AppError::from(e)
    })?;

    Ok(Json(questions))
}

/// Retrieves a question only if it belongs to the given chapter.
pub async fn get_question(
    State(pool): State<PgPool>,
    Path((chapter_id, problem_id)): Path<(String, String)>,
) -> Result<impl IntoResponse, AppError> {
    let chapter = parse_chapter(&chapter_id)?;
    let id = parse_question_id(&problem_id)?;

    let question = sqlx::query_as::<_, Question>(&format!(
        "SELECT {} FROM questions WHERE id = $1 AND chapter = $2",
        QUESTION_COLUMNS
    ))
    .bind(id)
    .bind(chapter)
    .fetch_optional(&pool)
    .await
    .map_err(|e| {
        tracing::error!("Failed to fetch question {}: {:?}", id, e);
        AppError::from(e)
    })?
    .ok_or(AppError::NotFound("Question not found".to_string()))?;

    Ok(Json(question))
}

/// Replaces the supplied fields of a question and returns the updated row.
pub async fn update_question(
    State(pool): State<PgPool>,
    Path(problem_id): Path<String>,
    AppJson(payload): AppJson<UpdateQuestionRequest>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_question_id(&problem_id)?;
    payload.validate()?;

    // An empty body just reads the current row back.
    let is_update = !payload.is_empty();
    let mut builder: QueryBuilder<Postgres> = if !is_update {
        QueryBuilder::new(format!("SELECT {} FROM questions", QUESTION_COLUMNS))
    } else {
        let mut builder: QueryBuilder<Postgres> = QueryBuilder::new("UPDATE questions SET ");
        let mut separated = builder.separated(", ");

        if let Some(name) = payload.name {
            separated.push("name = ");
            separated.push_bind_unseparated(name);
        }

        if let Some(description) = payload.description {
            separated.push("description = ");
            separated.push_bind_unseparated(description);
        }

        if let Some(lines) = payload.solution_code_lines {
            separated.push("solution_code_lines = ");
            separated.push_bind_unseparated(SqlJson(lines));
        }

        if let Some(lines) = payload.distraction_code_lines {
            separated.push("distraction_code_lines = ");
            separated.push_bind_unseparated(SqlJson(lines));
        }

        if let Some(chapter) = payload.chapter {
            separated.push("chapter = ");
            separated.push_bind_unseparated(chapter);
        }

        builder
    };

    builder.push(" WHERE id = ");
    builder.push_bind(id);
    if is_update {
        builder.push(format!(" RETURNING {}", QUESTION_COLUMNS));
    }

    let question = builder
        .build_query_as::<Question>()
        .fetch_optional(&pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to update question {}: {:?}", id, e);
            AppError::from(e)
        })?
        .ok_or(AppError::NotFound("Question not found".to_string()))?;

    Ok(Json(question))
}

/// Deletes a question by ID.
/// Succeeds whether or not the question existed; submissions and
/// distractor lines are left untouched.
pub async fn delete_question(
    State(pool): State<PgPool>,
    Path(problem_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_question_id(&problem_id)?;

    let result = sqlx::query("DELETE FROM questions WHERE id = $1")
        .bind(id)
        .execute(&pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to delete question {}: {:?}", id, e);
            AppError::from(e)
        })?;

    tracing::info!("Deleted question {} ({} rows)", id, result.rows_affected());

    Ok(Json(serde_json::json!({ "message": "Question deleted successfully" })))
}
