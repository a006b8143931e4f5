// src/models/submission.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, types::Json};
use validator::Validate;

use crate::models::question::{CodeLine, Question};

/// Represents the 'submissions' table in the database.
/// `completed_question` is not checked against `questions`.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Submission {
    pub id: i64,
    pub name: String,
    pub student_id: String,
    pub completed_question: i64,
    pub register_date: DateTime<Utc>,
}

/// A submission together with the question it completed.
#[derive(Debug, Serialize)]
pub struct SubmissionWithQuestion {
    #[serde(flatten)]
    pub submission: Submission,
    pub question: Question,
}

/// Flat row produced by joining `submissions` to `questions`.
#[derive(Debug, FromRow)]
pub struct SubmissionQuestionRow {
    pub id: i64,
    pub name: String,
    pub student_id: String,
    pub completed_question: i64,
    pub register_date: DateTime<Utc>,
    pub q_name: String,
    pub q_description: String,
    pub q_solution_code_lines: Json<Vec<CodeLine>>,
    pub q_distraction_code_lines: Json<Vec<CodeLine>>,
    pub q_chapter: i32,
    pub q_register_date: DateTime<Utc>,
}

impl From<SubmissionQuestionRow> for SubmissionWithQuestion {
    fn from(row: SubmissionQuestionRow) -> Self {
        SubmissionWithQuestion {
            question: Question {
                id: row.completed_question,
                name: row.q_name,
                description: row.q_description,
                solution_code_lines: row.q_solution_code_lines,
                distraction_code_lines: row.q_distraction_code_lines,
                chapter: row.q_chapter,
                register_date: row.q_register_date,
            },
            submission: Submission {
                id: row.id,
                name: row.name,
                student_id: row.student_id,
                completed_question: row.completed_question,
                register_date: row.register_date,
            },
        }
    }
}

/// DTO for a student submitting a completed question.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SubmitAnswerRequest {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    #[validate(length(min = 1, message = "Student id is required"))]
    pub student_id: String,
    pub question_id: i64,
}

/// Query string for the chapter-scoped submission endpoints.
/// Kept as raw text so a bad value can be reported verbatim.
#[derive(Debug, Deserialize)]
pub struct ChapterQuery {
    pub chapter: Option<String>,
}
