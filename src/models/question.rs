// src/models/question.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{prelude::FromRow, types::Json};
use validator::Validate;

/// One line of a code-ordering puzzle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeLine {
    pub line_nr: i32,
    pub line_code: String,
}

/// Represents the 'questions' table in the database.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Question {
    pub id: i64,

    pub name: String,

    pub description: String,

    /// The correct ordering of the code lines.
    /// Stored as a JSON array in the database.
    pub solution_code_lines: Json<Vec<CodeLine>>,

    /// Decoy lines shown alongside the solution.
    pub distraction_code_lines: Json<Vec<CodeLine>>,

    /// Grouping key, 1 through the configured chapter count by convention.
    pub chapter: i32,

    pub register_date: DateTime<Utc>,
}

/// DTO for creating a new question.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateQuestionRequest {
    #[validate(length(min = 1, message = "Question name is required"))]
    pub name: String,
    #[validate(length(min = 1, message = "Question description is required"))]
    pub description: String,
    #[serde(default)]
    pub solution_code_lines: Vec<CodeLine>,
    #[serde(default)]
    #[validate(custom(function = validate_distraction_lines))]
    pub distraction_code_lines: Vec<CodeLine>,
    pub chapter: i32,
}

/// DTO for updating a question. Only supplied fields are replaced.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateQuestionRequest {
    #[validate(length(min = 1, message = "Question name cannot be empty"))]
    pub name: Option<String>,
    #[validate(length(min = 1, message = "Question description cannot be empty"))]
    pub description: Option<String>,
    pub solution_code_lines: Option<Vec<CodeLine>>,
    pub distraction_code_lines: Option<Vec<CodeLine>>,
    pub chapter: Option<i32>,
}

impl UpdateQuestionRequest {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.solution_code_lines.is_none()
            && self.distraction_code_lines.is_none()
            && self.chapter.is_none()
    }
}

/// Every distraction line becomes a row in the shared distractor pool,
/// which stores the text and nothing else.
fn validate_distraction_lines(lines: &[CodeLine]) -> Result<(), validator::ValidationError> {
    if lines.iter().any(|line| line.line_code.is_empty()) {
        return Err(validator::ValidationError::new("distraction_line_code_cannot_be_empty"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn create_request_defaults_missing_line_lists() {
        let req: CreateQuestionRequest = serde_json::from_value(json!({
            "name": "Loop",
            "description": "Print 1..3",
            "chapter": 3
        }))
        .unwrap();
        assert!(req.solution_code_lines.is_empty());
        assert!(req.distraction_code_lines.is_empty());
        assert!(req.validate().is_ok());
    }

    #[test]
    fn create_request_requires_chapter() {
        let res = serde_json::from_value::<CreateQuestionRequest>(json!({
            "name": "Loop",
            "description": "Print 1..3"
        }));
        assert!(res.is_err());
    }

    #[test]
    fn empty_name_fails_validation() {
        let req: CreateQuestionRequest = serde_json::from_value(json!({
            "name": "",
            "description": "d",
            "chapter": 1
        }))
        .unwrap();
        assert!(req.validate().is_err());
    }

    #[test]
    fn blank_distraction_line_fails_validation() {
        let req: CreateQuestionRequest = serde_json::from_value(json!({
            "name": "n",
            "description": "d",
            "distraction_code_lines": [{ "line_nr": 1, "line_code": "" }],
            "chapter": 1
        }))
        .unwrap();
        assert!(req.validate().is_err());
    }

    #[test]
    fn update_request_tracks_supplied_fields() {
        let empty: UpdateQuestionRequest = serde_json::from_value(json!({})).unwrap();
        assert!(empty.is_empty());

        let partial: UpdateQuestionRequest =
            serde_json::from_value(json!({ "chapter": 7 })).unwrap();
        assert!(!partial.is_empty());
        assert!(partial.validate().is_ok());
    }
}
