// src/utils/chapter.rs

use std::collections::BTreeMap;

use crate::{error::AppError, models::question::Question};

/// Parses a chapter number taken from a path segment or query string.
pub fn parse_chapter(raw: &str) -> Result<i32, AppError> {
    raw.trim()
        .parse::<i32>()
        .map_err(|_| AppError::BadRequest(format!("Invalid chapter number: {}", raw)))
}

/// Like [`parse_chapter`], but a missing parameter is also a 400.
pub fn require_chapter(raw: Option<&str>) -> Result<i32, AppError> {
    match raw {
        Some(raw) if !raw.trim().is_empty() => parse_chapter(raw),
        _ => Err(AppError::BadRequest("Chapter parameter is required".to_string())),
    }
}

pub fn parse_question_id(raw: &str) -> Result<i64, AppError> {
    raw.trim()
        .parse::<i64>()
        .map_err(|_| AppError::BadRequest(format!("Invalid question id: {}", raw)))
}

/// Buckets questions by chapter, keeping store order inside each bucket.
///
/// Chapters `1..=chapter_count` are always present, empty if unused.
/// Questions outside that range keep their own key.
pub fn group_by_chapter(
    questions: Vec<Question>,
    chapter_count: i32,
) -> BTreeMap<i32, Vec<Question>> {
    let mut grouped: BTreeMap<i32, Vec<Question>> = BTreeMap::new();

    for question in questions {
        grouped.entry(question.chapter).or_default().push(question);
    }

    for chapter in 1..=chapter_count {
        grouped.entry(chapter).or_default();
    }

    grouped
}
