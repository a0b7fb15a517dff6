use chrono::NaiveDate;
use thiserror::Error;

use crate::models::todo::{Category, Priority, Status};

const DUE_DATE_FORMAT: &str = "%Y-%m-%d";
const ACCEPTED_DUE_DATE_FORMATS: [&str; 2] = ["%Y-%m-%d", "%Y/%m/%d"];

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Invalid Todo Priority")]
    InvalidPriority,
    #[error("Invalid Todo Status")]
    InvalidStatus,
    #[error("Invalid Todo Category")]
    InvalidCategory,
    #[error("Invalid Due Date")]
    InvalidDueDate,
    #[error("No Todo Fields To Update")]
    NothingToUpdate,
}

/// The optional fields a request may carry that have a restricted value set.
#[derive(Debug, Default, Clone, Copy)]
pub struct Fields<'a> {
    pub priority: Option<&'a str>,
    pub status: Option<&'a str>,
    pub category: Option<&'a str>,
    pub due_date: Option<&'a str>,
}

/// Checks priority, status, category and due date in that order and reports the first failure.
///
/// Absent and empty values count as not provided.
pub fn validate(fields: &Fields<'_>) -> Result<(), ValidationError> {
    if let Some(priority) = provided(fields.priority) {
        priority.parse::<Priority>()?;
    }
    if let Some(status) = provided(fields.status) {
        status.parse::<Status>()?;
    }
    if let Some(category) = provided(fields.category) {
        category.parse::<Category>()?;
    }
    if let Some(due_date) = provided(fields.due_date) {
        parse_due_date(due_date)?;
    }
    Ok(())
}

pub fn provided(value: Option<&str>) -> Option<&str> {
    value.filter(|value| !value.is_empty())
}

pub fn parse_due_date(value: &str) -> Result<NaiveDate, ValidationError> {
    let value = value.trim();
    ACCEPTED_DUE_DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(value, format).ok())
        .ok_or(ValidationError::InvalidDueDate)
}

pub fn format_due_date(date: NaiveDate) -> String {
    date.format(DUE_DATE_FORMAT).to_string()
}

/// Parses a caller-supplied date and renders it as `yyyy-MM-dd`.
pub fn normalize_due_date(value: &str) -> Result<String, ValidationError> {
    parse_due_date(value).map(format_due_date)
}
