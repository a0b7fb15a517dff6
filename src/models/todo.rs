use diesel::{AsChangeset, Insertable, Queryable, Selectable};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::validation::{self, Fields, ValidationError};

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Priority {
    High,
    Medium,
    Low,
}

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Status {
    ToDo,
    InProgress,
    Done,
}

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Category {
    Work,
    Home,
    Learning,
}

impl FromStr for Priority {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "HIGH" => Ok(Priority::High),
            "MEDIUM" => Ok(Priority::Medium),
            "LOW" => Ok(Priority::Low),
            _ => Err(ValidationError::InvalidPriority),
        }
    }
}

impl FromStr for Status {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "TO DO" => Ok(Status::ToDo),
            "IN PROGRESS" => Ok(Status::InProgress),
            "DONE" => Ok(Status::Done),
            _ => Err(ValidationError::InvalidStatus),
        }
    }
}

impl FromStr for Category {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "WORK" => Ok(Category::Work),
            "HOME" => Ok(Category::Home),
            "LEARNING" => Ok(Category::Learning),
            _ => Err(ValidationError::InvalidCategory),
        }
    }
}

/// A row of the `todo` table. `due_date` goes over the wire as `dueDate`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Queryable, Selectable, Insertable)]
#[diesel(table_name = crate::repository::schema::todos)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[diesel(treat_none_as_default_value = false)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    pub id: i32,
    pub todo: Option<String>,
    pub priority: Option<String>,
    pub status: Option<String>,
    pub category: Option<String>,
    pub due_date: Option<String>,
}

/// Body of `POST /todos`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewTodo {
    pub id: i32,
    pub todo: Option<String>,
    pub priority: Option<String>,
    pub status: Option<String>,
    pub category: Option<String>,
    pub due_date: Option<String>,
}

impl NewTodo {
    fn fields(&self) -> Fields<'_> {
        Fields {
            priority: self.priority.as_deref(),
            status: self.status.as_deref(),
            category: self.category.as_deref(),
            due_date: self.due_date.as_deref(),
        }
    }
}

impl TryFrom<NewTodo> for Todo {
    type Error = ValidationError;

    fn try_from(value: NewTodo) -> Result<Self, Self::Error> {
        validation::validate(&value.fields())?;
        let due_date = normalize_present(value.due_date)?;
        Ok(Self {
            id: value.id,
            todo: value.todo,
            priority: value.priority,
            status: value.status,
            category: value.category,
            due_date,
        })
    }
}

/// Body of `PUT /todos/{id}`. Every key is optional.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TodoPatch {
    pub todo: Option<String>,
    pub priority: Option<String>,
    pub status: Option<String>,
    pub category: Option<String>,
    pub due_date: Option<String>,
}

/// The `SET` clause of an update. `None` columns are left untouched.
#[derive(AsChangeset, Debug, Clone, Default, PartialEq)]
#[diesel(table_name = crate::repository::schema::todos)]
pub struct TodoChangeset {
    pub todo: Option<String>,
    pub priority: Option<String>,
    pub status: Option<String>,
    pub category: Option<String>,
    pub due_date: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TodoUpdate {
    pub changeset: TodoChangeset,
    pub message: &'static str,
}

impl TodoPatch {
    fn fields(&self) -> Fields<'_> {
        Fields {
            priority: self.priority.as_deref(),
            status: self.status.as_deref(),
            category: self.category.as_deref(),
            due_date: self.due_date.as_deref(),
        }
    }

    /// Validates the patch and turns it into a changeset.
    ///
    /// The message names only the last field present, walking todo, priority, status,
    /// category, due date.
    pub fn into_update(self) -> Result<TodoUpdate, ValidationError> {
        validation::validate(&self.fields())?;
        let message = [
            (self.todo.is_some(), "Todo Updated"),
            (self.priority.is_some(), "Priority Updated"),
            (self.status.is_some(), "Status Updated"),
            (self.category.is_some(), "Category Updated"),
            (self.due_date.is_some(), "Due Date Updated"),
        ]
        .into_iter()
        .filter_map(|(present, message)| present.then_some(message))
        .last()
        .ok_or(ValidationError::NothingToUpdate)?;

        let changeset = TodoChangeset {
            todo: self.todo,
            priority: self.priority,
            status: self.status,
            category: self.category,
            due_date: normalize_present(self.due_date)?,
        };
        Ok(TodoUpdate { changeset, message })
    }
}

/// Query string of `GET /todos`.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct TodoQuery {
    pub search_q: Option<String>,
    pub priority: Option<String>,
    pub status: Option<String>,
    pub category: Option<String>,
}

impl TodoQuery {
    pub fn fields(&self) -> Fields<'_> {
        Fields {
            priority: self.priority.as_deref(),
            status: self.status.as_deref(),
            category: self.category.as_deref(),
            due_date: None,
        }
    }
}

/// Query string of `GET /agenda`.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct AgendaQuery {
    pub date: Option<String>,
}

fn normalize_present(due_date: Option<String>) -> Result<Option<String>, ValidationError> {
    match due_date {
        Some(value) if !value.is_empty() => validation::normalize_due_date(&value).map(Some),
        other => Ok(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_todo() -> NewTodo {
        NewTodo {
            id: 6,
            todo: Some("Buy a Car".to_string()),
            priority: Some("HIGH".to_string()),
            status: Some("TO DO".to_string()),
            category: Some("HOME".to_string()),
            due_date: Some("2021-9-22".to_string()),
        }
    }

    #[test]
    fn test_enum_values_parse_from_wire_names() {
        assert_eq!("MEDIUM".parse::<Priority>(), Ok(Priority::Medium));
        assert_eq!("IN PROGRESS".parse::<Status>(), Ok(Status::InProgress));
        assert_eq!("LEARNING".parse::<Category>(), Ok(Category::Learning));
        assert_eq!("In Progress".parse::<Status>(), Err(ValidationError::InvalidStatus));
    }

    #[test]
    fn test_new_todo_normalizes_due_date() {
        let todo = Todo::try_from(new_todo()).unwrap();
        assert_eq!(todo.id, 6);
        assert_eq!(todo.due_date.as_deref(), Some("2021-09-22"));
        assert_eq!(todo.status.as_deref(), Some("TO DO"));
    }

    #[test]
    fn test_new_todo_rejects_bad_category() {
        let payload = NewTodo {
            category: Some("GARDEN".to_string()),
            ..new_todo()
        };
        assert_eq!(Todo::try_from(payload), Err(ValidationError::InvalidCategory));
    }

    #[test]
    fn test_todo_serializes_due_date_as_camel_case() {
        let todo = Todo::try_from(new_todo()).unwrap();
        let json = serde_json::to_value(&todo).unwrap();
        assert_eq!(json["dueDate"], "2021-09-22");
        assert!(json.get("due_date").is_none());
    }

    #[test]
    fn test_patch_message_names_single_field() {
        let patch = TodoPatch {
            status: Some("DONE".to_string()),
            ..TodoPatch::default()
        };
        let update = patch.into_update().unwrap();
        assert_eq!(update.message, "Status Updated");
        assert_eq!(
            update.changeset,
            TodoChangeset {
                status: Some("DONE".to_string()),
                ..TodoChangeset::default()
            }
        );
    }

    #[test]
    fn test_patch_message_names_last_field_only() {
        let patch = TodoPatch {
            todo: Some("Clean the garden".to_string()),
            priority: Some("LOW".to_string()),
            due_date: Some("2021/1/12".to_string()),
            ..TodoPatch::default()
        };
        let update = patch.into_update().unwrap();
        assert_eq!(update.message, "Due Date Updated");
        assert_eq!(update.changeset.due_date.as_deref(), Some("2021-01-12"));
        assert_eq!(update.changeset.priority.as_deref(), Some("LOW"));
        assert_eq!(update.changeset.status, None);
    }

    #[test]
    fn test_empty_patch_is_rejected() {
        assert_eq!(
            TodoPatch::default().into_update(),
            Err(ValidationError::NothingToUpdate)
        );
    }

    #[test]
    fn test_patch_validates_before_building() {
        let patch = TodoPatch {
            todo: Some("Learn Rust".to_string()),
            due_date: Some("tomorrow".to_string()),
            ..TodoPatch::default()
        };
        assert_eq!(patch.into_update(), Err(ValidationError::InvalidDueDate));
    }
}
