use actix_web::http::header::ContentType;
use actix_web::{delete, error, get, post, put, web, HttpResponse};
use serde_json::json;

use crate::api::errors::ApiError;
use crate::models::todo::{AgendaQuery, NewTodo, Todo, TodoPatch, TodoQuery};
use crate::repository::database::Database;
use crate::validation::{self, ValidationError};

fn message(text: &'static str) -> HttpResponse {
    HttpResponse::Ok()
        .content_type(ContentType::plaintext())
        .body(text)
}

#[get("/todos")]
pub async fn get_todos(
    db: web::Data<Database>,
    query: web::Query<TodoQuery>,
) -> Result<HttpResponse, ApiError> {
    let query = query.into_inner();
    validation::validate(&query.fields())?;
    let todos = db.get_todos(&query)?;
    Ok(HttpResponse::Ok().json(todos))
}

/// A missing row still answers 200, with an empty object.
#[get("/todos/{id}")]
pub async fn get_todo_by_id(
    db: web::Data<Database>,
    id: web::Path<i32>,
) -> Result<HttpResponse, ApiError> {
    let todo = db.get_todo_by_id(id.into_inner())?;
    match todo {
        Some(todo) => Ok(HttpResponse::Ok().json(todo)),
        None => Ok(HttpResponse::Ok().json(json!({}))),
    }
}

#[get("/agenda")]
pub async fn get_agenda(
    db: web::Data<Database>,
    query: web::Query<AgendaQuery>,
) -> Result<HttpResponse, ApiError> {
    let date = query
        .into_inner()
        .date
        .ok_or(ValidationError::InvalidDueDate)?;
    let due_date = validation::normalize_due_date(&date)?;
    let todos = db.get_todos_due_on(&due_date)?;
    Ok(HttpResponse::Ok().json(todos))
}

#[post("/todos")]
pub async fn create_todo(
    db: web::Data<Database>,
    new_todo: web::Json<NewTodo>,
) -> Result<HttpResponse, ApiError> {
    let todo = Todo::try_from(new_todo.into_inner())?;
    db.create_todo(&todo)?;
    Ok(message("Todo Successfully Added"))
}

#[put("/todos/{id}")]
pub async fn update_todo_by_id(
    db: web::Data<Database>,
    id: web::Path<i32>,
    patch: web::Json<TodoPatch>,
) -> Result<HttpResponse, ApiError> {
    let update = patch.into_inner().into_update()?;
    db.update_todo_by_id(id.into_inner(), &update.changeset)?;
    Ok(message(update.message))
}

#[delete("/todos/{id}")]
pub async fn delete_todo_by_id(
    db: web::Data<Database>,
    id: web::Path<i32>,
) -> Result<HttpResponse, ApiError> {
    db.delete_todo_by_id(id.into_inner())?;
    Ok(message("Todo Deleted"))
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::PathConfig::default().error_handler(|err, _req| error::ErrorBadRequest(err)))
        .service(get_todos)
        .service(get_todo_by_id)
        .service(get_agenda)
        .service(create_todo)
        .service(update_todo_by_id)
        .service(delete_todo_by_id);
}
