use diesel::prelude::*;
use diesel::r2d2::{self, ConnectionManager, PoolError, PooledConnection};
use diesel::sql_types::{Integer, Nullable, Text};
use diesel::sqlite::SqliteConnection;
use thiserror::Error;

use crate::config::Config;
use crate::models::todo::{Todo, TodoChangeset, TodoQuery};
use crate::repository::schema::todos;
use crate::validation::provided;

type DBPool = r2d2::Pool<ConnectionManager<SqliteConnection>>;
type DBConnection = PooledConnection<ConnectionManager<SqliteConnection>>;

diesel::define_sql_function! {
    /// 1-based position of `needle` in `haystack`, 0 when absent. Case-sensitive, no wildcards.
    fn instr(haystack: Nullable<Text>, needle: Text) -> Nullable<Integer>;
}

const CREATE_TODO_TABLE: &str = "CREATE TABLE IF NOT EXISTS todo (
    id INTEGER NOT NULL PRIMARY KEY,
    todo TEXT,
    priority TEXT,
    status TEXT,
    category TEXT,
    due_date TEXT
)";

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("database error: {0}")]
    Query(#[from] diesel::result::Error),
    #[error("database connection error: {0}")]
    Connection(#[from] PoolError),
}

/// Handle to the todo table. Cloning shares the single underlying connection.
#[derive(Clone)]
pub struct Database {
    pool: DBPool,
}

impl Database {
    /// Opens the database named by `config.database_url` and creates the `todo` table if missing.
    pub fn new(config: &Config) -> Result<Self, RepositoryError> {
        let manager = ConnectionManager::<SqliteConnection>::new(config.database_url.as_str());
        let pool: DBPool = r2d2::Pool::builder()
            .max_size(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .build(manager)?;
        let database = Database { pool };
        diesel::sql_query(CREATE_TODO_TABLE).execute(&mut database.connection()?)?;
        tracing::debug!(database_url = %config.database_url, "todo table ready");
        Ok(database)
    }

    fn connection(&self) -> Result<DBConnection, RepositoryError> {
        Ok(self.pool.get()?)
    }

    /// Case-sensitive literal substring match on every non-empty filter.
    pub fn get_todos(&self, filter: &TodoQuery) -> Result<Vec<Todo>, RepositoryError> {
        let mut query = todos::table.select(Todo::as_select()).into_boxed();
        if let Some(text) = provided(filter.search_q.as_deref()) {
            query = query.filter(instr(todos::todo, text).gt(0));
        }
        if let Some(priority) = provided(filter.priority.as_deref()) {
            query = query.filter(instr(todos::priority, priority).gt(0));
        }
        if let Some(status) = provided(filter.status.as_deref()) {
            query = query.filter(instr(todos::status, status).gt(0));
        }
        if let Some(category) = provided(filter.category.as_deref()) {
            query = query.filter(instr(todos::category, category).gt(0));
        }
        let todos = query.order(todos::id.asc()).load(&mut self.connection()?)?;
        Ok(todos)
    }

    pub fn get_todo_by_id(&self, todo_id: i32) -> Result<Option<Todo>, RepositoryError> {
        let todo = todos::table
            .find(todo_id)
            .select(Todo::as_select())
            .first(&mut self.connection()?)
            .optional()?;
        Ok(todo)
    }

    /// `due_date` is expected in its stored `yyyy-MM-dd` form.
    pub fn get_todos_due_on(&self, due_date: &str) -> Result<Vec<Todo>, RepositoryError> {
        let todos = todos::table
            .filter(todos::due_date.eq(due_date))
            .select(Todo::as_select())
            .order(todos::id.asc())
            .load(&mut self.connection()?)?;
        Ok(todos)
    }

    pub fn create_todo(&self, todo: &Todo) -> Result<(), RepositoryError> {
        diesel::insert_into(todos::table)
            .values(todo)
            .execute(&mut self.connection()?)?;
        Ok(())
    }

    pub fn update_todo_by_id(
        &self,
        todo_id: i32,
        changeset: &TodoChangeset,
    ) -> Result<usize, RepositoryError> {
        let count = diesel::update(todos::table.find(todo_id))
            .set(changeset)
            .execute(&mut self.connection()?)?;
        Ok(count)
    }

    pub fn delete_todo_by_id(&self, todo_id: i32) -> Result<usize, RepositoryError> {
        let count = diesel::delete(todos::table.find(todo_id)).execute(&mut self.connection()?)?;
        Ok(count)
    }
}
