use actix_web::{get, web, App, HttpResponse, HttpServer, Responder, Result};
use serde::Serialize;

use crate::config::Config;
use crate::repository::database::Database;

mod api;
mod config;
mod models;
mod repository;
mod telemetry;
mod validation;

#[derive(Serialize)]
pub struct Response {
    pub message: String,
}

#[get("/health")]
async fn healthcheck() -> impl Responder {
    let response = Response {
        message: "Everything is working fine".to_string(),
    };
    HttpResponse::Ok().json(response)
}

async fn not_found() -> Result<HttpResponse> {
    let response = Response {
        message: "Resource not found".to_string(),
    };
    Ok(HttpResponse::NotFound().json(response))
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    telemetry::init().map_err(std::io::Error::other)?;
    let config = Config::from_env();

    let todo_db = Database::new(&config).map_err(|err| {
        tracing::error!(error = %err, database_url = %config.database_url, "Error initializing database");
        std::io::Error::other(err)
    })?;
    let app_data = web::Data::new(todo_db);

    let server = HttpServer::new(move || {
        App::new()
            .app_data(app_data.clone())
            .configure(api::api::config)
            .service(healthcheck)
            .default_service(web::route().to(not_found))
            .wrap(actix_web::middleware::Logger::default())
    })
    .bind((config.host.as_str(), config.port))?;

    tracing::info!("Server running and listening on {}", config.address());
    server.run().await
}
