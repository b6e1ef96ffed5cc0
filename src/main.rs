use std::process;

use log::error;

mod app;
mod config;
mod db;
mod errors;
mod handlers;
mod middleware;
mod models;
mod repositories;
mod routes;
mod services;
mod types;
mod utils;
mod validations;

use errors::AppError;

#[actix_web::main]
async fn main() {
    if let Err(err) = app::server().await {
        match err {
            AppError::Server(e) => {
                error!("Critical server error: {}", e);
                process::exit(1);
            }
            AppError::Config(e) => {
                // The logger is not up yet when configuration fails
                eprintln!("Critical configuration error: {}", e);
                process::exit(2);
            }
            AppError::Logger(e) => {
                eprintln!("Critical logger error: {}", e);
                process::exit(3);
            }
            AppError::Database(e) => {
                error!("Critical database error: {}", e);
                process::exit(4);
            }
            _ => {
                error!("Unexpected error: {}", err);
            }
        }
    }
}
