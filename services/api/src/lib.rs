mod cli;
mod demo;
mod infra;
mod priority;
mod routes;
mod server;

use order_priority::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
