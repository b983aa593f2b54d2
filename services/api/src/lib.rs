mod cli;
mod infra;
mod recommend;
mod routes;
mod server;

use uni_finder::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
