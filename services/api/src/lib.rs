mod cli;
mod infra;
mod report;
mod routes;
mod server;

use vacant_home_diagnosis::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
