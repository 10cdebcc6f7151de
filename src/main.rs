//! trendcards - CoinGecko trending tokens as cards and share images

use colored::Colorize;
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    // Load .env file if it exists
    dotenvy::dotenv().ok();

    let app = trendcards::adapters::cli::init();

    match trendcards::adapters::cli::execute(app).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {:#}", "Error!".red().bold(), e);
            ExitCode::FAILURE
        }
    }
}
