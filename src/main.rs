use std::process::ExitCode;

use clap::Parser;
use dotenv::dotenv;
use labscraper::{ScrapingContext, cli::Args, jobs::run_lab_timetable_job};

extern crate env_logger;
extern crate log;

use log::LevelFilter;

use log::error;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    dotenv().ok();
    env_logger::Builder::new()
        .filter_level(LevelFilter::Info)
        .parse_default_env()
        .init();

    let args = Args::parse();
    let query = args.query();

    let ctx = match ScrapingContext::new() {
        Ok(ctx) => ctx,
        Err(e) => {
            error!("Could not set up scraping: {e:#}");
            return ExitCode::FAILURE;
        }
    };

    match run_lab_timetable_job(&ctx, &query, &args.output).await {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            let code = e.exit_code();
            error!("{:#}", anyhow::Error::new(e));
            ExitCode::from(code)
        }
    }
}
