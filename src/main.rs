use scripted_test_runner::{cli, infra};
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    infra::logging::init();

    match cli::run().await {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
