use std::io;
use std::process::ExitCode;

use genai_quickstart::quickstart::check_models;
use genai_quickstart::{logging, report, Client};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    logging::init();

    let mut out = io::stdout();
    let client = match Client::from_env() {
        Ok(client) => client,
        Err(err) => {
            let _ = report::write_error(&mut out, &err);
            return ExitCode::FAILURE;
        }
    };

    match check_models(&client, &mut out).await {
        Ok(_) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(error = %err, "listing models failed");
            let _ = report::write_error(&mut out, &err);
            let _ = report::write_troubleshooting(&mut out);
            ExitCode::FAILURE
        }
    }
}
