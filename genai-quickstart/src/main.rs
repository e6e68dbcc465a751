use std::io;
use std::process::ExitCode;

use genai_quickstart::{logging, report, Quickstart};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    logging::init();

    let mut out = io::stdout();
    let result = match Quickstart::from_env() {
        Ok(quickstart) => quickstart.run(&mut out).await.map(|_| ()),
        Err(err) => Err(err),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(error = %err, "quickstart failed");
            let _ = report::write_error(&mut out, &err);
            ExitCode::FAILURE
        }
    }
}
