//! `lookout` binary entry point.

use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    lookout_cli::init_tracing();

    if lookout_cli::run(std::env::args().skip(1).collect()).await {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
