//! Interactive terminal generator.

use std::io;
use std::path::Path;
use std::process::ExitCode;

use qr_expiry_lib::{bootstrap, cli};

#[tokio::main]
async fn main() -> ExitCode {
    bootstrap::init_tracing_stderr();
    let config = qr_expiry_lib::init_foundation();

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut out = io::stdout();

    match cli::run(&mut input, &mut out, &config, Path::new(".")).await {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            println!("\n❌ {e}");
            ExitCode::FAILURE
        }
    }
}
