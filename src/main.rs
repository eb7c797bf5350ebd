//! Kodegen Bundler jpackage - native installers for modular Java applications.
//!
//! This binary reads a packaging manifest and drives jpackage for each
//! target, with host validation and artifact checksums.

use kodegen_bundler_jpackage::{cli, metadata};
use std::process;

#[tokio::main]
async fn main() {
    let args = cli::Args::parse_args();

    // Initialize logging
    let verbose = args.verbose || metadata::manifest_requests_verbose(&args.manifest);
    let default_filter = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    // Run CLI and get exit code
    let exit_code = match cli::run(args).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    };

    process::exit(exit_code);
}
