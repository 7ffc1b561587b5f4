use std::io;
use std::process::ExitCode;

use dotenvy::dotenv;
use image_metadata_core::driver::{OracleConnector, SqliteConnector};
use image_metadata_core::{handle, Logger, TracingLogger};
use tracing_subscriber::{fmt, EnvFilter};

type GenericError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Selects the database driver for local runs.
const ENV_DB_DRIVER: &str = "IMAGE_DB_DRIVER";

#[derive(Debug, thiserror::Error)]
enum HarnessError {
    #[error("unknown IMAGE_DB_DRIVER value {0:?}, expected \"oracle\" or \"sqlite\"")]
    UnknownDriver(String),
    #[error(transparent)]
    Invocation(#[from] image_metadata_core::Error),
}

fn main() -> ExitCode {
    dotenv().ok();

    if let Err(e) = init_tracing() {
        eprintln!("failed to initialize tracing: {e}");
        return ExitCode::FAILURE;
    }

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(HarnessError::Invocation(_)) => ExitCode::FAILURE,
        Err(e) => {
            TracingLogger.error(&e.to_string());
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), HarnessError> {
    let logger = TracingLogger;
    let env = |name: &str| std::env::var(name).ok();
    let stdin = io::stdin().lock();
    let stdout = io::stdout().lock();

    match std::env::var(ENV_DB_DRIVER).as_deref() {
        Err(_) | Ok("oracle") => handle(stdin, stdout, env, &OracleConnector, &logger)?,
        Ok("sqlite") => handle(stdin, stdout, env, &SqliteConnector, &logger)?,
        Ok(other) => return Err(HarnessError::UnknownDriver(other.to_string())),
    }

    Ok(())
}

/// Logs go to stderr so stdout carries only the JSON document.
fn init_tracing() -> Result<(), GenericError> {
    let env_filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new("info"))?;

    fmt()
        .with_env_filter(env_filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init()
}
