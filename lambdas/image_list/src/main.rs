use std::io;

use image_metadata_core::driver::OracleConnector;
use image_metadata_core::{handle, TracingLogger};
use lambda_http::{run, service_fn, tracing, Body, Error, Request, Response};

async fn function_handler(_event: Request) -> Result<Response<Body>, Error> {
    // the core does blocking I/O; keep it off the runtime's worker threads
    let body = tokio::task::spawn_blocking(|| {
        let mut out = Vec::new();
        handle(
            io::empty(),
            &mut out,
            |name| std::env::var(name).ok(),
            &OracleConnector,
            &TracingLogger,
        )?;
        Ok::<_, image_metadata_core::Error>(out)
    })
    .await??;

    respond(body)
}

fn respond(body: Vec<u8>) -> Result<Response<Body>, Error> {
    Ok(Response::builder()
        .status(200)
        .header("content-type", "application/json")
        .body(body.into())?)
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    dotenvy::dotenv().ok();
    tracing::init_default_subscriber();

    run(service_fn(function_handler)).await
}
