use std::{process, sync::Arc};

use clap::Parser;
use tokio::signal;
use tracing::{Dispatch, Level, dispatcher, error, info};
use tracing_subscriber::fmt as tracing_fmt;

use vetrina::{
    application::{error::AppError, fetch::ContentFetcher, listing::ListingService},
    config,
    infra::{
        error::InfraError,
        http::{self, HttpState},
        telemetry,
        wordpress::WordPressClient,
    },
};

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        report_application_error(&error);
        process::exit(1);
    }
}

fn report_application_error(error: &AppError) {
    if dispatcher::has_been_set() {
        error!(error = %error, "application error");
        return;
    }

    let subscriber = tracing_fmt().with_max_level(Level::ERROR).finish();
    let dispatch = Dispatch::new(subscriber);
    dispatcher::with_default(&dispatch, || {
        error!(error = %error, "application error");
    });
}

async fn run() -> Result<(), AppError> {
    let cli_args = config::CliArgs::parse();
    let settings = config::load(&cli_args)
        .map_err(|err| AppError::unexpected(format!("failed to load configuration: {err}")))?;

    telemetry::init(&settings.logging).map_err(AppError::from)?;

    let fetcher: Arc<dyn ContentFetcher> =
        Arc::new(WordPressClient::new(&settings.wordpress).map_err(AppError::from)?);
    let listing = ListingService::new(fetcher.clone());

    let state = HttpState { listing, fetcher };
    let router = http::build_router(state);

    let listener = tokio::net::TcpListener::bind(settings.server.public_addr)
        .await
        .map_err(|err| AppError::from(InfraError::from(err)))?;

    info!(
        target = "vetrina::serve",
        addr = %settings.server.public_addr,
        "listening"
    );

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|err| AppError::unexpected(format!("server error: {err}")))?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = signal::ctrl_c().await {
        error!(error = %err, "failed to install shutdown signal handler");
        return;
    }
    info!(target = "vetrina::serve", "shutdown signal received");
}
