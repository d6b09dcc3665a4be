/*!
 * Logging Module
 * Tracing subscriber setup: daily rolling files plus console output,
 * JSON in production and human-readable in development.
 */
pub mod config;
pub mod middleware;

use std::io;
use tracing_appender::{non_blocking, non_blocking::WorkerGuard, rolling};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

const LOG_DIR: &str = "logs";

fn default_filter(log_level: &str) -> String {
    format!("studio_backend={},tower_http=debug,axum=debug,sqlx=warn", log_level)
}

/// Initialize the logging system.
///
/// The returned guards flush the background writers on drop and must be held
/// until the process exits.
pub fn init(environment: &str) -> Vec<WorkerGuard> {
    let is_production = environment == "production";

    if let Err(e) = std::fs::create_dir_all(LOG_DIR) {
        eprintln!("Failed to create log directory '{}': {}", LOG_DIR, e);
    }

    let (file_writer, file_guard) = non_blocking(rolling::daily(LOG_DIR, "app.log"));
    let (error_writer, error_guard) = non_blocking(rolling::daily(LOG_DIR, "error.log"));
    let (console_writer, console_guard) = non_blocking(io::stdout());

    let log_level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| {
        if is_production {
            "info".to_string()
        } else {
            "debug".to_string()
        }
    });

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(&log_level)));

    let subscriber = tracing_subscriber::registry().with(env_filter);

    let result = if is_production {
        let file_layer = fmt::layer()
            .json()
            .with_writer(file_writer)
            .with_target(true)
            .with_thread_ids(true)
            .with_thread_names(true)
            .with_file(true)
            .with_line_number(true);

        let error_layer = fmt::layer()
            .json()
            .with_writer(error_writer)
            .with_target(true)
            .with_file(true)
            .with_line_number(true)
            .with_filter(tracing_subscriber::filter::LevelFilter::ERROR);

        let console_layer = fmt::layer()
            .json()
            .with_writer(console_writer)
            .with_target(false);

        subscriber
            .with(file_layer)
            .with(error_layer)
            .with(console_layer)
            .try_init()
    } else {
        let file_layer = fmt::layer()
            .with_writer(file_writer)
            .with_target(true)
            .with_file(true)
            .with_line_number(true)
            .with_ansi(false);

        // Errors get their own file in development too.
        let error_layer = fmt::layer()
            .json()
            .with_writer(error_writer)
            .with_target(true)
            .with_file(true)
            .with_line_number(true)
            .with_filter(tracing_subscriber::filter::LevelFilter::ERROR);

        let console_layer = fmt::layer()
            .with_writer(console_writer)
            .with_target(true)
            .pretty();

        subscriber
            .with(file_layer)
            .with(error_layer)
            .with(console_layer)
            .try_init()
    };

    match result {
        Ok(()) => tracing::info!("Logging initialized for {} environment", environment),
        Err(e) => eprintln!("Logging already initialized: {}", e),
    }

    vec![file_guard, error_guard, console_guard]
}
