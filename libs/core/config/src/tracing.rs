use crate::Environment;
use tracing_subscriber::{prelude::*, EnvFilter};

/// Initialize the global tracing subscriber for `environment`
///
/// - **Production**: flattened JSON events without targets, default level `info`
///   with `sea_orm` and `sqlx` held at `warn`.
/// - **Development**: pretty output with targets, default level `debug`.
///
/// `RUST_LOG` overrides the default filter. A `tracing_error::ErrorLayer` is
/// always installed so errors can capture the active span trace.
///
/// Calling this again after a subscriber is installed is a no-op, which lets
/// every test set up logging independently.
pub fn init_tracing(environment: &Environment) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if environment.is_production() {
            EnvFilter::new("info,sea_orm=warn,sqlx=warn")
        } else {
            EnvFilter::new("debug")
        }
    });

    let result = if environment.is_production() {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_target(false)
                    .flatten_event(true),
            )
            .with(tracing_error::ErrorLayer::default())
            .with(filter)
            .try_init()
    } else {
        tracing_subscriber::registry()
            .with(tracing_subscriber::fmt::layer().with_target(true).pretty())
            .with(tracing_error::ErrorLayer::default())
            .with(filter)
            .try_init()
    };

    match result {
        Ok(()) => tracing::info!(?environment, "Tracing initialized"),
        Err(_) => tracing::debug!("Tracing already initialized"),
    }
}
