use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Installs the global subscriber.
///
/// `RUST_LOG` wins when set; otherwise `default_filter` applies. Logs go to
/// stderr so stdout stays clean for identifiers.
pub fn init_telemetry(default_filter: &str) -> anyhow::Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(default_filter)?,
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_line_number(true)
                .compact(),
        )
        .try_init()?;

    Ok(())
}
