use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Installs the stderr subscriber.
///
/// `TUBE_LOG` (or `RUST_LOG`) wins over the command line; otherwise
/// `log_level` is used, then `tube=debug` with `verbose`, then `tube=warn`.
pub fn init_tracing(
    verbose: bool,
    log_level: Option<&str>,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let level = match (verbose, log_level) {
        (_, Some(level)) if level.contains('=') => level.to_owned(),
        (_, Some(level)) => format!("tube={level}"),
        (true, None) => "tube=debug".to_owned(),
        (false, None) => "tube=warn".to_owned(),
    };

    let filter = EnvFilter::try_from_env("TUBE_LOG")
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .compact()
                .with_target(false)
                .with_writer(std::io::stderr)
                .with_ansi(false),
        )
        .try_init()?;

    Ok(())
}
