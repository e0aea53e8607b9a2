use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "info";

/// Installs the process-wide subscriber: timestamped, human readable lines on stderr.
/// `RUST_LOG` overrides the default `info` level.
pub fn init() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

#[macro_export]
macro_rules! info {
    ($($arg:tt)*) => {{
        ::tracing::info!("{}", format_args!($($arg)*));
    }};
}

#[macro_export]
macro_rules! warn {
    ($($arg:tt)*) => {{
        ::tracing::warn!("{}", format_args!($($arg)*));
    }};
}

#[macro_export]
macro_rules! error {
    ($($arg:tt)*) => {{
        ::tracing::error!("{}", format_args!($($arg)*));
    }};
}
