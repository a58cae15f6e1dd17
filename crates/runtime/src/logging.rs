//! Tracing subscriber setup.

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Installs a stderr subscriber filtered by `RUST_LOG` (INFO by default).
///
/// Returns `false` when a global subscriber is already installed, so calling
/// it from several tests is harmless.
pub fn setup_logging() -> bool {
    let env_filter =
        tracing_subscriber::EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into());

    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(stderr_layer)
        .try_init()
        .is_ok()
}
