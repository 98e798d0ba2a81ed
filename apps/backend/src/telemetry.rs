//! Tracing setup for the server binary. Tests go through the lighter
//! `test_bootstrap::logging` init instead.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Directives used when `RUST_LOG` is unset: our own spans at info, the
/// HTTP and DB layers only when something goes wrong.
const DEFAULT_DIRECTIVES: &str = "backend=info,actix_web=warn,sea_orm=warn,sqlx=warn,warn";

pub fn init_tracing() {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVES));

    // One JSON object per line; targets kept so log lines can be traced back
    // to the emitting layer.
    let fmt_layer = fmt::layer()
        .with_target(true)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_ansi(false)
        .json();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();
}
