//! Diagnostics for path walks, written to stderr.
//!
//! The core logs soft failures (missing members, non-invocable steps,
//! abandoned writes) at `trace`/`debug`; nothing is printed unless
//! `RUST_LOG` asks for it.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Installs the global subscriber. Defaults to `warn` when `RUST_LOG` is unset.
///
/// ```bash
/// RUST_LOG=nestpath_core=trace nestpath get a.b.c --data doc.json
/// ```
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).compact())
        .init();
}
