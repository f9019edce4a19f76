// SPDX-License-Identifier: AGPL-3.0-or-later
//! Logging setup

use tracing::level_filters::LevelFilter;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Environment variable holding an `EnvFilter` directive string
pub const LOG_ENV: &str = "NPK_LOG";

/// Log to stderr, filtered by `$NPK_LOG`; without it, warnings only, or
/// debug output with `--verbose`.
pub fn set_up_logging(verbose: bool) {
    let default = if verbose { LevelFilter::DEBUG } else { LevelFilter::WARN };

    let filter_layer = EnvFilter::builder()
        .with_default_directive(default.into())
        .with_env_var(LOG_ENV)
        .from_env_lossy();

    let fmt_layer = fmt::layer()
        .with_target(verbose)
        .with_ansi(console::Term::stderr().features().colors_supported())
        .with_writer(std::io::stderr)
        .compact();

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .init();
}
