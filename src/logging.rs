//! Structured logging setup
//!
//! Stdout carries the MCP protocol, so every log line goes to stderr,
//! either human-readable or as JSON.

use anyhow::Result;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Default filter when `RUST_LOG` is unset
pub const DEFAULT_FILTER: &str = "jiminny_mcp=info";

/// Filter used with `--verbose` when `RUST_LOG` is unset
pub const VERBOSE_FILTER: &str = "jiminny_mcp=debug";

/// Initialize logging
///
/// `RUST_LOG` takes precedence over both defaults.
///
/// # Arguments
///
/// * `verbose` - Use the debug-level default filter
/// * `json` - Emit one JSON object per log line
///
/// # Errors
///
/// Returns error if the filter is invalid or a subscriber is already set
pub fn init_logging(verbose: bool, json: bool) -> Result<()> {
    let default = if verbose { VERBOSE_FILTER } else { DEFAULT_FILTER };
    let env_filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(default))?;

    let registry = tracing_subscriber::registry().with(env_filter);

    if json {
        let layer = fmt::layer()
            .json()
            .with_current_span(true)
            .with_writer(std::io::stderr);
        registry.with(layer).try_init()?;
    } else {
        let layer = fmt::layer()
            .with_target(true)
            .with_level(true)
            .with_ansi(false)
            .with_writer(std::io::stderr);
        registry.with(layer).try_init()?;
    }

    Ok(())
}
