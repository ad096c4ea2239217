//! Common test utilities and logging infrastructure
//!
//! Tests log through `tracing`; the library itself logs through the `log`
//! facade, which `tracing-subscriber` picks up as well.
//!
//! # Usage
//!
//! ```rust,ignore
//! mod common;
//! use common::init_test_logging;
//!
//! #[test]
//! fn my_test() {
//!     init_test_logging();
//!     // test code...
//! }
//! ```
//!
//! # Environment Variables
//!
//! - `RUST_LOG=debug` - Enable debug logging in tests
//! - `RUST_LOG=rich_layout::cache=trace` - Module-specific tracing
//! - `TEST_LOG_JSON=1` - Output JSON format for CI parsing

#![allow(dead_code)]

pub mod assertions;
pub mod fixtures;

use std::sync::Once;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

static INIT: Once = Once::new();

/// Initialize test logging infrastructure.
///
/// Output goes through the test writer, so it is captured by cargo test
/// unless `--nocapture` is used. Calling it more than once is safe.
pub fn init_test_logging() {
    INIT.call_once(|| {
        let use_json = std::env::var("TEST_LOG_JSON").is_ok();

        let env_filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("rich_layout=debug,test=info"));

        if use_json {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().json().with_test_writer())
                .try_init()
                .ok();
        } else {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(
                    fmt::layer()
                        .with_test_writer()
                        .with_ansi(true)
                        .with_file(true)
                        .with_line_number(true)
                        .with_thread_ids(true)
                        .with_target(true)
                        .compact(),
                )
                .try_init()
                .ok();
        }
    });
}

/// A span guard that marks one phase of a test.
///
/// ```rust,ignore
/// let _setup = test_phase("setup");
/// // setup code...
/// drop(_setup);
/// ```
pub fn test_phase(name: &str) -> tracing::span::EnteredSpan {
    let span = tracing::info_span!("test_phase", phase = name);
    tracing::info!(phase = name, "entering test phase");
    span.entered()
}

/// Log test context information.
pub fn log_test_context(test_name: &str, description: &str) {
    tracing::info!(
        test_name = test_name,
        description = description,
        "test context"
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_logging_is_idempotent() {
        init_test_logging();
        init_test_logging();
    }

    #[test]
    fn test_phase_logging() {
        init_test_logging();
        {
            let _setup = test_phase("setup");
            tracing::debug!("Setting up test resources");
        }
        {
            let _verify = test_phase("verify");
            tracing::debug!("Verifying results");
        }
    }
}
