//! Observability for the eventing registry
//!
//! Diagnostics go through `tracing`. Each event carries a stable `code`
//! field from [`Event`]. Logging is read-only: it never changes what the
//! registry does.
//!
//! # Usage
//!
//! ```ignore
//! use eventing::observability::init_logging;
//!
//! // RUST_LOG wins over the fallback filter
//! init_logging("eventing=info");
//! ```

mod events;

pub use events::Event;

use tracing_subscriber::EnvFilter;

/// Install a stderr fmt subscriber
///
/// `RUST_LOG` takes precedence over `fallback`. Returns false if a global
/// subscriber was already installed.
pub fn init_logging(fallback: &str) -> bool {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_logging_twice() {
        init_logging("eventing=debug");
        // the second call must not panic
        assert!(!init_logging("eventing=debug"));
    }
}
