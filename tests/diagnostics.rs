//! Diagnostic Output Tests
//!
//! What an operator sees under a given log filter:
//! - Unknown events surface at WARN only under the `log` policy
//! - Missing and stale clients follow `log_missing_clients` (WARN or DEBUG)
//! - Render targets absent from the UI tree carry their own code

use std::io::{self, Write};
use std::sync::{Arc, Mutex};

use eventing::{EventingConfig, EventingRegistry, MemoryUiTree, UnknownEventPolicy, UpdateLog};
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::EnvFilter;

// =============================================================================
// Helper Functions
// =============================================================================

/// Shared in-memory log sink
#[derive(Clone, Default)]
struct Captured(Arc<Mutex<Vec<u8>>>);

impl Write for Captured {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for Captured {
    type Writer = Captured;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

/// Run `f` under a fmt subscriber with `filter`, returning what it logged
fn capture(filter: &str, f: impl FnOnce()) -> String {
    let sink = Captured::default();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(sink.clone())
        .with_ansi(false)
        .with_env_filter(EnvFilter::new(filter))
        .finish();

    tracing::subscriber::with_default(subscriber, f);

    let bytes = sink.0.lock().unwrap().clone();
    String::from_utf8(bytes).unwrap()
}

/// Log lines carrying `code`
fn lines_with<'a>(log: &'a str, code: &str) -> Vec<&'a str> {
    let field = format!("code={code}");
    log.lines().filter(|l| l.contains(&field)).collect()
}

fn registry(config: EventingConfig, clients: &[&str]) -> EventingRegistry<MemoryUiTree, UpdateLog> {
    EventingRegistry::with_config(config, clients.iter().copied().collect(), UpdateLog::new())
}

fn missing_clients(log_missing_clients: bool) -> EventingConfig {
    EventingConfig {
        log_missing_clients,
        ..EventingConfig::default()
    }
}

// =============================================================================
// Unknown Events
// =============================================================================

/// Under the CLI's default `eventing=warn`, the `log` policy is visible.
#[test]
fn test_unknown_event_logged_at_warn() {
    let config = EventingConfig {
        unknown_events: UnknownEventPolicy::Log,
        ..EventingConfig::default()
    };

    let log = capture("eventing=warn", || {
        let mut registry = registry(config, &["obs"]);
        registry.register("g", "known", "obs", "a", "b");
        registry.dispatch("g", "typing known");
    });

    let lines = lines_with(&log, "UNKNOWN_EVENT");
    assert_eq!(lines.len(), 1);
    assert!(lines[0].contains("WARN"));
    assert!(lines[0].contains("typing"));
}

/// The default `ignore` policy logs nothing, whatever the filter.
#[test]
fn test_unknown_event_silent_when_ignored() {
    let log = capture("eventing=trace", || {
        let mut registry = registry(EventingConfig::default(), &["obs"]);
        registry.register("g", "known", "obs", "a", "b");
        registry.dispatch("g", "typing known");
    });

    assert!(lines_with(&log, "UNKNOWN_EVENT").is_empty());
}

// =============================================================================
// Missing And Stale Clients
// =============================================================================

fn register_missing_then_stale(config: EventingConfig) {
    let mut registry = registry(config, &["obs"]);
    registry.register("g", "e", "ghost", "a", "b");
    registry.register("g", "e", "obs", "a", "b");
    registry.lookup_mut().unmount("obs");
    registry.dispatch("g", "e");
}

#[test]
fn test_missing_clients_logged_at_warn() {
    let log = capture("eventing=warn", || register_missing_then_stale(missing_clients(true)));

    let missing = lines_with(&log, "CLIENT_MISSING");
    let stale = lines_with(&log, "STALE_CLIENT");
    assert_eq!(missing.len(), 1);
    assert_eq!(stale.len(), 1);
    assert!(missing[0].contains("WARN"));
    assert!(missing[0].contains("ghost"));
    assert!(stale[0].contains("WARN"));
}

/// With `log_missing_clients` off, both codes drop to DEBUG.
#[test]
fn test_missing_clients_demoted_to_debug() {
    let quiet = capture("eventing=warn", || register_missing_then_stale(missing_clients(false)));
    assert!(lines_with(&quiet, "CLIENT_MISSING").is_empty());
    assert!(lines_with(&quiet, "STALE_CLIENT").is_empty());

    let verbose = capture("eventing=debug", || register_missing_then_stale(missing_clients(false)));
    let missing = lines_with(&verbose, "CLIENT_MISSING");
    let stale = lines_with(&verbose, "STALE_CLIENT");
    assert_eq!(missing.len(), 1);
    assert_eq!(stale.len(), 1);
    assert!(missing[0].contains("DEBUG"));
    assert!(stale[0].contains("DEBUG"));
}

// =============================================================================
// Render Targets
// =============================================================================

/// The update is still sent; the absent target is reported separately.
#[test]
fn test_render_target_missing_has_own_code() {
    let mut sent = 0;
    let log = capture("eventing=debug", || {
        let mut registry = registry(EventingConfig::default(), &["obs"]);
        registry.register("g", "e", "obs", "@this", "obs gone");
        sent = registry.dispatch("g", "e").updates;
    });

    assert_eq!(sent, 1);

    let missing = lines_with(&log, "RENDER_TARGET_MISSING");
    assert_eq!(missing.len(), 1);
    assert!(missing[0].contains("DEBUG"));
    assert!(missing[0].contains("gone"));

    let requested = lines_with(&log, "UPDATE_REQUESTED");
    assert_eq!(requested.len(), 1);
    assert!(!requested[0].contains("not in the UI tree"));
}
