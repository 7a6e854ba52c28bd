//! End-to-end batching behavior against real files.

use std::fs;
use std::thread;
use std::time::Duration;

use trail_core::{Category, EventLogConfig, TrailConfig};
use trail_eventlog::{AuthSuccessEntry, BatchLogger, EventTrail, FileSink, MemorySink};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("trail_eventlog=debug")
        .try_init();
}

/// The scenario from the component's contract: with a 10 minute window
/// and a fresh watermark, the first record flushes one line
/// immediately, the next two buffer, and a forced flush appends the
/// remaining two. Three lines total, across two writes.
#[test]
fn test_three_records_two_writes() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("auth_success.log");
    let logger = BatchLogger::new(
        Category::AuthSuccess,
        600_000,
        Box::new(FileSink::new(&path)),
    );

    logger.record(AuthSuccessEntry::new("user:t1"));
    let after_first = fs::read_to_string(&path).unwrap();
    assert_eq!(after_first.lines().count(), 1);

    logger.record(AuthSuccessEntry::new("user:t2"));
    logger.record(AuthSuccessEntry::new("user:t3"));
    // Still within the window: nothing new on disk.
    assert_eq!(fs::read_to_string(&path).unwrap(), after_first);
    assert_eq!(logger.pending(), 2);

    let written = logger.flush_now().unwrap();
    assert_eq!(written, 2);

    let content = fs::read_to_string(&path).unwrap();
    assert_eq!(content.lines().count(), 3);
    assert!(content.starts_with(&after_first));
    for (line, user) in content.lines().zip(["user:t1", "user:t2", "user:t3"]) {
        assert!(line.contains(user));
    }
}

/// Opportunistic flushes respect the window against the real clock;
/// once the window elapses, the next record flushes again.
#[test]
fn test_window_reopens_after_interval_elapses() {
    let sink = MemorySink::new();
    let chunks = sink.chunks();
    let logger = BatchLogger::new(Category::AuthSuccess, 200, Box::new(sink));

    logger.record(AuthSuccessEntry::new("user:first"));
    logger.record(AuthSuccessEntry::new("user:buffered"));
    assert_eq!(chunks.lock().unwrap().len(), 1);

    thread::sleep(Duration::from_millis(250));

    logger.record(AuthSuccessEntry::new("user:second-window"));
    let chunks = chunks.lock().unwrap();
    assert_eq!(chunks.len(), 2);
    // The reopened window carries the buffered entry along.
    assert_eq!(chunks[1].lines().count(), 2);
}

/// Watermarks move even when there is nothing to write, so an idle
/// category is not flushed over and over at the boundary.
#[test]
fn test_empty_forced_flush_advances_watermark_without_writing() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("auth_failure.log");
    let logger: BatchLogger<AuthSuccessEntry> = BatchLogger::new(
        Category::AuthFailure,
        600_000,
        Box::new(FileSink::new(&path)),
    );

    assert_eq!(logger.flush_now().unwrap(), 0);
    assert!(logger.watermark_ms() > 0);
    // No write happened, so the file was never created.
    assert!(!path.exists());
}

/// A trail wired from YAML config records and flushes per category.
#[test]
fn test_trail_from_yaml_config() {
    let dir = tempfile::tempdir().unwrap();
    let yaml = format!(
        "event_log:\n  directory: {}\n  flush_interval_secs: 3600\n",
        dir.path().join("logs").display()
    );
    let config: TrailConfig = TrailConfig::from_yaml(&yaml).unwrap();
    let trail = EventTrail::new(&config.event_log).unwrap();

    for i in 0..5 {
        trail.record_auth_failure(&format!("user:{i}"), "expired token");
    }
    trail.flush_all().unwrap();

    let failure_log = config.event_log.sink_path(Category::AuthFailure);
    let content = fs::read_to_string(failure_log).unwrap();
    assert_eq!(content.lines().count(), 5);
    assert!(content.contains("expired token"));

    // Untouched categories never create their files.
    assert!(!config.event_log.sink_path(Category::AuthSuccess).exists());
}

/// A sink failure in one flush leaves later records and flushes of the
/// same category working (and other categories untouched).
#[test]
fn test_failure_isolation_across_flushes() {
    init_tracing();
    let dir = tempfile::tempdir().unwrap();
    let config = EventLogConfig {
        enabled: true,
        directory: dir.path().join("logs"),
        flush_interval_secs: 3600,
        console: false,
    };
    let trail = EventTrail::new(&config).unwrap();

    // Sabotage the auth-success target: make its path a directory so
    // appends fail.
    let success_path = config.sink_path(Category::AuthSuccess);
    fs::create_dir_all(&success_path).unwrap();

    // The first record's inline flush fails silently on the record
    // path; the second stays buffered so the forced flush hits the
    // broken sink and surfaces the error.
    trail.record_auth_success("user:lost");
    trail.record_auth_success("user:also-lost");
    assert!(trail.flush_all().is_err());

    // Failed batches were dropped; the other category still works.
    trail.record_auth_failure("user:mallory", "bad password");
    trail.flush_all().unwrap();

    let failure_log = fs::read_to_string(config.sink_path(Category::AuthFailure)).unwrap();
    assert_eq!(failure_log.lines().count(), 1);

    // Repair the target; the category recovers.
    fs::remove_dir_all(&success_path).unwrap();
    trail.record_auth_success("user:recovered");
    trail.flush_all().unwrap();

    let success_log = fs::read_to_string(&success_path).unwrap();
    assert_eq!(success_log.lines().count(), 1);
    assert!(success_log.contains("user:recovered"));
}
