//! End-to-end tests for the logging pipeline.

use applog::config::{ConfigLoader, LoggerSettings};
use applog::logger::ContainerRef;
use applog::{LogType, Logger, MemoryHost, NetworkFilters, NoticeOutcome, UiHost, WriteError};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tempfile::tempdir;

/// A logger writing to a fresh file in a temp dir.
struct FileFixture {
    logger: Logger,
    path: PathBuf,
    _dir: tempfile::TempDir,
}

impl FileFixture {
    fn new() -> Self {
        let dir = tempdir().unwrap();
        let path = dir.path().join("session.log");
        let logger = Logger::new();
        logger.set_target(path.to_str().unwrap());
        Self {
            logger,
            path,
            _dir: dir,
        }
    }

    fn content(&self) -> String {
        read(&self.path)
    }
}

/// Console writer whose bytes the test can inspect.
#[derive(Clone, Default)]
struct Captured(Arc<Mutex<Vec<u8>>>);

impl Captured {
    fn text(&self) -> String {
        String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
    }
}

impl Write for Captured {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Host whose notices are never dismissed.
struct UnattendedHost {
    shown: Mutex<usize>,
}

impl UiHost for UnattendedHost {
    fn resolve_container(&self, _reference: &str) -> Option<String> {
        None
    }

    fn append_to_container(&self, _container: &ContainerRef, _text: &str) -> bool {
        false
    }

    fn show_notice(&self, _text: &str, timeout: Option<Duration>) -> NoticeOutcome {
        *self.shown.lock().unwrap() += 1;
        if let Some(timeout) = timeout {
            std::thread::sleep(timeout);
        }
        NoticeOutcome::TimedOut
    }
}

fn read(path: &Path) -> String {
    std::fs::read_to_string(path).unwrap_or_default()
}

/// Strip the leading `[timestamp]` so records can be compared exactly.
fn without_timestamp(record: &str) -> &str {
    let end = record.find(']').expect("record starts with a timestamp");
    &record[end + 1..]
}

#[test]
fn all_enables_built_ins_plus_custom_types() {
    let logger = Logger::new();
    logger.set_types(["all", "render", "audio", "render"]);

    let mut expected: Vec<String> = LogType::BUILT_IN.iter().map(ToString::to_string).collect();
    expected.push("audio".to_string());
    expected.push("render".to_string());
    expected.sort();

    assert_eq!(logger.types(), expected);
}

#[test]
fn add_then_remove_restores_types() {
    let logger = Logger::new();
    let before = logger.types();

    for name in ["custom", "msg", "extensions", "Developer"] {
        logger.add_type(name);
        logger.remove_type(name);
        assert_eq!(logger.types(), before, "after add/remove of {name}");
    }
}

#[test]
fn record_layout_with_and_without_type() {
    let fixture = FileFixture::new();

    fixture.logger.log("hi", "developer").unwrap();
    fixture.logger.set_include_log_type(false);
    fixture.logger.log("bye", "developer").unwrap();

    let content = fixture.content();
    let lines: Vec<&str> = content.split_inclusive('\n').collect();
    assert_eq!(lines.len(), 2);
    assert_eq!(without_timestamp(lines[0]), "\t\t[developer]\thi\n");
    assert_eq!(without_timestamp(lines[1]), "\tbye\n");
}

#[test]
fn disabled_network_type_writes_nothing() {
    let fixture = FileFixture::new();
    fixture.logger.set_types(["developer"]);

    fixture.logger.log("hello", "developer").unwrap();
    fixture.logger.log("hi", "network").unwrap();

    let content = fixture.content();
    assert!(content.contains("[developer]\thello"));
    assert!(!content.contains("hi\n"));
    assert_eq!(content.lines().count(), 1);
}

#[test]
fn unregistered_type_produces_zero_bytes() {
    let fixture = FileFixture::new();
    fixture.logger.log("x", "unregistered-type").unwrap();
    assert!(!fixture.path.exists());
}

#[test]
fn suspension_mutes_everything_until_resume() {
    let fixture = FileFixture::new();
    fixture.logger.set_types(["all"]);
    fixture.logger.suspend();

    for log_type in ["developer", "error", "network", "msg", "nope"] {
        fixture.logger.log("muted", log_type).unwrap();
    }
    assert!(!fixture.path.exists());

    fixture.logger.resume();
    fixture.logger.log("back", "error").unwrap();
    assert_eq!(fixture.content().lines().count(), 1);
}

#[test]
fn network_rules_apply_in_order() {
    let fixture = FileFixture::new();
    fixture
        .logger
        .set_network_filters(NetworkFilters::from_pairs([("a", "b"), ("b", "c")]));

    fixture.logger.log("aab\r\nb,\r\n", "network").unwrap();

    assert!(fixture.content().ends_with("[network]\tccc\rc\n"));
}

#[test]
fn unwritable_path_reports_open_failed() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("not-a-dir").join("x.log");
    let logger = Logger::new();
    logger.set_target(path.to_str().unwrap());

    let err = logger.log("x", "developer").unwrap_err();
    assert!(matches!(err, WriteError::OpenFailed { .. }));
    assert!(!path.exists());
}

#[test]
fn container_target_survives_until_removed() {
    let host = Arc::new(MemoryHost::new());
    host.add_container(
        "field \"Output\"",
        "field id 12 of card id 3 of stack \"Monitor\" of stack \"/apps/Main.rev\"",
    );

    let logger = Logger::with_host(host.clone());
    logger.set_target("field \"Output\"");
    assert_eq!(
        logger.target(),
        "field id 12 of card id 3 of stack \"Monitor\""
    );

    logger.log("first", "error").unwrap();
    logger.log("second", "error").unwrap();
    assert_eq!(host.text("field \"Output\"").unwrap().lines().count(), 2);

    host.remove_container("field \"Output\"");
    assert!(matches!(
        logger.log("third", "error"),
        Err(WriteError::TargetMissing { .. })
    ));
}

#[test]
fn settings_file_drives_the_logger() {
    let dir = tempdir().unwrap();
    let log_path = dir.path().join("from-settings.log");
    let settings_path = dir.path().join("settings.toml");

    std::fs::write(
        &settings_path,
        format!(
            "[logger]\ntypes = \"network\"\ntarget = '{}'\n\"row delimiter\" = \"13+10\"\n\"network filters\" = \"secret=\\\\S+\\tsecret=?\"\n",
            log_path.display()
        ),
    )
    .unwrap();

    let settings = ConfigLoader::new().load(&settings_path).unwrap();
    let logger = Logger::new();
    settings.apply(&logger);

    logger.log("login secret=abc123", "network").unwrap();
    logger.log("not logged", "developer").unwrap();

    let content = read(&log_path);
    assert!(content.ends_with("\t[network]\tlogin secret=?\r\n"));
    assert!(!content.contains("not logged"));
}

#[test]
fn key_value_settings_match_file_settings() {
    let from_pairs = LoggerSettings::from_pairs([
        ("logger>types", "developer,error"),
        ("logger>column delimiter", "124"),
    ])
    .unwrap();

    let from_file = ConfigLoader::new()
        .load_str("[logger]\ntypes = \"developer,error\"\n\"column delimiter\" = \"124\"\n")
        .unwrap();

    assert_eq!(from_pairs, from_file);
}

#[test]
fn bridge_tracks_network_type() {
    let seen = Arc::new(Mutex::new(Vec::<String>::new()));
    let sink_seen = Arc::clone(&seen);

    let logger = Logger::new();
    logger.set_bridge(Arc::new(move |value: &str| {
        sink_seen.lock().unwrap().push(value.to_string());
    }));
    logger.set_types_str("developer");

    let seen = seen.lock().unwrap();
    assert_eq!(seen.len(), 2);
    assert!(!seen[0].is_empty());
    assert!(seen[1].is_empty());
}

#[test]
fn console_writes_one_line_per_enabled_record() {
    let captured = Captured::default();
    let logger = Logger::new();
    logger.set_console_writer(captured.clone());
    logger.set_target("console");
    logger.set_types_str("developer");

    logger.log_default("hello").unwrap();
    logger.log("hi", "network").unwrap();

    let text = captured.text();
    assert!(text.starts_with('['));
    assert_eq!(without_timestamp(&text), "\t\t[developer]\thello\n\n");
}

#[test]
fn dialog_timeout_does_not_fail_the_call() {
    let host = Arc::new(UnattendedHost {
        shown: Mutex::new(0),
    });
    let logger = Logger::with_host(host.clone());
    logger.set_dialog_timeout(Some(Duration::from_millis(20)));
    logger.set_target("answer");

    assert!(logger.log("unattended", "error").is_ok());
    assert_eq!(*host.shown.lock().unwrap(), 1);
    assert_eq!(logger.metrics().records_written, 1);
}
