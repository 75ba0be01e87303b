use dbm_logger::{LevelFilter, Logger, LoggerError};
use serial_test::serial;

#[test]
#[serial]
fn init_twice_returns_subscriber_error() {
    let logger = Logger::builder()
        .name("integration-init")
        .level(LevelFilter::INFO)
        .init()
        .expect("first init should succeed");
    assert_eq!(logger.name(), "integration-init");

    let err = Logger::builder()
        .name("integration-init-second")
        .level(LevelFilter::INFO)
        .init()
        .expect_err("second init should fail");

    assert!(
        matches!(err, LoggerError::Subscriber { .. }),
        "expected subscriber error for second init"
    );
}

#[test]
#[serial]
fn console_disabled_has_no_layers() {
    let err = Logger::builder()
        .name("integration-silent")
        .console(false)
        .init()
        .expect_err("no layers to install");

    assert!(matches!(err, LoggerError::InvalidConfiguration { .. }));
}
