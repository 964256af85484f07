use plugkit_logger::{LevelFilter, Logger};

#[test]
fn init_console_only_writes_no_file() {
    let logger = Logger::builder("integration-console-only")
        .level(LevelFilter::INFO)
        .init()
        .expect("logger should initialize");

    assert!(!logger.has_file(), "console-only logger should not hold a file worker");
}
