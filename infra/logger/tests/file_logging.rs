use plugkit_logger::{LevelFilter, Logger};
use std::fs;

#[test]
fn json_log_file_receives_structured_events() -> Result<(), Box<dyn std::error::Error>> {
    let tmp_dir = tempfile::tempdir()?;
    let log_file = tmp_dir.path().join("logs").join("plugkit.log");

    let logger = Logger::builder("integration-file-logging")
        .console(false)
        .file(&log_file)
        .json()
        .level(LevelFilter::INFO)
        .init()?;
    assert!(logger.has_file());

    tracing::info!(module = "Delay", "Module created");
    tracing::debug!("filtered out");
    drop(logger);

    let text = fs::read_to_string(&log_file)?;
    let events: Vec<serde_json::Value> =
        text.lines().map(serde_json::from_str).collect::<Result<_, _>>()?;

    assert_eq!(events.len(), 1, "only the info event passes the filter: {text}");
    assert_eq!(events[0]["fields"]["message"], "Module created");
    assert_eq!(events[0]["fields"]["module"], "Delay");
    Ok(())
}
