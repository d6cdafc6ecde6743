//! Installs the global subscriber, so everything lives in one test.

use nf_cli::init_logging;
use nf_domain::config::LoggingConfig;
use std::fs;
use tempfile::tempdir;

#[test]
fn init_logging_follows_the_logging_section() -> Result<(), Box<dyn std::error::Error>> {
    let bad_level = LoggingConfig { level: "chatty".to_owned(), ..LoggingConfig::default() };
    let err = init_logging(&bad_level, false).expect_err("unknown level");
    assert!(err.to_string().contains("logging.level"));

    let dir = tempdir()?;
    let config = LoggingConfig {
        level: "warn".to_owned(),
        directory: Some(dir.path().join("logs")),
        json: true,
        filter: None,
    };

    let logger = init_logging(&config, true)?;
    tracing::debug!(consumers = 4, "Consumer check finished");
    tracing::trace!("not shown at debug");
    drop(logger);

    let files: Vec<_> = fs::read_dir(dir.path().join("logs"))?.collect::<Result<_, _>>()?;
    assert_eq!(files.len(), 1);
    assert!(files[0].file_name().to_string_lossy().starts_with("nf-cli."));

    let content = fs::read_to_string(files[0].path())?;
    let line: serde_json::Value =
        serde_json::from_str(content.lines().next().ok_or("empty log file")?)?;
    assert_eq!(line["level"], "DEBUG", "--verbose lifts the configured warn level");
    assert_eq!(line["fields"]["consumers"], 4);
    assert!(!content.contains("not shown at debug"));
    Ok(())
}
