// src/logging.rs

use crate::constants::APP_NAME;
use crate::errors::{ChatError, ChatResult};
use crate::models::ApiCallLog;
use flexi_logger::{FileSpec, Logger, LoggerHandle};
use std::path::{Path, PathBuf};

/// Starts file logging. The terminal belongs to the UI, so nothing goes to stdout.
/// Keep the returned handle alive for the lifetime of the program.
pub fn init(level: &str, directory: &Path) -> ChatResult<LoggerHandle> {
    let handle = Logger::try_with_str(level)?
        .log_to_file(
            FileSpec::default()
                .directory(directory)
                .basename(APP_NAME)
                .suppress_timestamp(),
        )
        .append()
        .format(flexi_logger::detailed_format)
        .start()?;

    Ok(handle)
}

/// Directory log files are written to.
pub fn log_directory() -> ChatResult<PathBuf> {
    let base = dirs::cache_dir()
        .or_else(dirs::home_dir)
        .ok_or_else(|| ChatError::config_error("Could not determine a log directory"))?;

    Ok(base.join(APP_NAME).join("logs"))
}

/// Logs a single exchange with the chat endpoint.
pub fn log_api_call(entry: &ApiCallLog) {
    log::info!(
        target: "chatline::api",
        "[{}] {} - {} - Status: {} - Time: {}ms",
        entry.timestamp.to_rfc3339(),
        entry.endpoint,
        entry.request_summary,
        entry.response_status,
        entry.response_time_ms
    );
}

/// Shortens user text for log lines.
pub fn summarize(text: &str, max_chars: usize) -> String {
    let mut chars = text.chars();
    let head: String = chars.by_ref().take(max_chars).collect();
    if chars.next().is_some() {
        format!("{}...", head)
    } else {
        head
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summarize_short_text_is_unchanged() {
        assert_eq!(summarize("hi", 10), "hi");
    }

    #[test]
    fn test_summarize_truncates_on_char_boundary() {
        assert_eq!(summarize("22°C in Oxford", 4), "22°C...");
    }
}
