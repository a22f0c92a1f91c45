use anyhow::Result;
use datenight_config::{Config, PathManager};
use std::io;
use std::io::IsTerminal;
use std::path::PathBuf;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::fmt::{self, time::ChronoUtc};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

/// Base level and optional log file taken from the `[logging]` table
#[derive(Debug, Clone)]
pub struct LoggingSettings {
    pub level: String,
    pub file: Option<PathBuf>,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
        }
    }
}

impl LoggingSettings {
    /// Only the server honours `[logging]`; an unreadable config falls back
    /// to defaults and is reported later when the command loads it again.
    pub fn for_command(is_server: bool) -> Self {
        if !is_server {
            return Self::default();
        }
        let config_file = PathManager::default().config_file();
        match Config::load_or_default(&config_file) {
            Ok(config) => Self {
                level: config.logging.level,
                file: config.logging.file,
            },
            Err(_) => Self::default(),
        }
    }
}

/// Filter directives for a verbosity level.
/// 0 = configured level, 1 = debug (hyper internals at warn), 2+ = trace.
pub fn filter_directives(verbose_level: u8, quiet: bool, base_level: &str) -> String {
    if quiet {
        return "error".to_string();
    }
    match verbose_level {
        0 => base_level.to_string(),
        1 => "debug,hyper::proto::h1=warn,hyper::client::pool=warn,hyper_util=warn".to_string(),
        _ => "trace".to_string(),
    }
}

pub fn init_logging(verbose_level: u8, quiet: bool, settings: &LoggingSettings) -> Result<()> {
    let directives = filter_directives(verbose_level, quiet, &settings.level);
    let filter = if quiet {
        EnvFilter::new(directives)
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directives))
    };

    let json = std::env::var("RUST_LOG_JSON")
        .map(|v| v == "true")
        .unwrap_or_else(|_| !io::stdout().is_terminal());

    let registry = Registry::default().with(filter);

    if let Some(log_path) = &settings.file {
        let log_dir = log_path
            .parent()
            .ok_or_else(|| anyhow::anyhow!("Log file path has no parent directory"))?;
        std::fs::create_dir_all(log_dir)?;

        let log_filename = log_path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| anyhow::anyhow!("Invalid log filename"))?;

        // "datenight.log" rotates as datenight.2026-01-17 etc.
        let log_prefix = log_filename.rsplitn(2, '.').nth(1).unwrap_or(log_filename);
        let file_appender = RollingFileAppender::new(Rotation::DAILY, log_dir, log_prefix);

        if json {
            let json_layer = fmt::layer()
                .json()
                .with_timer(ChronoUtc::rfc_3339())
                .with_writer(file_appender);
            registry.with(json_layer).init();
        } else {
            let fmt_layer = fmt::layer()
                .with_timer(ChronoUtc::rfc_3339())
                .with_ansi(false)
                .with_writer(file_appender);
            registry.with(fmt_layer).init();
        }
    } else if json {
        let json_layer = fmt::layer()
            .json()
            .with_timer(ChronoUtc::rfc_3339())
            .with_writer(io::stderr);
        registry.with(json_layer).init();
    } else {
        let fmt_layer = fmt::layer()
            .with_timer(ChronoUtc::rfc_3339())
            .with_writer(io::stderr);
        registry.with(fmt_layer).init();
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_directives() {
        assert_eq!(filter_directives(0, false, "warn"), "warn");
        assert!(filter_directives(1, false, "info").starts_with("debug,"));
        assert_eq!(filter_directives(3, false, "info"), "trace");
        assert_eq!(filter_directives(2, true, "info"), "error");
    }
}
