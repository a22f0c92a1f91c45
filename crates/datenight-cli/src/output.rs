use clap::ValueEnum;
use owo_colors::OwoColorize;
use serde_json::{json, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Human,
    Json,
    #[value(name = "json-pretty")]
    JsonPretty,
}

/// User-facing command output; diagnostics go through `tracing` instead
pub struct Output {
    format: OutputFormat,
    quiet: bool,
}

impl Output {
    pub fn new(format: OutputFormat, quiet: bool) -> Self {
        Self { format, quiet }
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }

    pub fn is_quiet(&self) -> bool {
        self.quiet
    }

    pub fn success(&self, msg: impl AsRef<str>) {
        self.emit("success", "✓".green().to_string(), msg.as_ref());
    }

    pub fn info(&self, msg: impl AsRef<str>) {
        if self.quiet {
            return;
        }
        match self.format {
            OutputFormat::Human => println!("{}", msg.as_ref()),
            _ => self.print_json(&json!({ "type": "info", "message": msg.as_ref() })),
        }
    }

    pub fn warn(&self, msg: impl AsRef<str>) {
        self.emit("warning", "⚠".yellow().to_string(), msg.as_ref());
    }

    pub fn json(&self, data: &Value) {
        if self.quiet && self.format != OutputFormat::Human {
            return;
        }
        self.print_json(data);
    }

    fn emit(&self, kind: &str, marker: String, msg: &str) {
        if self.quiet {
            return;
        }
        match self.format {
            OutputFormat::Human => println!("{} {}", marker, msg),
            _ => self.print_json(&json!({ "type": kind, "message": msg })),
        }
    }

    fn print_json(&self, data: &Value) {
        match self.format {
            OutputFormat::Json => println!("{}", serde_json::to_string(data).unwrap_or_default()),
            OutputFormat::JsonPretty => println!("{}", serde_json::to_string_pretty(data).unwrap_or_default()),
            OutputFormat::Human => println!("{}", data),
        }
    }
}
