use clap::ValueEnum;
use owo_colors::OwoColorize;
use serde::Serialize;
use serde_json::{json, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Human,
    Json,
    #[value(name = "json-pretty")]
    JsonPretty,
}

/// Status lines and data for the terminal, either human-readable or as JSON lines
pub struct Output {
    format: OutputFormat,
    quiet: bool,
}

impl Output {
    pub fn new(format: OutputFormat, quiet: bool) -> Self {
        Self { format, quiet }
    }

    pub fn is_human(&self) -> bool {
        self.format == OutputFormat::Human
    }

    pub fn is_quiet(&self) -> bool {
        self.quiet
    }

    pub fn success(&self, msg: impl AsRef<str>) {
        if self.quiet {
            return;
        }
        match self.format {
            OutputFormat::Human => println!("{} {}", "✓".green(), msg.as_ref()),
            _ => self.message("success", msg.as_ref()),
        }
    }

    pub fn error(&self, msg: impl AsRef<str>) {
        // Shown even in quiet mode
        match self.format {
            OutputFormat::Human => eprintln!("{} {}", "✗".red(), msg.as_ref()),
            _ => self.message("error", msg.as_ref()),
        }
    }

    pub fn info(&self, msg: impl AsRef<str>) {
        if self.quiet {
            return;
        }
        match self.format {
            OutputFormat::Human => println!("{}", msg.as_ref()),
            _ => self.message("info", msg.as_ref()),
        }
    }

    pub fn warn(&self, msg: impl AsRef<str>) {
        if self.quiet {
            return;
        }
        match self.format {
            OutputFormat::Human => println!("{} {}", "⚠".yellow(), msg.as_ref()),
            _ => self.message("warning", msg.as_ref()),
        }
    }

    /// Whether data documents are printed: JSON modes only, and never when quiet.
    /// Quiet leaves errors as the only output in every format.
    pub fn emits_data(&self) -> bool {
        !self.is_human() && !self.quiet
    }

    /// Emit a data document in JSON modes. Human mode renders its own tables instead.
    pub fn data<T: Serialize>(&self, kind: &str, data: &T) {
        if !self.emits_data() {
            return;
        }
        match serde_json::to_value(data) {
            Ok(value) => self.print_json(&tagged_document(kind, value)),
            Err(e) => self.error(format!("Failed to serialize {}: {}", kind, e)),
        }
    }

    fn message(&self, kind: &str, msg: &str) {
        self.print_json(&json!({ "type": kind, "message": msg }));
    }

    fn print_json(&self, data: &Value) {
        match self.format {
            OutputFormat::JsonPretty => {
                println!("{}", serde_json::to_string_pretty(data).unwrap_or_default())
            }
            _ => println!("{}", serde_json::to_string(data).unwrap_or_default()),
        }
    }
}

/// Objects gain a `type` key; anything else is wrapped under `data`
fn tagged_document(kind: &str, value: Value) -> Value {
    match value {
        Value::Object(mut map) => {
            map.insert("type".to_string(), Value::String(kind.to_string()));
            Value::Object(map)
        }
        other => json!({ "type": kind, "data": other }),
    }
}
