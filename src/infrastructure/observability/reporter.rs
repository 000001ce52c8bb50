//! Push-style JSON reporter.
//!
//! Every report is wrapped in an envelope carrying a timestamp, the crate
//! version and the report kind, then written as one JSON document per line.

use anyhow::{Context, Result};
use chrono::Utc;
use serde::Serialize;
use std::io::{self, Stdout, Write};
use tracing::debug;

#[derive(Debug, Serialize)]
pub struct ReportEnvelope<'a, T: Serialize> {
    pub generated_at: String,
    pub version: &'static str,
    pub kind: &'a str,
    pub payload: &'a T,
}

impl<'a, T: Serialize> ReportEnvelope<'a, T> {
    pub fn new(kind: &'a str, payload: &'a T) -> Self {
        Self {
            generated_at: Utc::now().to_rfc3339(),
            version: env!("CARGO_PKG_VERSION"),
            kind,
            payload,
        }
    }
}

pub struct JsonReporter<W: Write> {
    writer: W,
    pretty: bool,
}

impl JsonReporter<Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> JsonReporter<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            pretty: false,
        }
    }

    /// Indented output instead of one document per line.
    pub fn pretty(mut self) -> Self {
        self.pretty = true;
        self
    }

    pub fn emit<T: Serialize>(&mut self, kind: &str, payload: &T) -> Result<()> {
        let envelope = ReportEnvelope::new(kind, payload);
        let json = if self.pretty {
            serde_json::to_string_pretty(&envelope)
        } else {
            serde_json::to_string(&envelope)
        }
        .with_context(|| format!("Failed to serialize {} report", kind))?;

        writeln!(self.writer, "{}", json).context("Failed to write report")?;
        self.writer.flush().context("Failed to flush report")?;
        debug!("Reporter: emitted {} ({} bytes)", kind, json.len());
        Ok(())
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    #[derive(Serialize)]
    struct Sample {
        score: f64,
        label: &'static str,
    }

    #[test]
    fn test_emit_wraps_payload_in_envelope() {
        let mut reporter = JsonReporter::new(Vec::new());
        reporter
            .emit(
                "sample",
                &Sample {
                    score: 75.5,
                    label: "Average",
                },
            )
            .unwrap();

        let output = String::from_utf8(reporter.into_inner()).unwrap();
        assert_eq!(output.lines().count(), 1);

        let value: Value = serde_json::from_str(output.trim()).unwrap();
        assert_eq!(value["kind"], "sample");
        assert_eq!(value["version"], env!("CARGO_PKG_VERSION"));
        assert_eq!(value["payload"]["score"], 75.5);
        assert_eq!(value["payload"]["label"], "Average");
        assert!(
            chrono::DateTime::parse_from_rfc3339(value["generated_at"].as_str().unwrap()).is_ok()
        );
    }

    #[test]
    fn test_each_report_is_one_line() {
        let mut reporter = JsonReporter::new(Vec::new());
        reporter.emit("a", &vec![1, 2, 3]).unwrap();
        reporter.emit("b", &"text").unwrap();

        let output = String::from_utf8(reporter.into_inner()).unwrap();
        let kinds: Vec<String> = output
            .lines()
            .map(|line| serde_json::from_str::<Value>(line).unwrap()["kind"].to_string())
            .collect();
        assert_eq!(kinds, vec!["\"a\"", "\"b\""]);
    }

    #[test]
    fn test_pretty_output_is_indented() {
        let mut reporter = JsonReporter::new(Vec::new()).pretty();
        reporter.emit("sample", &vec![1, 2]).unwrap();

        let output = String::from_utf8(reporter.into_inner()).unwrap();
        assert!(output.lines().count() > 1);
        assert!(output.contains("\n  \"kind\": \"sample\""));
        let value: Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["payload"][1], 2);
    }
}
