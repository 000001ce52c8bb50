//! Outbound-only observability for Datalens
//!
//! 1. **Structured logs** via `tracing`, pretty or JSON, written to stderr.
//! 2. **JSON reports** pushed to any `Write` sink (stdout by default) so they
//!    can be piped into other tools without mixing with log lines.

pub mod logging;
pub mod reporter;

pub use logging::init_tracing;
pub use reporter::{JsonReporter, ReportEnvelope};
