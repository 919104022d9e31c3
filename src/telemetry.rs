//! Fire-and-forget reporting of scan events and failures.

use std::error::Error;

use log::{error, info};

/// Event emitted after a successful scan.
pub const PARSED_EVENT: &str = "vsixParsedTime";

/// Property of [`PARSED_EVENT`] holding the scan duration in seconds.
pub const PARSED_SECONDS: &str = "totalSecondsParsing";

/// Sink for usage events and error reports.
///
/// Nothing is returned: a sink that fails must swallow its own failure.
pub trait Telemetry: Send + Sync {
    fn send_event(&self, name: &str, properties: &[(&str, String)]);

    fn send_error(&self, error: &(dyn Error + 'static));
}

/// Writes telemetry to the log.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogTelemetry;

impl Telemetry for LogTelemetry {
    fn send_event(&self, name: &str, properties: &[(&str, String)]) {
        let rendered: Vec<String> = properties.iter().map(|(k, v)| format!("{k}={v}")).collect();
        info!("telemetry event {} {}", name, rendered.join(" "));
    }

    fn send_error(&self, error: &(dyn Error + 'static)) {
        error!("telemetry error: {}", error);
    }
}

/// Drops everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopTelemetry;

impl Telemetry for NoopTelemetry {
    fn send_event(&self, _name: &str, _properties: &[(&str, String)]) {}

    fn send_error(&self, _error: &(dyn Error + 'static)) {}
}
