pub mod telemetry;

pub use telemetry::{ReadingError, TelemetryReading, TelemetryRecord, TemperatureInput};

/// Device id recorded when the sender does not identify itself.
pub const DEFAULT_DEVICE_ID: &str = "unknown";
