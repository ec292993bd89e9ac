pub mod ring;

pub use ring::{BoundedTimeSeriesBuffer, MAX_RECORDS, TelemetryBuffer};
