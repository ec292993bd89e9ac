use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::DEFAULT_DEVICE_ID;
use crate::time::iso8601;

/// Reasons an inbound reading cannot become a record.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ReadingError {
    #[error("temperature is missing")]
    MissingTemperature,

    #[error("temperature is not a number: {0:?}")]
    InvalidTemperature(String),

    #[error("temperature is not finite: {0}")]
    NonFiniteTemperature(f64),
}

/// Temperature as it arrives on the wire. Devices send either a JSON number
/// or a string holding one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TemperatureInput {
    Number(f64),
    Text(String),
}

impl TemperatureInput {
    /// Resolves the input to a finite value.
    pub fn resolve(&self) -> Result<f64, ReadingError> {
        let value = match self {
            TemperatureInput::Number(v) => *v,
            TemperatureInput::Text(s) => s
                .trim()
                .parse::<f64>()
                .map_err(|_| ReadingError::InvalidTemperature(s.clone()))?,
        };

        if !value.is_finite() {
            return Err(ReadingError::NonFiniteTemperature(value));
        }

        Ok(value)
    }
}

impl From<f64> for TemperatureInput {
    fn from(v: f64) -> Self {
        TemperatureInput::Number(v)
    }
}

/// Decoded body of an ingest request. Every field except `temperature` is optional;
/// unknown fields are ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TelemetryReading {
    #[serde(default)]
    pub temperature: Option<TemperatureInput>,

    /// Sender-side capture time. Kept verbatim when present.
    #[serde(default)]
    pub timestamp: Option<String>,

    #[serde(default)]
    pub device_id: Option<String>,

    /// Set by devices that buffered the sample while offline.
    #[serde(default)]
    pub stored_data: Option<bool>,
}

impl TelemetryReading {
    pub fn new(temperature: f64) -> Self {
        Self {
            temperature: Some(temperature.into()),
            ..Self::default()
        }
    }

    pub fn with_device_id(mut self, device_id: impl Into<String>) -> Self {
        self.device_id = Some(device_id.into());
        self
    }

    pub fn with_timestamp(mut self, timestamp: impl Into<String>) -> Self {
        self.timestamp = Some(timestamp.into());
        self
    }

    pub fn with_stored_data(mut self, stored: bool) -> Self {
        self.stored_data = Some(stored);
        self
    }
}

/// One stored telemetry sample. Immutable once built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TelemetryRecord {
    pub temperature: f64,
    pub timestamp: String,
    pub device_id: String,
    #[serde(rename = "stored_data")]
    pub stored_locally: bool,
    pub received_at: String,
}

impl TelemetryRecord {
    /// Builds a record from a reading received at `received_at`.
    ///
    /// This is the only place defaults are applied:
    /// - `timestamp` falls back to the receipt time
    /// - `device_id` falls back to [`DEFAULT_DEVICE_ID`]
    /// - `stored_data` falls back to `false`
    pub fn from_reading(
        reading: TelemetryReading,
        received_at: DateTime<Utc>,
    ) -> Result<Self, ReadingError> {
        let temperature = reading
            .temperature
            .as_ref()
            .ok_or(ReadingError::MissingTemperature)?
            .resolve()?;

        let received_at = iso8601(received_at);

        Ok(Self {
            temperature,
            timestamp: reading.timestamp.unwrap_or_else(|| received_at.clone()),
            device_id: reading
                .device_id
                .unwrap_or_else(|| DEFAULT_DEVICE_ID.to_string()),
            stored_locally: reading.stored_data.unwrap_or(false),
            received_at,
        })
    }

    /// Builds a record stamped with the current time.
    pub fn receive(reading: TelemetryReading) -> Result<Self, ReadingError> {
        Self::from_reading(reading, Utc::now())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{SubsecRound, TimeZone};
    use serde_json::json;

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 18, 12, 0, 0).unwrap()
    }

    #[test]
    fn defaults_are_applied_when_fields_absent() {
        let rec = TelemetryRecord::from_reading(TelemetryReading::new(21.0), fixed_now()).unwrap();

        assert_eq!(rec.temperature, 21.0);
        assert_eq!(rec.device_id, "unknown");
        assert!(!rec.stored_locally);
        assert_eq!(rec.timestamp, "2026-10-18T12:00:00.000000Z");
        assert_eq!(rec.received_at, rec.timestamp);
    }

    #[test]
    fn sender_fields_are_kept_verbatim() {
        let reading = TelemetryReading::new(19.25)
            .with_device_id("esp32-1")
            .with_timestamp("yesterday-ish")
            .with_stored_data(true);

        let rec = TelemetryRecord::from_reading(reading, fixed_now()).unwrap();

        assert_eq!(rec.device_id, "esp32-1");
        assert_eq!(rec.timestamp, "yesterday-ish");
        assert!(rec.stored_locally);
        assert_eq!(rec.received_at, "2026-10-18T12:00:00.000000Z");
    }

    #[test]
    fn receive_stamps_within_call_window() {
        let start = Utc::now().trunc_subsecs(6);
        let rec = TelemetryRecord::receive(TelemetryReading::new(1.0)).unwrap();
        let end = Utc::now();

        let ts = DateTime::parse_from_rfc3339(&rec.timestamp)
            .unwrap()
            .with_timezone(&Utc);
        assert!(ts >= start && ts <= end, "{ts} not in [{start}, {end}]");
        assert!(!rec.received_at.is_empty());
    }

    #[test]
    fn missing_temperature_is_rejected() {
        let err = TelemetryRecord::receive(TelemetryReading::default()).unwrap_err();
        assert_eq!(err, ReadingError::MissingTemperature);
    }

    #[test]
    fn numeric_string_is_coerced() {
        let reading: TelemetryReading =
            serde_json::from_value(json!({ "temperature": " 23.5 " })).unwrap();
        let rec = TelemetryRecord::receive(reading).unwrap();
        assert_eq!(rec.temperature, 23.5);
    }

    #[test]
    fn non_numeric_string_is_rejected() {
        let reading: TelemetryReading =
            serde_json::from_value(json!({ "temperature": "warm" })).unwrap();
        assert!(matches!(
            TelemetryRecord::receive(reading),
            Err(ReadingError::InvalidTemperature(_))
        ));
    }

    #[test]
    fn non_finite_is_rejected() {
        let reading: TelemetryReading =
            serde_json::from_value(json!({ "temperature": "inf" })).unwrap();
        assert!(matches!(
            TelemetryRecord::receive(reading),
            Err(ReadingError::NonFiniteTemperature(_))
        ));
    }

    #[test]
    fn wrong_type_fails_to_decode() {
        let res = serde_json::from_value::<TelemetryReading>(json!({ "temperature": true }));
        assert!(res.is_err());
    }

    #[test]
    fn unknown_fields_and_nulls_are_tolerated() {
        let reading: TelemetryReading = serde_json::from_value(json!({
            "temperature": 4,
            "timestamp": null,
            "firmware": "1.2.3"
        }))
        .unwrap();

        assert_eq!(reading.temperature, Some(TemperatureInput::Number(4.0)));
        assert!(reading.timestamp.is_none());
    }

    #[test]
    fn record_serializes_with_wire_names() {
        let rec = TelemetryRecord::from_reading(
            TelemetryReading::new(23.5).with_device_id("esp32-1"),
            fixed_now(),
        )
        .unwrap();

        let v = serde_json::to_value(&rec).unwrap();
        assert_eq!(v["temperature"], json!(23.5));
        assert_eq!(v["device_id"], json!("esp32-1"));
        assert_eq!(v["stored_data"], json!(false));
        assert_eq!(v["received_at"], json!("2026-10-18T12:00:00.000000Z"));
        assert!(v.get("stored_locally").is_none());
    }
}
