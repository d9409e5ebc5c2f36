//! Per-identifier scrape results.

use crate::scraper::error::{ErrorKind, ScrapeError};
use geoid::{GeoId, fips::Fips};
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

/// Milliseconds since the Unix epoch, saturating to `0` if the system clock
/// is set before 1970.
pub fn unix_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |d| u64::try_from(d.as_millis()).unwrap_or(u64::MAX))
}

/// A page that was resolved for a county.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Source {
    pub name: String,
    pub url: String,
}

impl Source {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
        }
    }
}

/// Outcome of processing one identifier.
///
/// Serialized with a `status` tag so raw `.jsonl` lines can be filtered
/// without knowing the full schema.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ScrapeRecord {
    Success {
        geoid: GeoId,
        state: String,
        county: String,
        timestamp_ms: u64,
        sources: Vec<Source>,
    },
    Error {
        geoid: GeoId,
        timestamp_ms: u64,
        kind: ErrorKind,
        message: String,
    },
}

impl ScrapeRecord {
    pub fn success(geoid: GeoId, sources: Vec<Source>) -> Self {
        let fips = Fips::from(geoid);
        Self::Success {
            geoid,
            state: fips.state(),
            county: fips.county(),
            timestamp_ms: unix_millis(),
            sources,
        }
    }

    pub fn failure(geoid: GeoId, err: &ScrapeError) -> Self {
        Self::Error {
            geoid,
            timestamp_ms: unix_millis(),
            kind: ErrorKind::from(err),
            message: err.to_string(),
        }
    }

    pub const fn geoid(&self) -> GeoId {
        match self {
            Self::Success { geoid, .. } | Self::Error { geoid, .. } => *geoid,
        }
    }

    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};

    fn id() -> GeoId {
        GeoId::decode("G0100010").unwrap()
    }

    #[test]
    fn success_carries_fips_split() {
        let record = ScrapeRecord::success(id(), vec![Source::new("a", "https://a")]);
        let mut value = serde_json::to_value(&record).unwrap();
        assert!(value["timestamp_ms"].as_u64().unwrap() > 0);
        value.as_object_mut().unwrap().remove("timestamp_ms");
        assert_eq!(
            value,
            json!({
                "status": "success",
                "geoid": "G0100010",
                "state": "01",
                "county": "00010",
                "sources": [{ "name": "a", "url": "https://a" }],
            })
        );
    }

    #[test]
    fn error_is_tagged_with_kind() {
        let err = ScrapeError::Fetch {
            geoid: id(),
            reason: "page did not load".into(),
        };
        let record = ScrapeRecord::failure(id(), &err);
        assert!(!record.is_success());
        assert_eq!(record.geoid(), id());

        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["status"], "error");
        assert_eq!(value["kind"], "fetch");
        assert_eq!(
            value["message"],
            Value::from("fetch failed for G0100010: page did not load")
        );
    }

    #[test]
    fn parses_back_from_a_raw_line() {
        let line = r#"{"status":"error","geoid":"G5600450","timestamp_ms":1,"kind":"timeout","message":"slow"}"#;
        let record: ScrapeRecord = serde_json::from_str(line).unwrap();
        assert_eq!(
            record,
            ScrapeRecord::Error {
                geoid: GeoId::decode("G5600450").unwrap(),
                timestamp_ms: 1,
                kind: ErrorKind::Timeout,
                message: "slow".into(),
            }
        );
        assert!(serde_json::from_str::<ScrapeRecord>(&line.replace('G', "X")).is_err());
    }
}
