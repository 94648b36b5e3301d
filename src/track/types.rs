use chrono::NaiveDateTime;
use serde::{Deserialize, Deserializer, Serialize};

pub const UNTITLED_TRACK: &str = "Untitled Track";

const WALL_CLOCK_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"];

/// One recorded point of a track. Capture time is local wall-clock.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct Sample {
    #[serde(default)]
    pub longitude: Option<f64>,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub altitude: Option<f64>,
    #[serde(default)]
    pub speed: Option<f64>,
    #[serde(default)]
    pub accuracy: Option<f64>,
    #[serde(default)]
    pub satellite_count: Option<u32>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default, deserialize_with = "deserialize_wall_clock")]
    pub captured_at: Option<NaiveDateTime>,
}

impl Sample {
    pub fn new(longitude: f64, latitude: f64) -> Self {
        Self {
            longitude: Some(longitude),
            latitude: Some(latitude),
            ..Default::default()
        }
    }

    /// `(longitude, latitude)` when both are present and finite.
    pub fn position(&self) -> Option<(f64, f64)> {
        let (lon, lat) = (self.longitude?, self.latitude?);
        (lon.is_finite() && lat.is_finite()).then_some((lon, lat))
    }

    pub fn elevation(&self) -> Option<f64> {
        self.altitude.filter(|alt| alt.is_finite())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct TrackMetadata {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "deserialize_wall_clock")]
    pub start_time: Option<NaiveDateTime>,
    #[serde(default, deserialize_with = "deserialize_wall_clock")]
    pub end_time: Option<NaiveDateTime>,
}

impl TrackMetadata {
    pub fn named(name: &str) -> Self {
        Self {
            name: Some(name.to_string()),
            ..Default::default()
        }
    }

    /// Track name, or the placeholder when absent or empty.
    pub fn display_name(&self) -> &str {
        match self.name.as_deref() {
            Some(name) if !name.is_empty() => name,
            _ => UNTITLED_TRACK,
        }
    }

    pub fn display_description(&self) -> &str {
        self.description.as_deref().unwrap_or("")
    }

    /// Seconds between the caller-supplied start and end times.
    pub fn duration_seconds(&self) -> Option<i64> {
        Some((self.end_time? - self.start_time?).num_seconds())
    }
}

pub fn parse_wall_clock(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();
    WALL_CLOCK_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
}

fn deserialize_wall_clock<'de, D>(deserializer: D) -> Result<Option<NaiveDateTime>, D::Error>
where
    D: Deserializer<'de>,
{
    let s = Option::<String>::deserialize(deserializer)?;
    match s {
        None => Ok(None),
        Some(s) if s.trim().is_empty() => Ok(None),
        Some(s) => parse_wall_clock(&s)
            .map(Some)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid timestamp: {}", s))),
    }
}
