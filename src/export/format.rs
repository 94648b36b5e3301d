use std::str::FromStr;

use serde::Serialize;
use strum_macros::{Display, IntoStaticStr};

use super::error::ExportError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display, IntoStaticStr, utoipa::ToSchema)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ExportFormat {
    Gpx,
    Kml,
    Csv,
    GeoJson,
}

impl ExportFormat {
    pub const ALL: [ExportFormat; 4] = [
        ExportFormat::Gpx,
        ExportFormat::Kml,
        ExportFormat::Csv,
        ExportFormat::GeoJson,
    ];

    /// Case-insensitive lookup of a format key.
    pub fn from_key(key: &str) -> Option<Self> {
        let key = key.trim();
        Self::ALL
            .into_iter()
            .find(|format| key.eq_ignore_ascii_case(format.into()))
    }

    pub fn extension(&self) -> &'static str {
        self.into()
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            ExportFormat::Gpx => "application/gpx+xml",
            ExportFormat::Kml => "application/vnd.google-earth.kml+xml",
            ExportFormat::Csv => "text/csv",
            ExportFormat::GeoJson => "application/geo+json",
        }
    }
}

impl FromStr for ExportFormat {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_key(s).ok_or_else(|| ExportError::UnsupportedFormat(s.to_string()))
    }
}
