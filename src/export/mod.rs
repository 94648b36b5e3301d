//! Streaming track encoders.
//!
//! Every encoder makes a single pass over the samples and writes straight to
//! the sink. The format key is resolved before the first byte goes out, so an
//! unsupported key never leaves partial output behind.

mod csv;
mod error;
mod escape;
mod filename;
mod format;
mod geojson;
mod gpx;
mod kml;

use std::io::Write;

pub use csv::{CSV_HEADER, UTF8_BOM};
pub use error::ExportError;
pub use escape::{escape_csv, escape_json, escape_xml};
pub use filename::{content_disposition, file_name};
pub use format::ExportFormat;

use crate::track::{Sample, TrackMetadata, WallClock};

#[derive(Debug, Clone, Copy, Default)]
pub struct Exporter {
    clock: WallClock,
}

impl Exporter {
    pub fn new(clock: WallClock) -> Self {
        Self { clock }
    }

    pub fn encode<W: Write>(
        &self,
        format: &str,
        metadata: &TrackMetadata,
        samples: &[Sample],
        sink: W,
    ) -> Result<(), ExportError> {
        let format: ExportFormat = format.parse()?;
        self.encode_format(format, metadata, samples, sink)
    }

    pub fn encode_format<W: Write>(
        &self,
        format: ExportFormat,
        metadata: &TrackMetadata,
        samples: &[Sample],
        mut sink: W,
    ) -> Result<(), ExportError> {
        log::debug!("encoding {} samples as {}", samples.len(), format);

        match format {
            ExportFormat::Gpx => gpx::write_gpx(&mut sink, metadata, samples, &self.clock)?,
            ExportFormat::Kml => kml::write_kml(&mut sink, metadata, samples)?,
            ExportFormat::Csv => csv::write_csv(&mut sink, samples)?,
            ExportFormat::GeoJson => geojson::write_geojson(&mut sink, metadata, samples)?,
        }

        sink.flush()?;
        Ok(())
    }
}

/// Encode with capture times read in the host's local zone.
pub fn encode<W: Write>(
    format: &str,
    metadata: &TrackMetadata,
    samples: &[Sample],
    sink: W,
) -> Result<(), ExportError> {
    Exporter::default().encode(format, metadata, samples, sink)
}
