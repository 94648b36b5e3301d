use std::fmt::Display;
use std::io::{self, Write};

use super::escape::escape_csv;
use crate::track::Sample;

pub const UTF8_BOM: [u8; 3] = [0xEF, 0xBB, 0xBF];
pub const CSV_HEADER: &str =
    "Seq,Longitude,Latitude,Altitude(m),Speed(m/s),Satellites,Address,Captured At";

const WALL_CLOCK_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Every sample gets a row, located or not. Times stay in local wall-clock.
pub fn write_csv<W: Write>(out: &mut W, samples: &[Sample]) -> io::Result<()> {
    // Spreadsheet tools need the BOM to pick UTF-8.
    out.write_all(&UTF8_BOM)?;
    writeln!(out, "{}", CSV_HEADER)?;

    for (i, sample) in samples.iter().enumerate() {
        writeln!(
            out,
            "{},{},{},{},{},{},{},{}",
            i + 1,
            field(sample.longitude),
            field(sample.latitude),
            field(sample.altitude),
            field(sample.speed),
            field(sample.satellite_count),
            escape_csv(sample.address.as_deref().unwrap_or("")),
            sample
                .captured_at
                .map(|t| t.format(WALL_CLOCK_FORMAT).to_string())
                .unwrap_or_default(),
        )?;
    }

    Ok(())
}

fn field<T: Display>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}
