use std::io::{self, Write};

use chrono::{DateTime, SecondsFormat, Utc};

use super::escape::escape_xml;
use crate::track::{Sample, TrackMetadata, WallClock};

pub fn write_gpx<W: Write>(
    out: &mut W,
    metadata: &TrackMetadata,
    samples: &[Sample],
    clock: &WallClock,
) -> io::Result<()> {
    let name = escape_xml(metadata.display_name());
    let desc = escape_xml(metadata.display_description());

    writeln!(out, r#"<?xml version="1.0" encoding="UTF-8"?>"#)?;
    writeln!(
        out,
        r#"<gpx version="1.1" creator="TrackSystem" xmlns="http://www.topografix.com/GPX/1/1">"#
    )?;
    writeln!(out, "  <metadata>")?;
    writeln!(out, "    <name>{}</name>", name)?;
    writeln!(out, "    <desc>{}</desc>", desc)?;
    writeln!(
        out,
        "    <time>{}</time>",
        Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)
    )?;
    writeln!(out, "  </metadata>")?;
    writeln!(out, "  <trk>")?;
    writeln!(out, "    <name>{}</name>", name)?;
    writeln!(out, "    <desc>{}</desc>", desc)?;
    writeln!(out, "    <trkseg>")?;

    for sample in samples {
        let Some((lon, lat)) = sample.position() else {
            continue;
        };
        writeln!(out, r#"      <trkpt lat="{}" lon="{}">"#, lat, lon)?;
        if let Some(alt) = sample.elevation() {
            writeln!(out, "        <ele>{}</ele>", alt)?;
        }
        if let Some(captured_at) = &sample.captured_at {
            writeln!(out, "        <time>{}</time>", iso_instant(&clock.to_utc(captured_at)))?;
        }
        writeln!(out, "      </trkpt>")?;
    }

    writeln!(out, "    </trkseg>")?;
    writeln!(out, "  </trk>")?;
    writeln!(out, "</gpx>")?;
    Ok(())
}

fn iso_instant(time: &DateTime<Utc>) -> String {
    time.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}
