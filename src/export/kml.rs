use std::io::{self, Write};

use super::escape::escape_xml;
use crate::track::{Sample, TrackMetadata};

const LINE_COLOR: &str = "ff0078d4";
const LINE_WIDTH: u32 = 4;

pub fn write_kml<W: Write>(
    out: &mut W,
    metadata: &TrackMetadata,
    samples: &[Sample],
) -> io::Result<()> {
    let name = escape_xml(metadata.display_name());
    let desc = escape_xml(metadata.display_description());

    writeln!(out, r#"<?xml version="1.0" encoding="UTF-8"?>"#)?;
    writeln!(out, r#"<kml xmlns="http://www.opengis.net/kml/2.2">"#)?;
    writeln!(out, "  <Document>")?;
    writeln!(out, "    <name>{}</name>", name)?;
    writeln!(out, "    <description>{}</description>", desc)?;
    writeln!(out, r#"    <Style id="trackStyle">"#)?;
    writeln!(out, "      <LineStyle>")?;
    writeln!(out, "        <color>{}</color>", LINE_COLOR)?;
    writeln!(out, "        <width>{}</width>", LINE_WIDTH)?;
    writeln!(out, "      </LineStyle>")?;
    writeln!(out, "    </Style>")?;
    writeln!(out, "    <Placemark>")?;
    writeln!(out, "      <name>{}</name>", name)?;
    writeln!(out, "      <styleUrl>#trackStyle</styleUrl>")?;
    writeln!(out, "      <LineString>")?;
    writeln!(out, "        <tessellate>1</tessellate>")?;
    writeln!(out, "        <coordinates>")?;

    for sample in samples {
        let Some((lon, lat)) = sample.position() else {
            continue;
        };
        write!(out, "          {},{}", lon, lat)?;
        if let Some(alt) = sample.elevation() {
            write!(out, ",{}", alt)?;
        }
        writeln!(out)?;
    }

    writeln!(out, "        </coordinates>")?;
    writeln!(out, "      </LineString>")?;
    writeln!(out, "    </Placemark>")?;
    writeln!(out, "  </Document>")?;
    writeln!(out, "</kml>")?;
    Ok(())
}
