use std::io::{self, Write};

use super::escape::escape_json;
use crate::track::{Sample, TrackMetadata};

pub fn write_geojson<W: Write>(
    out: &mut W,
    metadata: &TrackMetadata,
    samples: &[Sample],
) -> io::Result<()> {
    writeln!(out, "{{")?;
    writeln!(out, r#"  "type": "FeatureCollection","#)?;
    writeln!(out, r#"  "features": ["#)?;
    writeln!(out, "    {{")?;
    writeln!(out, r#"      "type": "Feature","#)?;
    writeln!(out, r#"      "properties": {{"#)?;
    writeln!(out, r#"        "name": "{}","#, escape_json(metadata.display_name()))?;
    writeln!(
        out,
        r#"        "description": "{}","#,
        escape_json(metadata.display_description())
    )?;
    writeln!(out, r#"        "totalPoints": {}"#, samples.len())?;
    writeln!(out, "      }},")?;
    writeln!(out, r#"      "geometry": {{"#)?;
    writeln!(out, r#"        "type": "LineString","#)?;
    write!(out, r#"        "coordinates": ["#)?;

    let mut first = true;
    for sample in samples {
        let Some((lon, lat)) = sample.position() else {
            continue;
        };
        if !first {
            write!(out, ",")?;
        }
        first = false;
        write!(out, "\n          [{}, {}", lon, lat)?;
        if let Some(alt) = sample.elevation() {
            write!(out, ", {}", alt)?;
        }
        write!(out, "]")?;
    }

    writeln!(out)?;
    writeln!(out, "        ]")?;
    writeln!(out, "      }}")?;
    writeln!(out, "    }}")?;
    writeln!(out, "  ]")?;
    writeln!(out, "}}")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    fn render(metadata: &TrackMetadata, samples: &[Sample]) -> Value {
        let mut out = Vec::new();
        write_geojson(&mut out, metadata, samples).unwrap();
        serde_json::from_slice(&out).unwrap()
    }

    #[test]
    fn coordinates_only_for_located_samples() {
        let samples = vec![
            Sample::new(1.0, 2.0),
            Sample {
                latitude: Some(3.0),
                ..Default::default()
            },
            Sample {
                altitude: Some(7.25),
                ..Sample::new(4.5, 5.5)
            },
            Sample::default(),
        ];
        let doc = render(&TrackMetadata::named("Loop"), &samples);

        assert_eq!(doc["type"], "FeatureCollection");
        let feature = &doc["features"][0];
        let coords = feature["geometry"]["coordinates"].as_array().unwrap();
        assert_eq!(coords.len(), 2);
        assert_eq!(coords[1], serde_json::json!([4.5, 5.5, 7.25]));
        assert_eq!(feature["properties"]["totalPoints"], 4);
        assert_eq!(feature["properties"]["name"], "Loop");
    }

    #[test]
    fn trailing_unlocated_sample_keeps_json_valid() {
        let samples = vec![Sample::new(1.0, 2.0), Sample::default()];
        let doc = render(&TrackMetadata::default(), &samples);
        assert_eq!(doc["features"][0]["geometry"]["coordinates"].as_array().unwrap().len(), 1);
    }

    #[test]
    fn non_finite_values_keep_json_valid() {
        let samples = vec![
            Sample::new(f64::NAN, 2.0),
            Sample {
                altitude: Some(f64::INFINITY),
                ..Sample::new(4.5, 5.5)
            },
        ];
        let doc = render(&TrackMetadata::default(), &samples);
        let coords = doc["features"][0]["geometry"]["coordinates"].as_array().unwrap();
        assert_eq!(coords.len(), 1);
        assert_eq!(coords[0], serde_json::json!([4.5, 5.5]));
    }

    #[test]
    fn empty_track_is_valid() {
        let doc = render(&TrackMetadata::default(), &[]);
        assert!(doc["features"][0]["geometry"]["coordinates"].as_array().unwrap().is_empty());
        assert_eq!(doc["features"][0]["properties"]["name"], "Untitled Track");
    }

    #[test]
    fn escapes_string_properties() {
        let metadata = TrackMetadata {
            name: Some("say \"hi\"".into()),
            description: Some("line one\nline\ttwo \\".into()),
            ..Default::default()
        };
        let doc = render(&metadata, &[]);
        let props = &doc["features"][0]["properties"];
        assert_eq!(props["name"], "say \"hi\"");
        assert_eq!(props["description"], "line one\nline\ttwo \\");
    }
}
