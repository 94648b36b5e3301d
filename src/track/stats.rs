use std::str::FromStr;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;

use super::types::Sample;

pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

#[derive(Debug, Clone, Default, PartialEq, Serialize, utoipa::ToSchema)]
pub struct Summary {
    pub total_points: usize,
    pub total_distance: f64,
    pub average_speed: f64,
    pub max_speed: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub altitude_change: Option<f64>,
}

/// Summarize a track in the order its samples are given.
///
/// Segments whose endpoints lack a coordinate are skipped. The average speed
/// is taken over every sample, including those without a speed reading.
pub fn compute(samples: &[Sample]) -> Summary {
    let mut summary = Summary {
        total_points: samples.len(),
        ..Default::default()
    };

    if samples.is_empty() {
        return summary;
    }

    let mut total_speed = 0.0;
    let mut altitude_range: Option<(f64, f64)> = None;

    for sample in samples {
        if let Some(speed) = sample.speed {
            total_speed += speed;
            if speed > summary.max_speed {
                summary.max_speed = speed;
            }
        }

        if let Some(alt) = sample.elevation() {
            altitude_range = Some(match altitude_range {
                Some((min, max)) => (min.min(alt), max.max(alt)),
                None => (alt, alt),
            });
        }
    }

    summary.average_speed = round2(total_speed / samples.len() as f64);
    summary.altitude_change = altitude_range.map(|(min, max)| max - min);

    summary.total_distance = samples
        .windows(2)
        .filter_map(|pair| {
            let (lon1, lat1) = pair[0].position()?;
            let (lon2, lat2) = pair[1].position()?;
            Some(haversine_distance(lat1, lon1, lat2, lon2))
        })
        .sum();

    log::debug!(
        "summarized {} samples: {:.1} m",
        summary.total_points,
        summary.total_distance
    );

    summary
}

/// Great-circle distance in meters between two points given in degrees.
pub fn haversine_distance(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let d_lat = (lat2 - lat1).to_radians();
    let d_lon = (lon2 - lon1).to_radians();

    let a = (d_lat / 2.0).sin().powi(2)
        + lat1.to_radians().cos() * lat2.to_radians().cos() * (d_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_M * c
}

// Rounds the shortest decimal form of `value`, so 1.005 becomes 1.01.
fn round2(value: f64) -> f64 {
    Decimal::from_str(&value.to_string())
        .ok()
        .and_then(|d| {
            d.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
                .to_f64()
        })
        .unwrap_or_else(|| (value * 100.0).round() / 100.0)
}
