mod clock;
mod stats;
mod types;

pub use clock::WallClock;
pub use stats::{compute, haversine_distance, Summary, EARTH_RADIUS_M};
pub use types::{parse_wall_clock, Sample, TrackMetadata, UNTITLED_TRACK};
