use chrono::{DateTime, FixedOffset, Local, LocalResult, NaiveDateTime, Offset, TimeZone, Utc};

/// Zone in which sample capture times were recorded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum WallClock {
    /// The host's local zone.
    #[default]
    Local,
    /// A fixed offset from UTC, e.g. `+08:00`.
    Fixed(FixedOffset),
}

impl WallClock {
    pub fn utc() -> Self {
        WallClock::Fixed(Utc.fix())
    }

    pub fn from_offset(offset: &str) -> Option<Self> {
        offset.trim().parse::<FixedOffset>().ok().map(WallClock::Fixed)
    }

    pub fn to_utc(&self, wall: &NaiveDateTime) -> DateTime<Utc> {
        match self {
            WallClock::Local => resolve(&Local, wall),
            WallClock::Fixed(offset) => resolve(offset, wall),
        }
    }
}

// Ambiguous times take the earlier instant. Times inside a DST gap use the
// offset the zone reports for the same reading taken as UTC.
fn resolve<Tz: TimeZone>(zone: &Tz, wall: &NaiveDateTime) -> DateTime<Utc> {
    match zone.from_local_datetime(wall) {
        LocalResult::Single(dt) => dt.with_timezone(&Utc),
        LocalResult::Ambiguous(earliest, _) => earliest.with_timezone(&Utc),
        LocalResult::None => {
            let offset = zone.offset_from_utc_datetime(wall);
            Utc.from_utc_datetime(&(*wall - offset.fix()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn wall(h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(h, 0, 0)
            .unwrap()
    }

    #[test]
    fn fixed_offset_shifts_to_utc() {
        let clock = WallClock::from_offset("+08:00").unwrap();
        assert_eq!(clock.to_utc(&wall(10)).to_rfc3339(), "2024-01-01T02:00:00+00:00");
    }

    #[test]
    fn utc_clock_is_identity() {
        assert_eq!(WallClock::utc().to_utc(&wall(10)).naive_utc(), wall(10));
    }

    #[test]
    fn rejects_garbage_offset() {
        assert!(WallClock::from_offset("eight hours").is_none());
    }
}
