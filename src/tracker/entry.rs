use chrono::{DateTime, Duration, Utc};

/// One finished tracking interval. The fields are private so `end >= start` and
/// `duration == end - start` hold for every entry that exists.
#[derive(PartialEq, Eq, Debug, Clone)]
pub struct UsageEntry {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    duration: Duration,
}

impl UsageEntry {
    /// Builds an entry between two instants. An `end` before `start` (wall clock moved backwards)
    /// is clamped to `start`, producing an empty interval.
    pub fn between(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        let end = end.max(start);
        Self {
            start,
            end,
            duration: end - start,
        }
    }

    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    pub fn end(&self) -> DateTime<Utc> {
        self.end
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }
}
