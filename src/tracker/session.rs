use chrono::{DateTime, Duration, Utc};
use tracing::{info, warn};

use super::{entry::UsageEntry, error::TrackerError};

/// At most one open session exists at a time. The start instant only lives inside
/// [TrackingSession::Tracking], so it can't be read while idle.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum TrackingSession {
    #[default]
    Idle,
    Tracking { start: DateTime<Utc> },
}

impl TrackingSession {
    pub fn is_active(&self) -> bool {
        matches!(self, TrackingSession::Tracking { .. })
    }

    pub fn start_time(&self) -> Option<DateTime<Utc>> {
        match self {
            TrackingSession::Idle => None,
            TrackingSession::Tracking { start } => Some(*start),
        }
    }

    /// Opens a session at `now`. Rejected without any change when one is already open.
    pub fn start(&mut self, now: DateTime<Utc>) -> Result<(), TrackerError> {
        match self {
            TrackingSession::Tracking { start } => {
                warn!("Start requested while tracking since {start}");
                Err(TrackerError::AlreadyTracking)
            }
            TrackingSession::Idle => {
                *self = TrackingSession::Tracking { start: now };
                info!("Tracking started at {now}");
                Ok(())
            }
        }
    }

    /// Closes the open session at `now` and hands back the finished interval.
    pub fn stop(&mut self, now: DateTime<Utc>) -> Result<UsageEntry, TrackerError> {
        match *self {
            TrackingSession::Idle => {
                warn!("Stop requested without an active session");
                Err(TrackerError::NotTracking)
            }
            TrackingSession::Tracking { start } => {
                let entry = UsageEntry::between(start, now);
                *self = TrackingSession::Idle;
                info!(
                    "Tracking stopped at {}, session lasted {}ms",
                    entry.end(),
                    entry.duration().num_milliseconds()
                );
                Ok(entry)
            }
        }
    }

    /// Time spent in the open session up to `now`. Purely a query, used for display refreshes.
    pub fn elapsed_since_start(&self, now: DateTime<Utc>) -> Option<Duration> {
        self.start_time()
            .map(|start| (now - start).max(Duration::zero()))
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone, Utc};

    use crate::tracker::error::TrackerError;

    use super::TrackingSession;

    #[test]
    fn test_session_transitions() {
        let now = Utc.with_ymd_and_hms(2018, 7, 4, 10, 0, 0).unwrap();
        let mut session = TrackingSession::default();
        assert!(!session.is_active());
        assert_eq!(session.elapsed_since_start(now), None);

        session.start(now).unwrap();
        assert!(session.is_active());
        assert_eq!(session.start_time(), Some(now));
        assert_eq!(
            session.elapsed_since_start(now + Duration::seconds(61)),
            Some(Duration::seconds(61))
        );

        let entry = session.stop(now + Duration::minutes(5)).unwrap();
        assert_eq!(entry.start(), now);
        assert_eq!(entry.duration(), Duration::minutes(5));
        assert_eq!(session, TrackingSession::Idle);
    }

    #[test]
    fn test_double_start_is_rejected() {
        let now = Utc.with_ymd_and_hms(2018, 7, 4, 10, 0, 0).unwrap();
        let mut session = TrackingSession::default();
        session.start(now).unwrap();

        let result = session.start(now + Duration::minutes(1));

        assert!(matches!(result, Err(TrackerError::AlreadyTracking)));
        assert_eq!(session.start_time(), Some(now));
    }

    #[test]
    fn test_stop_while_idle_is_rejected() {
        let now = Utc.with_ymd_and_hms(2018, 7, 4, 10, 0, 0).unwrap();
        let mut session = TrackingSession::default();

        assert!(matches!(session.stop(now), Err(TrackerError::NotTracking)));
        assert_eq!(session, TrackingSession::Idle);
    }

    #[test]
    fn test_elapsed_never_negative() {
        let now = Utc.with_ymd_and_hms(2018, 7, 4, 10, 0, 0).unwrap();
        let session = TrackingSession::Tracking { start: now };
        assert_eq!(
            session.elapsed_since_start(now - Duration::seconds(5)),
            Some(Duration::zero())
        );
    }
}
