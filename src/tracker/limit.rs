use chrono::{DateTime, Duration, Utc};

use super::log::UsageLog;

pub const DEFAULT_DAILY_LIMIT_MINUTES: u32 = 2 * 60;

/// Amount of screen time allowed per day. Fixed for the lifetime of a [super::Tracker].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DailyLimit(Duration);

impl DailyLimit {
    pub fn from_minutes(minutes: u32) -> Self {
        Self(Duration::minutes(minutes.into()))
    }

    pub fn as_duration(&self) -> Duration {
        self.0
    }
}

impl Default for DailyLimit {
    fn default() -> Self {
        Self::from_minutes(DEFAULT_DAILY_LIMIT_MINUTES)
    }
}

/// True once usage started today reaches the limit. Reaching it exactly counts as exceeded.
pub fn exceeded(log: &UsageLog, now: DateTime<Utc>, limit: DailyLimit) -> bool {
    log.today_usage(now) >= limit.as_duration()
}

#[cfg(test)]
mod tests {
    use chrono::{DateTime, Duration, TimeZone, Utc};

    use crate::tracker::{entry::UsageEntry, log::UsageLog};

    use super::{exceeded, DailyLimit};

    fn log_of(start: DateTime<Utc>, sessions: &[i64]) -> UsageLog {
        let mut log = UsageLog::new();
        let mut at = start;
        for minutes in sessions {
            log.append(UsageEntry::between(at, at + Duration::minutes(*minutes)));
            at += Duration::minutes(*minutes + 10);
        }
        log
    }

    #[test]
    fn test_default_limit_is_two_hours() {
        assert_eq!(DailyLimit::default().as_duration(), Duration::hours(2));
    }

    #[test]
    fn test_three_sessions_cross_limit() {
        let start = Utc.with_ymd_and_hms(2018, 7, 4, 9, 0, 0).unwrap();
        let now = start + Duration::hours(4);

        assert!(!exceeded(&log_of(start, &[45, 45]), now, DailyLimit::default()));
        assert!(exceeded(&log_of(start, &[45, 45, 45]), now, DailyLimit::default()));
    }

    #[test]
    fn test_reaching_limit_exactly_is_exceeded() {
        let start = Utc.with_ymd_and_hms(2018, 7, 4, 9, 0, 0).unwrap();
        assert!(exceeded(
            &log_of(start, &[60, 60]),
            start + Duration::hours(3),
            DailyLimit::default()
        ));
        assert!(!exceeded(
            &log_of(start, &[60, 59]),
            start + Duration::hours(3),
            DailyLimit::default()
        ));
    }

    #[test]
    fn test_previous_days_do_not_count() {
        let yesterday = Utc.with_ymd_and_hms(2018, 7, 3, 9, 0, 0).unwrap();
        let log = log_of(yesterday, &[90, 90]);
        assert!(exceeded(&log, yesterday, DailyLimit::default()));
        assert!(!exceeded(&log, yesterday + Duration::days(1), DailyLimit::default()));
    }

    #[test]
    fn test_zero_limit_always_exceeded() {
        let now = Utc.with_ymd_and_hms(2018, 7, 4, 9, 0, 0).unwrap();
        assert!(exceeded(&UsageLog::new(), now, DailyLimit::from_minutes(0)));
    }
}
