use chrono::{DateTime, Duration, Utc};

use crate::utils::time::day_bucket;

use super::entry::UsageEntry;

/// Chronological list of finished sessions. Entries are only ever appended; [UsageLog::clear] is
/// the single way to remove them.
#[derive(Debug, Default, Clone)]
pub struct UsageLog {
    entries: Vec<UsageEntry>,
}

impl UsageLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, entry: UsageEntry) {
        self.entries.push(entry);
    }

    pub fn total_usage(&self) -> Duration {
        self.entries
            .iter()
            .fold(Duration::zero(), |sum, entry| sum + entry.duration())
    }

    /// Sum of entries that started in the same fixed-size day as `now`.
    pub fn today_usage(&self, now: DateTime<Utc>) -> Duration {
        let today = day_bucket(now);
        self.entries
            .iter()
            .filter(|entry| day_bucket(entry.start()) == today)
            .fold(Duration::zero(), |sum, entry| sum + entry.duration())
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn entries(&self) -> impl ExactSizeIterator<Item = &UsageEntry> + Clone + '_ {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use chrono::{DateTime, Duration, TimeZone, Utc};

    use super::{UsageEntry, UsageLog};

    fn session(start: DateTime<Utc>, minutes: i64) -> UsageEntry {
        UsageEntry::between(start, start + Duration::minutes(minutes))
    }

    fn day_start() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2018, 7, 4, 0, 0, 0).unwrap()
    }

    #[test]
    fn test_total_usage_is_sum() {
        let mut log = UsageLog::new();
        assert_eq!(log.total_usage(), Duration::zero());

        let durations = [5, 45, 17, 120];
        for (i, minutes) in durations.iter().enumerate() {
            log.append(session(day_start() + Duration::hours(i as i64 * 3), *minutes));
        }

        assert_eq!(log.len(), 4);
        assert_eq!(
            log.total_usage(),
            Duration::minutes(durations.iter().sum::<i64>())
        );
    }

    #[test]
    fn test_today_usage_only_counts_same_day() {
        let mut log = UsageLog::new();
        log.append(session(day_start() - Duration::hours(2), 30));
        log.append(session(day_start() + Duration::hours(1), 45));
        log.append(session(day_start() + Duration::hours(20), 10));
        log.append(session(day_start() + Duration::days(1), 60));

        let now = day_start() + Duration::hours(23);
        assert_eq!(log.today_usage(now), Duration::minutes(55));
    }

    #[test]
    fn test_today_usage_uses_start_of_entry() {
        let mut log = UsageLog::new();
        // Started yesterday, finished today
        log.append(session(day_start() - Duration::minutes(30), 60));

        assert_eq!(log.today_usage(day_start() + Duration::hours(1)), Duration::zero());
        assert_eq!(
            log.today_usage(day_start() - Duration::minutes(1)),
            Duration::minutes(60)
        );
    }

    #[test]
    fn test_clear_empties_log() {
        let mut log = UsageLog::new();
        log.append(session(day_start(), 30));
        log.append(session(day_start() + Duration::hours(1), 30));
        assert!(!log.is_empty());

        log.clear();

        assert!(log.is_empty());
        assert_eq!(log.total_usage(), Duration::zero());
        assert_eq!(log.entries().count(), 0);

        log.clear();
        assert!(log.is_empty());
    }

    #[test]
    fn test_entries_keep_insertion_order() {
        let mut log = UsageLog::new();
        let first = session(day_start(), 1);
        let second = session(day_start() + Duration::hours(1), 2);
        log.append(first.clone());
        log.append(second.clone());

        let entries = log.entries();
        assert_eq!(entries.clone().collect::<Vec<_>>(), vec![&first, &second]);
        // Iteration can be restarted
        assert_eq!(entries.count(), 2);
    }
}
