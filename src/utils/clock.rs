use async_trait::async_trait;
use chrono::{DateTime, DurationRound, TimeDelta, Utc};
use tokio::time::Instant;

/// Represents an entity responsible for providing dates across application. Tracking never reads
/// the system time directly, which lets tests move time forward by hand.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Clock: Sync + Send + 'static {
    fn time(&self) -> DateTime<Utc>;

    fn instant(&self) -> Instant;

    async fn sleep_until(&self, instant: tokio::time::Instant);
}

pub struct DefaultClock;

#[async_trait]
impl Clock for DefaultClock {
    fn time(&self) -> DateTime<Utc> {
        let now = Utc::now();
        // Usage entries carry millisecond resolution
        now.duration_trunc(TimeDelta::milliseconds(1)).unwrap_or(now)
    }

    fn instant(&self) -> Instant {
        Instant::now()
    }

    async fn sleep_until(&self, instant: tokio::time::Instant) {
        tokio::time::sleep_until(instant).await;
    }
}


#[cfg(test)]
mod tests {
    use super::{Clock, DefaultClock};

    #[test]
    fn test_default_clock_has_millisecond_resolution() {
        for _ in 0..100 {
            assert_eq!(DefaultClock.time().timestamp_subsec_nanos() % 1_000_000, 0);
        }
    }
}
