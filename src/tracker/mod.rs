//! Core of screentime. [Tracker] owns everything a running instance knows:
//!  - the open session, if any ([session::TrackingSession]),
//!  - finished sessions ([log::UsageLog]),
//!  - the daily limit checked after every stop ([limit::DailyLimit]).
//!
//! Nothing here spawns timers or touches the terminal; the cli drives it one command at a time.

pub mod entry;
pub mod error;
pub mod limit;
pub mod log;
pub mod session;

use std::sync::Arc;

use chrono::{DateTime, Duration, Local, Utc};
use entry::UsageEntry;
use error::{LogAction, TrackerError};
use limit::DailyLimit;
use session::TrackingSession;
use tracing::{info, warn};

use crate::utils::{clock::Clock, time::format_duration};

/// Result of a successful stop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StopReport {
    pub entry: UsageEntry,
    pub total_usage: Duration,
    pub limit_exceeded: bool,
}

pub struct Tracker {
    session: TrackingSession,
    log: log::UsageLog,
    limit: DailyLimit,
    clock: Arc<dyn Clock>,
}

impl Tracker {
    pub fn new(limit: DailyLimit, clock: Arc<dyn Clock>) -> Self {
        Self {
            session: TrackingSession::default(),
            log: log::UsageLog::new(),
            limit,
            clock,
        }
    }

    pub fn start(&mut self) -> Result<DateTime<Utc>, TrackerError> {
        let now = self.clock.time();
        self.session.start(now)?;
        Ok(now)
    }

    /// Closes the open session, records it and consults the daily limit.
    pub fn stop(&mut self) -> Result<StopReport, TrackerError> {
        let now = self.clock.time();
        let entry = self.session.stop(now)?;
        self.log.append(entry.clone());

        let limit_exceeded = limit::exceeded(&self.log, now, self.limit);
        if limit_exceeded {
            warn!(
                "Daily limit of {} reached, {} used today",
                format_duration(self.limit.as_duration()),
                format_duration(self.log.today_usage(now))
            );
        }

        Ok(StopReport {
            entry,
            total_usage: self.log.total_usage(),
            limit_exceeded,
        })
    }

    pub fn is_tracking(&self) -> bool {
        self.session.is_active()
    }

    /// Time spent in the open session so far, [None] while idle.
    pub fn elapsed(&self) -> Option<Duration> {
        self.elapsed_since_start(self.clock.time())
    }

    pub fn elapsed_since_start(&self, now: DateTime<Utc>) -> Option<Duration> {
        self.session.elapsed_since_start(now)
    }

    pub fn total_usage(&self) -> Duration {
        self.log.total_usage()
    }

    pub fn today_usage(&self) -> Duration {
        self.log.today_usage(self.clock.time())
    }

    pub fn limit(&self) -> DailyLimit {
        self.limit
    }

    pub fn log(&self) -> &log::UsageLog {
        &self.log
    }

    /// Renders the log as a csv document in the local timezone.
    pub fn export_csv(&self) -> Result<String, TrackerError> {
        crate::export::to_csv(&self.log)
    }

    /// Human readable listing of every recorded session.
    pub fn view(&self) -> Result<String, TrackerError> {
        if self.log.is_empty() {
            return Err(TrackerError::EmptyLog {
                action: LogAction::View,
            });
        }

        let mut listing = String::from("Usage Log:\n");
        for entry in self.log.entries() {
            listing.push_str(&format!(
                "Start: {}, End: {}, Duration: {}\n",
                entry.start().with_timezone(&Local).to_rfc2822(),
                entry.end().with_timezone(&Local).to_rfc2822(),
                format_duration(entry.duration())
            ));
        }
        Ok(listing)
    }

    /// Drops every recorded session. An open session is kept running.
    pub fn reset(&mut self) {
        info!("Resetting usage log with {} entries", self.log.len());
        self.log.clear();
    }
}
