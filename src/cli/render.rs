use std::path::Path;

use ansi_term::{Colour, Style};
use chrono::Duration;

use crate::{tracker::limit::DailyLimit, utils::time::format_duration};

pub const TRACKING_STARTED: &str = "Tracking started...";
pub const LIMIT_WARNING: &str = "You have exceeded your daily screen time limit!";
pub const RESET_QUESTION: &str = "Are you sure you want to reset the usage log? [y/N]";
pub const RESET_DONE: &str = "Usage log reset.";
pub const RESET_CANCELLED: &str = "Reset cancelled.";
pub const UNREADABLE_LINE: &str = "Input line is not valid UTF-8, ignored.";

/// Decides whether output gets terminal colours.
#[derive(Debug, Clone, Copy)]
pub struct Painter {
    colored: bool,
}

impl Painter {
    pub fn new(colored: bool) -> Self {
        Self { colored }
    }

    pub fn paint(&self, style: Style, text: &str) -> String {
        if self.colored {
            style.paint(text).to_string()
        } else {
            text.to_string()
        }
    }

    pub fn warning(&self, text: &str) -> String {
        self.paint(Colour::Red.bold(), text)
    }

    pub fn rejection(&self, text: &str) -> String {
        self.paint(Colour::Yellow.normal(), text)
    }
}

pub fn elapsed(duration: Duration) -> String {
    format!("Elapsed Time: {}", format_duration(duration))
}

pub fn last_session(duration: Duration) -> String {
    format!("Last session duration: {}", format_duration(duration))
}

pub fn total_usage(duration: Duration) -> String {
    format!("Total Usage: {}", format_duration(duration))
}

pub fn exported(path: &Path) -> String {
    format!("Usage log exported to {} successfully!", path.display())
}

pub fn status(
    elapsed: Option<Duration>,
    total: Duration,
    today: Duration,
    limit: DailyLimit,
) -> String {
    let session = match elapsed {
        Some(v) => format!("Tracking for {}", format_duration(v)),
        None => "Not tracking".to_string(),
    };
    format!(
        "{session}\n{}\nToday: {} of {}",
        total_usage(total),
        format_duration(today),
        format_duration(limit.as_duration())
    )
}
