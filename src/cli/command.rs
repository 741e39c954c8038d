use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// One line typed into the interactive prompt. Parsed with clap in multicall mode, so the first
/// word is the command itself and `help` is generated.
#[derive(Parser, Debug)]
#[command(multicall = true)]
struct PromptLine {
    #[command(subcommand)]
    command: PromptCommand,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum PromptCommand {
    #[command(about = "Start tracking screen time")]
    Start,
    #[command(about = "Stop tracking and record the session")]
    Stop,
    #[command(about = "Export the usage log as csv")]
    Export {
        #[arg(help = "Target file. Defaults to the --export-path given at startup")]
        path: Option<PathBuf>,
    },
    #[command(about = "List every recorded session")]
    View,
    #[command(about = "Remove every recorded session")]
    Reset {
        #[arg(short, long, help = "Skip the confirmation question")]
        yes: bool,
    },
    #[command(about = "Show the current session and usage totals")]
    Status,
    #[command(about = "Leave screentime", alias = "exit")]
    Quit,
}

/// Returns [None] for blank lines. Errors carry clap's rendered message, including help output.
pub fn parse_line(line: &str) -> Option<Result<PromptCommand, clap::Error>> {
    let words = line.split_whitespace().collect::<Vec<_>>();
    if words.is_empty() {
        return None;
    }
    Some(PromptLine::try_parse_from(words).map(|v| v.command))
}

/// Answer to a yes/no question. Anything but an explicit yes is a no.
pub fn is_confirmation(line: &str) -> bool {
    matches!(line.trim().to_lowercase().as_str(), "y" | "yes")
}
