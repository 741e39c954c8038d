pub mod command;
pub mod render;
pub mod session;
pub mod shutdown;

use std::{io::IsTerminal, path::PathBuf, sync::Arc, time::Duration};

use anyhow::Result;
use clap::Parser;
use session::{InteractiveSession, SessionOptions};
use tokio::io::BufReader;
use tokio_util::sync::CancellationToken;
use tracing::{info, level_filters::LevelFilter};

use crate::{
    export::DEFAULT_EXPORT_FILE,
    tracker::{
        limit::{DailyLimit, DEFAULT_DAILY_LIMIT_MINUTES},
        Tracker,
    },
    utils::{
        clock::{Clock, DefaultClock},
        dir::create_application_default_path,
        logging::{enable_logging, CLI_PREFIX},
        runtime::single_thread_runtime,
        time::format_duration,
    },
};

#[derive(Parser, Debug)]
#[command(name = "Screentime", version, long_about = None)]
#[command(
    about = "Track screen time with start/stop commands and get warned once a daily limit is reached"
)]
pub struct Args {
    #[arg(
        long = "daily-limit",
        default_value_t = DEFAULT_DAILY_LIMIT_MINUTES,
        help = "Daily screen time limit in minutes"
    )]
    daily_limit_minutes: u32,
    #[arg(
        long,
        default_value = DEFAULT_EXPORT_FILE,
        help = "File written by the export command"
    )]
    export_path: PathBuf,
    #[arg(
        long = "refresh-ms",
        default_value_t = 1000,
        value_parser = clap::value_parser!(u64).range(1..),
        help = "How often the elapsed time of an active session is refreshed"
    )]
    refresh_ms: u64,
    #[arg(
        long,
        help = "Application directory for logs. By default tries to save into $XDG_STATE_HOME or $HOME/.local/state"
    )]
    dir: Option<PathBuf>,
    /// This option is for debugging purposes only.
    #[arg(long = "log-console")]
    log_console: bool,
    #[arg(long = "log-filter")]
    log: Option<LevelFilter>,
}

/// Sets up logging and runs the interactive prompt on stdin/stdout until the user leaves.
pub fn run_cli(args: Args) -> Result<()> {
    let app_dir = args
        .dir
        .clone()
        .map_or_else(create_application_default_path, Ok)?;
    enable_logging(CLI_PREFIX, &app_dir.join("logs"), args.log, args.log_console)?;

    let runtime = single_thread_runtime()?;
    let result = runtime.block_on(run_session(args));
    // Stdin is read on a blocking thread that can't be interrupted, don't wait for it.
    runtime.shutdown_background();
    result
}

async fn run_session(args: Args) -> Result<()> {
    let clock: Arc<dyn Clock> = Arc::new(DefaultClock);
    let limit = DailyLimit::from_minutes(args.daily_limit_minutes);
    let tracker = Tracker::new(limit, clock.clone());

    let shutdown_token = CancellationToken::new();
    let shutdown = tokio::spawn(shutdown::detect_shutdown(shutdown_token.clone()));

    let session = InteractiveSession::new(
        tracker,
        clock,
        SessionOptions {
            export_path: args.export_path,
            refresh: Duration::from_millis(args.refresh_ms),
            colored: std::io::stdout().is_terminal(),
        },
        shutdown_token.clone(),
    );

    info!(
        "Starting session with a daily limit of {}",
        format_duration(limit.as_duration())
    );
    let result = session
        .run(BufReader::new(tokio::io::stdin()), tokio::io::stdout())
        .await;

    shutdown_token.cancel();
    shutdown.await?;
    let tracker = result?;
    info!(
        "Session finished with {} recorded entries",
        tracker.log().len()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use clap::Parser;

    use super::Args;

    #[test]
    fn test_default_args() {
        let args = Args::parse_from(["screentime"]);
        assert_eq!(args.daily_limit_minutes, 120);
        assert_eq!(args.export_path, PathBuf::from("usage_log.csv"));
        assert_eq!(args.refresh_ms, 1000);
        assert!(args.log.is_none());
    }

    #[test]
    fn test_custom_args() {
        let args = Args::parse_from([
            "screentime",
            "--daily-limit",
            "45",
            "--export-path",
            "/tmp/out.csv",
            "--refresh-ms",
            "250",
            "--log-filter",
            "info",
        ]);
        assert_eq!(args.daily_limit_minutes, 45);
        assert_eq!(args.export_path, PathBuf::from("/tmp/out.csv"));
        assert_eq!(args.refresh_ms, 250);
        assert!(args.log.is_some());
    }

    #[test]
    fn test_zero_refresh_rejected() {
        assert!(Args::try_parse_from(["screentime", "--refresh-ms", "0"]).is_err());
    }
}
