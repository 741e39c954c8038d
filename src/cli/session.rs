use std::{io, path::PathBuf, sync::Arc, time::Duration};

use anyhow::Result;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tokio_stream::{wrappers::LinesStream, StreamExt};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::{
    export::write_export,
    tracker::{error::TrackerError, Tracker},
    utils::clock::Clock,
};

use super::{
    command::{is_confirmation, parse_line, PromptCommand},
    render::{self, Painter},
};

pub struct SessionOptions {
    pub export_path: PathBuf,
    pub refresh: Duration,
    pub colored: bool,
}

enum Flow {
    Continue,
    Quit,
}

/// Interactive front end for a [Tracker]. Reads one command per line, writes what the user should
/// see, and periodically re-renders the elapsed time of an open session.
pub struct InteractiveSession {
    tracker: Tracker,
    clock: Arc<dyn Clock>,
    options: SessionOptions,
    painter: Painter,
    shutdown: CancellationToken,
    awaiting_reset_confirmation: bool,
    last_elapsed: Option<String>,
}

impl InteractiveSession {
    pub fn new(
        tracker: Tracker,
        clock: Arc<dyn Clock>,
        options: SessionOptions,
        shutdown: CancellationToken,
    ) -> Self {
        Self {
            tracker,
            clock,
            painter: Painter::new(options.colored),
            options,
            shutdown,
            awaiting_reset_confirmation: false,
            last_elapsed: None,
        }
    }

    /// Executes the prompt loop until `quit`, end of input or shutdown. Returns the tracker so the
    /// caller can inspect what was recorded.
    pub async fn run(
        mut self,
        input: impl AsyncBufRead + Unpin,
        mut output: impl AsyncWrite + Unpin,
    ) -> Result<Tracker> {
        let mut lines = LinesStream::new(input.lines());
        let mut refresh_point = self.clock.instant() + self.options.refresh;

        loop {
            tokio::select! {
                biased;
                _ = self.shutdown.cancelled() => break,
                line = lines.next() => {
                    let line = match line {
                        None => {
                            debug!("Input closed");
                            break;
                        }
                        Some(Ok(line)) => line,
                        Some(Err(e)) if e.kind() == io::ErrorKind::InvalidData => {
                            warn!("Skipping unreadable input line: {e}");
                            let message = self.painter.rejection(render::UNREADABLE_LINE);
                            write_line(&mut output, &message).await?;
                            continue;
                        }
                        Some(Err(e)) => return Err(e.into()),
                    };
                    if let Flow::Quit = self.handle_line(&line, &mut output).await? {
                        break;
                    }
                }
                _ = self.clock.sleep_until(refresh_point) => {
                    refresh_point += self.options.refresh;
                    self.refresh(&mut output).await?;
                }
            }
        }

        if let Some(elapsed) = self.tracker.elapsed() {
            warn!(
                "Exiting with an open session of {}ms, it is not recorded",
                elapsed.num_milliseconds()
            );
        }
        output.flush().await?;
        Ok(self.tracker)
    }

    /// Re-renders the elapsed time. Only writes when the displayed text changes.
    async fn refresh(&mut self, output: &mut (impl AsyncWrite + Unpin)) -> Result<()> {
        let Some(elapsed) = self.tracker.elapsed() else {
            self.last_elapsed = None;
            return Ok(());
        };
        let text = render::elapsed(elapsed);
        if self.last_elapsed.as_ref() != Some(&text) {
            write_line(output, &text).await?;
            self.last_elapsed = Some(text);
        }
        Ok(())
    }

    async fn handle_line(
        &mut self,
        line: &str,
        output: &mut (impl AsyncWrite + Unpin),
    ) -> Result<Flow> {
        if self.awaiting_reset_confirmation {
            self.awaiting_reset_confirmation = false;
            if is_confirmation(line) {
                self.reset(output).await?;
                return Ok(Flow::Continue);
            }
            write_line(output, render::RESET_CANCELLED).await?;
            // A command typed instead of an answer still runs
            if !matches!(parse_line(line), Some(Ok(_))) {
                return Ok(Flow::Continue);
            }
        }

        match parse_line(line) {
            None => Ok(Flow::Continue),
            Some(Err(e)) => {
                debug!("Unparsed input {line:?}: {:?}", e.kind());
                write_line(output, e.to_string().trim_end()).await?;
                Ok(Flow::Continue)
            }
            Some(Ok(command)) => self.apply(command, output).await,
        }
    }

    async fn apply(
        &mut self,
        command: PromptCommand,
        output: &mut (impl AsyncWrite + Unpin),
    ) -> Result<Flow> {
        info!("Applying {command:?}");
        match command {
            PromptCommand::Start => match self.tracker.start() {
                Ok(_) => {
                    self.last_elapsed = None;
                    write_line(output, render::TRACKING_STARTED).await?;
                    self.refresh(output).await?;
                }
                Err(e) => self.reject(output, e).await?,
            },
            PromptCommand::Stop => match self.tracker.stop() {
                Ok(report) => {
                    self.last_elapsed = None;
                    write_line(output, &render::last_session(report.entry.duration())).await?;
                    write_line(output, &render::total_usage(report.total_usage)).await?;
                    if report.limit_exceeded {
                        write_line(output, &self.painter.warning(render::LIMIT_WARNING)).await?;
                    }
                }
                Err(e) => self.reject(output, e).await?,
            },
            PromptCommand::Export { path } => {
                let path = path.unwrap_or_else(|| self.options.export_path.clone());
                let exported = match self.tracker.export_csv() {
                    Ok(csv) => write_export(&path, &csv).await,
                    Err(e) => Err(e),
                };
                match exported {
                    Ok(()) => write_line(output, &render::exported(&path)).await?,
                    Err(e) => self.reject(output, e).await?,
                }
            }
            PromptCommand::View => match self.tracker.view() {
                Ok(listing) => write_line(output, listing.trim_end()).await?,
                Err(e) => self.reject(output, e).await?,
            },
            PromptCommand::Reset { yes: true } => self.reset(output).await?,
            PromptCommand::Reset { yes: false } => {
                self.awaiting_reset_confirmation = true;
                write_line(output, render::RESET_QUESTION).await?;
            }
            PromptCommand::Status => {
                let status = render::status(
                    self.tracker.elapsed(),
                    self.tracker.total_usage(),
                    self.tracker.today_usage(),
                    self.tracker.limit(),
                );
                write_line(output, &status).await?;
            }
            PromptCommand::Quit => return Ok(Flow::Quit),
        }
        Ok(Flow::Continue)
    }

    async fn reset(&mut self, output: &mut (impl AsyncWrite + Unpin)) -> Result<()> {
        self.tracker.reset();
        write_line(output, render::RESET_DONE).await?;
        write_line(output, &render::total_usage(self.tracker.total_usage())).await
    }

    async fn reject(
        &self,
        output: &mut (impl AsyncWrite + Unpin),
        error: TrackerError,
    ) -> Result<()> {
        warn!("Command rejected: {error:?}");
        write_line(output, &self.painter.rejection(&error.to_string())).await
    }
}

async fn write_line(output: &mut (impl AsyncWrite + Unpin), text: &str) -> Result<()> {
    output.write_all(text.as_bytes()).await?;
    output.write_all(b"\n").await?;
    output.flush().await?;
    Ok(())
}
