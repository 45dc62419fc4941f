//! Interactive session: one analysis in flight at a time, newest wins
//!
//! Each `check` or `keyword` line starts a task tagged with a fresh
//! [`Generation`]. Starting another request supersedes the previous one;
//! a result whose generation is no longer current is dropped.

use anyhow::{Context, Result};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use seokit_core::session::Generation;
use seokit_core::{GenerationCounter, History, HistoryEntry};

use crate::Services;
use crate::render::{render_entry, render_history};

const PROMPT: &str = "seokit> ";

const HELP: &str = "\
Commands:
  check <url>       Fetch a page and run the SEO checklist
  keyword <text>    Score a keyword
  history           List recent results
  clear             Forget the history
  help              Show this help
  quit              Leave the shell";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    Check(String),
    Keyword(String),
    History,
    Clear,
    Help,
    Quit,
    Empty,
    Unknown(String),
}

impl ShellCommand {
    pub fn parse(line: &str) -> Self {
        let line = line.trim();
        let (head, rest) = line
            .split_once(char::is_whitespace)
            .map_or((line, ""), |(head, rest)| (head, rest.trim()));

        match head.to_ascii_lowercase().as_str() {
            "" => Self::Empty,
            "check" | "c" if !rest.is_empty() => Self::Check(rest.to_string()),
            "keyword" | "k" if !rest.is_empty() => Self::Keyword(rest.to_string()),
            "history" | "h" => Self::History,
            "clear" => Self::Clear,
            "help" | "?" => Self::Help,
            "quit" | "exit" | "q" => Self::Quit,
            _ => Self::Unknown(line.to_string()),
        }
    }
}

pub type Outcome = (Generation, Result<HistoryEntry, String>);

/// Session state owned by the shell loop
pub struct Session {
    services: Services,
    generations: GenerationCounter,
    history: History<HistoryEntry>,
    in_flight: Option<JoinHandle<()>>,
    results: mpsc::UnboundedSender<Outcome>,
}

impl Session {
    pub fn new(services: Services, results: mpsc::UnboundedSender<Outcome>) -> Self {
        Self {
            services,
            generations: GenerationCounter::new(),
            history: History::new(),
            in_flight: None,
            results,
        }
    }

    pub fn history(&self) -> &History<HistoryEntry> {
        &self.history
    }

    /// Start an analysis, superseding whatever was running
    pub fn start(&mut self, command: ShellCommand) {
        let generation = self.generations.begin();
        if let Some(previous) = self.in_flight.take() {
            previous.abort();
        }

        let services = self.services.clone();
        let results = self.results.clone();
        self.in_flight = Some(tokio::spawn(async move {
            let outcome = match command {
                ShellCommand::Check(input) => services.check_page(&input).await,
                ShellCommand::Keyword(input) => services.score_keyword(&input).await,
                _ => return,
            };
            let _ = results.send((generation, outcome.map_err(|e| format!("{e:#}"))));
        }));
    }

    /// Handle a finished analysis; returns the text to show, if any
    pub fn finish(&mut self, (generation, outcome): Outcome) -> Option<String> {
        if !self.generations.is_current(generation) {
            tracing::debug!(?generation, "dropping superseded result");
            return None;
        }
        self.in_flight = None;
        match outcome {
            Ok(entry) => {
                let text = render_entry(&entry);
                self.history.push(entry);
                Some(text)
            }
            Err(message) => Some(format!("Error: {message}\n")),
        }
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn clear(&mut self) {
        self.history.clear();
    }
}

pub async fn run_shell(services: Services) -> Result<()> {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut session = Session::new(services, tx);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();

    write_out(&mut stdout, &format!("{HELP}\n{PROMPT}")).await?;

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line.context("failed to read from stdin")? else {
                    break;
                };
                let output = match ShellCommand::parse(&line) {
                    command @ (ShellCommand::Check(_) | ShellCommand::Keyword(_)) => {
                        session.start(command);
                        String::new()
                    }
                    ShellCommand::History => render_history(session.history()),
                    ShellCommand::Clear => {
                        session.clear();
                        "History cleared\n".to_string()
                    }
                    ShellCommand::Help => format!("{HELP}\n"),
                    ShellCommand::Quit => return Ok(()),
                    ShellCommand::Empty => String::new(),
                    ShellCommand::Unknown(input) => format!("Unknown command: {input}\n"),
                };
                write_out(&mut stdout, &format!("{output}{PROMPT}")).await?;
            }
            Some(outcome) = rx.recv() => {
                if let Some(text) = session.finish(outcome) {
                    write_out(&mut stdout, &format!("\n{text}{PROMPT}")).await?;
                }
            }
        }
    }

    // stdin closed: let the running analysis finish before leaving
    if let Some(text) = wait_for_in_flight(&mut session, &mut rx).await {
        write_out(&mut stdout, &format!("\n{text}")).await?;
    }
    Ok(())
}

/// Wait for the running task to end, then pick up its result if it sent one.
/// Returns once the task is gone, including when it panicked or was aborted.
async fn wait_for_in_flight(
    session: &mut Session,
    rx: &mut mpsc::UnboundedReceiver<Outcome>,
) -> Option<String> {
    let task = session.in_flight.take()?;
    if let Err(err) = task.await {
        tracing::warn!(error = %err, "analysis task ended without a result");
    }

    let mut shown = None;
    while let Ok(outcome) = rx.try_recv() {
        if let Some(text) = session.finish(outcome) {
            shown = Some(text);
        }
    }
    shown
}

async fn write_out(stdout: &mut tokio::io::Stdout, text: &str) -> Result<()> {
    stdout.write_all(text.as_bytes()).await?;
    stdout.flush().await?;
    Ok(())
}
