//! Interactive review shell
//!
//! Lines are collected into an email until a line containing only `.`;
//! the email is then classified and the prediction can be approved or
//! disapproved. Commands start with `:`.

use email_triage::{
    error::Result, FeedbackLog, GateMode, Pipeline, Session, SubmitOutcome, TriageConfig, Verdict,
};
use std::io::Write;
use std::path::PathBuf;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tracing::{debug, info, warn};

use super::helpers::{build_pipeline, feedback_log};

/// Shell input line, parsed
#[derive(Debug, PartialEq)]
pub enum ShellCommand {
    /// Part of the email being entered
    Text(String),
    Submit,
    Approve,
    Disapprove,
    Download(Option<PathBuf>),
    Clear,
    Help,
    Quit,
    Unknown(String),
}

pub fn parse_line(line: &str) -> ShellCommand {
    let trimmed = line.trim();
    if trimmed == "." {
        return ShellCommand::Submit;
    }

    let Some(cmd) = trimmed.strip_prefix(':') else {
        return ShellCommand::Text(line.to_string());
    };

    let mut parts = cmd.splitn(2, char::is_whitespace);
    let name = parts.next().unwrap_or("");
    let arg = parts.next().map(str::trim).filter(|a| !a.is_empty());

    match name {
        "approve" | "a" => ShellCommand::Approve,
        "disapprove" | "d" => ShellCommand::Disapprove,
        "download" | "dl" => ShellCommand::Download(arg.map(PathBuf::from)),
        "clear" | "c" => ShellCommand::Clear,
        "help" | "h" | "?" => ShellCommand::Help,
        "quit" | "q" | "exit" => ShellCommand::Quit,
        other => ShellCommand::Unknown(other.to_string()),
    }
}

/// Handle shell command
pub async fn handle(config: &TriageConfig, gate: Option<GateMode>) -> Result<()> {
    // Model must load before the shell starts
    let pipeline = build_pipeline(config, gate)?;
    let log = feedback_log(config);
    let reader = BufReader::new(tokio::io::stdin());
    let mut out = std::io::stdout();

    tokio::select! {
        result = run(&pipeline, &log, reader, &mut out) => result,
        _ = tokio::signal::ctrl_c() => {
            info!("Received interrupt, leaving shell");
            println!();
            Ok(())
        }
    }
}

/// Drive the shell over any line source
pub async fn run<R, W>(pipeline: &Pipeline<'_>, log: &FeedbackLog, reader: R, out: &mut W) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let mut session = Session::new();
    debug!(session = %session.id(), "Shell session started");

    writeln!(out, "📧 Email Classifier: Ontopic vs Offtopic (gate: {})", pipeline.gate())?;
    writeln!(out, "Paste the first email of a thread, then a line with a single '.' to submit.")?;
    writeln!(out, "Type :help for commands.")?;
    out.flush()?;

    let mut buffer = String::new();
    let mut lines = reader.lines();

    while let Some(line) = lines.next_line().await? {
        let result: Result<()> = match parse_line(&line) {
            ShellCommand::Text(text) => {
                buffer.push_str(&text);
                buffer.push('\n');
                Ok(())
            }
            ShellCommand::Submit => {
                let result = submit(&mut session, pipeline, &buffer, out);
                buffer.clear();
                result
            }
            ShellCommand::Approve => record(&session, log, Verdict::Approved, out),
            ShellCommand::Disapprove => record(&session, log, Verdict::Disapproved, out),
            ShellCommand::Download(path) => download(log, path, out),
            ShellCommand::Clear => {
                buffer.clear();
                writeln!(out, "Input cleared.").map_err(Into::into)
            }
            ShellCommand::Help => show_help(out),
            ShellCommand::Quit => break,
            ShellCommand::Unknown(name) => {
                writeln!(out, "Unknown command ':{}'. Type :help for commands.", name)
                    .map_err(Into::into)
            }
        };

        // Report and continue; only a failing stdout ends the loop
        if let Err(e) = result {
            warn!("Shell action failed: {}", e);
            writeln!(out, "⚠ {}", e)?;
        }
        out.flush()?;
    }

    debug!(session = %session.id(), "Shell session ended");
    Ok(())
}

fn submit<W: Write>(
    session: &mut Session,
    pipeline: &Pipeline<'_>,
    email: &str,
    out: &mut W,
) -> Result<()> {
    match session.submit(pipeline, email)? {
        SubmitOutcome::EmptyInput => writeln!(out, "⚠ Please enter an email.")?,
        SubmitOutcome::Classified(submission) => {
            writeln!(out, "🧠 Prediction: {}", submission.label().to_uppercase())?;
            writeln!(out, "Was this prediction correct? :approve / :disapprove")?;
        }
    }
    Ok(())
}

fn record<W: Write>(session: &Session, log: &FeedbackLog, verdict: Verdict, out: &mut W) -> Result<()> {
    // Feedback is only offered once a prediction exists
    let Some(submission) = session.last() else {
        writeln!(out, "Nothing to review yet. Submit an email first.")?;
        return Ok(());
    };

    submission.record(log, verdict)?;
    match verdict {
        Verdict::Approved => writeln!(out, "✅ Feedback recorded as approved.")?,
        Verdict::Disapproved => writeln!(out, "❌ Feedback recorded as disapproved.")?,
    }
    Ok(())
}

fn download<W: Write>(log: &FeedbackLog, path: Option<PathBuf>, out: &mut W) -> Result<()> {
    if !log.exists() {
        writeln!(out, "No feedback log yet.")?;
        return Ok(());
    }

    match path {
        Some(path) => {
            let mut file = std::fs::File::create(&path)?;
            let bytes = log.download(&mut file)?;
            writeln!(out, "📥 Saved {} bytes to {}", bytes, path.display())?;
        }
        None => {
            log.download(out)?;
        }
    }
    Ok(())
}

fn show_help<W: Write>(out: &mut W) -> Result<()> {
    writeln!(out, "Commands:")?;
    writeln!(out, "  .                   submit the email typed so far")?;
    writeln!(out, "  :approve, :a        the last prediction was correct")?;
    writeln!(out, "  :disapprove, :d     the last prediction was wrong")?;
    writeln!(out, "  :download [PATH]    save the feedback log (or print it)")?;
    writeln!(out, "  :clear              discard the email typed so far")?;
    writeln!(out, "  :quit               leave the shell")?;
    Ok(())
}
