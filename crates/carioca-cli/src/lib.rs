pub mod command;
pub mod config;
pub mod logging;
pub mod session;

use std::io::Write;
use std::time::Instant;

use anyhow::{Context, Result};
use carioca_core::PlayStore;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::{debug, warn};

use crate::command::{Command, HELP};
use crate::session::Session;

/// Reads one command per line until `quit` or end of input, printing the hand
/// and the current message after every command that changes them.
pub async fn run_session<S, R, W>(session: &mut Session<S>, input: R, output: &mut W) -> Result<()>
where
    S: PlayStore,
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let mut lines = input.lines();
    while let Some(line) = lines.next_line().await.context("reading command")? {
        if line.trim().is_empty() || line.trim_start().starts_with('#') {
            continue;
        }
        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(err) => {
                warn!(line = %line.trim(), error = %err, "rejected command");
                writeln!(output, "error: {err}")?;
                continue;
            }
        };
        debug!(?command, "applying command");

        match command {
            Command::Add { rank, suit } => session.add_card(&rank, suit),
            Command::Remove(card) => match session.resolve(&card) {
                Some(id) => session.remove_card(id),
                None => {
                    writeln!(output, "error: no single card matches {card:?}")?;
                    continue;
                }
            },
            Command::SortByRank => session.sort_by_rank(),
            Command::SortBySuit => session.sort_by_suit(),
            Command::Group => session.group_by_runs(),
            Command::Validate => {
                let outcome = session.validate().await;
                if outcome.is_failure() {
                    warn!(message = %outcome.message(), "validation did not complete");
                }
            }
            Command::Show => {}
            Command::Clear => session.clear(),
            Command::Help => {
                writeln!(output, "{HELP}")?;
                continue;
            }
            Command::Quit => break,
        }

        writeln!(output, "{}", session.render())?;
        if let Some(message) = session.message(Instant::now()) {
            writeln!(output, ">> {message}")?;
        }
    }
    output.flush()?;
    Ok(())
}
