//! Non-interactive search.
//!
//! Runs one search through the same controller and worker the terminal UI
//! uses and prints the rows, or the empty-state notice, to stdout.

use std::io::Write;

use anyhow::{Context, Result};
use tokio::runtime::Handle;
use tokio::sync::mpsc::UnboundedReceiver;

use crate::controller::{Controller, ScreenView};
use crate::worker::{FetchOutcome, Worker};

/// Search for `term`, print the results, and optionally open result `open` (1-based).
pub fn run(
    mut controller: Controller, worker: &Worker, mut outcomes: UnboundedReceiver<FetchOutcome>, runtime: Handle,
    term: &str, open: Option<usize>, out: &mut impl Write,
) -> Result<()> {
    if let Some(ticket) = controller.search(term) {
        worker.dispatch(ticket);

        while let Some(outcome) = runtime.block_on(outcomes.recv()) {
            if controller.complete(outcome.generation, outcome.result) {
                break;
            }
        }
    }

    write_view(&controller.view(), out).context("write results")?;

    if let Some(n) = open {
        let opened = n.checked_sub(1).is_some_and(|idx| controller.select(idx));
        if !opened {
            writeln!(out, "result {n} has no link to open").context("write results")?;
        }
    }

    Ok(())
}

fn write_view(view: &ScreenView, out: &mut impl Write) -> std::io::Result<()> {
    if view.rows.is_empty() {
        return writeln!(out, "{}", view.notice.unwrap_or("No books found"));
    }

    for (idx, row) in view.rows.iter().enumerate() {
        let authors = if row.authors.is_empty() { "unknown author" } else { row.authors.as_str() };
        let link = row.link.as_deref().unwrap_or("-");
        writeln!(out, "{:>2}. {} | {} | {}", idx + 1, row.title, authors, link)?;
    }
    Ok(())
}
