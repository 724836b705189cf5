use anyhow::{Context, Result};
use eventdesk_core::event::parse_date;
use eventdesk_core::{EventApi, EventDraft, EventStore};
use owo_colors::OwoColorize;

use crate::utils::tui::create_spinner;

/// Create an event. With no arguments this is the shell's blank `add`.
pub async fn run<A: EventApi>(
    mut store: EventStore<A>,
    name: String,
    start: Option<String>,
    end: Option<String>,
) -> Result<()> {
    let draft = EventDraft::new(
        name,
        parse_date(start.as_deref().unwrap_or_default())?,
        parse_date(end.as_deref().unwrap_or_default())?,
    );

    let spinner = create_spinner("Creating event...");
    let result = store.add(draft).await;
    spinner.finish_and_clear();
    let event = result.context("Failed to create event")?;

    println!("{} {} {}", "+".green(), event.to_string().green(), format!("(id {})", event.id).dimmed());
    Ok(())
}
