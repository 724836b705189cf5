use anyhow::{Context, Result};
use eventdesk_core::event::normalize_date;
use eventdesk_core::{EventApi, EventDraft, EventId, EventStore};
use owo_colors::OwoColorize;

use crate::utils::tui::create_spinner;

/// Replace an event's fields. Dates that are not given keep their current
/// value; an empty string clears them.
pub async fn run<A: EventApi>(
    mut store: EventStore<A>,
    id: EventId,
    name: String,
    start: Option<String>,
    end: Option<String>,
) -> Result<()> {
    super::load(&mut store).await?;

    // PUT replaces the whole record, so start from what we know of it.
    let mut draft = store
        .get(&id)
        .map(|e| e.draft())
        .unwrap_or_else(EventDraft::blank);
    draft.name = name;
    if let Some(start) = start {
        draft.start_date = Some(normalize_date(&start)?);
    }
    if let Some(end) = end {
        draft.end_date = Some(normalize_date(&end)?);
    }
    draft.validate()?;

    let spinner = create_spinner("Saving event...");
    let result = store.update(&id, draft).await;
    spinner.finish_and_clear();
    let event = result.with_context(|| format!("Failed to update event {}", id))?;

    println!("{} {} {}", "~".yellow(), event.to_string().yellow(), format!("(id {})", event.id).dimmed());
    Ok(())
}
