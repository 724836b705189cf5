use anyhow::{Context, Result};
use eventdesk_core::{EventApi, EventId, EventStore};
use owo_colors::OwoColorize;

use crate::utils::tui::create_spinner;

pub async fn run<A: EventApi>(mut store: EventStore<A>, id: EventId) -> Result<()> {
    let spinner = create_spinner("Deleting event...");
    let result = store.delete(&id).await;
    spinner.finish_and_clear();
    result.with_context(|| format!("Failed to delete event {}", id))?;

    println!("{} {}", "-".red(), format!("Deleted event {}", id).red());
    Ok(())
}
