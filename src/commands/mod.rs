pub mod add;
pub mod delete;
pub mod list;
pub mod shell;
pub mod update;

use anyhow::{Context, Result};
use eventdesk_core::{EventApi, EventStore};

use crate::utils::tui::create_spinner;

/// Fetch the list with a spinner, failing the command on any error.
pub async fn load<A: EventApi>(store: &mut EventStore<A>) -> Result<()> {
    let spinner = create_spinner("Loading events...");
    let result = store.load().await;
    spinner.finish_and_clear();
    result.context("Failed to load events")
}
