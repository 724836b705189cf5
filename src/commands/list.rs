use anyhow::Result;
use eventdesk_core::{EventApi, EventStore};

use crate::view::EventView;

pub async fn run<A: EventApi>(mut store: EventStore<A>) -> Result<()> {
    super::load(&mut store).await?;
    println!("{}", EventView::new().render(store.events()));
    Ok(())
}
