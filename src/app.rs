//! Startup wiring: configuration and the store/view/controller trio.

use anyhow::{Context, Result};
use eventdesk_core::{EventApi, EventStore, GlobalConfig};

use crate::controller::EventController;
use crate::view::EventView;

/// Load ~/.config/eventdesk/config.toml, letting `--url` win over `base_url`.
pub fn load_config(url: Option<String>) -> Result<GlobalConfig> {
    let mut config = GlobalConfig::load().context("Failed to load configuration")?;
    if let Some(url) = url {
        config.base_url = url;
    }
    Ok(config)
}

/// Build an isolated controller over `api`.
pub fn compose<A: EventApi>(api: A) -> EventController<A> {
    EventController::new(EventStore::new(api), EventView::new())
}
