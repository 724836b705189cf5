//! Core of eventdesk.
//!
//! - `event`: the `Event` record and `EventDraft` request body
//! - `api`: the `EventApi` trait and its HTTP implementation
//! - `store`: the client-side list, changed only after remote success
//! - `memory`: an in-process collection used by the dev server and tests

pub mod api;
pub mod config;
pub mod error;
pub mod event;
pub mod memory;
pub mod store;

pub use api::{EventApi, HttpEventApi};
pub use config::GlobalConfig;
pub use error::{EventDeskError, EventDeskResult};
pub use event::{Event, EventDraft, EventId};
pub use store::EventStore;
