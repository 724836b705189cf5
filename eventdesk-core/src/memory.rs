//! In-process events collection.
//!
//! `MemoryCollection` follows the same rules as the REST service: ids are
//! assigned on create, unknown ids are "not found", order is insertion
//! order. `MemoryEventApi` puts it behind [`EventApi`] and records every
//! call it receives.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use serde_json::Value;

use crate::api::EventApi;
use crate::error::{EventDeskError, EventDeskResult};
use crate::event::{Event, EventDraft, EventId};

#[derive(Debug, Clone)]
pub struct MemoryCollection {
    events: Vec<Event>,
    next_id: u64,
}

impl Default for MemoryCollection {
    fn default() -> Self {
        MemoryCollection {
            events: Vec::new(),
            next_id: 1,
        }
    }
}

impl MemoryCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed with existing records. New ids continue after the largest
    /// numeric id present.
    pub fn with_events(events: Vec<Event>) -> Self {
        let next_id = events
            .iter()
            .filter_map(|e| e.id.as_str().parse::<u64>().ok())
            .max()
            .map_or(1, |max| max + 1);
        MemoryCollection { events, next_id }
    }

    /// Id handed to the next created record.
    pub fn with_next_id(mut self, next_id: u64) -> Self {
        self.next_id = next_id;
        self
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn get(&self, id: &EventId) -> Option<&Event> {
        self.events.iter().find(|e| &e.id == id)
    }

    pub fn create(&mut self, draft: EventDraft) -> Event {
        let event = Event::from_draft(EventId::from(self.next_id), draft);
        self.next_id += 1;
        self.events.push(event.clone());
        event
    }

    pub fn replace(&mut self, id: &EventId, draft: EventDraft) -> Option<Event> {
        let slot = self.events.iter_mut().find(|e| &e.id == id)?;
        *slot = Event::from_draft(id.clone(), draft);
        Some(slot.clone())
    }

    pub fn remove(&mut self, id: &EventId) -> Option<Event> {
        let index = self.events.iter().position(|e| &e.id == id)?;
        Some(self.events.remove(index))
    }
}

/// A request received by [`MemoryEventApi`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiCall {
    List,
    Create(EventDraft),
    Remove(EventId),
    Replace(EventId, EventDraft),
}

#[derive(Debug, Default)]
struct Inner {
    collection: MemoryCollection,
    calls: Vec<ApiCall>,
    offline: bool,
}

/// [`EventApi`] over a shared [`MemoryCollection`].
///
/// Clones share the same collection and call log.
#[derive(Debug, Clone, Default)]
pub struct MemoryEventApi {
    inner: Arc<Mutex<Inner>>,
}

impl MemoryEventApi {
    pub fn new(collection: MemoryCollection) -> Self {
        MemoryEventApi {
            inner: Arc::new(Mutex::new(Inner {
                collection,
                ..Inner::default()
            })),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Requests received so far, oldest first.
    pub fn calls(&self) -> Vec<ApiCall> {
        self.lock().calls.clone()
    }

    /// Snapshot of what the "remote" side currently holds.
    pub fn remote_events(&self) -> Vec<Event> {
        self.lock().collection.events().to_vec()
    }

    /// While offline every request is recorded and then fails with a
    /// network error.
    pub fn set_offline(&self, offline: bool) {
        self.lock().offline = offline;
    }

    fn record(&self, call: ApiCall) -> EventDeskResult<MutexGuard<'_, Inner>> {
        let mut inner = self.lock();
        inner.calls.push(call);
        if inner.offline {
            return Err(EventDeskError::Network("connection refused".to_string()));
        }
        Ok(inner)
    }
}

impl EventApi for MemoryEventApi {
    async fn list(&self) -> EventDeskResult<Vec<Event>> {
        let inner = self.record(ApiCall::List)?;
        Ok(inner.collection.events().to_vec())
    }

    async fn create(&self, draft: &EventDraft) -> EventDeskResult<Event> {
        let mut inner = self.record(ApiCall::Create(draft.clone()))?;
        Ok(inner.collection.create(draft.clone()))
    }

    async fn remove(&self, id: &EventId) -> EventDeskResult<Value> {
        let mut inner = self.record(ApiCall::Remove(id.clone()))?;
        let removed = inner
            .collection
            .remove(id)
            .ok_or_else(|| EventDeskError::NotFound(id.clone()))?;
        Ok(serde_json::to_value(removed)?)
    }

    async fn replace(&self, id: &EventId, draft: &EventDraft) -> EventDeskResult<Event> {
        let mut inner = self.record(ApiCall::Replace(id.clone(), draft.clone()))?;
        inner
            .collection
            .replace(id, draft.clone())
            .ok_or_else(|| EventDeskError::NotFound(id.clone()))
    }
}
