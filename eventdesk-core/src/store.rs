//! The client's copy of the events list.
//!
//! The list is only changed after the corresponding remote call has
//! succeeded, so a failed request never leaves a half-applied edit behind.

use serde_json::Value;
use tracing::debug;

use crate::api::EventApi;
use crate::error::EventDeskResult;
use crate::event::{Event, EventDraft, EventId};

pub struct EventStore<A> {
    api: A,
    events: Vec<Event>,
}

impl<A: EventApi> EventStore<A> {
    pub fn new(api: A) -> Self {
        EventStore {
            api,
            events: Vec::new(),
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    /// Events in fetch/insertion order.
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn get(&self, id: &EventId) -> Option<&Event> {
        self.events.iter().find(|e| &e.id == id)
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Replace the local list with the remote one.
    pub async fn load(&mut self) -> EventDeskResult<()> {
        self.events = self.api.list().await?;
        debug!(count = self.events.len(), "loaded events");
        Ok(())
    }

    pub async fn add(&mut self, draft: EventDraft) -> EventDeskResult<Event> {
        let event = self.api.create(&draft).await?;
        self.events.push(event.clone());
        Ok(event)
    }

    /// Returns the service's response body.
    pub async fn delete(&mut self, id: &EventId) -> EventDeskResult<Value> {
        let body = self.api.remove(id).await?;
        self.events.retain(|e| &e.id != id);
        Ok(body)
    }

    /// Replace the record in place, keeping its position.
    ///
    /// An id that is not in the local list is still sent to the service;
    /// the local list is then left as it was.
    pub async fn update(&mut self, id: &EventId, draft: EventDraft) -> EventDeskResult<Event> {
        let event = self.api.replace(id, &draft).await?;
        match self.events.iter_mut().find(|e| &e.id == id) {
            Some(slot) => *slot = event.clone(),
            None => debug!(%id, "updated event is not in the local list"),
        }
        Ok(event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EventDeskError;
    use crate::memory::{ApiCall, MemoryCollection, MemoryEventApi};
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(y, m, d)
    }

    fn event(id: &str, name: &str) -> Event {
        Event::from_draft(EventId::from(id), EventDraft::new(name, None, None))
    }

    async fn loaded(events: Vec<Event>) -> EventStore<MemoryEventApi> {
        let api = MemoryEventApi::new(MemoryCollection::with_events(events));
        let mut store = EventStore::new(api);
        store.load().await.unwrap();
        store
    }

    #[tokio::test]
    async fn test_create_then_load_round_trip() {
        let mut store = loaded(vec![]).await;
        let draft = EventDraft::new("Offsite", date(2024, 5, 1), date(2024, 5, 3));
        let created = store.add(draft).await.unwrap();

        store.load().await.unwrap();
        assert_eq!(store.events(), &[created]);
    }

    #[tokio::test]
    async fn test_add_appends_server_record() {
        let api = MemoryEventApi::new(MemoryCollection::new().with_next_id(7));
        let mut store = EventStore::new(api);
        store.load().await.unwrap();

        let created = store.add(EventDraft::new("B", None, None)).await.unwrap();
        assert_eq!(created.id, EventId::from("7"));
        assert_eq!(
            store.events(),
            &[Event::from_draft(EventId::from("7"), EventDraft::new("B", None, None))]
        );
    }

    #[tokio::test]
    async fn test_delete_removes_record() {
        let seeded = Event::from_draft(
            EventId::from("1"),
            EventDraft::new("A", date(2024, 1, 1), date(2024, 1, 2)),
        );
        let mut store = loaded(vec![seeded]).await;

        store.delete(&EventId::from("1")).await.unwrap();
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_delete_unknown_id_leaves_list_alone() {
        let mut store = loaded(vec![event("1", "A"), event("2", "B")]).await;
        let before = store.events().to_vec();

        let result = store.delete(&EventId::from("99")).await;
        assert!(matches!(result, Err(EventDeskError::NotFound(_))));
        assert_eq!(store.events(), before.as_slice());
    }

    #[tokio::test]
    async fn test_failed_delete_is_not_applied() {
        let mut store = loaded(vec![event("1", "A")]).await;
        store.api().set_offline(true);

        assert!(store.delete(&EventId::from("1")).await.is_err());
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn test_update_replaces_in_place() {
        let mut store = loaded(vec![event("1", "A"), event("2", "B"), event("3", "C")]).await;
        let patch = EventDraft::new("B2", date(2024, 6, 1), None);

        let updated = store.update(&EventId::from("2"), patch.clone()).await.unwrap();
        assert_eq!(updated, Event::from_draft(EventId::from("2"), patch));

        let names: Vec<_> = store.events().iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["A", "B2", "C"]);
        assert_eq!(store.get(&EventId::from("2")), Some(&updated));
    }

    #[tokio::test]
    async fn test_update_of_id_missing_locally_still_hits_remote() {
        let api = MemoryEventApi::new(MemoryCollection::new());
        let mut store = EventStore::new(api.clone());
        store.load().await.unwrap();

        // Created behind the store's back, so only the remote knows about it.
        api.create(&EventDraft::new("Hidden", None, None)).await.unwrap();
        let id = EventId::from("1");
        let patch = EventDraft::new("Renamed", None, None);

        store.update(&id, patch.clone()).await.unwrap();
        assert!(api.calls().contains(&ApiCall::Replace(id, patch)));
        assert!(store.is_empty());
        assert_eq!(api.remote_events()[0].name, "Renamed");
    }

    #[tokio::test]
    async fn test_failed_load_keeps_previous_list() {
        let mut store = loaded(vec![event("1", "A")]).await;
        store.api().set_offline(true);

        assert!(store.load().await.is_err());
        assert_eq!(store.len(), 1);
    }
}
