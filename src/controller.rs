//! Wires view actions to store operations.
//!
//! Every store operation is followed by a re-render from the store's list,
//! whether it succeeded or not. Failures are turned into notices here and
//! never escape to the shell loop.

use eventdesk_core::{EventApi, EventDeskError, EventDeskResult, EventDraft, EventId, EventStore};
use tracing::debug;

use crate::view::{Action, EventView, Notice};

pub struct EventController<A> {
    store: EventStore<A>,
    view: EventView,
}

impl<A: EventApi> EventController<A> {
    pub fn new(store: EventStore<A>, view: EventView) -> Self {
        EventController { store, view }
    }

    pub fn store(&self) -> &EventStore<A> {
        &self.store
    }

    pub fn view(&self) -> &EventView {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut EventView {
        &mut self.view
    }

    /// Initial load and render.
    pub async fn init(&mut self) {
        let result = self.store.load().await;
        self.finish(result);
    }

    /// Reload the list from the service, discarding any edits in progress.
    pub async fn refresh(&mut self) {
        self.init().await;
    }

    pub async fn dispatch(&mut self, action: Action) {
        let result = match action {
            Action::Edit(id) => {
                if let Err(err) = self.view.begin_edit(&id) {
                    self.view.notify(Notice::Error(err.to_string()));
                }
                return;
            }
            Action::Add => self.on_add().await,
            Action::Save(id, draft) => {
                if let Err(err) = draft.validate() {
                    // Row stays editable so the name can be fixed.
                    self.view.alert(err.to_string());
                    return;
                }
                self.on_update(&id, draft).await
            }
            Action::Delete(id) => self.on_delete(&id).await,
            Action::Cancel(id) => self.on_cancel(&id).await,
        };
        self.finish(result);
    }

    async fn on_add(&mut self) -> EventDeskResult<()> {
        let event = self.store.add(EventDraft::blank()).await?;
        self.view
            .notify(Notice::Info(format!("Added event {}", event.id)));
        Ok(())
    }

    async fn on_delete(&mut self, id: &EventId) -> EventDeskResult<()> {
        self.store.delete(id).await?;
        Ok(())
    }

    async fn on_update(&mut self, id: &EventId, draft: EventDraft) -> EventDeskResult<()> {
        self.store.update(id, draft).await?;
        Ok(())
    }

    /// Clears the record's name and dates on the service.
    async fn on_cancel(&mut self, id: &EventId) -> EventDeskResult<()> {
        self.store.update(id, EventDraft::cleared()).await?;
        Ok(())
    }

    fn finish(&mut self, result: EventDeskResult<()>) {
        if let Err(err) = result {
            self.report(err);
        }
        self.view.render(self.store.events());
    }

    fn report(&mut self, err: EventDeskError) {
        debug!(error = %err, "action failed");
        let notice = match &err {
            EventDeskError::Validation(message) => Notice::Alert(message.clone()),
            EventDeskError::NotFound(id) => Notice::Error(format!(
                "Event {} no longer exists on the server. Type 'refresh' to reload.",
                id
            )),
            _ => Notice::Error(err.to_string()),
        };
        self.view.notify(notice);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use eventdesk_core::Event;
    use eventdesk_core::memory::{ApiCall, MemoryCollection, MemoryEventApi};

    fn seeded(events: Vec<Event>) -> (MemoryEventApi, EventController<MemoryEventApi>) {
        let api = MemoryEventApi::new(MemoryCollection::with_events(events));
        let controller = EventController::new(EventStore::new(api.clone()), EventView::new());
        (api, controller)
    }

    fn event(id: &str, name: &str) -> Event {
        Event::from_draft(EventId::from(id), EventDraft::new(name, None, None))
    }

    #[tokio::test]
    async fn test_init_renders_remote_list() {
        let (_, mut controller) = seeded(vec![event("1", "A"), event("2", "B")]);
        controller.init().await;

        assert_eq!(controller.store().len(), 2);
        assert!(controller.view().table().contains("B"));
        assert!(controller.view_mut().take_notices().is_empty());
    }

    #[tokio::test]
    async fn test_add_creates_blank_record() {
        let (api, mut controller) = seeded(vec![]);
        controller.init().await;

        controller.dispatch(Action::Add).await;
        assert_eq!(api.calls().last(), Some(&ApiCall::Create(EventDraft::blank())));
        assert_eq!(controller.store().len(), 1);
        assert!(controller.view().mode(&EventId::from("1")).is_some());
    }

    #[tokio::test]
    async fn test_save_with_empty_name_sends_nothing() {
        let (api, mut controller) = seeded(vec![event("1", "A")]);
        controller.init().await;
        let id = EventId::from("1");
        controller.dispatch(Action::Edit(id.clone())).await;
        let calls_before = api.calls().len();

        controller
            .dispatch(Action::Save(id.clone(), EventDraft::new("  ", None, None)))
            .await;

        assert_eq!(api.calls().len(), calls_before);
        assert_eq!(controller.store().get(&id).unwrap().name, "A");
        assert_eq!(
            controller.view_mut().take_notices(),
            vec![Notice::Alert("Please enter a valid name".to_string())]
        );
        assert!(matches!(
            controller.view().mode(&id),
            Some(crate::view::RowMode::Editing(_))
        ));
    }

    #[tokio::test]
    async fn test_save_persists_and_returns_to_viewing() {
        let (api, mut controller) = seeded(vec![event("1", "A")]);
        controller.init().await;
        let id = EventId::from("1");
        controller.dispatch(Action::Edit(id.clone())).await;

        let draft = EventDraft::new("A2", None, None);
        controller.dispatch(Action::Save(id.clone(), draft.clone())).await;

        assert_eq!(api.calls().last(), Some(&ApiCall::Replace(id.clone(), draft)));
        assert_eq!(controller.store().get(&id).unwrap().name, "A2");
        assert_eq!(
            controller.view().mode(&id),
            Some(&crate::view::RowMode::Viewing)
        );
    }

    #[tokio::test]
    async fn test_cancel_blanks_the_record() {
        let seeded_event = Event::from_draft(
            EventId::from("1"),
            EventDraft::new(
                "A",
                chrono::NaiveDate::from_ymd_opt(2024, 1, 1),
                chrono::NaiveDate::from_ymd_opt(2024, 1, 2),
            ),
        );
        let (api, mut controller) = seeded(vec![seeded_event]);
        controller.init().await;

        let id = EventId::from("1");
        controller.dispatch(Action::Cancel(id.clone())).await;

        let Some(ApiCall::Replace(sent_id, body)) = api.calls().last().cloned() else {
            panic!("expected a replace call, got {:?}", api.calls());
        };
        assert_eq!(sent_id, id);
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            serde_json::json!({ "name": "", "startDate": null, "endDate": null })
        );
        assert_eq!(controller.store().get(&id).unwrap().draft(), EventDraft::blank());
    }

    #[tokio::test]
    async fn test_delete_then_render() {
        let (_, mut controller) = seeded(vec![event("1", "A")]);
        controller.init().await;

        controller.dispatch(Action::Delete(EventId::from("1"))).await;
        assert!(controller.store().is_empty());
        assert!(controller.view().table().contains("No events"));
    }

    #[tokio::test]
    async fn test_network_failure_is_reported_not_raised() {
        let (api, mut controller) = seeded(vec![event("1", "A")]);
        controller.init().await;
        api.set_offline(true);

        controller.dispatch(Action::Delete(EventId::from("1"))).await;

        assert_eq!(controller.store().len(), 1);
        let notices = controller.view_mut().take_notices();
        assert!(matches!(notices.as_slice(), [Notice::Error(m)] if m.contains("Network")));
    }

    #[tokio::test]
    async fn test_stale_id_is_reported_as_not_found() {
        let (api, mut controller) = seeded(vec![event("1", "A")]);
        controller.init().await;

        // Removed by someone else after our load.
        api.remove(&EventId::from("1")).await.unwrap();
        controller
            .dispatch(Action::Save(EventId::from("1"), EventDraft::new("A2", None, None)))
            .await;

        let notices = controller.view_mut().take_notices();
        assert!(matches!(notices.as_slice(), [Notice::Error(m)] if m.contains("no longer exists")));
        assert_eq!(controller.store().get(&EventId::from("1")).unwrap().name, "A");
    }
}
