//! Events collection endpoints

use axum::{
    Json, Router,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
    routing::get,
};
use eventdesk_core::{Event, EventDraft, EventId};
use tracing::info;

use crate::routes::AppError;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/events", get(list_events).post(create_event))
        .route(
            "/events/{id}",
            get(get_event).put(replace_event).delete(delete_event),
        )
}

/// GET /events - List all events in insertion order
async fn list_events(State(state): State<AppState>) -> Json<Vec<Event>> {
    let collection = state.collection().read().await;
    Json(collection.events().to_vec())
}

/// GET /events/:id - Fetch a single event
async fn get_event(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Event>, AppError> {
    let id = EventId::from(id);
    let collection = state.collection().read().await;
    let event = collection
        .get(&id)
        .cloned()
        .ok_or_else(|| AppError::not_found(format!("Event not found: {}", id)))?;
    Ok(Json(event))
}

/// POST /events - Create an event, assigning its id
async fn create_event(
    State(state): State<AppState>,
    payload: Result<Json<EventDraft>, JsonRejection>,
) -> Result<(StatusCode, Json<Event>), AppError> {
    let Json(draft) = payload?;
    let event = state.collection().write().await.create(draft);
    info!(id = %event.id, "created event");
    Ok((StatusCode::CREATED, Json(event)))
}

/// PUT /events/:id - Replace every field of an event
async fn replace_event(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<EventDraft>, JsonRejection>,
) -> Result<Json<Event>, AppError> {
    let Json(draft) = payload?;
    let id = EventId::from(id);
    let event = state
        .collection()
        .write()
        .await
        .replace(&id, draft)
        .ok_or_else(|| AppError::not_found(format!("Event not found: {}", id)))?;
    info!(%id, "replaced event");
    Ok(Json(event))
}

/// DELETE /events/:id - Remove an event, returning it
async fn delete_event(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Event>, AppError> {
    let id = EventId::from(id);
    let event = state
        .collection()
        .write()
        .await
        .remove(&id)
        .ok_or_else(|| AppError::not_found(format!("Event not found: {}", id)))?;
    info!(%id, "deleted event");
    Ok(Json(event))
}
