//! Data access for the remote events collection.
//!
//! Each operation maps to exactly one HTTP request against the collection
//! root (`GET`/`POST`) or one of its items (`PUT`/`DELETE`).

use std::future::Future;

use reqwest::{Response, StatusCode};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use crate::config::GlobalConfig;
use crate::error::{EventDeskError, EventDeskResult};
use crate::event::{Event, EventDraft, EventId};

/// Operations offered by an events collection.
///
/// The store only talks to the collection through this trait, so tests
/// and offline sessions can swap in [`crate::memory::MemoryEventApi`].
pub trait EventApi {
    /// GET {root}
    fn list(&self) -> impl Future<Output = EventDeskResult<Vec<Event>>> + Send;

    /// POST {root}
    fn create(&self, draft: &EventDraft) -> impl Future<Output = EventDeskResult<Event>> + Send;

    /// DELETE {root}/{id}
    ///
    /// The response body is service-defined and returned untouched.
    fn remove(&self, id: &EventId) -> impl Future<Output = EventDeskResult<Value>> + Send;

    /// PUT {root}/{id}
    fn replace(
        &self,
        id: &EventId,
        draft: &EventDraft,
    ) -> impl Future<Output = EventDeskResult<Event>> + Send;
}

/// Error body returned by eventdesk-server and similar services
#[derive(Deserialize)]
struct ErrorResponse {
    error: String,
}

/// HTTP client for a REST events collection
#[derive(Clone, Debug)]
pub struct HttpEventApi {
    http: reqwest::Client,
    collection_url: String,
}

impl HttpEventApi {
    pub fn new(config: &GlobalConfig) -> EventDeskResult<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }

        let http = builder
            .build()
            .map_err(|e| EventDeskError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            collection_url: config.collection_url(),
        })
    }

    pub fn collection_url(&self) -> &str {
        &self.collection_url
    }

    fn item_url(&self, id: &EventId) -> String {
        format!("{}/{}", self.collection_url, id)
    }
}

impl EventApi for HttpEventApi {
    async fn list(&self) -> EventDeskResult<Vec<Event>> {
        debug!(url = %self.collection_url, "GET");
        let resp = self.http.get(&self.collection_url).send().await?;
        read_json(check_status(resp, None).await?).await
    }

    async fn create(&self, draft: &EventDraft) -> EventDeskResult<Event> {
        debug!(url = %self.collection_url, name = %draft.name, "POST");
        let resp = self
            .http
            .post(&self.collection_url)
            .json(draft)
            .send()
            .await?;
        read_json(check_status(resp, None).await?).await
    }

    async fn remove(&self, id: &EventId) -> EventDeskResult<Value> {
        let url = self.item_url(id);
        debug!(%url, "DELETE");
        let resp = self.http.delete(&url).send().await?;
        let body = check_status(resp, Some(id)).await?.text().await?;

        if body.trim().is_empty() {
            return Ok(Value::Null);
        }
        Ok(serde_json::from_str(&body)?)
    }

    async fn replace(&self, id: &EventId, draft: &EventDraft) -> EventDeskResult<Event> {
        let url = self.item_url(id);
        debug!(%url, name = %draft.name, "PUT");
        let resp = self.http.put(&url).json(draft).send().await?;
        read_json(check_status(resp, Some(id)).await?).await
    }
}

/// Turn non-2xx responses into typed failures.
///
/// A 404 on an item URL means the id is unknown to the service.
async fn check_status(resp: Response, id: Option<&EventId>) -> EventDeskResult<Response> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }

    if status == StatusCode::NOT_FOUND {
        if let Some(id) = id {
            return Err(EventDeskError::NotFound(id.clone()));
        }
    }

    let body = resp.text().await.unwrap_or_default();
    let message = match serde_json::from_str::<ErrorResponse>(&body) {
        Ok(err) => err.error,
        Err(_) if body.trim().is_empty() => status
            .canonical_reason()
            .unwrap_or("no response body")
            .to_string(),
        Err(_) => body,
    };

    debug!(status = status.as_u16(), %message, "request failed");
    Err(EventDeskError::Server {
        status: status.as_u16(),
        message,
    })
}

async fn read_json<T: DeserializeOwned>(resp: Response) -> EventDeskResult<T> {
    let body = resp.text().await?;
    Ok(serde_json::from_str(&body)?)
}
