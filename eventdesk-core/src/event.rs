//! Event record and the draft sent when creating or replacing one.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{EventDeskError, EventDeskResult};

/// Wire and input format for start/end dates.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Server-assigned identifier of an event.
///
/// Opaque to the client. Services in the wild emit either JSON strings or
/// numbers for ids, so both are accepted and kept in their textual form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EventId(String);

impl EventId {
    pub fn new(id: impl Into<String>) -> Self {
        EventId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for EventId {
    fn from(id: &str) -> Self {
        EventId(id.to_string())
    }
}

impl From<String> for EventId {
    fn from(id: String) -> Self {
        EventId(id)
    }
}

impl From<u64> for EventId {
    fn from(id: u64) -> Self {
        EventId(id.to_string())
    }
}

impl Serialize for EventId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for EventId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Text(String),
            Number(serde_json::Number),
        }

        Ok(match RawId::deserialize(deserializer)? {
            RawId::Text(text) => EventId(text),
            RawId::Number(number) => EventId(number.to_string()),
        })
    }
}

/// A record of the remote events collection.
///
/// Dates are kept as the text the service sent. Only dates typed by the
/// user are checked against [`DATE_FORMAT`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: EventId,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub start_date: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub end_date: String,
}

impl Event {
    pub fn from_draft(id: EventId, draft: EventDraft) -> Self {
        Event {
            id,
            name: draft.name,
            start_date: draft.start_date.unwrap_or_default(),
            end_date: draft.end_date.unwrap_or_default(),
        }
    }

    /// The editable fields of this event, without its id.
    pub fn draft(&self) -> EventDraft {
        EventDraft {
            name: self.name.clone(),
            start_date: Some(self.start_date.clone()),
            end_date: Some(self.end_date.clone()),
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.name.trim().is_empty() {
            write!(f, "(untitled)")
        } else {
            write!(f, "{}", self.name)
        }
    }
}

/// An event without its id: the body of POST and PUT requests.
///
/// A `None` date is sent as `null`, `Some("")` as an empty string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventDraft {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub name: String,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
}

impl EventDraft {
    pub fn new(
        name: impl Into<String>,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> Self {
        EventDraft {
            name: name.into(),
            start_date: Some(format_date(start_date)),
            end_date: Some(format_date(end_date)),
        }
    }

    /// Empty name and empty date strings: the body of `add`.
    pub fn blank() -> Self {
        EventDraft::new("", None, None)
    }

    /// Empty name and `null` dates: the body of `cancel`.
    pub fn cleared() -> Self {
        EventDraft {
            name: String::new(),
            start_date: None,
            end_date: None,
        }
    }

    /// Reject drafts whose name is empty or whitespace.
    pub fn validate(&self) -> EventDeskResult<()> {
        if self.name.trim().is_empty() {
            return Err(EventDeskError::Validation(
                "Please enter a valid name".to_string(),
            ));
        }
        Ok(())
    }
}

/// Parse a date typed by the user. Blank text means "no date".
pub fn parse_date(text: &str) -> EventDeskResult<Option<NaiveDate>> {
    let text = text.trim();
    if text.is_empty() {
        return Ok(None);
    }

    NaiveDate::parse_from_str(text, DATE_FORMAT)
        .map(Some)
        .map_err(|_| {
            EventDeskError::Validation(format!("Invalid date '{}' (expected YYYY-MM-DD)", text))
        })
}

/// Render an optional date the way it travels on the wire.
pub fn format_date(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format(DATE_FORMAT).to_string())
        .unwrap_or_default()
}

/// Check a typed date and return it in wire form; blank stays blank.
pub fn normalize_date(text: &str) -> EventDeskResult<String> {
    Ok(format_date(parse_date(text)?))
}

fn null_as_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}
