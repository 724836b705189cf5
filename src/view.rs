//! Table view of the events list.
//!
//! The view knows nothing about HTTP. It draws the rows it was last given,
//! keeps each row's read-only/editing state, and turns typed lines into
//! [`Intent`]s for the shell. Rows become editable with `edit <id>`; field
//! commands are refused while a row is read-only.

use eventdesk_core::event::normalize_date;
use eventdesk_core::{Event, EventDeskError, EventDraft, EventId};
use owo_colors::OwoColorize;
use thiserror::Error;

pub const HELP: &str = "\
Commands:
  add                    create a blank event
  edit <id>              make a row editable
  name <id> <text>       set the name of a row being edited
  start <id> [date]      set the start date (YYYY-MM-DD, blank clears)
  end <id> [date]        set the end date (YYYY-MM-DD, blank clears)
  save <id>              send the edited row to the server
  cancel <id>            clear the row's name and dates on the server
  delete <id>            delete the event
  refresh                reload the list from the server
  help                   show this help
  quit                   leave";

/// What the user asked for, as understood by the controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Add,
    Edit(EventId),
    Save(EventId, EventDraft),
    Delete(EventId),
    Cancel(EventId),
}

impl Action {
    /// Whether handling this action talks to the service.
    pub fn is_remote(&self) -> bool {
        !matches!(self, Action::Edit(_))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Name,
    Start,
    End,
}

/// A line of input, interpreted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    Action(Action),
    SetField {
        id: EventId,
        field: Field,
        value: String,
    },
    Refresh,
    Help,
    Quit,
    Nothing,
}

#[derive(Debug, Error)]
pub enum InputError {
    #[error("Unknown command '{0}'. Type 'help' for the list of commands")]
    Unknown(String),

    #[error("Usage: {0}")]
    Usage(&'static str),

    #[error("No event with id {0}")]
    NoSuchRow(EventId),

    #[error("Event {0} is read-only; run 'edit {0}' first")]
    ReadOnly(EventId),

    #[error("Event {0} is not being edited")]
    NotEditing(EventId),

    #[error(transparent)]
    Invalid(#[from] EventDeskError),
}

/// Something to show the user once the table has been drawn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// Must be acknowledged before input continues.
    Alert(String),
    Error(String),
    Info(String),
}

/// Field text of a row in edit mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowBuffer {
    pub name: String,
    pub start: String,
    pub end: String,
}

impl RowBuffer {
    fn from_event(event: &Event) -> Self {
        RowBuffer {
            name: event.name.clone(),
            start: event.start_date.clone(),
            end: event.end_date.clone(),
        }
    }

    fn to_draft(&self) -> Result<EventDraft, EventDeskError> {
        Ok(EventDraft {
            name: self.name.clone(),
            start_date: Some(normalize_date(&self.start)?),
            end_date: Some(normalize_date(&self.end)?),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowMode {
    Viewing,
    Editing(RowBuffer),
}

#[derive(Debug, Clone)]
struct Row {
    event: Event,
    mode: RowMode,
}

#[derive(Debug, Default)]
pub struct EventView {
    rows: Vec<Row>,
    notices: Vec<Notice>,
}

impl EventView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild every row from `events`. All rows return to read-only.
    pub fn render(&mut self, events: &[Event]) -> String {
        self.rows = events
            .iter()
            .map(|event| Row {
                event: event.clone(),
                mode: RowMode::Viewing,
            })
            .collect();
        self.table()
    }

    pub fn mode(&self, id: &EventId) -> Option<&RowMode> {
        self.row(id).map(|row| &row.mode)
    }

    fn row(&self, id: &EventId) -> Option<&Row> {
        self.rows.iter().find(|row| &row.event.id == id)
    }

    fn row_mut(&mut self, id: &EventId) -> Result<&mut Row, InputError> {
        self.rows
            .iter_mut()
            .find(|row| &row.event.id == id)
            .ok_or_else(|| InputError::NoSuchRow(id.clone()))
    }

    /// Make a row's fields editable, starting from its current values.
    pub fn begin_edit(&mut self, id: &EventId) -> Result<(), InputError> {
        let row = self.row_mut(id)?;
        if row.mode == RowMode::Viewing {
            row.mode = RowMode::Editing(RowBuffer::from_event(&row.event));
        }
        Ok(())
    }

    pub fn set_field(&mut self, id: &EventId, field: Field, value: &str) -> Result<(), InputError> {
        let row = self.row_mut(id)?;
        let RowMode::Editing(buffer) = &mut row.mode else {
            return Err(InputError::ReadOnly(id.clone()));
        };

        match field {
            Field::Name => buffer.name = value.to_string(),
            Field::Start => buffer.start = normalize_date(value)?,
            Field::End => buffer.end = normalize_date(value)?,
        }
        Ok(())
    }

    /// Blocking notification; the shell waits for acknowledgement.
    pub fn alert(&mut self, message: impl Into<String>) {
        self.notices.push(Notice::Alert(message.into()));
    }

    pub fn notify(&mut self, notice: Notice) {
        self.notices.push(notice);
    }

    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    pub fn interpret(&self, line: &str) -> Result<Intent, InputError> {
        let mut parts = line.trim().splitn(3, char::is_whitespace);
        let command = parts.next().unwrap_or_default().to_lowercase();
        let id = parts.next().map(EventId::from);
        let rest = parts.next().map(str::trim).unwrap_or_default();

        let intent = match command.as_str() {
            "" => Intent::Nothing,
            "q" | "quit" | "exit" => Intent::Quit,
            "h" | "help" | "?" => Intent::Help,
            "r" | "refresh" | "reload" => Intent::Refresh,
            "a" | "add" => Intent::Action(Action::Add),
            "e" | "edit" => {
                let id = self.known(id, "edit <id>")?;
                Intent::Action(Action::Edit(id))
            }
            "s" | "save" => {
                let id = self.known(id, "save <id>")?;
                let draft = match self.mode(&id) {
                    Some(RowMode::Editing(buffer)) => buffer.to_draft()?,
                    _ => return Err(InputError::NotEditing(id)),
                };
                Intent::Action(Action::Save(id, draft))
            }
            "d" | "del" | "delete" | "rm" => {
                let id = self.known(id, "delete <id>")?;
                Intent::Action(Action::Delete(id))
            }
            "c" | "cancel" => {
                let id = self.known(id, "cancel <id>")?;
                Intent::Action(Action::Cancel(id))
            }
            "name" | "start" | "end" => {
                let field = match command.as_str() {
                    "name" => Field::Name,
                    "start" => Field::Start,
                    _ => Field::End,
                };
                let id = self.known(id, "name|start|end <id> [value]")?;
                Intent::SetField {
                    id,
                    field,
                    value: rest.to_string(),
                }
            }
            other => return Err(InputError::Unknown(other.to_string())),
        };

        Ok(intent)
    }

    fn known(&self, id: Option<EventId>, usage: &'static str) -> Result<EventId, InputError> {
        let id = id.ok_or(InputError::Usage(usage))?;
        if self.row(&id).is_none() {
            return Err(InputError::NoSuchRow(id));
        }
        Ok(id)
    }

    /// Draw the current rows without rebuilding them.
    pub fn table(&self) -> String {
        if self.rows.is_empty() {
            return "No events. Type 'add' to create one.".dimmed().to_string();
        }

        let header = ["ID", "Name", "Start", "End", ""];
        let cells: Vec<[String; 5]> = self.rows.iter().map(row_cells).collect();

        let mut widths = header.map(|h| h.chars().count());
        for row in &cells {
            for (width, cell) in widths.iter_mut().zip(row) {
                *width = (*width).max(cell.chars().count());
            }
        }

        let mut lines = Vec::with_capacity(cells.len() + 1);
        lines.push(pad_row(&header.map(String::from), &widths).bold().to_string());

        for (row, cell) in self.rows.iter().zip(&cells) {
            let line = pad_row(cell, &widths);
            lines.push(match row.mode {
                RowMode::Editing(_) => line.yellow().to_string(),
                RowMode::Viewing if row.event.name.trim().is_empty() => {
                    line.dimmed().to_string()
                }
                RowMode::Viewing => line,
            });
        }

        lines.join("\n")
    }
}

fn row_cells(row: &Row) -> [String; 5] {
    match &row.mode {
        RowMode::Viewing => [
            row.event.id.to_string(),
            row.event.to_string(),
            row.event.start_date.clone(),
            row.event.end_date.clone(),
            "[edit] [delete] [cancel]".to_string(),
        ],
        RowMode::Editing(buffer) => [
            format!("{}*", row.event.id),
            buffer.name.clone(),
            buffer.start.clone(),
            buffer.end.clone(),
            "[save] [delete] [cancel]".to_string(),
        ],
    }
}

fn pad_row(cells: &[String; 5], widths: &[usize; 5]) -> String {
    cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| format!("{:<width$}", cell, width = width))
        .collect::<Vec<_>>()
        .join("  ")
        .trim_end()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn sample() -> Vec<Event> {
        vec![
            Event::from_draft(
                EventId::from("1"),
                EventDraft::new(
                    "Kickoff",
                    NaiveDate::from_ymd_opt(2024, 1, 1),
                    NaiveDate::from_ymd_opt(2024, 1, 2),
                ),
            ),
            Event::from_draft(EventId::from("2"), EventDraft::blank()),
        ]
    }

    fn view() -> EventView {
        let mut view = EventView::new();
        view.render(&sample());
        view
    }

    #[test]
    fn test_table_lists_every_row() {
        let table = view().table();
        assert!(table.contains("Kickoff"));
        assert!(table.contains("2024-01-02"));
        assert!(table.contains("(untitled)"));
        assert_eq!(table.matches("[edit]").count(), 2);
    }

    #[test]
    fn test_dates_from_the_service_are_shown_as_sent() {
        let odd = Event {
            id: EventId::from("3"),
            name: "Breakfast".to_string(),
            start_date: "2024-01-01T09:00".to_string(),
            end_date: String::new(),
        };
        let mut view = EventView::new();
        let table = view.render(&[odd]);
        assert!(table.contains("2024-01-01T09:00"));

        // Saving asks for a date in the expected format.
        let id = EventId::from("3");
        view.begin_edit(&id).unwrap();
        assert!(matches!(view.interpret("save 3"), Err(InputError::Invalid(_))));
        view.set_field(&id, Field::Start, "2024-01-01").unwrap();
        assert!(view.interpret("save 3").is_ok());
    }

    #[test]
    fn test_empty_table() {
        let mut view = EventView::new();
        assert!(view.render(&[]).contains("No events"));
    }

    #[test]
    fn test_simple_commands() {
        let view = view();
        assert_eq!(view.interpret("add").unwrap(), Intent::Action(Action::Add));
        assert_eq!(view.interpret("  ").unwrap(), Intent::Nothing);
        assert_eq!(view.interpret("quit").unwrap(), Intent::Quit);
        assert_eq!(
            view.interpret("delete 2").unwrap(),
            Intent::Action(Action::Delete(EventId::from("2")))
        );
        assert!(matches!(
            view.interpret("fly 1"),
            Err(InputError::Unknown(_))
        ));
        assert!(matches!(view.interpret("edit"), Err(InputError::Usage(_))));
        assert!(matches!(
            view.interpret("cancel 42"),
            Err(InputError::NoSuchRow(_))
        ));
    }

    #[test]
    fn test_fields_are_read_only_until_edit() {
        let mut view = view();
        let id = EventId::from("1");

        let err = view.set_field(&id, Field::Name, "Renamed").unwrap_err();
        assert!(matches!(err, InputError::ReadOnly(_)));
        assert!(matches!(
            view.interpret("save 1"),
            Err(InputError::NotEditing(_))
        ));

        view.begin_edit(&id).unwrap();
        assert!(matches!(view.mode(&id), Some(RowMode::Editing(_))));
        assert!(view.table().contains("[save]"));
    }

    #[test]
    fn test_edit_then_save_builds_draft() {
        let mut view = view();
        let id = EventId::from("1");
        view.begin_edit(&id).unwrap();

        let intent = view.interpret("name 1   Kickoff  Party ").unwrap();
        let Intent::SetField { field, value, .. } = &intent else {
            panic!("expected a field edit, got {:?}", intent);
        };
        view.set_field(&id, *field, value).unwrap();
        view.set_field(&id, Field::End, "").unwrap();

        let expected = EventDraft::new(
            "Kickoff  Party",
            NaiveDate::from_ymd_opt(2024, 1, 1),
            None,
        );
        assert_eq!(
            view.interpret("save 1").unwrap(),
            Intent::Action(Action::Save(id, expected))
        );
    }

    #[test]
    fn test_bad_date_is_refused() {
        let mut view = view();
        let id = EventId::from("2");
        view.begin_edit(&id).unwrap();

        let err = view.set_field(&id, Field::Start, "31/12/2024").unwrap_err();
        assert!(matches!(err, InputError::Invalid(_)));
    }

    #[test]
    fn test_render_resets_edit_state() {
        let mut view = view();
        let id = EventId::from("1");
        view.begin_edit(&id).unwrap();

        view.render(&sample());
        assert_eq!(view.mode(&id), Some(&RowMode::Viewing));
    }

    #[test]
    fn test_notices_drain() {
        let mut view = view();
        view.alert("Please enter a valid name");
        view.notify(Notice::Info("Added".into()));

        assert_eq!(view.take_notices().len(), 2);
        assert!(view.take_notices().is_empty());
    }
}
