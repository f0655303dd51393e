use crate::line::{Line, LineField, LineHandle};
use chrono::NaiveDate;
use tracing::{debug, trace};

/// Values the environment pre-fills into a fresh draft.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DraftDefaults {
    pub entry_date: Option<NaiveDate>,
    pub created_by: Option<String>,
}

impl DraftDefaults {
    pub fn new(entry_date: Option<NaiveDate>, created_by: Option<String>) -> Self {
        Self { entry_date, created_by }
    }
}

/// Editable header fields of a [`Draft`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HeaderField {
    EntryDate,
    Description,
    CreatedBy,
}

/// An in-progress journal entry composed on the client.
///
/// The draft exclusively owns its lines. Insertion order is display order and
/// each line is addressed through the [`LineHandle`] returned when it was
/// added.
#[derive(Debug, Clone, PartialEq)]
pub struct Draft {
    entry_date: Option<NaiveDate>,
    description: String,
    created_by: String,
    lines: Vec<(LineHandle, Line)>,
    next_handle: u64,
    defaults: DraftDefaults,
}

impl Draft {
    /// Creates the initial draft: defaults applied and one blank line.
    pub fn new(defaults: DraftDefaults) -> Self {
        let mut draft = Self {
            entry_date: defaults.entry_date,
            description: String::new(),
            created_by: defaults.created_by.clone().unwrap_or_default(),
            lines: Vec::new(),
            next_handle: 0,
            defaults,
        };
        draft.add_line();
        draft
    }

    /// Returns the draft to its initial state. Handles issued before the reset
    /// stay dead.
    pub fn reset(&mut self) {
        trace!("Resetting journal draft");
        self.entry_date = self.defaults.entry_date;
        self.description.clear();
        self.created_by = self.defaults.created_by.clone().unwrap_or_default();
        self.lines.clear();
        self.add_line();
    }

    /// Replaces the environment defaults used by later resets.
    pub fn set_defaults(&mut self, defaults: DraftDefaults) {
        self.defaults = defaults;
    }

    pub fn defaults(&self) -> &DraftDefaults {
        &self.defaults
    }

    /// True when the draft is indistinguishable from a freshly reset one.
    pub fn is_pristine(&self) -> bool {
        self.entry_date == self.defaults.entry_date
            && self.description.is_empty()
            && self.created_by == self.defaults.created_by.clone().unwrap_or_default()
            && self.lines.len() == 1
            && self.lines.iter().all(|(_, line)| line.is_blank())
    }

    /// Appends a blank line and returns its handle.
    pub fn add_line(&mut self) -> LineHandle {
        self.push_line(Line::blank())
    }

    /// Appends a prepared line and returns its handle.
    pub fn push_line(&mut self, line: Line) -> LineHandle {
        let handle = LineHandle::new(self.next_handle);
        self.next_handle += 1;
        self.lines.push((handle, line));
        debug!(%handle, count = self.lines.len(), "Journal line added");
        handle
    }

    /// Removes the line behind `handle`. Returns `false` and changes nothing if
    /// the handle is unknown or already removed.
    pub fn remove_line(&mut self, handle: LineHandle) -> bool {
        match self.position(handle) {
            Some(index) => {
                self.lines.remove(index);
                debug!(%handle, count = self.lines.len(), "Journal line removed");
                true
            }
            None => {
                trace!(%handle, "Ignoring removal of unknown journal line");
                false
            }
        }
    }

    /// Applies raw input to one field of one line. Returns `false` if the
    /// handle is unknown; invalid input is coerced, never rejected.
    pub fn update_line(&mut self, handle: LineHandle, field: LineField, value: &str) -> bool {
        match self.line_mut(handle) {
            Some(line) => {
                line.apply(field, value);
                true
            }
            None => {
                trace!(%handle, ?field, "Ignoring update of unknown journal line");
                false
            }
        }
    }

    /// Applies raw input to a header field. An unparsable date clears the date.
    pub fn update_header(&mut self, field: HeaderField, value: &str) {
        match field {
            HeaderField::EntryDate => {
                self.entry_date = NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").ok();
            }
            HeaderField::Description => self.description = value.to_string(),
            HeaderField::CreatedBy => self.created_by = value.to_string(),
        }
    }

    pub fn line(&self, handle: LineHandle) -> Option<&Line> {
        self.lines.iter().find(|(h, _)| *h == handle).map(|(_, line)| line)
    }

    pub fn line_mut(&mut self, handle: LineHandle) -> Option<&mut Line> {
        self.lines.iter_mut().find(|(h, _)| *h == handle).map(|(_, line)| line)
    }

    /// Zero-based display position of a line.
    pub fn position(&self, handle: LineHandle) -> Option<usize> {
        self.lines.iter().position(|(h, _)| *h == handle)
    }

    /// Lines in display order.
    pub fn lines(&self) -> impl Iterator<Item = &Line> {
        self.lines.iter().map(|(_, line)| line)
    }

    /// Handles in display order.
    pub fn handles(&self) -> Vec<LineHandle> {
        self.lines.iter().map(|(handle, _)| *handle).collect()
    }

    pub fn entries(&self) -> impl Iterator<Item = (LineHandle, &Line)> {
        self.lines.iter().map(|(handle, line)| (*handle, line))
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn entry_date(&self) -> Option<NaiveDate> {
        self.entry_date
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn created_by(&self) -> &str {
        &self.created_by
    }

    pub fn set_entry_date(&mut self, entry_date: Option<NaiveDate>) {
        self.entry_date = entry_date;
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
    }

    pub fn set_created_by(&mut self, created_by: impl Into<String>) {
        self.created_by = created_by.into();
    }
}

impl Default for Draft {
    fn default() -> Self {
        Self::new(DraftDefaults::default())
    }
}
