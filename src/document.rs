//! Writes to the page, and an in-memory page to apply them to

use std::collections::HashMap;

use crate::ids::TaskId;
use crate::slot::SlotIndex;
use crate::traits::Document;

/// Ids of the page elements this crate knows about
pub mod element {
    use super::*;

    /// Hidden field holding the current calendar id
    pub const CALENDAR_ID: &str = "cal_id";
    /// Hidden field holding the current week marker
    pub const WEEK_INFO: &str = "week_info";
    /// List of the tags of the calendar
    pub const TAG_LIST: &str = "my_tags_go_here";
    /// Front face of the card: the weekly grid
    pub const FRONT: &str = "front_content";
    /// Back face of the card: a task detail
    pub const BACK: &str = "back_calendar";
    /// Where error messages are displayed
    pub const STATUS: &str = "id_message_msg";

    /// Header cell of a day of the week (`0` is Monday)
    pub fn weekday(day: usize) -> String {
        format!("wkday_{}", day)
    }

    /// Availability button of a slot
    pub fn block(slot: SlotIndex) -> String {
        format!("id_block_{}", slot)
    }

    /// Button of a task in the grid
    pub fn task(id: TaskId) -> String {
        format!("id_task_{}", id)
    }
}


/// A single write to the page
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Mutation {
    /// Replace the content of an element
    SetInnerHtml { element: String, html: String },
    /// Set the `value` of an element
    SetValue { element: String, value: String },
    ScrollIntoView { element: String },
    /// Turn the card over (grid ↔ task detail)
    ToggleFlip,
    /// Leave the page
    Navigate { href: String },
}

impl Mutation {
    pub fn set_inner_html<S: ToString>(element: &str, html: S) -> Self {
        Mutation::SetInnerHtml { element: element.to_string(), html: html.to_string() }
    }

    pub fn set_value<S: ToString>(element: &str, value: S) -> Self {
        Mutation::SetValue { element: element.to_string(), value: value.to_string() }
    }

    pub fn scroll_into_view(element: &str) -> Self {
        Mutation::ScrollIntoView { element: element.to_string() }
    }

    pub fn navigate(href: &str) -> Self {
        Mutation::Navigate { href: href.to_string() }
    }
}


#[derive(Clone, Debug, Default, PartialEq)]
struct ElementState {
    inner_html: String,
    value: Option<String>,
}

/// A page that only lives in memory.
///
/// It keeps the last content and value of every element, and every mutation it received.
#[derive(Clone, Debug, Default)]
pub struct MemoryDocument {
    elements: HashMap<String, ElementState>,
    cookies: String,
    flipped: bool,
    location: Option<String>,
    history: Vec<Mutation>,
}

impl MemoryDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// A page with the hidden fields the weekly view starts from
    pub fn with_fields(calendar: &str, week: &str) -> Self {
        let mut doc = Self::new();
        doc.set_field(element::CALENDAR_ID, calendar);
        doc.set_field(element::WEEK_INFO, week);
        doc
    }

    /// Set the value of an element, without recording it as a mutation
    pub fn set_field(&mut self, element: &str, value: &str) {
        self.elements.entry(element.to_string()).or_default().value = Some(value.to_string());
    }

    pub fn set_cookies<S: ToString>(&mut self, cookies: S) {
        self.cookies = cookies.to_string();
    }

    pub fn inner_html(&self, element: &str) -> Option<&str> {
        self.elements.get(element).map(|e| e.inner_html.as_str())
    }

    /// Whether the task detail is currently shown
    pub fn is_flipped(&self) -> bool {
        self.flipped
    }

    /// Where the page navigated to, if it did
    pub fn location(&self) -> Option<&str> {
        self.location.as_deref()
    }

    /// Every mutation applied so far, in order
    pub fn history(&self) -> &[Mutation] {
        &self.history
    }
}

impl Document for MemoryDocument {
    fn value(&self, element: &str) -> Option<String> {
        self.elements.get(element).and_then(|e| e.value.clone())
    }

    fn cookies(&self) -> String {
        self.cookies.clone()
    }

    fn apply(&mut self, mutation: &Mutation) {
        match mutation {
            Mutation::SetInnerHtml { element, html } => {
                self.elements.entry(element.clone()).or_default().inner_html = html.clone();
            },
            Mutation::SetValue { element, value } => {
                self.elements.entry(element.clone()).or_default().value = Some(value.clone());
            },
            Mutation::ScrollIntoView { .. } => {},
            Mutation::ToggleFlip => self.flipped = !self.flipped,
            Mutation::Navigate { href } => self.location = Some(href.clone()),
        }
        self.history.push(mutation.clone());
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_document_keeps_state() {
        let mut doc = MemoryDocument::with_fields("4", "2021-11-29");
        assert_eq!(doc.value(element::CALENDAR_ID).as_deref(), Some("4"));
        assert!(doc.value("nope").is_none());

        doc.apply_all(&[
            Mutation::set_inner_html(element::FRONT, "<div></div>"),
            Mutation::set_value(element::WEEK_INFO, "2021-12-06"),
            Mutation::ToggleFlip,
            Mutation::ToggleFlip,
            Mutation::navigate("/"),
        ]);

        assert_eq!(doc.inner_html(element::FRONT), Some("<div></div>"));
        assert_eq!(doc.value(element::WEEK_INFO).as_deref(), Some("2021-12-06"));
        assert_eq!(doc.is_flipped(), false);
        assert_eq!(doc.location(), Some("/"));
        assert_eq!(doc.history().len(), 5);
    }
}
