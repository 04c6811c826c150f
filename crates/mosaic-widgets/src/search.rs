//! Search box.
//!
//! A `role="search"` form around an `input type="search"`.  Typing updates
//! the query, `Enter` submits it and `Escape` clears it.  A clear button is
//! shown while the query is non-empty.
//!
//! With [`Search::with_debounce`] the box also submits by itself once the
//! query has stopped changing for the given duration (search as you type).
//! Only the last edit of a burst submits.
//!
//! # Example
//!
//! ```ignore
//! use mosaic_widgets::search::Search;
//!
//! let search = Search::new().with_placeholder("Search docs");
//! // In the parent's update(), on search::Message::Submit:
//! //   run_query(search.query());
//! ```

use mosaic_core::listeners::{activate, on_input, on_key_within};
use mosaic_core::markup::{Element, Node, Tag};
use mosaic_core::{Command, Component, ElementId, Key, Listener};
use std::time::Duration;

/// Messages emitted by the search component.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    /// The query changed.
    Input(String),
    /// `Enter` was pressed in the box.
    Submit,
    /// The query was cleared by `Escape` or the clear button.
    Clear,
    /// The debounce delay for edit number `n` elapsed.
    Settled(u64),
}

pub struct Search {
    id: ElementId,
    input_id: ElementId,
    clear_id: ElementId,
    label: String,
    placeholder: Option<String>,
    query: String,
    debounce: Option<Duration>,
    edits: u64,
}

impl Search {
    pub fn new() -> Self {
        let id = ElementId::generate();
        Self {
            input_id: id.child("input"),
            clear_id: id.child("clear"),
            id,
            label: "Search".to_string(),
            placeholder: None,
            query: String::new(),
            debounce: None,
            edits: 0,
        }
    }

    /// Accessible label of the input (default: "Search").
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = query.into();
        self
    }

    /// Submit automatically once typing pauses for `delay`.
    pub fn with_debounce(mut self, delay: Duration) -> Self {
        self.debounce = Some(delay);
        self
    }

    /// Get the current query text.
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Clear the query.
    pub fn clear(&mut self) {
        self.query.clear();
    }
}

impl Default for Search {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for Search {
    type Message = Message;

    fn update(&mut self, msg: Message) -> Command<Message> {
        match msg {
            Message::Input(query) => {
                self.query = query;
                if let Some(delay) = self.debounce {
                    self.edits += 1;
                    let edit = self.edits;
                    return Command::tick(delay, move |_| Message::Settled(edit));
                }
            }
            Message::Settled(edit) => {
                if edit == self.edits && !self.query.is_empty() {
                    return Command::message(Message::Submit);
                }
            }
            Message::Clear => self.clear(),
            Message::Submit => {
                tracing::debug!(query = %self.query, "search submitted");
            }
        }
        Command::none()
    }

    fn view(&self) -> Node {
        let clear = (!self.query.is_empty()).then(|| {
            Element::new(Tag::Button)
                .class("search__clear")
                .id(&self.clear_id)
                .attr("type", "button")
                .attr("aria-label", "Clear search")
                .text("\u{00d7}")
        });

        Element::new(Tag::Form)
            .class("search")
            .id(&self.id)
            .role("search")
            .child(
                Element::new(Tag::Input)
                    .class("search__input")
                    .id(&self.input_id)
                    .attr("type", "search")
                    .attr("aria-label", &self.label)
                    .attr_opt("placeholder", self.placeholder.as_deref())
                    .attr("value", &self.query),
            )
            .child(clear)
            .into()
    }

    fn listeners(&self) -> Vec<Listener<Message>> {
        let mut listeners = vec![
            on_input(&self.input_id, Message::Input),
            on_key_within(&self.input_id, |key| match key {
                Key::Enter => Some(Message::Submit),
                Key::Escape => Some(Message::Clear),
                _ => None,
            }),
        ];
        if !self.query.is_empty() {
            listeners.push(activate(&self.id, vec![self.clear_id.clone()], |_| {
                Message::Clear
            }));
        }
        listeners
    }
}
