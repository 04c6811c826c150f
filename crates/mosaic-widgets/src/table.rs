//! Data table rendered as an ARIA `grid`.
//!
//! Rows are selected by clicking anywhere in them, or with `ArrowUp` and
//! `ArrowDown` while focus is inside the grid.  The selected row carries
//! `aria-selected="true"`.  An empty table renders a single full-width
//! placeholder row.

use mosaic_core::listeners::{activate, on_key_within};
use mosaic_core::markup::{Element, Node, Tag};
use mosaic_core::{Command, Component, ElementId, Key, Listener};

/// Messages for the table component.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    /// Select the row at this index.
    Select(usize),
    /// Move the selection up one row.
    MoveUp,
    /// Move the selection down one row.
    MoveDown,
}

/// A data table.
///
/// # Example
///
/// ```ignore
/// use mosaic_widgets::table::Table;
///
/// let table = Table::new(
///     vec!["Name".into(), "Role".into()],
///     vec![vec!["Ada".into(), "Admin".into()]],
/// )
/// .with_label("Team members");
/// ```
pub struct Table {
    id: ElementId,
    label: Option<String>,
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
    row_ids: Vec<ElementId>,
    selected: Option<usize>,
    empty_text: String,
}

impl Table {
    /// Create a table from column headers and data rows.
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        let row_ids = rows.iter().map(|_| ElementId::generate()).collect();
        Self {
            id: ElementId::generate(),
            label: None,
            headers,
            rows,
            row_ids,
            selected: None,
            empty_text: "No data".to_string(),
        }
    }

    /// Build a table from CSV text.  The first line is the header row.
    /// Fields are split on commas; quoting is not supported.
    pub fn from_csv(data: &str) -> Self {
        let mut lines = data.lines().filter(|l| !l.trim().is_empty());
        let split = |line: &str| -> Vec<String> {
            line.split(',').map(|f| f.trim().to_string()).collect()
        };
        let headers = lines.next().map(split).unwrap_or_default();
        let rows = lines.map(split).collect();
        Self::new(headers, rows)
    }

    /// Accessible label for the grid.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Placeholder text for a table with no rows (default: "No data").
    pub fn with_empty_text(mut self, text: impl Into<String>) -> Self {
        self.empty_text = text.into();
        self
    }

    pub fn with_selected(mut self, index: usize) -> Self {
        self.set_cursor(index);
        self
    }

    /// Return the index of the currently selected row, if any.
    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    /// Replace the data rows, clamping the selection to the new bounds.
    ///
    /// Rows keep their ids by position; new positions get fresh ids.
    pub fn set_rows(&mut self, rows: Vec<Vec<String>>) {
        self.row_ids.truncate(rows.len());
        while self.row_ids.len() < rows.len() {
            self.row_ids.push(ElementId::generate());
        }
        self.rows = rows;
        if self.rows.is_empty() {
            self.selected = None;
        } else if let Some(i) = self.selected {
            if i >= self.rows.len() {
                self.selected = Some(self.rows.len() - 1);
            }
        }
    }

    /// Move the cursor up by `n` rows, clamped to the first row.
    pub fn move_up(&mut self, n: usize) {
        if self.rows.is_empty() {
            return;
        }
        let i = self.selected.unwrap_or(0);
        self.selected = Some(i.saturating_sub(n));
    }

    /// Move the cursor down by `n` rows, clamped to the last row.
    pub fn move_down(&mut self, n: usize) {
        if self.rows.is_empty() {
            return;
        }
        let last = self.rows.len() - 1;
        self.selected = Some(match self.selected {
            Some(i) => (i + n).min(last),
            None => n.saturating_sub(1).min(last),
        });
    }

    /// Jump to a specific row index, clamped to valid range.
    pub fn set_cursor(&mut self, n: usize) {
        if self.rows.is_empty() {
            return;
        }
        self.selected = Some(n.min(self.rows.len() - 1));
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    fn header_row(&self) -> Element {
        Element::new(Tag::Tr).children(self.headers.iter().map(|header| {
            Element::new(Tag::Th)
                .class("table__header")
                .role("columnheader")
                .attr("scope", "col")
                .text(header)
        }))
    }

    fn body_rows(&self) -> Vec<Element> {
        if self.rows.is_empty() {
            return vec![Element::new(Tag::Tr).class("table__empty").child(
                Element::new(Tag::Td)
                    .role("gridcell")
                    .attr("colspan", self.headers.len().max(1).to_string())
                    .text(&self.empty_text),
            )];
        }
        self.rows
            .iter()
            .zip(&self.row_ids)
            .enumerate()
            .map(|(i, (row, id))| {
                let selected = self.selected == Some(i);
                Element::new(Tag::Tr)
                    .class("table__row")
                    .class_if(selected, "table__row--selected")
                    .id(id)
                    .attr("aria-selected", selected.to_string())
                    .children(row.iter().map(|cell| {
                        Element::new(Tag::Td)
                            .class("table__cell")
                            .role("gridcell")
                            .text(cell)
                    }))
            })
            .collect()
    }
}

impl Component for Table {
    type Message = Message;

    fn update(&mut self, msg: Message) -> Command<Message> {
        match msg {
            Message::Select(i) => self.set_cursor(i),
            Message::MoveUp => self.move_up(1),
            Message::MoveDown => self.move_down(1),
        }
        Command::none()
    }

    fn view(&self) -> Node {
        Element::new(Tag::Table)
            .class("table")
            .id(&self.id)
            .role("grid")
            .attr_opt("aria-label", self.label.as_deref())
            .child(Element::new(Tag::Thead).child(self.header_row()))
            .child(Element::new(Tag::Tbody).children(self.body_rows()))
            .into()
    }

    fn listeners(&self) -> Vec<Listener<Message>> {
        if self.rows.is_empty() {
            return vec![];
        }
        let lookup = self.row_ids.clone();
        vec![
            activate(&self.id, self.row_ids.clone(), move |id| {
                Message::Select(lookup.iter().position(|r| r == id).unwrap_or_default())
            }),
            on_key_within(&self.id, |key| match key {
                Key::ArrowUp => Some(Message::MoveUp),
                Key::ArrowDown => Some(Message::MoveDown),
                _ => None,
            }),
        ]
    }
}
