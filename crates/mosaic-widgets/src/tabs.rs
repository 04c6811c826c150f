//! Tab navigation component for switching between panels.
//!
//! Follows the ARIA tabs pattern: a `tablist` of `tab` buttons, each owning
//! a `tabpanel`.  Only the selected tab is in the tab order (roving
//! `tabindex`).  Arrow keys move the selection with wrap-around; `Home` and
//! `End` jump to the ends.

use mosaic_core::listeners::{activate, on_key_within};
use mosaic_core::markup::{Element, Node, Tag};
use mosaic_core::{Command, Component, ElementId, Key, Listener};

/// Messages for the tabs component.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    /// Select the tab at this index.
    Select(usize),
    /// A navigation key pressed inside the tab list.
    KeyPress(Key),
}

/// One tab and its panel.
#[derive(Debug, Clone)]
pub struct Tab {
    label: String,
    panel: Node,
    tab_id: ElementId,
    panel_id: ElementId,
}

impl Tab {
    pub fn new(label: impl Into<String>, panel: impl Into<Node>) -> Self {
        Self {
            label: label.into(),
            panel: panel.into(),
            tab_id: ElementId::generate(),
            panel_id: ElementId::generate(),
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }
}

/// A tab list with one visible panel.
pub struct Tabs {
    id: ElementId,
    label: Option<String>,
    tabs: Vec<Tab>,
    selected: usize,
}

impl Tabs {
    pub fn new(tabs: Vec<Tab>) -> Self {
        Self {
            id: ElementId::generate(),
            label: None,
            tabs,
            selected: 0,
        }
    }

    /// Accessible label for the tab list.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_selected(mut self, index: usize) -> Self {
        self.select(index);
        self
    }

    /// Return the index of the currently selected tab.
    pub fn selected(&self) -> usize {
        self.selected
    }

    /// Select the tab at the given index. No-op if the index is out of bounds.
    pub fn select(&mut self, index: usize) {
        if index < self.tabs.len() {
            self.selected = index;
        }
    }

    /// Advance to the next tab, wrapping around to the first tab after the last.
    pub fn select_next(&mut self) {
        if !self.tabs.is_empty() {
            self.selected = (self.selected + 1) % self.tabs.len();
        }
    }

    /// Move to the previous tab, wrapping around to the last tab before the first.
    pub fn select_prev(&mut self) {
        if !self.tabs.is_empty() {
            self.selected = (self.selected + self.tabs.len() - 1) % self.tabs.len();
        }
    }

    fn tablist_id(&self) -> ElementId {
        self.id.child("tablist")
    }
}

impl Component for Tabs {
    type Message = Message;

    fn update(&mut self, msg: Message) -> Command<Message> {
        match msg {
            Message::Select(i) => self.select(i),
            Message::KeyPress(key) => match key {
                Key::ArrowRight => self.select_next(),
                Key::ArrowLeft => self.select_prev(),
                Key::Home => self.select(0),
                Key::End => self.select(self.tabs.len().saturating_sub(1)),
                _ => {}
            },
        }
        Command::none()
    }

    fn view(&self) -> Node {
        let tablist = Element::new(Tag::Div)
            .class("tabs__list")
            .id(&self.tablist_id())
            .role("tablist")
            .attr_opt("aria-label", self.label.as_deref())
            .children(self.tabs.iter().enumerate().map(|(i, tab)| {
                let selected = i == self.selected;
                Element::new(Tag::Button)
                    .class("tabs__tab")
                    .class_if(selected, "tabs__tab--selected")
                    .id(&tab.tab_id)
                    .role("tab")
                    .attr("type", "button")
                    .attr("aria-selected", selected.to_string())
                    .attr("aria-controls", tab.panel_id.as_str())
                    .attr("tabindex", if selected { "0" } else { "-1" })
                    .text(&tab.label)
            }));

        let panels = self.tabs.iter().enumerate().map(|(i, tab)| {
            Element::new(Tag::Div)
                .class("tabs__panel")
                .id(&tab.panel_id)
                .role("tabpanel")
                .attr("aria-labelledby", tab.tab_id.as_str())
                .attr("tabindex", "0")
                .flag_if(i != self.selected, "hidden")
                .child(tab.panel.clone())
        });

        Element::new(Tag::Div)
            .class("tabs")
            .id(&self.id)
            .child(tablist)
            .children(panels)
            .into()
    }

    fn listeners(&self) -> Vec<Listener<Message>> {
        if self.tabs.is_empty() {
            return vec![];
        }
        let tab_ids: Vec<ElementId> = self.tabs.iter().map(|t| t.tab_id.clone()).collect();
        let lookup = tab_ids.clone();
        vec![
            activate(&self.id, tab_ids, move |id| {
                Message::Select(lookup.iter().position(|t| t == id).unwrap_or_default())
            }),
            on_key_within(&self.tablist_id(), |key| {
                matches!(key, Key::ArrowLeft | Key::ArrowRight | Key::Home | Key::End)
                    .then_some(Message::KeyPress(key))
            }),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mosaic_core::testing::TestProgram;
    use mosaic_core::Mount;

    fn settings() -> Tabs {
        Tabs::new(vec![
            Tab::new("General", "General settings"),
            Tab::new("Privacy", "Privacy settings"),
            Tab::new("Advanced", "Advanced settings"),
        ])
        .with_label("Settings")
    }

    #[test]
    fn select_out_of_bounds_is_noop() {
        let mut tabs = settings();
        tabs.select(9);
        assert_eq!(tabs.selected(), 0);
    }

    #[test]
    fn arrow_keys_wrap() {
        let mut tabs = settings();
        tabs.update(Message::KeyPress(Key::ArrowLeft));
        assert_eq!(tabs.selected(), 2);
        tabs.update(Message::KeyPress(Key::ArrowRight));
        assert_eq!(tabs.selected(), 0);
        tabs.update(Message::KeyPress(Key::End));
        assert_eq!(tabs.selected(), 2);
        tabs.update(Message::KeyPress(Key::Home));
        assert_eq!(tabs.selected(), 0);
    }

    #[test]
    fn roles_and_roving_tabindex() {
        let prog = TestProgram::<Mount<Tabs>>::new(settings());
        let doc = prog.document();
        let general = prog.by_role("tab", "General");
        let privacy = prog.by_role("tab", "Privacy");
        assert_eq!(doc.attribute(general, "aria-selected"), Some("true"));
        assert_eq!(doc.attribute(general, "tabindex"), Some("0"));
        assert_eq!(doc.attribute(privacy, "tabindex"), Some("-1"));
        assert_eq!(prog.all_by_role("tabpanel").len(), 1);
        assert!(doc.get_by_role("tablist", "Settings").is_ok());
        assert!(doc.get_by_role("tabpanel", "General").is_ok());
    }

    #[test]
    fn clicking_a_tab_shows_its_panel() {
        let mut prog = TestProgram::<Mount<Tabs>>::new(settings());
        prog.click(prog.by_role("tab", "Advanced"));
        assert_eq!(prog.model().component.selected(), 2);
        let panel = prog.document().get_by_role("tabpanel", "Advanced").unwrap();
        assert_eq!(prog.document().text_content(panel), "Advanced settings");
    }

    #[test]
    fn keyboard_navigation_requires_focus_in_tablist() {
        let mut prog = TestProgram::<Mount<Tabs>>::new(settings());
        prog.press_key(Key::ArrowRight);
        assert_eq!(prog.model().component.selected(), 0);

        let general = prog.by_role("tab", "General");
        prog.press_key_on(general, Key::ArrowRight);
        assert_eq!(prog.model().component.selected(), 1);
        prog.press_key_on(general, Key::Enter);
        assert_eq!(prog.model().component.selected(), 1);
    }
}
