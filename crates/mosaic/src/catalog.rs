//! Story catalog.
//!
//! A story is a named, ready-made configuration of one component.  Every
//! component in the catalog has exactly one default story, which is what
//! `render` shows when no story name is given.

use crate::widgets::accordion::{Accordion, Section};
use crate::widgets::button::{Button, ButtonSize, ButtonType, ButtonVariant};
use crate::widgets::modal::{Action, Modal};
use crate::widgets::navbar::{NavLink, Navbar};
use crate::widgets::notification::{Kind, Notification};
use crate::widgets::pagination::Pagination;
use crate::widgets::search::Search;
use crate::widgets::select::Select;
use crate::widgets::spinner::{Spinner, SpinnerSize};
use crate::widgets::table::Table;
use crate::widgets::tabs::{Tab, Tabs};
use crate::widgets::tooltip::Tooltip;
use mosaic_core::{Component, Node};
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    #[error("unknown component: {0}")]
    UnknownComponent(String),
    #[error("component {component} has no story named {story:?}")]
    UnknownStory { component: String, story: String },
    #[error("component {component} has {count} default stories, expected exactly one")]
    DefaultCount { component: String, count: usize },
}

/// A named configuration of one component.
#[derive(Debug, Clone, Copy)]
pub struct Story {
    pub component: &'static str,
    pub name: &'static str,
    pub is_default: bool,
    render: fn() -> Node,
}

impl Story {
    pub fn new(component: &'static str, name: &'static str, render: fn() -> Node) -> Self {
        Self {
            component,
            name,
            is_default: false,
            render,
        }
    }

    /// Mark this story as its component's default.
    pub fn default_story(mut self) -> Self {
        self.is_default = true;
        self
    }

    pub fn render(&self) -> Node {
        (self.render)()
    }

    pub fn entry(&self) -> StoryEntry {
        StoryEntry {
            component: self.component,
            name: self.name,
            default: self.is_default,
        }
    }
}

/// The serializable index row for a story.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StoryEntry {
    pub component: &'static str,
    pub name: &'static str,
    pub default: bool,
}

/// An ordered collection of stories.
#[derive(Debug, Clone)]
pub struct Catalog {
    stories: Vec<Story>,
}

impl Catalog {
    /// A catalog from `stories`, checking that every component has exactly
    /// one default story.
    pub fn new(stories: Vec<Story>) -> Result<Self, CatalogError> {
        let mut defaults: BTreeMap<&str, usize> = BTreeMap::new();
        for story in &stories {
            *defaults.entry(story.component).or_default() += usize::from(story.is_default);
        }
        if let Some((component, count)) = defaults.into_iter().find(|(_, n)| *n != 1) {
            return Err(CatalogError::DefaultCount {
                component: component.to_string(),
                count,
            });
        }
        Ok(Self { stories })
    }

    /// Stories for every widget in [`mosaic_widgets`].
    pub fn builtin() -> Self {
        Self {
            stories: builtin_stories(),
        }
    }

    /// Component names, in the order they were first registered.
    pub fn components(&self) -> Vec<&'static str> {
        let mut seen = Vec::new();
        for story in &self.stories {
            if !seen.contains(&story.component) {
                seen.push(story.component);
            }
        }
        seen
    }

    pub fn stories(&self) -> &[Story] {
        &self.stories
    }

    pub fn stories_for(&self, component: &str) -> Vec<&Story> {
        self.stories
            .iter()
            .filter(|s| s.component == component)
            .collect()
    }

    pub fn default_for(&self, component: &str) -> Option<&Story> {
        self.stories
            .iter()
            .find(|s| s.component == component && s.is_default)
    }

    /// The named story, or the component's default when `story` is `None`.
    pub fn find(&self, component: &str, story: Option<&str>) -> Result<&Story, CatalogError> {
        let stories = self.stories_for(component);
        if stories.is_empty() {
            return Err(CatalogError::UnknownComponent(component.to_string()));
        }
        let found = match story {
            Some(name) => stories.into_iter().find(|s| s.name == name),
            None => stories.into_iter().find(|s| s.is_default),
        };
        found.ok_or_else(|| CatalogError::UnknownStory {
            component: component.to_string(),
            story: story.unwrap_or("default").to_string(),
        })
    }

    /// Render a story to markup.
    pub fn render(&self, component: &str, story: Option<&str>) -> Result<String, CatalogError> {
        let story = self.find(component, story)?;
        tracing::debug!(component = story.component, story = story.name, "rendering story");
        Ok(story.render().to_html())
    }

    pub fn entries(&self) -> Vec<StoryEntry> {
        self.stories.iter().map(Story::entry).collect()
    }
}

fn builtin_stories() -> Vec<Story> {
    vec![
        Story::new("accordion", "faq", || {
            Accordion::new()
                .with_section(Section::new("Shipping", "Orders ship within two days."))
                .with_section(Section::new("Returns", "Returns are free for 30 days."))
                .view()
        })
        .default_story(),
        Story::new("accordion", "expanded", || {
            Accordion::new()
                .with_section(Section::new("Shipping", "Orders ship within two days."))
                .with_section(Section::new("Returns", "Returns are free for 30 days."))
                .with_expanded(1)
                .view()
        }),
        Story::new("button", "primary", || {
            Button::new("Save")
                .with_variant(ButtonVariant::Primary)
                .with_type(ButtonType::Submit)
                .view()
        })
        .default_story(),
        Story::new("button", "disabled", || {
            Button::new("Save").with_disabled(true).view()
        }),
        Story::new("button", "link", || {
            Button::link("Documentation", "https://example.com/docs")
                .with_external(true)
                .with_size(ButtonSize::Sm)
                .view()
        }),
        Story::new("button", "icon", || {
            Button::icon("M6 6l12 12M18 6L6 18")
                .with_aria_label("Close")
                .with_variant(ButtonVariant::Quiet)
                .view()
        }),
        Story::new("modal", "confirm", || {
            Modal::new("Delete file?")
                .body("This cannot be undone.")
                .action(Action::new("Delete"))
                .action(Action::new("Cancel"))
                .view()
        })
        .default_story(),
        Story::new("navbar", "site", || {
            Navbar::new("Mosaic", "/")
                .link(NavLink::new("Docs", "/docs"))
                .link(NavLink::new("Blog", "/blog"))
                .with_current("/docs")
                .view()
        })
        .default_story(),
        Story::new("notification", "info", || {
            Notification::new("A new version is available.").view()
        })
        .default_story(),
        Story::new("notification", "error", || {
            Notification::new("Could not save changes.")
                .with_kind(Kind::Error)
                .with_title("Save failed")
                .with_auto_dismiss(None)
                .view()
        }),
        Story::new("pagination", "few-pages", || {
            Pagination::new(5).with_page(2).view()
        })
        .default_story(),
        Story::new("pagination", "many-pages", || {
            Pagination::new(20).with_page(9).view()
        }),
        Story::new("search", "empty", || {
            Search::new().with_placeholder("Search docs").view()
        })
        .default_story(),
        Story::new("search", "with-query", || {
            Search::new().with_query("listeners").view()
        }),
        Story::new("select", "placeholder", || {
            Select::new("Country", [("nl", "Netherlands"), ("se", "Sweden")])
                .with_placeholder("Choose a country")
                .view()
        })
        .default_story(),
        Story::new("spinner", "default", || Spinner::new().view()).default_story(),
        Story::new("spinner", "large", || {
            Spinner::new()
                .with_size(SpinnerSize::Lg)
                .with_label("Fetching results")
                .view()
        }),
        Story::new("table", "team", || {
            Table::from_csv("Name,Role\nAda,Admin\nGrace,Editor\n")
                .with_label("Team")
                .with_selected(0)
                .view()
        })
        .default_story(),
        Story::new("table", "empty", || {
            Table::new(vec!["Name".into(), "Role".into()], vec![])
                .with_label("Team")
                .view()
        }),
        Story::new("tabs", "settings", || {
            Tabs::new(vec![
                Tab::new("General", "General settings"),
                Tab::new("Privacy", "Privacy settings"),
            ])
            .with_label("Settings")
            .view()
        })
        .default_story(),
        Story::new("tooltip", "help", || {
            Tooltip::new("Help", "Opens the user guide").view()
        })
        .default_story(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_has_one_default_per_component() {
        let catalog = Catalog::builtin();
        assert!(Catalog::new(catalog.stories().to_vec()).is_ok());
        for component in catalog.components() {
            assert!(catalog.default_for(component).is_some(), "{component}");
        }
    }

    #[test]
    fn builtin_covers_every_widget() {
        assert_eq!(
            Catalog::builtin().components(),
            vec![
                "accordion",
                "button",
                "modal",
                "navbar",
                "notification",
                "pagination",
                "search",
                "select",
                "spinner",
                "table",
                "tabs",
                "tooltip"
            ]
        );
    }

    #[test]
    fn missing_or_duplicate_defaults_are_rejected() {
        let plain = || Node::Empty;
        let none = Catalog::new(vec![Story::new("x", "a", plain)]);
        assert_eq!(
            none.unwrap_err(),
            CatalogError::DefaultCount {
                component: "x".to_string(),
                count: 0
            }
        );
        let two = Catalog::new(vec![
            Story::new("x", "a", plain).default_story(),
            Story::new("x", "b", plain).default_story(),
        ]);
        assert!(matches!(two, Err(CatalogError::DefaultCount { count: 2, .. })));
    }

    #[test]
    fn find_falls_back_to_default() {
        let catalog = Catalog::builtin();
        assert_eq!(catalog.find("button", None).unwrap().name, "primary");
        assert_eq!(catalog.find("button", Some("link")).unwrap().name, "link");
        assert_eq!(
            catalog.find("carousel", None).unwrap_err(),
            CatalogError::UnknownComponent("carousel".to_string())
        );
        assert!(matches!(
            catalog.find("button", Some("huge")),
            Err(CatalogError::UnknownStory { .. })
        ));
    }

    #[test]
    fn every_story_renders_markup() {
        let catalog = Catalog::builtin();
        for story in catalog.stories() {
            let html = catalog.render(story.component, Some(story.name)).unwrap();
            assert!(html.starts_with('<'), "{}/{}: {html}", story.component, story.name);
        }
    }

    #[test]
    fn entries_serialize() {
        let entries = Catalog::builtin().entries();
        let first = serde_json::to_value(&entries[0]).unwrap();
        assert_eq!(
            first,
            serde_json::json!({"component": "accordion", "name": "faq", "default": true})
        );
    }
}
