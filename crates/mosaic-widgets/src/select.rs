//! Labelled native select built from a list of options.

use mosaic_core::listeners::on_input;
use mosaic_core::markup::{Element, Node, Tag};
use mosaic_core::{props, Command, Component, ElementId, Listener};

/// Messages for the select component.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    /// The control reported a new value.
    Change(String),
}

/// One choice: the submitted `value` and the displayed `label`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

impl SelectOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

impl<S: Into<String>> From<(S, S)> for SelectOption {
    fn from((value, label): (S, S)) -> Self {
        Self::new(value, label)
    }
}

/// A labelled dropdown.
///
/// # Example
///
/// ```ignore
/// use mosaic_widgets::select::Select;
///
/// let country = Select::new("Country", [("nl", "Netherlands"), ("se", "Sweden")])
///     .with_placeholder("Choose a country");
/// ```
pub struct Select {
    id: ElementId,
    label: String,
    options: Vec<SelectOption>,
    placeholder: Option<String>,
    value: Option<String>,
    disabled: bool,
    required: bool,
}

impl Select {
    pub fn new<I, O>(label: impl Into<String>, options: I) -> Self
    where
        I: IntoIterator<Item = O>,
        O: Into<SelectOption>,
    {
        Self {
            id: ElementId::generate(),
            label: label.into(),
            options: options.into_iter().map(Into::into).collect(),
            placeholder: None,
            value: None,
            disabled: false,
            required: false,
        }
    }

    /// A disabled first option shown while nothing is selected.
    pub fn with_placeholder(mut self, text: impl Into<String>) -> Self {
        self.placeholder = Some(text.into());
        self
    }

    /// Preselect `value`.  Unknown values are ignored with a warning.
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.set_value(value.into());
        self
    }

    pub fn with_disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    pub fn with_required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    /// The selected value, if any.
    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    /// The option for the selected value.
    pub fn selected(&self) -> Option<&SelectOption> {
        let value = self.value.as_deref()?;
        self.options.iter().find(|o| o.value == value)
    }

    pub fn options(&self) -> &[SelectOption] {
        &self.options
    }

    pub fn id(&self) -> &ElementId {
        &self.id
    }

    /// Select `value`.  The empty string clears the selection.  Returns
    /// false, leaving the selection alone, when no option has that value.
    pub fn set_value(&mut self, value: String) -> bool {
        if value.is_empty() {
            self.value = None;
            return true;
        }
        if !self.options.iter().any(|o| o.value == value) {
            props::warn_invalid("Select", "value", format_args!("no option has value {value:?}"));
            return false;
        }
        self.value = Some(value);
        true
    }
}

impl Component for Select {
    type Message = Message;

    fn update(&mut self, msg: Message) -> Command<Message> {
        match msg {
            Message::Change(value) => {
                self.set_value(value);
            }
        }
        Command::none()
    }

    fn view(&self) -> Node {
        props::require_text("Select", "label", Some(self.label.as_str()));

        let placeholder = self.placeholder.as_ref().map(|text| {
            Element::new(Tag::Option)
                .attr("value", "")
                .flag("disabled")
                .flag_if(self.value.is_none(), "selected")
                .text(text)
        });
        let options = self.options.iter().map(|option| {
            Element::new(Tag::Option)
                .attr("value", &option.value)
                .flag_if(self.value.as_deref() == Some(option.value.as_str()), "selected")
                .text(&option.label)
        });

        Element::new(Tag::Div)
            .class("select")
            .child(
                Element::new(Tag::Label)
                    .class("select__label")
                    .attr("for", self.id.as_str())
                    .text(&self.label),
            )
            .child(
                Element::new(Tag::Select)
                    .class("select__control")
                    .id(&self.id)
                    .flag_if(self.disabled, "disabled")
                    .flag_if(self.required, "required")
                    .child(placeholder)
                    .children(options),
            )
            .into()
    }

    fn listeners(&self) -> Vec<Listener<Message>> {
        if self.disabled {
            return vec![];
        }
        vec![on_input(&self.id, Message::Change)]
    }
}
