//! Button and link-styled button.
//!
//! [`ButtonKind`] picks the element: a native `<button>` with its `type` and
//! disabled state, or an `<a href>` for navigation that should look like a
//! button.

use mosaic_core::listeners::activate;
use mosaic_core::markup::{Element, Node, Tag};
use mosaic_core::{props, Command, Component, ElementId, Listener};

/// Visual emphasis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ButtonVariant {
    /// Standard action button.
    #[default]
    Standard,
    /// Primary emphasized action.
    Primary,
    /// Low-emphasis button without a border.
    Quiet,
    /// Destructive action.
    Danger,
}

impl ButtonVariant {
    fn token(self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::Primary => "primary",
            Self::Quiet => "quiet",
            Self::Danger => "danger",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ButtonSize {
    Sm,
    #[default]
    Md,
    Lg,
}

impl ButtonSize {
    fn token(self) -> &'static str {
        match self {
            Self::Sm => "sm",
            Self::Md => "md",
            Self::Lg => "lg",
        }
    }
}

/// The `type` attribute of a native button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ButtonType {
    #[default]
    Button,
    Submit,
    Reset,
}

impl ButtonType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Button => "button",
            Self::Submit => "submit",
            Self::Reset => "reset",
        }
    }
}

/// Which element the button renders as.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ButtonKind {
    Button { button_type: ButtonType, disabled: bool },
    Link { href: String, external: bool },
}

impl Default for ButtonKind {
    fn default() -> Self {
        Self::Button {
            button_type: ButtonType::default(),
            disabled: false,
        }
    }
}

/// Messages for the button component.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    /// The button was activated.
    Press,
}

/// A button.
///
/// # Example
///
/// ```ignore
/// use mosaic_widgets::button::{Button, ButtonVariant};
///
/// let save = Button::new("Save").with_variant(ButtonVariant::Primary);
/// let docs = Button::link("Docs", "https://example.com/docs").with_external(true);
/// let close = Button::icon("M6 6l12 12M18 6L6 18").with_aria_label("Close");
/// ```
#[derive(Debug, Clone)]
pub struct Button {
    id: ElementId,
    label: Option<String>,
    icon: Option<String>,
    aria_label: Option<String>,
    kind: ButtonKind,
    variant: ButtonVariant,
    size: ButtonSize,
}

impl Button {
    /// A native button with a text label.
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            id: ElementId::generate(),
            label: Some(label.into()),
            icon: None,
            aria_label: None,
            kind: ButtonKind::default(),
            variant: ButtonVariant::default(),
            size: ButtonSize::default(),
        }
    }

    /// A link styled as a button.
    pub fn link(label: impl Into<String>, href: impl Into<String>) -> Self {
        Self {
            kind: ButtonKind::Link {
                href: href.into(),
                external: false,
            },
            ..Self::new(label)
        }
    }

    /// An icon-only button.  `path` is SVG path data.  Icon-only buttons
    /// need [`with_aria_label`](Self::with_aria_label).
    pub fn icon(path: impl Into<String>) -> Self {
        Self {
            label: None,
            icon: Some(path.into()),
            ..Self::new("")
        }
    }

    pub fn with_icon(mut self, path: impl Into<String>) -> Self {
        self.icon = Some(path.into());
        self
    }

    pub fn with_aria_label(mut self, label: impl Into<String>) -> Self {
        self.aria_label = Some(label.into());
        self
    }

    pub fn with_variant(mut self, variant: ButtonVariant) -> Self {
        self.variant = variant;
        self
    }

    pub fn with_size(mut self, size: ButtonSize) -> Self {
        self.size = size;
        self
    }

    /// Set the native `type`.  No effect on links.
    pub fn with_type(mut self, button_type: ButtonType) -> Self {
        if let ButtonKind::Button { button_type: t, .. } = &mut self.kind {
            *t = button_type;
        }
        self
    }

    /// Open the link in a new browsing context.  No effect on native buttons.
    pub fn with_external(mut self, external: bool) -> Self {
        if let ButtonKind::Link { external: e, .. } = &mut self.kind {
            *e = external;
        }
        self
    }

    pub fn set_disabled(&mut self, disabled: bool) {
        if let ButtonKind::Button { disabled: d, .. } = &mut self.kind {
            *d = disabled;
        }
    }

    pub fn with_disabled(mut self, disabled: bool) -> Self {
        self.set_disabled(disabled);
        self
    }

    pub fn is_disabled(&self) -> bool {
        matches!(self.kind, ButtonKind::Button { disabled: true, .. })
    }

    pub fn kind(&self) -> &ButtonKind {
        &self.kind
    }

    pub fn id(&self) -> &ElementId {
        &self.id
    }

    fn class_list(&self) -> String {
        format!(
            "button button--{} button--{}",
            self.variant.token(),
            self.size.token()
        )
    }
}

impl Component for Button {
    type Message = Message;

    fn update(&mut self, _msg: Message) -> Command<Message> {
        Command::none()
    }

    fn view(&self) -> Node {
        if self.label.is_none() {
            props::require_text("Button", "aria_label", self.aria_label.as_deref());
        }

        let element = match &self.kind {
            ButtonKind::Button {
                button_type,
                disabled,
            } => Element::new(Tag::Button)
                .attr("type", button_type.as_str())
                .flag_if(*disabled, "disabled"),
            ButtonKind::Link { href, external } => {
                let link = Element::new(Tag::A).attr("href", href);
                if *external {
                    link.attr("target", "_blank")
                        .attr("rel", "noopener noreferrer")
                } else {
                    link
                }
            }
        };

        let icon = self.icon.as_ref().map(|path| {
            Element::new(Tag::Svg)
                .class("button__icon")
                .attr("viewBox", "0 0 24 24")
                .attr("aria-hidden", "true")
                .child(Element::new(Tag::Path).attr("d", path))
        });

        element
            .class(self.class_list())
            .class_if(self.label.is_none(), "button--icon-only")
            .id(&self.id)
            .attr_opt("aria-label", self.aria_label.as_deref())
            .child(icon)
            .child(self.label.as_ref().map(|label| {
                Element::new(Tag::Span).class("button__label").text(label)
            }))
            .into()
    }

    fn listeners(&self) -> Vec<Listener<Message>> {
        vec![activate(&self.id, vec![self.id.clone()], |_| Message::Press)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mosaic_core::testing::TestProgram;
    use mosaic_core::Model;

    struct Host {
        button: Button,
        presses: usize,
    }

    impl Model for Host {
        type Message = Message;
        type Flags = Button;

        fn init(button: Button) -> (Self, Command<Message>) {
            (Host { button, presses: 0 }, Command::none())
        }

        fn update(&mut self, msg: Message) -> Command<Message> {
            self.presses += 1;
            self.button.update(msg)
        }

        fn view(&self) -> Node {
            self.button.view()
        }

        fn listeners(&self) -> Vec<Listener<Message>> {
            self.button.listeners()
        }
    }

    #[test]
    fn renders_native_button_with_tokens() {
        let button = Button::new("Save")
            .with_variant(ButtonVariant::Primary)
            .with_size(ButtonSize::Lg)
            .with_type(ButtonType::Submit);
        let html = button.view().to_html();
        assert!(html.starts_with(r#"<button class="button button--primary button--lg" type="submit""#));
        assert!(html.contains(r#"<span class="button__label">Save</span>"#));
    }

    #[test]
    fn link_renders_anchor() {
        let prog = TestProgram::<Host>::new(
            Button::link("Docs", "https://example.com/docs").with_external(true),
        );
        let link = prog.by_role("link", "Docs");
        let doc = prog.document();
        assert_eq!(doc.attribute(link, "href"), Some("https://example.com/docs"));
        assert_eq!(doc.attribute(link, "target"), Some("_blank"));
        assert_eq!(doc.attribute(link, "rel"), Some("noopener noreferrer"));
    }

    #[test]
    fn link_ignores_button_only_options() {
        let link = Button::link("Docs", "/docs")
            .with_type(ButtonType::Submit)
            .with_disabled(true);
        assert!(!link.is_disabled());
        assert_eq!(
            link.kind(),
            &ButtonKind::Link {
                href: "/docs".to_string(),
                external: false
            }
        );
    }

    #[test]
    fn click_presses() {
        let mut prog = TestProgram::<Host>::new(Button::new("Save"));
        prog.click(prog.by_role("button", "Save"));
        assert_eq!(prog.model().presses, 1);
    }

    #[test]
    fn clicking_the_label_presses() {
        let mut prog = TestProgram::<Host>::new(Button::new("Save"));
        let label = prog.document().find_by_text("Save").unwrap();
        prog.click(label);
        assert_eq!(prog.model().presses, 1);
    }

    #[test]
    fn disabled_button_does_not_press() {
        let mut prog = TestProgram::<Host>::new(Button::new("Save").with_disabled(true));
        prog.click(prog.by_role("button", "Save"));
        assert_eq!(prog.model().presses, 0);
    }

    #[test]
    fn icon_only_button_is_named_by_aria_label() {
        let prog = TestProgram::<Host>::new(
            Button::icon("M6 6l12 12M18 6L6 18").with_aria_label("Close"),
        );
        let button = prog.by_role("button", "Close");
        assert!(prog.document().has_class(button, "button--icon-only"));
    }
}
