use crate::callback::Callback;
use crate::document::{Document, NodeId};
use crate::event::{DomEvent, EventKind};
use crate::ids::NodeRef;
use crate::listener::{hash_of, Listener, ListenerId};
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_INSTANCE: AtomicU64 = AtomicU64::new(1);

/// Fires a callback when a pointer-down lands outside a boundary element.
///
/// The boundary is a [`NodeRef`] attached to an element in the owner's
/// view.  While enabled, the detector declares a single document-level
/// `PointerDown` listener.  Only pointer-down is observed, so a drag that
/// starts inside the boundary never qualifies, wherever it is released.
///
/// Each detector owns its own registration, so several detectors may share
/// one boundary.
///
/// A target whose class name is not a plain string (SVG elements, text
/// nodes) always qualifies, because containment cannot be checked against
/// it reliably.
///
/// # Example
///
/// ```rust,ignore
/// struct Popover {
///     panel: NodeRef,
///     outside: OutsideClick<Message>,
/// }
///
/// fn listeners(&self) -> Vec<Listener<Message>> {
///     self.outside.listener().into_iter().collect()
/// }
/// ```
#[derive(Debug, Clone)]
pub struct OutsideClick<Msg> {
    boundary: NodeRef,
    callback: Callback<Msg>,
    enabled: bool,
    instance: u64,
}

impl<Msg: Send + 'static> OutsideClick<Msg> {
    /// An enabled detector bound to `boundary`.
    pub fn new(boundary: NodeRef, callback: Callback<Msg>) -> Self {
        Self {
            boundary,
            callback,
            enabled: true,
            instance: NEXT_INSTANCE.fetch_add(1, Ordering::Relaxed),
        }
    }

    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Replace the callback.  The next reconcile re-registers the listener
    /// so the new callback is the one invoked.
    pub fn set_callback(&mut self, callback: Callback<Msg>) {
        self.callback = callback;
    }

    pub fn boundary(&self) -> NodeRef {
        self.boundary
    }

    /// The listener to declare, or `None` while disabled.
    pub fn listener(&self) -> Option<Listener<Msg>> {
        if !self.enabled {
            return None;
        }
        let boundary = self.boundary;
        let callback = self.callback.clone();
        let listener = Listener::document(
            ListenerId::new::<OutsideClick<()>>(self.instance),
            EventKind::PointerDown,
            move |event, document| match event {
                DomEvent::PointerDown(target) if is_outside(document, boundary, *target) => {
                    Some(callback.emit())
                }
                _ => None,
            },
        );
        Some(listener.with_identity(hash_of(&(self.callback.identity(), boundary.key()))))
    }
}

/// Whether a pointer-down on `target` counts as outside `boundary`.
///
/// An unbound boundary (its element is not mounted) never has a plain-class
/// target outside it.
pub fn is_outside(document: &Document, boundary: NodeRef, target: NodeId) -> bool {
    if document.class_name(target).as_plain().is_none() {
        return true;
    }
    match document.resolve(boundary) {
        Some(boundary) => !document.contains(boundary, target),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::ElementId;
    use crate::listener::ListenerManager;
    use crate::markup::{Element, Node, Tag};

    struct Fixture {
        document: Document,
        boundary: NodeRef,
        inner: ElementId,
        outside: ElementId,
        icon: ElementId,
    }

    fn fixture() -> Fixture {
        let boundary = NodeRef::new();
        let inner = ElementId::generate();
        let outside = ElementId::generate();
        let icon = ElementId::generate();
        let tree: Node = Element::new(Tag::Div)
            .class("page")
            .child(
                Element::new(Tag::Div)
                    .class("panel")
                    .node_ref(boundary)
                    .child(Element::new(Tag::Button).class("inner").id(&inner).text("Ok"))
                    .child(Element::new(Tag::Svg).id(&icon)),
            )
            .child(Element::new(Tag::P).class("outside").id(&outside).text("Elsewhere"))
            .into();
        let mut document = Document::new();
        document.mount(&tree);
        Fixture {
            document,
            boundary,
            inner,
            outside,
            icon,
        }
    }

    fn node(fx: &Fixture, id: &ElementId) -> NodeId {
        fx.document.element_by_id(id.as_str()).unwrap()
    }

    fn registered(detector: &OutsideClick<&'static str>) -> ListenerManager<&'static str> {
        let mut manager = ListenerManager::headless();
        manager.reconcile(detector.listener().into_iter().collect());
        manager
    }

    #[test]
    fn pointer_down_inside_does_not_fire() {
        let fx = fixture();
        let manager = registered(&OutsideClick::new(fx.boundary, Callback::message("out")));
        let event = DomEvent::PointerDown(node(&fx, &fx.inner));
        assert!(manager.dispatch(&event, &fx.document).is_empty());
    }

    #[test]
    fn pointer_down_on_boundary_itself_does_not_fire() {
        let fx = fixture();
        let manager = registered(&OutsideClick::new(fx.boundary, Callback::message("out")));
        let boundary = fx.document.resolve(fx.boundary).unwrap();
        assert!(manager
            .dispatch(&DomEvent::PointerDown(boundary), &fx.document)
            .is_empty());
    }

    #[test]
    fn pointer_down_outside_fires_once() {
        let fx = fixture();
        let manager = registered(&OutsideClick::new(fx.boundary, Callback::message("out")));
        let event = DomEvent::PointerDown(node(&fx, &fx.outside));
        assert_eq!(manager.dispatch(&event, &fx.document), vec!["out"]);
    }

    #[test]
    fn other_pointer_events_never_fire() {
        let fx = fixture();
        let manager = registered(&OutsideClick::new(fx.boundary, Callback::message("out")));
        let target = node(&fx, &fx.outside);
        for event in [
            DomEvent::PointerMove(target),
            DomEvent::PointerUp(target),
            DomEvent::Click(target),
        ] {
            assert!(manager.dispatch(&event, &fx.document).is_empty());
        }
    }

    #[test]
    fn disabled_detector_registers_nothing() {
        let fx = fixture();
        let detector = OutsideClick::new(fx.boundary, Callback::message("out")).with_enabled(false);
        assert!(detector.listener().is_none());
        let manager = registered(&detector);
        assert_eq!(manager.registered(EventKind::PointerDown), 0);
    }

    #[test]
    fn svg_target_inside_boundary_still_qualifies() {
        let fx = fixture();
        let manager = registered(&OutsideClick::new(fx.boundary, Callback::message("out")));
        let event = DomEvent::PointerDown(node(&fx, &fx.icon));
        assert_eq!(manager.dispatch(&event, &fx.document), vec!["out"]);
    }

    #[test]
    fn unbound_boundary_does_not_fire_for_plain_targets() {
        let fx = fixture();
        let unbound = NodeRef::new();
        assert!(!is_outside(&fx.document, unbound, node(&fx, &fx.outside)));
        assert!(is_outside(&fx.document, unbound, node(&fx, &fx.icon)));
    }

    #[test]
    fn detectors_sharing_a_boundary_both_fire() {
        let fx = fixture();
        let first = OutsideClick::new(fx.boundary, Callback::message("a"));
        let second = OutsideClick::new(fx.boundary, Callback::message("b"));
        let mut manager = ListenerManager::headless();
        manager.reconcile(
            first
                .listener()
                .into_iter()
                .chain(second.listener())
                .collect(),
        );
        assert_eq!(manager.registered(EventKind::PointerDown), 2);
        let event = DomEvent::PointerDown(node(&fx, &fx.outside));
        assert_eq!(manager.dispatch(&event, &fx.document), vec!["a", "b"]);
    }

    #[test]
    fn callback_change_changes_identity() {
        let fx = fixture();
        let mut detector = OutsideClick::new(fx.boundary, Callback::message("first"));
        let mut manager = ListenerManager::headless();
        manager.reconcile(detector.listener().into_iter().collect());
        let before = detector.listener().unwrap().identity();
        detector.set_callback(Callback::message("second"));
        assert_ne!(before, detector.listener().unwrap().identity());

        manager.reconcile(detector.listener().into_iter().collect());
        assert_eq!(manager.registered(EventKind::PointerDown), 1);
        let event = DomEvent::PointerDown(node(&fx, &fx.outside));
        assert_eq!(manager.dispatch(&event, &fx.document), vec!["second"]);
    }
}
