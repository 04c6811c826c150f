use crate::document::{Document, NodeId};
use crate::event::{DomEvent, EventKind, Key};
use crate::ids::ElementId;
use crate::listener::{hash_of, Listener, ListenerId};

struct Activate;
struct InputOf;
struct KeyWithin;

/// A delegated click listener for a set of activator elements.
///
/// A click on any of `targets`, or on a descendant of one, produces
/// `on_activate(target)`.  The nearest matching ancestor wins.  Disabled
/// activators (`disabled` or `aria-disabled="true"`) are ignored.
///
/// `owner` scopes the registration; use the owning component's root id.
/// The mapping must be a pure function of the activated id: the listener
/// is only re-registered when the set of targets changes.
pub fn activate<Msg: Send + 'static>(
    owner: &ElementId,
    targets: Vec<ElementId>,
    on_activate: impl Fn(&ElementId) -> Msg + Send + Sync + 'static,
) -> Listener<Msg> {
    let identity = hash_of(&targets);
    Listener::document(
        ListenerId::with_str::<Activate>(owner.as_str()),
        EventKind::Click,
        move |event, document| {
            let DomEvent::Click(target) = event else {
                return None;
            };
            let (node, id) = document.ancestors(*target).find_map(|n| {
                let id = document.attribute(n, "id")?;
                targets.iter().find(|t| t.as_str() == id).map(|t| (n, t))
            })?;
            if is_disabled(document, node) {
                tracing::trace!(target_id = %id, "ignoring click on disabled activator");
                return None;
            }
            Some(on_activate(id))
        },
    )
    .with_identity(identity)
}

/// Input events whose target is the element with id `control`.
pub fn on_input<Msg: Send + 'static>(
    control: &ElementId,
    map: impl Fn(String) -> Msg + Send + Sync + 'static,
) -> Listener<Msg> {
    let control = control.clone();
    Listener::document(
        ListenerId::with_str::<InputOf>(control.as_str()),
        EventKind::Input,
        move |event, document| match event {
            DomEvent::Input { target, value }
                if document.attribute(*target, "id") == Some(control.as_str()) =>
            {
                Some(map(value.clone()))
            }
            _ => None,
        },
    )
}

/// Key presses delivered to the element with id `container` or anything
/// inside it.  `map` decides which keys matter.
pub fn on_key_within<Msg: Send + 'static>(
    container: &ElementId,
    map: impl Fn(Key) -> Option<Msg> + Send + Sync + 'static,
) -> Listener<Msg> {
    let container = container.clone();
    Listener::document(
        ListenerId::with_str::<KeyWithin>(container.as_str()),
        EventKind::KeyDown,
        move |event, document| {
            let DomEvent::KeyDown(press) = event else {
                return None;
            };
            let focused = press.target?;
            let root = document.element_by_id(container.as_str())?;
            if document.contains(root, focused) {
                map(press.key)
            } else {
                None
            }
        },
    )
}

fn is_disabled(document: &Document, node: NodeId) -> bool {
    document.has_attribute(node, "disabled") || document.attribute(node, "aria-disabled") == Some("true")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::KeyPress;
    use crate::listener::ListenerManager;
    use crate::markup::{Element, Tag};

    fn mount(tree: Element) -> Document {
        let mut document = Document::new();
        document.mount(&tree.into());
        document
    }

    #[test]
    fn activate_matches_nearest_target() {
        let owner = ElementId::generate();
        let a = ElementId::generate();
        let b = ElementId::generate();
        let document = mount(
            Element::new(Tag::Div)
                .id(&owner)
                .child(Element::new(Tag::Button).id(&a).child(Element::new(Tag::Span).text("A")))
                .child(Element::new(Tag::Button).id(&b).text("B")),
        );
        let mut manager = ListenerManager::headless();
        manager.reconcile(vec![activate(&owner, vec![a.clone(), b.clone()], |id| {
            id.to_string()
        })]);

        let span = document.find_by_text("A").unwrap();
        let label = document.children(span)[0];
        assert_eq!(
            manager.dispatch(&DomEvent::Click(label), &document),
            vec![a.to_string()]
        );
        let b_node = document.element_by_id(b.as_str()).unwrap();
        assert_eq!(
            manager.dispatch(&DomEvent::Click(b_node), &document),
            vec![b.to_string()]
        );
        assert!(manager
            .dispatch(&DomEvent::Click(document.body()), &document)
            .is_empty());
    }

    #[test]
    fn activate_skips_disabled() {
        let owner = ElementId::generate();
        let a = ElementId::generate();
        let document = mount(
            Element::new(Tag::Div)
                .id(&owner)
                .child(Element::new(Tag::Button).id(&a).flag("disabled").text("A")),
        );
        let mut manager = ListenerManager::headless();
        manager.reconcile(vec![activate(&owner, vec![a.clone()], |_| ())]);
        let node = document.element_by_id(a.as_str()).unwrap();
        assert!(manager.dispatch(&DomEvent::Click(node), &document).is_empty());
    }

    #[test]
    fn activate_identity_tracks_targets() {
        let owner = ElementId::generate();
        let a = ElementId::generate();
        let b = ElementId::generate();
        let first = activate(&owner, vec![a.clone()], |_| ());
        let same = activate(&owner, vec![a.clone()], |_| ());
        let more = activate(&owner, vec![a, b], |_| ());
        assert_eq!(first.identity(), same.identity());
        assert_ne!(first.identity(), more.identity());
    }

    #[test]
    fn input_routes_by_control_id() {
        let field = ElementId::generate();
        let other = ElementId::generate();
        let document = mount(
            Element::new(Tag::Form)
                .child(Element::new(Tag::Input).id(&field))
                .child(Element::new(Tag::Input).id(&other)),
        );
        let mut manager = ListenerManager::headless();
        manager.reconcile(vec![on_input(&field, |value| value)]);
        let target = document.element_by_id(field.as_str()).unwrap();
        let elsewhere = document.element_by_id(other.as_str()).unwrap();
        let typed = |target| DomEvent::Input {
            target,
            value: "rust".to_string(),
        };
        assert_eq!(manager.dispatch(&typed(target), &document), vec!["rust"]);
        assert!(manager.dispatch(&typed(elsewhere), &document).is_empty());
    }

    #[test]
    fn key_within_requires_focus_inside() {
        let container = ElementId::generate();
        let inside = ElementId::generate();
        let outside = ElementId::generate();
        let document = mount(
            Element::new(Tag::Div)
                .child(Element::new(Tag::Div).id(&container).child(Element::new(Tag::Button).id(&inside)))
                .child(Element::new(Tag::Button).id(&outside)),
        );
        let mut manager = ListenerManager::headless();
        manager.reconcile(vec![on_key_within(&container, |key| {
            (key == Key::Enter).then_some("enter")
        })]);
        let press = |id: &ElementId, key| {
            DomEvent::KeyDown(KeyPress::on(key, document.element_by_id(id.as_str()).unwrap()))
        };
        assert_eq!(manager.dispatch(&press(&inside, Key::Enter), &document), vec!["enter"]);
        assert!(manager.dispatch(&press(&inside, Key::Escape), &document).is_empty());
        assert!(manager.dispatch(&press(&outside, Key::Enter), &document).is_empty());
        assert!(manager
            .dispatch(&DomEvent::KeyDown(KeyPress::new(Key::Enter)), &document)
            .is_empty());
    }
}
