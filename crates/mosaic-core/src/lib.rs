//! Core runtime for the **mosaic** component library.
//!
//! `mosaic-core` provides the traits, types, and runtime that every mosaic
//! component is built on.  The design follows the [Elm Architecture]: a
//! component is a pure **update -> view** cycle producing a markup tree,
//! with side effects pushed to the edges through [`Command`]s and
//! [`Listener`]s.
//!
//! # Key types
//!
//! | Type | Purpose |
//! |------|---------|
//! | [`Component`] | Reusable piece of UI: update / view / listeners |
//! | [`Model`] | Top-level application trait (adds `init`) |
//! | [`Node`], [`Element`] | Markup tree returned from `view` |
//! | [`Document`] | Mounted tree: containment, roles, accessible names |
//! | [`Command`] | A side effect executed by the runtime |
//! | [`Listener`] | Document-level event handler or one-shot timer |
//! | [`Program`] | Hosts a [`Model`] on tokio and dispatches DOM events |
//! | [`TestProgram`](testing::TestProgram) | Headless harness for unit tests |
//!
//! # Architecture
//!
//! 1. **view** -- The runtime calls [`Model::view`] and mounts the returned
//!    [`Node`] into its [`Document`].
//! 2. **listeners** -- [`Model::listeners`] declares which document events
//!    (and timers) the current state cares about; the runtime reconciles the
//!    registrations.
//! 3. **event** -- A [`DomEvent`] dispatched by the host runs the matching
//!    listeners in registration order, each producing a message.
//! 4. **update** -- [`Model::update`] receives the message, mutates state,
//!    and optionally returns a [`Command`].
//! 5. **repeat** -- Steps 1-4 repeat until the program is unmounted, which
//!    releases every listener and timer.
//!
//! [Elm Architecture]: https://guide.elm-lang.org/architecture/

pub mod callback;
pub mod command;
pub mod component;
pub mod document;
pub mod event;
pub mod ids;
pub mod listener;
pub mod listeners;
pub mod markup;
pub mod model;
pub mod props;
pub mod runtime;
pub mod testing;

pub use callback::Callback;
pub use command::Command;
pub use component::Component;
pub use document::{ClassName, Document, NodeId, QueryError, RoleQuery};
pub use event::{DomEvent, EventKind, Key, KeyParseError, KeyPress};
pub use ids::{ElementId, NodeRef};
pub use listener::{Listener, ListenerId, ListenerManager};
pub use listeners::{activate, on_input, on_key_within, After, DismissKey, OutsideClick};
pub use markup::{Attribute, Element, Node, Tag};
pub use model::{Model, Mount};
pub use runtime::{Program, ProgramError, ProgramHandle, ProgramOptions};
