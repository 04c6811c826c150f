//! **mosaic** -- accessible presentational UI components with a headless
//! document host.
//!
//! This is the umbrella crate that re-exports everything you need from a
//! single dependency:
//!
//! ```toml
//! [dependencies]
//! mosaic = "0.1"
//! ```
//!
//! # Re-exports
//!
//! * All public items from [`mosaic_core`] are available at the crate root
//!   ([`Model`], [`Component`], [`Command`], [`Listener`], [`Document`],
//!   [`Program`], etc.).
//! * The [`widgets`] module re-exports everything from [`mosaic_widgets`]
//!   (buttons, modals, tabs, tables, and more).
//! * The [`catalog`] module holds a story for every widget.
//! * [`tokio`] is re-exported so downstream crates do not need to depend on
//!   it directly.
//!
//! # Quick start
//!
//! ```ignore
//! use mosaic::testing::TestProgram;
//! use mosaic::widgets::modal::{Action, Modal};
//! use mosaic::{Key, Mount};
//!
//! let mut prog = TestProgram::<Mount<Modal>>::new(
//!     Modal::new("Delete file?").action(Action::new("Delete")),
//! );
//! prog.press_key(Key::Escape);
//! assert!(!prog.model().component.is_open());
//! ```

pub use mosaic_core::*;
pub mod widgets {
    pub use mosaic_widgets::*;
}

pub mod catalog;

pub use tokio;
