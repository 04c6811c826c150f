//! Built-in listeners.
//!
//! - **Outside interaction** ([`OutsideClick`]) -- pointer-down outside a
//!   bound element.
//! - **Dismiss key** ([`DismissKey`]) -- a document-level key press,
//!   `Escape` by default.
//! - **Delegated events** ([`activate`], [`on_input`], [`on_key_within`]) --
//!   clicks, input and key presses routed by element id.
//! - **Timers** ([`After`]) -- a one-shot delay that is cancelled when the
//!   listener goes away.

mod delegate;
mod dismiss_key;
mod outside;
mod timer;

pub use delegate::*;
pub use dismiss_key::*;
pub use outside::*;
pub use timer::*;
