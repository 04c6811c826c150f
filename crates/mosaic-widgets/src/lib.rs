//! Ready-made widgets for the **mosaic** component library.
//!
//! Every widget in this crate implements [`mosaic_core::Component`], so it
//! can be embedded inside any [`mosaic_core::Model`] and composed freely in
//! its markup.  Widgets render accessible markup (roles, names, ARIA state)
//! and declare their document listeners; the host runtime does the rest.
//!
//! # Widgets
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`accordion`] | Disclosure sections, at most one expanded |
//! | [`button`] | Native button or link styled as a button |
//! | [`modal`] | Dismissible dialog with footer actions |
//! | [`navbar`] | Navigation bar with a collapsible menu |
//! | [`notification`] | Status or alert banner with auto-dismiss |
//! | [`pagination`] | Previous/next and windowed page buttons |
//! | [`search`] | Search landmark with a search box |
//! | [`select`] | Labelled native select |
//! | [`spinner`] | Loading indicator |
//! | [`table`] | Data grid with row selection |
//! | [`tabs`] | Tab list with keyboard navigation |
//! | [`tooltip`] | Hover and focus tooltip |

pub mod accordion;
pub mod button;
pub mod modal;
pub mod navbar;
pub mod notification;
pub mod pagination;
pub mod search;
pub mod select;
pub mod spinner;
pub mod table;
pub mod tabs;
pub mod tooltip;
