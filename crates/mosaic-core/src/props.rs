//! Development-time property validation.
//!
//! Components call these helpers when they render.  A violated contract
//! (a missing accessible label, an empty option list) is reported as a
//! `tracing` warning and rendering carries on with degraded accessibility;
//! nothing here ever fails.

use std::cell::Cell;
use std::fmt;

thread_local! {
    static VALIDATION: Cell<bool> = const { Cell::new(true) };
}

/// Run `render` with property warnings switched on or off, restoring the
/// previous setting afterwards (also on unwind).  A host wraps its own
/// view and listener calls in this, so the setting never leaks to other
/// hosts.
pub fn scoped<T>(enabled: bool, render: impl FnOnce() -> T) -> T {
    struct Restore(bool);

    impl Drop for Restore {
        fn drop(&mut self) {
            VALIDATION.with(|v| v.set(self.0));
        }
    }

    let _restore = Restore(VALIDATION.with(|v| v.replace(enabled)));
    render()
}

/// Whether warnings are on for the render in progress.  Outside any
/// [`scoped`] call this is `true`.
pub fn validation_enabled() -> bool {
    VALIDATION.with(Cell::get)
}

/// Warn unless `value` holds non-blank text.  Returns whether it did.
pub fn require_text(component: &str, prop: &str, value: Option<&str>) -> bool {
    let ok = value.is_some_and(|v| !v.trim().is_empty());
    if !ok {
        warn_invalid(component, prop, "a non-empty value is required");
    }
    ok
}

/// Warn unless `value` is present.  Returns whether it was.
pub fn require_some<T>(component: &str, prop: &str, value: Option<&T>) -> bool {
    if value.is_none() {
        warn_invalid(component, prop, "a value is required");
    }
    value.is_some()
}

/// Report an invalid property.
pub fn warn_invalid(component: &str, prop: &str, reason: impl fmt::Display) {
    if validation_enabled() {
        tracing::warn!(component, prop, "invalid property: {reason}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn require_text_rejects_blank() {
        assert!(require_text("Button", "label", Some("Save")));
        assert!(!require_text("Button", "label", Some("   ")));
        assert!(!require_text("Button", "label", None));
    }

    #[test]
    fn scoped_setting_is_restored() {
        assert!(validation_enabled());
        let inner = scoped(false, || {
            let nested = scoped(true, validation_enabled);
            (validation_enabled(), nested)
        });
        assert_eq!(inner, (false, true));
        assert!(validation_enabled());
    }

    #[test]
    fn require_some_reports_presence() {
        assert!(require_some("Modal", "on_dismiss", Some(&1)));
        assert!(!require_some::<i32>("Modal", "on_dismiss", None));
    }
}
