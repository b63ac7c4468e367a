//! Settings override utility for tests.
//!
//! Provides [`override_settings`] to swap the active [`Settings`] for the
//! duration of a closure. Overrides live on a thread-local stack, so nested
//! overrides and parallel tests stay isolated.
//!
//! ## Example
//!
//! ```
//! use uniform_rs_test::override_settings::{get_settings, override_settings, SettingsOverride};
//!
//! let overrides = SettingsOverride::new().set_prevent_submit(true).set_language_code("fr");
//!
//! override_settings(overrides, || {
//!     let settings = get_settings();
//!     assert!(settings.options.prevent_submit);
//!     assert_eq!(settings.language_code, "fr");
//! });
//! assert!(!get_settings().options.prevent_submit);
//! ```

use std::cell::RefCell;
use std::path::PathBuf;

use uniform_rs_core::{OptionOverrides, Settings};

thread_local! {
    static SETTINGS_STACK: RefCell<Vec<Settings>> = const { RefCell::new(Vec::new()) };
}

/// A builder for the settings to activate.
///
/// Starts from [`Settings::default()`].
#[derive(Debug, Clone, Default)]
pub struct SettingsOverride {
    settings: Settings,
}

impl SettingsOverride {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts from the given settings.
    pub fn from_settings(settings: Settings) -> Self {
        Self { settings }
    }

    #[must_use]
    pub fn set_debug(mut self, debug: bool) -> Self {
        self.settings.debug = debug;
        self
    }

    #[must_use]
    pub fn set_language_code(mut self, code: &str) -> Self {
        self.settings.language_code = code.to_string();
        self
    }

    #[must_use]
    pub fn set_messages(mut self, path: impl Into<PathBuf>) -> Self {
        self.settings.messages = Some(path.into());
        self
    }

    #[must_use]
    pub fn set_prevent_submit(mut self, prevent: bool) -> Self {
        self.settings.options.prevent_submit = prevent;
        self
    }

    #[must_use]
    pub fn set_ask_on_leave(mut self, ask: bool) -> Self {
        self.settings.options.ask_on_leave = ask;
        self
    }

    /// Applies option overrides to the default options.
    #[must_use]
    pub fn set_options(mut self, overrides: &OptionOverrides) -> Self {
        self.settings.options = self.settings.options.merged(overrides);
        self
    }

    pub fn build(self) -> Settings {
        self.settings
    }
}

/// Runs `f` with `overrides` active, restoring the previous settings
/// afterwards, even if `f` panics.
pub fn override_settings<F, R>(overrides: SettingsOverride, f: F) -> R
where
    F: FnOnce() -> R,
{
    struct PopGuard;
    impl Drop for PopGuard {
        fn drop(&mut self) {
            SETTINGS_STACK.with(|stack| {
                stack.borrow_mut().pop();
            });
        }
    }

    SETTINGS_STACK.with(|stack| {
        stack.borrow_mut().push(overrides.build());
    });

    let _guard = PopGuard;
    f()
}

/// Returns the active override, or default settings when none is active.
pub fn get_settings() -> Settings {
    SETTINGS_STACK.with(|stack| stack.borrow().last().cloned().unwrap_or_default())
}
