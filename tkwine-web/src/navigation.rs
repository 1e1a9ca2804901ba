//! Browser navigation primitive.
//!
//! Wraps the history API as the `Navigator` the URL synchronizer needs:
//! reads of the current address plus replace-style navigation that adds
//! no history entry and leaves scroll untouched.

use tkwine_common::Navigator;
use tracing::warn;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

/// `Navigator` over `window.location` and `window.history`.
#[derive(Default)]
pub struct BrowserNavigator;

impl BrowserNavigator {
    pub fn new() -> Self {
        Self
    }
}

impl Navigator for BrowserNavigator {
    fn pathname(&self) -> String {
        web_sys::window()
            .and_then(|w| w.location().pathname().ok())
            .unwrap_or_default()
    }

    fn search(&self) -> String {
        web_sys::window()
            .and_then(|w| w.location().search().ok())
            .unwrap_or_default()
            .trim_start_matches('?')
            .to_string()
    }

    fn replace(&self, pathname: &str, query: &str) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let url = if query.is_empty() {
            pathname.to_string()
        } else {
            format!("{pathname}?{query}")
        };
        match window.history() {
            Ok(history) => {
                if let Err(e) = history.replace_state_with_url(&JsValue::NULL, "", Some(&url)) {
                    warn!("replace_state failed: {e:?}");
                }
            }
            Err(e) => warn!("history unavailable: {e:?}"),
        }
    }
}

/// A window event listener that removes itself when dropped.
///
/// The closure lives in the struct and the `Drop` impl detaches the
/// listener, tying its lifetime to Rust ownership instead of leaking it
/// with `Closure::forget()`. Used for `popstate`, so a back/forward
/// subscription cannot outlive the hook that created it.
pub struct WindowEventListener {
    window: web_sys::Window,
    event_name: &'static str,
    callback: Closure<dyn FnMut(JsValue)>,
}

impl WindowEventListener {
    /// Attach an event listener to the window. Returns `None` outside a
    /// browser context.
    pub fn new(event_name: &'static str, callback: impl FnMut(JsValue) + 'static) -> Option<Self> {
        let window = web_sys::window()?;
        let callback: Closure<dyn FnMut(JsValue)> = Closure::wrap(Box::new(callback));

        window
            .add_event_listener_with_callback(event_name, callback.as_ref().unchecked_ref())
            .ok();

        Some(Self {
            window,
            event_name,
            callback,
        })
    }
}

impl Drop for WindowEventListener {
    fn drop(&mut self) {
        let _ = self.window.remove_event_listener_with_callback(
            self.event_name,
            self.callback.as_ref().unchecked_ref(),
        );
    }
}
