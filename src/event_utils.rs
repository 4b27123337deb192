//! Window and document listeners that detach themselves when dropped.

use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{AddEventListenerOptions, Event, EventTarget};

#[derive(Clone, Debug)]
pub struct EventOptions {
    pub passive: bool,
    pub capture: bool,
    pub once: bool,
}

impl Default for EventOptions {
    fn default() -> Self {
        Self {
            passive: true,
            capture: false,
            once: false,
        }
    }
}

/// Registered listener; removed from its target on drop.
pub struct ListenerHandle {
    target: EventTarget,
    event_name: &'static str,
    callback: Closure<dyn FnMut(Event)>,
    capture: bool,
}

impl Drop for ListenerHandle {
    fn drop(&mut self) {
        let _ = self.target.remove_event_listener_with_callback_and_bool(
            self.event_name,
            self.callback.as_ref().unchecked_ref(),
            self.capture,
        );
    }
}

fn listen(
    target: EventTarget,
    event_name: &'static str,
    options: &EventOptions,
    mut cb: impl FnMut(Event) + 'static,
) -> Option<ListenerHandle> {
    let opts = AddEventListenerOptions::new();
    opts.set_passive(options.passive);
    opts.set_capture(options.capture);
    opts.set_once(options.once);

    let callback = Closure::wrap(Box::new(move |ev: Event| cb(ev)) as Box<dyn FnMut(Event)>);
    target
        .add_event_listener_with_callback_and_add_event_listener_options(
            event_name,
            callback.as_ref().unchecked_ref(),
            &opts,
        )
        .ok()?;

    Some(ListenerHandle {
        target,
        event_name,
        callback,
        capture: options.capture,
    })
}

/// `None` outside a browser window.
pub fn window_listener(
    event_name: &'static str,
    options: &EventOptions,
    cb: impl FnMut(Event) + 'static,
) -> Option<ListenerHandle> {
    let window = web_sys::window()?;
    listen(window.into(), event_name, options, cb)
}

pub fn document_listener(
    event_name: &'static str,
    options: &EventOptions,
    cb: impl FnMut(Event) + 'static,
) -> Option<ListenerHandle> {
    let document = web_sys::window()?.document()?;
    listen(document.into(), event_name, options, cb)
}

pub fn document_is_visible() -> bool {
    web_sys::window()
        .and_then(|w| w.document())
        .map(|d| d.visibility_state() == web_sys::VisibilityState::Visible)
        .unwrap_or(false)
}
