//! `BroadcastChannel` transport for cross-tab invalidation.

use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen::closure::Closure;
use web_sys::{BroadcastChannel, MessageEvent};

use crate::application::invalidation_bus::{CrossTabTransport, InboundHandler};
use crate::domain::errors::AppError;
use crate::domain::logging::LogComponent;
use crate::log_warn;

/// Open channel plus its message callback. Closes on drop.
pub struct BroadcastChannelTransport {
    channel: BroadcastChannel,
    _on_message: Closure<dyn FnMut(MessageEvent)>,
}

impl BroadcastChannelTransport {
    /// `None` when the browser has no BroadcastChannel support.
    pub fn open(name: &str, inbound: InboundHandler) -> Option<Self> {
        let channel = match BroadcastChannel::new(name) {
            Ok(channel) => channel,
            Err(e) => {
                log_warn!(
                    LogComponent::Infrastructure("BroadcastChannel"),
                    "cannot open '{}': {:?}",
                    name,
                    e
                );
                return None;
            }
        };

        let on_message = Closure::wrap(Box::new(move |event: MessageEvent| {
            if let Some(message) = event.data().as_string() {
                inbound(&message);
            }
        }) as Box<dyn FnMut(MessageEvent)>);
        channel.set_onmessage(Some(on_message.as_ref().unchecked_ref()));

        Some(Self {
            channel,
            _on_message: on_message,
        })
    }
}

impl CrossTabTransport for BroadcastChannelTransport {
    fn post(&self, message: &str) -> Result<(), AppError> {
        self.channel
            .post_message(&JsValue::from_str(message))
            .map_err(|e| AppError::Browser(format!("{:?}", e)))
    }
}

impl Drop for BroadcastChannelTransport {
    fn drop(&mut self) {
        self.channel.set_onmessage(None);
        self.channel.close();
    }
}
