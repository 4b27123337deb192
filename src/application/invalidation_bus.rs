//! In-tab publish/subscribe for [`BusEvent`]s, with an optional cross-tab link.
//!
//! `publish` always reaches local subscribers first. Events that cross tabs
//! are then posted on the transport, best effort; a missing or broken
//! transport never affects local delivery. Messages arriving from other tabs
//! are dispatched locally only, so they are never echoed back.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use crate::application::listeners::{Listeners, Subscription};
use crate::domain::errors::AppError;
use crate::domain::events::{BusEvent, DomainEvent};
use crate::domain::logging::LogComponent;
use crate::{log_debug, log_warn};

/// Outbound side of the cross-tab channel
pub trait CrossTabTransport {
    fn post(&self, message: &str) -> Result<(), AppError>;
}

/// Inbound callback handed to a transport factory
pub type InboundHandler = Box<dyn Fn(&str)>;

#[derive(Clone)]
pub struct InvalidationBus {
    inner: Rc<BusInner>,
}

struct BusInner {
    listeners: Listeners<BusEvent>,
    transport: RefCell<Option<Box<dyn CrossTabTransport>>>,
}

impl InvalidationBus {
    pub fn new() -> Self {
        Self {
            inner: Rc::new(BusInner {
                listeners: Listeners::new(),
                transport: RefCell::new(None),
            }),
        }
    }

    pub fn subscribe(&self, handler: impl Fn(&BusEvent) + 'static) -> Subscription {
        self.inner.listeners.subscribe(handler)
    }

    pub fn publish(&self, event: BusEvent) {
        log_debug!(
            LogComponent::Application("InvalidationBus"),
            "publish {}",
            event.event_type()
        );
        self.inner.listeners.emit(&event);

        if let Some(wire) = event.to_wire() {
            if let Some(transport) = self.inner.transport.borrow().as_ref() {
                if let Err(e) = transport.post(wire) {
                    log_warn!(
                        LogComponent::Application("InvalidationBus"),
                        "cross-tab post failed: {}",
                        e
                    );
                }
            }
        }
    }

    /// Opens the cross-tab link. `open` receives the inbound handler and
    /// returns the transport, or `None` when the browser has no channel.
    pub fn connect_cross_tab<T, F>(&self, open: F) -> bool
    where
        T: CrossTabTransport + 'static,
        F: FnOnce(InboundHandler) -> Option<T>,
    {
        let weak: Weak<BusInner> = Rc::downgrade(&self.inner);
        let inbound: InboundHandler = Box::new(move |message: &str| {
            let Some(inner) = weak.upgrade() else {
                return;
            };
            match BusEvent::from_wire(message) {
                Some(event) => inner.listeners.emit(&event),
                None => {
                    log_debug!(
                        LogComponent::Application("InvalidationBus"),
                        "ignoring cross-tab message {:?}",
                        message
                    );
                }
            }
        });

        match open(inbound) {
            Some(transport) => {
                *self.inner.transport.borrow_mut() = Some(Box::new(transport));
                true
            }
            None => {
                log_warn!(
                    LogComponent::Application("InvalidationBus"),
                    "cross-tab channel unavailable, invalidation stays in this tab"
                );
                false
            }
        }
    }

    /// Drops the transport, which closes the underlying channel.
    pub fn disconnect_cross_tab(&self) {
        self.inner.transport.borrow_mut().take();
    }

    pub fn is_cross_tab_connected(&self) -> bool {
        self.inner.transport.borrow().is_some()
    }
}

impl Default for InvalidationBus {
    fn default() -> Self {
        Self::new()
    }
}
