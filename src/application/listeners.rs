use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

type Handler<T> = Rc<dyn Fn(&T)>;

/// Ordered set of in-process handlers.
///
/// Handlers are snapshotted before dispatch, so a handler may subscribe or
/// drop subscriptions while an event is being delivered.
pub struct Listeners<T> {
    inner: Rc<ListenersInner<T>>,
}

struct ListenersInner<T> {
    handlers: RefCell<Vec<(u64, Handler<T>)>>,
    next_id: Cell<u64>,
}

impl<T: 'static> Listeners<T> {
    pub fn new() -> Self {
        Self {
            inner: Rc::new(ListenersInner {
                handlers: RefCell::new(Vec::new()),
                next_id: Cell::new(0),
            }),
        }
    }

    pub fn subscribe<F>(&self, handler: F) -> Subscription
    where
        F: Fn(&T) + 'static,
    {
        let id = self.inner.next_id.get();
        self.inner.next_id.set(id + 1);
        self.inner
            .handlers
            .borrow_mut()
            .push((id, Rc::new(handler)));

        let weak: Weak<ListenersInner<T>> = Rc::downgrade(&self.inner);
        Subscription::new(move || {
            if let Some(inner) = weak.upgrade() {
                inner.handlers.borrow_mut().retain(|(hid, _)| *hid != id);
            }
        })
    }

    pub fn emit(&self, value: &T) {
        let snapshot: Vec<Handler<T>> = self
            .inner
            .handlers
            .borrow()
            .iter()
            .map(|(_, h)| Rc::clone(h))
            .collect();
        for handler in snapshot {
            handler(value);
        }
    }

    pub fn len(&self) -> usize {
        self.inner.handlers.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T: 'static> Default for Listeners<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Unsubscribes when dropped.
#[must_use = "dropping a Subscription removes the handler immediately"]
pub struct Subscription {
    cancel: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    pub fn new(cancel: impl FnOnce() + 'static) -> Self {
        Self {
            cancel: Some(Box::new(cancel)),
        }
    }

    /// Keep the handler for the lifetime of the program.
    pub fn forget(mut self) {
        self.cancel = None;
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}
