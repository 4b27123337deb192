use std::cell::RefCell;
use std::rc::Rc;

use crate::application::listeners::{Listeners, Subscription};

/// Shared, observable state owned by one view-model.
///
/// Observers receive a snapshot after every update, once the borrow has been
/// released, so they are free to read the store again.
pub struct Store<T> {
    state: Rc<RefCell<T>>,
    listeners: Rc<Listeners<T>>,
}

impl<T> Clone for Store<T> {
    fn clone(&self) -> Self {
        Self {
            state: Rc::clone(&self.state),
            listeners: Rc::clone(&self.listeners),
        }
    }
}

impl<T: Clone + 'static> Store<T> {
    pub fn new(initial: T) -> Self {
        Self {
            state: Rc::new(RefCell::new(initial)),
            listeners: Rc::new(Listeners::new()),
        }
    }

    pub fn get(&self) -> T {
        self.state.borrow().clone()
    }

    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.state.borrow())
    }

    pub fn update<R>(&self, f: impl FnOnce(&mut T) -> R) -> R {
        let (result, snapshot) = {
            let mut state = self.state.borrow_mut();
            let result = f(&mut state);
            (result, state.clone())
        };
        self.listeners.emit(&snapshot);
        result
    }

    pub fn subscribe(&self, observer: impl Fn(&T) + 'static) -> Subscription {
        self.listeners.subscribe(observer)
    }
}
