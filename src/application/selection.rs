use std::rc::Rc;

use crate::application::listeners::Subscription;
use crate::application::store::Store;
use crate::domain::logging::LogComponent;
use crate::domain::repositories::KeyValueStore;
use crate::domain::wishlist::CorpCode;
use crate::log_warn;

/// sessionStorage key for the focused company
pub const SELECTED_CORP_KEY: &str = "selectedCorp";

/// Company currently focused in this tab. Empty means none.
#[derive(Clone)]
pub struct SelectionStore {
    storage: Rc<dyn KeyValueStore>,
    store: Store<Option<CorpCode>>,
}

impl SelectionStore {
    pub fn new(storage: Rc<dyn KeyValueStore>) -> Self {
        let initial = storage
            .get(SELECTED_CORP_KEY)
            .map(CorpCode::new)
            .filter(|c| !c.is_empty());
        Self {
            storage,
            store: Store::new(initial),
        }
    }

    pub fn selected(&self) -> Option<CorpCode> {
        self.store.get()
    }

    pub fn subscribe(&self, observer: impl Fn(&Option<CorpCode>) + 'static) -> Subscription {
        self.store.subscribe(observer)
    }

    pub fn select(&self, corp_code: &str) {
        let next = Some(CorpCode::new(corp_code)).filter(|c| !c.is_empty());
        if self.store.with(|current| *current == next) {
            return;
        }
        let persisted = match &next {
            Some(code) => self.storage.set(SELECTED_CORP_KEY, code.value()),
            None => self.storage.remove(SELECTED_CORP_KEY),
        };
        if let Err(e) = persisted {
            log_warn!(LogComponent::Application("Selection"), "{}", e);
        }
        self.store.update(|current| *current = next);
    }

    /// `?corp=` deep link. A missing or blank parameter keeps the current
    /// selection.
    pub fn select_from_query(&self, raw: Option<&str>) {
        if let Some(code) = raw.map(str::trim).filter(|c| !c.is_empty()) {
            self.select(code);
        }
    }

    pub fn clear(&self) {
        self.select("");
    }
}
