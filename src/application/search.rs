//! Company search and the add-to-wishlist action.
//!
//! Debouncing lives in the view (a timer per keystroke); this controller
//! guarantees that only the newest search's result is ever applied.

use std::cell::RefCell;
use std::rc::Rc;

use futures::future::{AbortHandle, Abortable};

use crate::application::invalidation_bus::InvalidationBus;
use crate::application::listeners::Subscription;
use crate::application::notifications::Notifier;
use crate::application::store::Store;
use crate::application::{Spawner, spawn_task};
use crate::domain::errors::ApiError;
use crate::domain::events::BusEvent;
use crate::domain::logging::LogComponent;
use crate::domain::repositories::{CorpSearchApi, KeyValueStore, WishlistApi};
use crate::domain::search::{
    CorpSummary, MSG_ADD_NETWORK, MSG_SEARCH_FAILED, SearchState, add_failed_message,
    added_message,
};
use crate::domain::wishlist::{AUTO_SYNC_KEY, parse_auto_sync};
use crate::{log_debug, log_warn};

const COMPONENT: LogComponent = LogComponent::Application("Search");

/// How an add attempt ended, mirrored by the notification shown
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddOutcome {
    Added,
    Rejected(String),
    NetworkFailure,
}

pub struct SearchController<A> {
    inner: Rc<SearchInner<A>>,
}

impl<A> Clone for SearchController<A> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

struct SearchInner<A> {
    api: A,
    limit: u32,
    bus: InvalidationBus,
    notifier: Rc<dyn Notifier>,
    prefs: Rc<dyn KeyValueStore>,
    spawner: Spawner,
    store: Store<SearchState>,
    in_flight: RefCell<Option<AbortHandle>>,
}

impl<A> SearchController<A>
where
    A: CorpSearchApi + WishlistApi + 'static,
{
    pub fn new(
        api: A,
        limit: u32,
        bus: InvalidationBus,
        notifier: Rc<dyn Notifier>,
        prefs: Rc<dyn KeyValueStore>,
        spawner: Spawner,
    ) -> Self {
        Self {
            inner: Rc::new(SearchInner {
                api,
                limit,
                bus,
                notifier,
                prefs,
                spawner,
                store: Store::new(SearchState::default()),
                in_flight: RefCell::new(None),
            }),
        }
    }

    pub fn state(&self) -> SearchState {
        self.inner.store.get()
    }

    pub fn subscribe(&self, observer: impl Fn(&SearchState) + 'static) -> Subscription {
        self.inner.store.subscribe(observer)
    }

    /// Records the raw input. Returns the trimmed query to submit once the
    /// debounce delay elapses, or `None` when the input is blank, in which
    /// case results are cleared immediately and any search is cancelled.
    pub fn set_query(&self, raw: &str) -> Option<String> {
        let trimmed = raw.trim().to_string();
        self.inner.store.update(|s| s.query = raw.to_string());
        if trimmed.is_empty() {
            self.cancel();
            self.inner.store.update(SearchState::clear);
            None
        } else {
            Some(trimmed)
        }
    }

    pub fn cancel(&self) {
        if let Some(handle) = self.inner.in_flight.borrow_mut().take() {
            handle.abort();
        }
    }

    pub async fn run(&self, query: String) {
        let (handle, registration) = AbortHandle::new_pair();
        if let Some(previous) = self.inner.in_flight.borrow_mut().replace(handle) {
            previous.abort();
        }
        self.inner.store.update(|s| {
            s.loading = true;
            s.error = None;
        });

        let search = self.inner.api.search_corps(&query, self.inner.limit);
        let Ok(result) = Abortable::new(search, registration).await else {
            log_debug!(COMPONENT, "search {:?} superseded", query);
            return;
        };
        self.inner.in_flight.borrow_mut().take();

        match result {
            Ok(rows) => self.inner.store.update(|s| {
                s.rows = rows;
                s.loading = false;
            }),
            Err(e) => {
                log_warn!(COMPONENT, "search {:?} failed: {}", query, e);
                self.inner.store.update(|s| {
                    s.rows.clear();
                    s.loading = false;
                    s.error = Some(MSG_SEARCH_FAILED.to_string());
                });
            }
        }
    }

    pub fn submit(&self, query: String) {
        let controller = self.clone();
        spawn_task(&self.inner.spawner, COMPONENT, async move {
            controller.run(query).await;
        });
    }

    /// Adds `corp` to the wishlist and tells every wishlist view about it.
    pub async fn add(&self, corp: &CorpSummary) -> AddOutcome {
        match self.inner.api.add_to_wishlist(&corp.corp_code).await {
            Ok(_) => {
                self.inner.notifier.success(&added_message(corp.label()));
                self.inner.bus.publish(BusEvent::WishlistInvalidated);
                if parse_auto_sync(self.inner.prefs.get(AUTO_SYNC_KEY).as_deref()) {
                    self.inner.bus.publish(BusEvent::AutoSyncRequested {
                        corp_code: corp.corp_code.clone(),
                    });
                }
                AddOutcome::Added
            }
            Err(e @ (ApiError::Rejected { .. } | ApiError::Http { .. })) => {
                log_warn!(COMPONENT, "add {} rejected: {}", corp.corp_code, e);
                let reason = match &e {
                    ApiError::Rejected { message, .. } => message.clone(),
                    _ => None,
                };
                let text = add_failed_message(reason.as_deref());
                self.inner.notifier.error(&text);
                AddOutcome::Rejected(text)
            }
            Err(e) => {
                log_warn!(COMPONENT, "add {} failed: {}", corp.corp_code, e);
                self.inner.notifier.error(MSG_ADD_NETWORK);
                AddOutcome::NetworkFailure
            }
        }
    }

    pub fn request_add(&self, corp: CorpSummary) {
        let controller = self.clone();
        spawn_task(&self.inner.spawner, COMPONENT, async move {
            controller.add(&corp).await;
        });
    }
}
