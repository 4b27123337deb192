//! Insight snapshots for the selected company.

use std::cell::RefCell;
use std::rc::Rc;

use futures::future::{AbortHandle, Abortable};

use crate::application::listeners::Subscription;
use crate::application::store::Store;
use crate::application::{Spawner, spawn_task};
use crate::domain::insights::{InsightQuery, MSG_LOAD_FAILED, YearRecord};
use crate::domain::logging::LogComponent;
use crate::domain::repositories::InsightsApi;
use crate::domain::wishlist::CorpCode;
use crate::{log_debug, log_warn};

const COMPONENT: LogComponent = LogComponent::Application("Insights");

#[derive(Debug, Clone, PartialEq, Default)]
pub struct InsightsState {
    pub corp_code: Option<CorpCode>,
    pub corp_name: Option<String>,
    pub snapshots: Vec<YearRecord>,
    pub loading: bool,
    pub error: Option<String>,
}

impl InsightsState {
    /// `corp_name`, or `기업코드 {code}` before the name is known
    pub fn heading(&self) -> Option<String> {
        let code = self.corp_code.as_ref()?;
        Some(
            self.corp_name
                .clone()
                .filter(|n| !n.is_empty())
                .unwrap_or_else(|| format!("기업코드 {}", code)),
        )
    }

    pub fn shows_no_data(&self) -> bool {
        self.corp_code.is_some() && !self.loading && self.snapshots.is_empty()
    }
}

pub struct InsightsController<A> {
    inner: Rc<InsightsInner<A>>,
}

impl<A> Clone for InsightsController<A> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

struct InsightsInner<A> {
    api: A,
    query: InsightQuery,
    spawner: Spawner,
    store: Store<InsightsState>,
    in_flight: RefCell<Option<AbortHandle>>,
}

impl<A: InsightsApi + 'static> InsightsController<A> {
    pub fn new(api: A, query: InsightQuery, spawner: Spawner) -> Self {
        Self {
            inner: Rc::new(InsightsInner {
                api,
                query,
                spawner,
                store: Store::new(InsightsState::default()),
                in_flight: RefCell::new(None),
            }),
        }
    }

    pub fn state(&self) -> InsightsState {
        self.inner.store.get()
    }

    pub fn subscribe(&self, observer: impl Fn(&InsightsState) + 'static) -> Subscription {
        self.inner.store.subscribe(observer)
    }

    pub fn cancel(&self) {
        if let Some(handle) = self.inner.in_flight.borrow_mut().take() {
            handle.abort();
        }
    }

    /// Switches to `corp_code` and fetches its snapshots. An empty code
    /// clears the view without a request.
    pub async fn load(&self, corp_code: Option<CorpCode>) {
        self.cancel();
        let Some(code) = corp_code.filter(|c| !c.is_empty()) else {
            self.inner.store.update(|s| *s = InsightsState::default());
            return;
        };

        let (handle, registration) = AbortHandle::new_pair();
        *self.inner.in_flight.borrow_mut() = Some(handle);
        self.inner.store.update(|s| {
            if s.corp_code.as_ref() != Some(&code) {
                s.corp_name = None;
                s.snapshots.clear();
            }
            s.corp_code = Some(code.clone());
            s.loading = true;
            s.error = None;
        });

        let fetch = self.inner.api.fetch_insights(&code, &self.inner.query);
        let Ok(result) = Abortable::new(fetch, registration).await else {
            log_debug!(COMPONENT, "insights for {} superseded", code);
            return;
        };
        self.inner.in_flight.borrow_mut().take();

        match result {
            Ok(snapshot) => self.inner.store.update(|s| {
                s.corp_name = snapshot.corp_name.filter(|n| !n.is_empty());
                s.snapshots = snapshot.snapshots;
                s.loading = false;
            }),
            Err(e) => {
                log_warn!(COMPONENT, "insights for {} failed: {}", code, e);
                self.inner.store.update(|s| {
                    s.corp_name = None;
                    s.snapshots.clear();
                    s.loading = false;
                    s.error = Some(MSG_LOAD_FAILED.to_string());
                });
            }
        }
    }

    pub fn select(&self, corp_code: Option<CorpCode>) {
        let controller = self.clone();
        spawn_task(&self.inner.spawner, COMPONENT, async move {
            controller.load(corp_code).await;
        });
    }

    /// Refetches the current company, used on insight invalidation.
    pub fn reload(&self) {
        let current = self.inner.store.with(|s| s.corp_code.clone());
        if current.is_some() {
            self.select(current);
        }
    }
}
