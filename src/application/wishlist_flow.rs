//! Wishlist view-model: loading, deletion, per-company sync and the
//! invalidation protocol that keeps every view of the list in step.
//!
//! One flow backs one mounted view (panel, modal or page). Views in the same
//! tab share the [`InvalidationBus`]; other tabs hear about changes through
//! the bus's cross-tab link. Every invalidation triggers a full reload, the
//! backend being the only source of truth.

use std::any::Any;
use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use futures::future::{AbortHandle, Abortable};

use crate::application::invalidation_bus::InvalidationBus;
use crate::application::listeners::Subscription;
use crate::application::notifications::Notifier;
use crate::application::store::Store;
use crate::application::{Spawner, spawn_task};
use crate::domain::events::BusEvent;
use crate::domain::logging::LogComponent;
use crate::domain::repositories::{InsightsApi, KeyValueStore, WishlistApi};
use crate::domain::wishlist::{
    AUTO_SYNC_KEY, CorpCode, WishlistState, encode_auto_sync, parse_auto_sync,
    sync_failure_message,
};
use crate::{log_debug, log_info, log_warn};

const COMPONENT: LogComponent = LogComponent::Application("WishlistFlow");

/// Why a reload was requested; only used for logging
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReloadTrigger {
    Mount,
    Focus,
    Visible,
    Invalidated,
    Manual,
}

/// Collaborators shared by every flow in the tab
#[derive(Clone)]
pub struct FlowContext {
    pub bus: InvalidationBus,
    pub notifier: Rc<dyn Notifier>,
    pub prefs: Rc<dyn KeyValueStore>,
    pub spawner: Spawner,
}

pub struct WishlistFlow<A> {
    inner: Rc<FlowInner<A>>,
}

impl<A> Clone for WishlistFlow<A> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

struct FlowInner<A> {
    api: A,
    ctx: FlowContext,
    store: Store<WishlistState>,
    load_handle: RefCell<Option<AbortHandle>>,
    load_generation: Cell<u64>,
    guards: RefCell<Vec<Box<dyn Any>>>,
}

impl<A> WishlistFlow<A>
where
    A: WishlistApi + InsightsApi + 'static,
{
    pub fn new(api: A, ctx: FlowContext) -> Self {
        let auto_sync = parse_auto_sync(ctx.prefs.get(AUTO_SYNC_KEY).as_deref());
        Self {
            inner: Rc::new(FlowInner {
                api,
                ctx,
                store: Store::new(WishlistState::with_auto_sync(auto_sync)),
                load_handle: RefCell::new(None),
                load_generation: Cell::new(0),
                guards: RefCell::new(Vec::new()),
            }),
        }
    }

    pub fn state(&self) -> WishlistState {
        self.inner.store.get()
    }

    pub fn subscribe(&self, observer: impl Fn(&WishlistState) + 'static) -> Subscription {
        self.inner.store.subscribe(observer)
    }

    pub fn is_active(&self) -> bool {
        self.inner.store.with(|s| s.active)
    }

    /// Session is authenticated and the view is mounted: start listening and
    /// load once.
    pub fn activate(&self) {
        if self.is_active() {
            return;
        }
        self.inner.store.update(|s| s.active = true);

        let weak = Rc::downgrade(&self.inner);
        let subscription = self.inner.ctx.bus.subscribe(move |event| {
            if let Some(inner) = Weak::upgrade(&weak) {
                WishlistFlow { inner }.on_bus_event(event);
            }
        });
        self.hold(subscription);
        self.request_reload(ReloadTrigger::Mount);
    }

    /// Logged out or unmounted: cancel the in-flight load, clear the list and
    /// drop every listener. No request is issued.
    pub fn deactivate(&self) {
        if let Some(handle) = self.inner.load_handle.borrow_mut().take() {
            handle.abort();
        }
        self.inner.store.update(WishlistState::reset);
        let guards: Vec<Box<dyn Any>> = self.inner.guards.borrow_mut().drain(..).collect();
        drop(guards);
        log_debug!(COMPONENT, "deactivated");
    }

    /// Keeps `guard` alive until [`WishlistFlow::deactivate`]; used for the
    /// focus and visibility listeners owned by the view.
    pub fn hold(&self, guard: impl Any) {
        self.inner.guards.borrow_mut().push(Box::new(guard));
    }

    pub fn request_reload(&self, trigger: ReloadTrigger) {
        if !self.is_active() {
            return;
        }
        log_debug!(COMPONENT, "reload requested: {:?}", trigger);
        let flow = self.clone();
        spawn_task(&self.inner.ctx.spawner, COMPONENT, async move {
            flow.load().await;
        });
    }

    /// Fetches the full list, cancelling any load still in flight.
    pub async fn load(&self) {
        if !self.is_active() {
            return;
        }
        let (handle, registration) = AbortHandle::new_pair();
        if let Some(previous) = self.inner.load_handle.borrow_mut().replace(handle) {
            previous.abort();
        }
        let generation = self.inner.load_generation.get() + 1;
        self.inner.load_generation.set(generation);

        self.inner.store.update(|s| {
            s.loading = true;
            s.error = None;
        });

        let result = Abortable::new(self.inner.api.list_wishlist(), registration).await;

        let Ok(result) = result else {
            log_debug!(COMPONENT, "load #{} cancelled", generation);
            return;
        };
        if self.inner.load_generation.get() == generation {
            self.inner.load_handle.borrow_mut().take();
        }

        match result {
            Ok(rows) => {
                log_debug!(COMPONENT, "loaded {} rows", rows.len());
                self.inner.store.update(|s| s.apply_rows(rows));
            }
            Err(e) => {
                log_warn!(COMPONENT, "wishlist load failed: {}", e);
                self.inner.store.update(WishlistState::apply_failure);
            }
        }
    }

    /// Optimistic delete. The row disappears at once and exactly one
    /// invalidation follows, whatever the backend answered; a failed delete
    /// reappears with the reload.
    pub async fn remove_item(&self, corp_code: CorpCode) {
        self.inner.store.update(|s| s.remove(&corp_code));
        if let Err(e) = self.inner.api.remove_from_wishlist(&corp_code).await {
            log_warn!(COMPONENT, "delete {} failed: {}", corp_code, e);
        }
        self.inner.ctx.bus.publish(BusEvent::WishlistInvalidated);
    }

    pub fn request_remove(&self, corp_code: CorpCode) {
        let flow = self.clone();
        spawn_task(&self.inner.ctx.spawner, COMPONENT, async move {
            flow.remove_item(corp_code).await;
        });
    }

    /// Asks the backend to refresh insight snapshots for one company.
    ///
    /// With auto-sync on, outcomes are silent; insight views are invalidated
    /// on success either way.
    pub async fn sync_corp(&self, corp_code: CorpCode) {
        let quiet = self.inner.store.with(|s| s.auto_sync);
        self.inner.store.update(|s| s.begin_sync(&corp_code));

        match self.inner.api.sync_insights(&corp_code).await {
            Ok(report) => {
                log_info!(COMPONENT, "synced {}: {}", corp_code, report.summary());
                if !quiet {
                    self.inner.ctx.notifier.success(&report.summary());
                }
                self.inner.ctx.bus.publish(BusEvent::InsightsInvalidated);
            }
            Err(e) => {
                log_warn!(COMPONENT, "sync {} failed: {}", corp_code, e);
                if !quiet {
                    self.inner
                        .ctx
                        .notifier
                        .error(&sync_failure_message(&e.user_message()));
                }
            }
        }

        self.inner.store.update(|s| s.finish_sync(&corp_code));
    }

    pub fn request_sync(&self, corp_code: CorpCode) {
        let flow = self.clone();
        spawn_task(&self.inner.ctx.spawner, COMPONENT, async move {
            flow.sync_corp(corp_code).await;
        });
    }

    /// Persists the toggle. In-flight syncs keep the mode they started with.
    pub fn save_auto_sync(&self, next: bool) {
        self.inner.store.update(|s| s.auto_sync = next);
        if let Err(e) = self
            .inner
            .ctx
            .prefs
            .set(AUTO_SYNC_KEY, encode_auto_sync(next))
        {
            log_warn!(COMPONENT, "could not persist auto-sync: {}", e);
        }
    }

    fn on_bus_event(&self, event: &BusEvent) {
        if !self.is_active() {
            return;
        }
        match event {
            BusEvent::WishlistInvalidated => self.request_reload(ReloadTrigger::Invalidated),
            BusEvent::AutoSyncRequested { corp_code } => {
                if self.inner.store.with(|s| s.auto_sync) && !corp_code.is_empty() {
                    self.request_sync(corp_code.clone());
                }
            }
            BusEvent::InsightsInvalidated => {}
        }
    }
}
