#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;

use dart_lens::application::Spawner;
use dart_lens::application::invalidation_bus::InvalidationBus;
use dart_lens::application::notifications::{NoticeKind, Notifier};
use dart_lens::application::wishlist_flow::FlowContext;
use dart_lens::domain::errors::{ApiError, ApiResult};
use dart_lens::domain::insights::{InsightQuery, InsightSnapshot};
use dart_lens::domain::repositories::{
    Ack, AuthApi, CorpSearchApi, InsightsApi, KeyValueStore, WishlistApi,
};
use dart_lens::domain::search::CorpSummary;
use dart_lens::domain::session::User;
use dart_lens::domain::validation::{LoginForm, SignupForm};
use dart_lens::domain::wishlist::{CorpCode, SyncReport, WishlistEntry};
use dart_lens::infrastructure::storage::MemoryStore;
use futures::channel::oneshot;
use futures::executor::LocalPool;

pub fn network() -> ApiError {
    ApiError::Network("connection reset".to_string())
}

pub fn rejected(message: &str) -> ApiError {
    ApiError::Rejected {
        status: 400,
        message: Some(message.to_string()),
    }
}

pub fn entry(code: &str, name: &str) -> WishlistEntry {
    WishlistEntry::new(code).with_name(name)
}

/// A scripted `list_wishlist` answer, optionally held until released
pub struct ScriptedList {
    pub gate: Option<oneshot::Receiver<()>>,
    pub result: ApiResult<Vec<WishlistEntry>>,
}

#[derive(Default)]
pub struct BackendState {
    pub wishlist: RefCell<Vec<WishlistEntry>>,
    pub list_script: RefCell<VecDeque<ScriptedList>>,
    pub list_calls: Cell<usize>,
    pub remove_calls: RefCell<Vec<CorpCode>>,
    pub remove_error: RefCell<Option<ApiError>>,
    pub add_calls: RefCell<Vec<CorpCode>>,
    pub add_result: RefCell<Option<ApiResult<Ack>>>,
    pub sync_calls: RefCell<Vec<CorpCode>>,
    pub sync_result: RefCell<Option<ApiResult<SyncReport>>>,
    pub search_calls: RefCell<Vec<(String, u32)>>,
    pub search_script: RefCell<VecDeque<ScriptedSearch>>,
    pub insight_calls: RefCell<Vec<(CorpCode, InsightQuery)>>,
    pub insight_result: RefCell<Option<ApiResult<InsightSnapshot>>>,
    pub me_result: RefCell<Option<ApiResult<Option<User>>>>,
    pub me_calls: Cell<usize>,
    pub login_calls: Cell<usize>,
    pub login_result: RefCell<Option<ApiResult<Ack>>>,
    pub logout_result: RefCell<Option<ApiResult<()>>>,
    pub signup_calls: RefCell<Vec<SignupForm>>,
    pub signup_result: RefCell<Option<ApiResult<Ack>>>,
}

pub struct ScriptedSearch {
    pub gate: Option<oneshot::Receiver<()>>,
    pub result: ApiResult<Vec<CorpSummary>>,
}

/// In-memory backend implementing every API port
#[derive(Clone, Default)]
pub struct FakeBackend {
    pub state: Rc<BackendState>,
}

impl FakeBackend {
    pub fn with_wishlist(rows: Vec<WishlistEntry>) -> Self {
        let backend = Self::default();
        *backend.state.wishlist.borrow_mut() = rows;
        backend
    }

    /// Queues a list answer that resolves only after the returned sender
    /// fires (or is dropped).
    pub fn hold_next_list(&self, result: ApiResult<Vec<WishlistEntry>>) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        self.state.list_script.borrow_mut().push_back(ScriptedList {
            gate: Some(rx),
            result,
        });
        tx
    }

    pub fn fail_next_list(&self, error: ApiError) {
        self.state.list_script.borrow_mut().push_back(ScriptedList {
            gate: None,
            result: Err(error),
        });
    }

    pub fn hold_next_search(&self, result: ApiResult<Vec<CorpSummary>>) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        self.state.search_script.borrow_mut().push_back(ScriptedSearch {
            gate: Some(rx),
            result,
        });
        tx
    }

    pub fn answer_next_search(&self, result: ApiResult<Vec<CorpSummary>>) {
        self.state
            .search_script
            .borrow_mut()
            .push_back(ScriptedSearch { gate: None, result });
    }

    pub fn list_calls(&self) -> usize {
        self.state.list_calls.get()
    }

    pub fn sync_calls(&self) -> Vec<CorpCode> {
        self.state.sync_calls.borrow().clone()
    }
}

impl WishlistApi for FakeBackend {
    async fn list_wishlist(&self) -> ApiResult<Vec<WishlistEntry>> {
        self.state.list_calls.set(self.state.list_calls.get() + 1);
        let scripted = self.state.list_script.borrow_mut().pop_front();
        match scripted {
            Some(ScriptedList { gate, result }) => {
                if let Some(gate) = gate {
                    let _ = gate.await;
                }
                result
            }
            None => Ok(self.state.wishlist.borrow().clone()),
        }
    }

    async fn add_to_wishlist(&self, corp_code: &CorpCode) -> ApiResult<Ack> {
        self.state.add_calls.borrow_mut().push(corp_code.clone());
        let scripted = self.state.add_result.borrow_mut().take();
        scripted.unwrap_or_else(|| {
            self.state
                .wishlist
                .borrow_mut()
                .push(WishlistEntry::new(corp_code.clone()));
            Ok(Ack::default())
        })
    }

    async fn remove_from_wishlist(&self, corp_code: &CorpCode) -> ApiResult<()> {
        self.state.remove_calls.borrow_mut().push(corp_code.clone());
        if let Some(error) = self.state.remove_error.borrow_mut().take() {
            return Err(error);
        }
        self.state
            .wishlist
            .borrow_mut()
            .retain(|row| &row.corp_code != corp_code);
        Ok(())
    }
}

impl InsightsApi for FakeBackend {
    async fn sync_insights(&self, corp_code: &CorpCode) -> ApiResult<SyncReport> {
        self.state.sync_calls.borrow_mut().push(corp_code.clone());
        let scripted = self.state.sync_result.borrow().clone();
        scripted.unwrap_or_else(|| {
            Ok(SyncReport {
                added: 3,
                missing: 1,
                found: Some(11),
                expected: Some(12),
            })
        })
    }

    async fn fetch_insights(
        &self,
        corp_code: &CorpCode,
        query: &InsightQuery,
    ) -> ApiResult<InsightSnapshot> {
        self.state
            .insight_calls
            .borrow_mut()
            .push((corp_code.clone(), query.clone()));
        let scripted = self.state.insight_result.borrow().clone();
        scripted.unwrap_or_else(|| Ok(InsightSnapshot::default()))
    }
}

impl CorpSearchApi for FakeBackend {
    async fn search_corps(&self, query: &str, limit: u32) -> ApiResult<Vec<CorpSummary>> {
        self.state
            .search_calls
            .borrow_mut()
            .push((query.to_string(), limit));
        let scripted = self.state.search_script.borrow_mut().pop_front();
        match scripted {
            Some(ScriptedSearch { gate, result }) => {
                if let Some(gate) = gate {
                    let _ = gate.await;
                }
                result
            }
            None => Ok(Vec::new()),
        }
    }
}

impl AuthApi for FakeBackend {
    async fn me(&self) -> ApiResult<Option<User>> {
        self.state.me_calls.set(self.state.me_calls.get() + 1);
        self.state.me_result.borrow().clone().unwrap_or(Ok(None))
    }

    async fn login(&self, _form: &LoginForm) -> ApiResult<Ack> {
        self.state.login_calls.set(self.state.login_calls.get() + 1);
        self.state
            .login_result
            .borrow()
            .clone()
            .unwrap_or_else(|| Ok(Ack::default()))
    }

    async fn logout(&self) -> ApiResult<()> {
        self.state.logout_result.borrow().clone().unwrap_or(Ok(()))
    }

    async fn signup(&self, form: &SignupForm) -> ApiResult<Ack> {
        self.state.signup_calls.borrow_mut().push(form.clone());
        self.state
            .signup_result
            .borrow()
            .clone()
            .unwrap_or_else(|| Ok(Ack::default()))
    }
}

/// Collects every notice instead of showing it
#[derive(Default)]
pub struct RecordingNotifier {
    pub notices: RefCell<Vec<(NoticeKind, String)>>,
}

impl RecordingNotifier {
    pub fn count(&self) -> usize {
        self.notices.borrow().len()
    }

    pub fn messages(&self) -> Vec<String> {
        self.notices.borrow().iter().map(|(_, m)| m.clone()).collect()
    }

    pub fn last(&self) -> Option<(NoticeKind, String)> {
        self.notices.borrow().last().cloned()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, kind: NoticeKind, message: &str) {
        self.notices.borrow_mut().push((kind, message.to_string()));
    }
}

/// Executor, bus, notifier and preferences shared by one test
pub struct Harness {
    pub pool: LocalPool,
    pub bus: InvalidationBus,
    pub notifier: Rc<RecordingNotifier>,
    pub prefs: Rc<MemoryStore>,
}

impl Harness {
    pub fn new() -> Self {
        Self {
            pool: LocalPool::new(),
            bus: InvalidationBus::new(),
            notifier: Rc::new(RecordingNotifier::default()),
            prefs: Rc::new(MemoryStore::new()),
        }
    }

    pub fn with_auto_sync(on: bool) -> Self {
        let harness = Self::new();
        harness
            .prefs
            .set("dartlens:autoSync", if on { "1" } else { "0" })
            .unwrap_or_else(|e| panic!("memory store refused a write: {e}"));
        harness
    }

    pub fn spawner(&self) -> Spawner {
        Rc::new(self.pool.spawner())
    }

    pub fn flow_context(&self) -> FlowContext {
        FlowContext {
            bus: self.bus.clone(),
            notifier: self.notifier.clone(),
            prefs: self.prefs.clone(),
            spawner: self.spawner(),
        }
    }

    pub fn settle(&mut self) {
        self.pool.run_until_stalled();
    }
}
