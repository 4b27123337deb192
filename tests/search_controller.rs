mod common;

use std::cell::RefCell;
use std::rc::Rc;

use common::{FakeBackend, Harness, network, rejected};
use dart_lens::application::notifications::NoticeKind;
use dart_lens::application::search::{AddOutcome, SearchController};
use dart_lens::domain::events::BusEvent;
use dart_lens::domain::search::{CorpSummary, MSG_ADD_NETWORK, MSG_SEARCH_FAILED, MSG_SEARCHING};
use dart_lens::domain::wishlist::CorpCode;

fn controller(h: &Harness, backend: &FakeBackend) -> SearchController<FakeBackend> {
    SearchController::new(
        backend.clone(),
        20,
        h.bus.clone(),
        h.notifier.clone(),
        h.prefs.clone(),
        h.spawner(),
    )
}

fn samsung() -> CorpSummary {
    CorpSummary::new("00126380", "삼성전자")
}

#[test]
fn blank_query_clears_without_a_request() {
    let mut h = Harness::new();
    let backend = FakeBackend::default();
    backend.answer_next_search(Ok(vec![samsung()]));
    let search = controller(&h, &backend);

    let query = search.set_query("삼성");
    assert_eq!(query.as_deref(), Some("삼성"));
    h.pool.run_until(search.run("삼성".to_string()));
    assert_eq!(search.state().rows.len(), 1);

    assert_eq!(search.set_query("   "), None);
    h.settle();

    let state = search.state();
    assert!(state.rows.is_empty());
    assert!(state.error.is_none());
    assert_eq!(state.status_line(), None);
    assert_eq!(backend.state.search_calls.borrow().len(), 1);
}

#[test]
fn query_is_trimmed_and_sent_with_the_limit() {
    let mut h = Harness::new();
    let backend = FakeBackend::default();
    backend.answer_next_search(Ok(vec![samsung()]));
    let search = controller(&h, &backend);

    let query = search.set_query("  삼성 ").unwrap_or_default();
    search.submit(query);
    h.settle();

    assert_eq!(
        *backend.state.search_calls.borrow(),
        vec![("삼성".to_string(), 20)]
    );
    assert_eq!(search.state().status_line().as_deref(), Some("결과 1건"));
}

#[test]
fn status_line_follows_the_request() {
    let mut h = Harness::new();
    let backend = FakeBackend::default();
    let release = backend.hold_next_search(Ok(Vec::new()));
    let search = controller(&h, &backend);

    search.set_query("없는회사");
    search.submit("없는회사".to_string());
    h.settle();
    assert_eq!(search.state().status_line().as_deref(), Some(MSG_SEARCHING));
    assert!(!search.state().shows_no_results());

    let _ = release.send(());
    h.settle();
    assert_eq!(search.state().status_line().as_deref(), Some("결과 0건"));
    assert!(search.state().shows_no_results());
}

#[test]
fn failed_search_shows_error_and_no_rows() {
    let mut h = Harness::new();
    let backend = FakeBackend::default();
    backend.answer_next_search(Err(network()));
    let search = controller(&h, &backend);

    search.set_query("삼성");
    h.pool.run_until(search.run("삼성".to_string()));

    let state = search.state();
    assert!(state.rows.is_empty());
    assert!(!state.loading);
    assert_eq!(state.error.as_deref(), Some(MSG_SEARCH_FAILED));
    assert!(!state.shows_no_results());
}

#[test]
fn only_the_newest_search_is_applied() {
    let mut h = Harness::new();
    let backend = FakeBackend::default();
    let release = backend.hold_next_search(Ok(vec![CorpSummary::new("00000001", "낡은결과")]));
    backend.answer_next_search(Ok(vec![samsung()]));
    let search = controller(&h, &backend);

    search.submit("삼".to_string());
    h.settle();
    search.submit("삼성".to_string());
    h.settle();
    let _ = release.send(());
    h.settle();

    assert_eq!(search.state().rows, vec![samsung()]);
    assert!(!search.state().loading);
}

#[test]
fn blank_query_cancels_a_search_in_flight() {
    let mut h = Harness::new();
    let backend = FakeBackend::default();
    let release = backend.hold_next_search(Ok(vec![samsung()]));
    let search = controller(&h, &backend);

    search.set_query("삼성");
    search.submit("삼성".to_string());
    h.settle();
    search.set_query("");
    let _ = release.send(());
    h.settle();

    assert!(search.state().rows.is_empty());
    assert!(!search.state().loading);
}

fn bus_log(h: &Harness) -> (Rc<RefCell<Vec<BusEvent>>>, dart_lens::application::listeners::Subscription) {
    let log = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&log);
    let sub = h.bus.subscribe(move |e| sink.borrow_mut().push(e.clone()));
    (log, sub)
}

#[test]
fn added_company_invalidates_wishlists() {
    let mut h = Harness::with_auto_sync(false);
    let backend = FakeBackend::default();
    let search = controller(&h, &backend);
    let (events, _sub) = bus_log(&h);

    let outcome = h.pool.run_until(search.add(&samsung()));

    assert_eq!(outcome, AddOutcome::Added);
    assert_eq!(*events.borrow(), vec![BusEvent::WishlistInvalidated]);
    assert_eq!(
        h.notifier.last(),
        Some((NoticeKind::Success, "삼성전자이(가) 위시리스트에 추가되었습니다.".to_string()))
    );
}

#[test]
fn added_company_requests_auto_sync_when_enabled() {
    let mut h = Harness::with_auto_sync(true);
    let backend = FakeBackend::default();
    let search = controller(&h, &backend);
    let (events, _sub) = bus_log(&h);

    h.pool.run_until(search.add(&samsung()));

    assert_eq!(
        *events.borrow(),
        vec![
            BusEvent::WishlistInvalidated,
            BusEvent::AutoSyncRequested {
                corp_code: CorpCode::new("00126380")
            }
        ]
    );
}

#[test]
fn refused_add_shows_server_reason() {
    let mut h = Harness::new();
    let backend = FakeBackend::default();
    *backend.state.add_result.borrow_mut() = Some(Err(rejected("이미 등록된 기업입니다.")));
    let search = controller(&h, &backend);
    let (events, _sub) = bus_log(&h);

    let outcome = h.pool.run_until(search.add(&samsung()));

    assert_eq!(
        outcome,
        AddOutcome::Rejected("추가 실패: 이미 등록된 기업입니다.".to_string())
    );
    assert_eq!(h.notifier.last().map(|(k, _)| k), Some(NoticeKind::Error));
    assert!(events.borrow().is_empty());
}

#[test]
fn refusal_without_reason_falls_back() {
    let mut h = Harness::new();
    let backend = FakeBackend::default();
    *backend.state.add_result.borrow_mut() = Some(Err(dart_lens::domain::errors::ApiError::Rejected {
        status: 200,
        message: None,
    }));
    let search = controller(&h, &backend);

    let outcome = h.pool.run_until(search.add(&samsung()));

    assert_eq!(outcome, AddOutcome::Rejected("추가 실패: 오류".to_string()));
}

#[test]
fn transport_failure_on_add_is_reported_as_network_error() {
    let mut h = Harness::new();
    let backend = FakeBackend::default();
    *backend.state.add_result.borrow_mut() = Some(Err(network()));
    let search = controller(&h, &backend);

    let outcome = h.pool.run_until(search.add(&samsung()));

    assert_eq!(outcome, AddOutcome::NetworkFailure);
    assert_eq!(h.notifier.messages(), vec![MSG_ADD_NETWORK.to_string()]);
}
