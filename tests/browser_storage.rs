#![cfg(target_arch = "wasm32")]

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use dart_lens::application::invalidation_bus::CrossTabTransport;
use dart_lens::domain::repositories::KeyValueStore;
use dart_lens::infrastructure::broadcast::BroadcastChannelTransport;
use dart_lens::infrastructure::storage::BrowserStorage;
use gloo_timers::future::sleep;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

#[wasm_bindgen_test]
fn local_storage_round_trip() {
    let store = BrowserStorage::local();
    store
        .set("dartlens:test", "1")
        .expect("localStorage writable");
    assert_eq!(store.get("dartlens:test").as_deref(), Some("1"));
    store.remove("dartlens:test").expect("removable");
    assert_eq!(store.get("dartlens:test"), None);
}

#[wasm_bindgen_test]
fn session_storage_is_separate_from_local() {
    BrowserStorage::session()
        .set("selectedCorp", "00126380")
        .expect("sessionStorage writable");
    assert_eq!(BrowserStorage::local().get("selectedCorp"), None);
}

#[wasm_bindgen_test(async)]
async fn broadcast_reaches_other_channels_but_not_the_sender() {
    let heard_by_sender = Rc::new(RefCell::new(Vec::<String>::new()));
    let heard_by_peer = Rc::new(RefCell::new(Vec::<String>::new()));

    let sink = heard_by_sender.clone();
    let sender = BroadcastChannelTransport::open(
        "dartlens-test",
        Box::new(move |m: &str| sink.borrow_mut().push(m.to_string())),
    )
    .expect("BroadcastChannel available");
    let sink = heard_by_peer.clone();
    let _peer = BroadcastChannelTransport::open(
        "dartlens-test",
        Box::new(move |m: &str| sink.borrow_mut().push(m.to_string())),
    )
    .expect("BroadcastChannel available");

    sender.post("invalidate").expect("posted");
    sleep(Duration::from_millis(50)).await;

    assert_eq!(*heard_by_peer.borrow(), ["invalidate"]);
    assert!(heard_by_sender.borrow().is_empty());
}
