use std::cell::RefCell;
use std::rc::Rc;

use dart_lens::application::notifications::{NoticeKind, NotificationCenter, Notifier};

#[test]
fn oldest_notice_drops_on_overflow() {
    let center = NotificationCenter::new();
    for i in 0..5 {
        center.info(&format!("n{i}"));
    }

    let visible: Vec<String> = center.visible().into_iter().map(|n| n.message).collect();
    assert_eq!(visible, ["n1", "n2", "n3", "n4"]);
}

#[test]
fn dismiss_removes_only_that_notice() {
    let center = NotificationCenter::new();
    let first = center.push(NoticeKind::Success, "추가됨");
    center.push(NoticeKind::Error, "실패");

    center.dismiss(first);
    center.dismiss(999);

    let visible = center.visible();
    assert_eq!(visible.len(), 1);
    assert_eq!(visible[0].kind, NoticeKind::Error);
    assert_eq!(visible[0].kind.to_string(), "error");
}

#[test]
fn observers_see_every_change() {
    let center = NotificationCenter::with_capacity(2);
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = seen.clone();
    let subscription = center.subscribe(move |items| sink.borrow_mut().push(items.len()));

    let id = center.push(NoticeKind::Info, "a");
    center.push(NoticeKind::Info, "b");
    center.push(NoticeKind::Info, "c");
    center.dismiss(id);
    drop(subscription);
    center.push(NoticeKind::Info, "d");

    assert_eq!(*seen.borrow(), [1, 2, 2, 2]);
}
