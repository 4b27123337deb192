//! Structured user notifications, rendered by the toast host.

use derive_more::Display;

use crate::application::listeners::Subscription;
use crate::application::store::Store;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum NoticeKind {
    #[display(fmt = "success")]
    Success,
    #[display(fmt = "error")]
    Error,
    #[display(fmt = "info")]
    Info,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub id: u64,
    pub kind: NoticeKind,
    pub message: String,
}

/// Sink for user-facing messages
pub trait Notifier {
    fn notify(&self, kind: NoticeKind, message: &str);

    fn success(&self, message: &str) {
        self.notify(NoticeKind::Success, message);
    }

    fn error(&self, message: &str) {
        self.notify(NoticeKind::Error, message);
    }

    fn info(&self, message: &str) {
        self.notify(NoticeKind::Info, message);
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
struct Queue {
    next_id: u64,
    items: Vec<Notice>,
}

/// Bounded queue of visible notices; the oldest is dropped on overflow.
#[derive(Clone)]
pub struct NotificationCenter {
    store: Store<Queue>,
    capacity: usize,
}

impl NotificationCenter {
    pub const DEFAULT_CAPACITY: usize = 4;

    pub fn new() -> Self {
        Self::with_capacity(Self::DEFAULT_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            store: Store::new(Queue::default()),
            capacity: capacity.max(1),
        }
    }

    pub fn push(&self, kind: NoticeKind, message: &str) -> u64 {
        let capacity = self.capacity;
        self.store.update(|queue| {
            let id = queue.next_id;
            queue.next_id += 1;
            queue.items.push(Notice {
                id,
                kind,
                message: message.to_string(),
            });
            if queue.items.len() > capacity {
                let overflow = queue.items.len() - capacity;
                queue.items.drain(..overflow);
            }
            id
        })
    }

    pub fn dismiss(&self, id: u64) {
        self.store.update(|queue| queue.items.retain(|n| n.id != id));
    }

    pub fn visible(&self) -> Vec<Notice> {
        self.store.with(|queue| queue.items.clone())
    }

    pub fn subscribe(&self, observer: impl Fn(&[Notice]) + 'static) -> Subscription {
        self.store.subscribe(move |queue| observer(&queue.items))
    }
}

impl Default for NotificationCenter {
    fn default() -> Self {
        Self::new()
    }
}

impl Notifier for NotificationCenter {
    fn notify(&self, kind: NoticeKind, message: &str) {
        self.push(kind, message);
    }
}
