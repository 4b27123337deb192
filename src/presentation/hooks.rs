use leptos::*;

use crate::application::listeners::Subscription;

/// Mirrors an observable view-model into a signal for the lifetime of the
/// calling component.
///
/// ```ignore
/// let state = watch(flow.state(), |emit| flow.subscribe(emit));
/// ```
pub fn watch<T: Clone + 'static>(
    initial: T,
    subscribe: impl FnOnce(Box<dyn Fn(&T)>) -> Subscription,
) -> ReadSignal<T> {
    let (read, write) = create_signal(initial);
    // The view-model may outlive this scope for a moment during teardown.
    let subscription = subscribe(Box::new(move |value: &T| {
        let _ = write.try_set(value.clone());
    }));
    on_cleanup(move || drop(subscription));
    read
}
