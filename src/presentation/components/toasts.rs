use gloo_timers::callback::Timeout;
use leptos::*;

use crate::app::AppContext;
use crate::application::notifications::{Notice, NoticeKind};
use crate::presentation::hooks::watch;

const DISMISS_AFTER_MS: u32 = 3_500;

fn kind_class(kind: NoticeKind) -> &'static str {
    match kind {
        NoticeKind::Success => "border-green-300 bg-green-50 text-green-800",
        NoticeKind::Error => "border-red-300 bg-red-50 text-red-800",
        NoticeKind::Info => "border-gray-300 bg-white text-gray-800",
    }
}

#[component]
fn Toast(notice: Notice) -> impl IntoView {
    let ctx = expect_context::<AppContext>();
    let id = notice.id;

    let timer = {
        let center = ctx.notifications.clone();
        Timeout::new(DISMISS_AFTER_MS, move || center.dismiss(id))
    };
    on_cleanup(move || drop(timer));

    let center = ctx.notifications.clone();
    view! {
        <div
            class=format!("rounded border px-3 py-2 text-sm shadow {}", kind_class(notice.kind))
            role="status"
            data-kind=notice.kind.to_string()
        >
            <div class="flex items-start gap-2">
                <span class="flex-1">{notice.message.clone()}</span>
                <button
                    class="text-xs opacity-60 hover:opacity-100"
                    aria-label="닫기"
                    on:click=move |_| center.dismiss(id)
                >
                    "X"
                </button>
            </div>
        </div>
    }
}

/// Stack of transient notices in the corner of the window
#[component]
pub fn ToastHost() -> impl IntoView {
    let ctx = expect_context::<AppContext>();
    let center = ctx.notifications.clone();
    let notices = watch(center.visible(), |emit| {
        center.subscribe(move |items| emit(&items.to_vec()))
    });

    view! {
        <div class="toast-host" aria-live="polite">
            <For
                each=move || notices.get()
                key=|notice| notice.id
                children=|notice| view! { <Toast notice=notice/> }
            />
        </div>
    }
}
