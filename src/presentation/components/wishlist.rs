//! Wishlist views. Each mounted view owns its own [`WishlistFlow`]; they
//! stay in step through the shared invalidation bus.

use leptos::*;
use wasm_bindgen::JsCast;
use web_sys::KeyboardEvent;

use crate::app::AppContext;
use crate::application::wishlist_flow::{ReloadTrigger, WishlistFlow};
use crate::domain::wishlist::{MSG_EMPTY, MSG_LOGIN_REQUIRED, WishlistEntry};
use crate::event_utils::{EventOptions, document_is_visible, document_listener, window_listener};
use crate::infrastructure::http::ApiClient;
use crate::presentation::hooks::watch;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WishlistVariant {
    Panel,
    Modal,
    Page,
}

impl WishlistVariant {
    fn wrapper_class(&self) -> &'static str {
        match self {
            WishlistVariant::Panel => "h-full flex flex-col min-h-0 p-3",
            WishlistVariant::Page => "p-4",
            WishlistVariant::Modal => "p-3",
        }
    }
}

/// Starts the flow and its focus/visibility listeners for a signed-in
/// session, tears everything down otherwise.
fn bind_lifecycle(flow: &WishlistFlow<ApiClient>, logged_in: Memo<bool>) {
    {
        let flow = flow.clone();
        create_effect(move |_| {
            if !logged_in.get() {
                flow.deactivate();
                return;
            }
            if flow.is_active() {
                return;
            }
            flow.activate();

            let on_focus = flow.clone();
            if let Some(handle) = window_listener("focus", &EventOptions::default(), move |_| {
                on_focus.request_reload(ReloadTrigger::Focus);
            }) {
                flow.hold(handle);
            }

            let on_visible = flow.clone();
            if let Some(handle) =
                document_listener("visibilitychange", &EventOptions::default(), move |_| {
                    if document_is_visible() {
                        on_visible.request_reload(ReloadTrigger::Visible);
                    }
                })
            {
                flow.hold(handle);
            }
        });
    }

    let flow = flow.clone();
    on_cleanup(move || flow.deactivate());
}

#[component]
pub fn WishlistContent(variant: WishlistVariant) -> impl IntoView {
    let ctx = expect_context::<AppContext>();
    let flow = WishlistFlow::new(ctx.api.clone(), ctx.flow_context());
    let state = watch(flow.state(), |emit| flow.subscribe(emit));

    let session_state = ctx.session_state;
    let logged_in = create_memo(move |_| session_state.with(|s| s.is_logged_in()));
    bind_lifecycle(&flow, logged_in);

    let flow = store_value(flow);
    let selection = store_value(ctx.selection.clone());
    let toggle = move |_| {
        let next = !state.with_untracked(|s| s.auto_sync);
        flow.with_value(|f| f.save_auto_sync(next));
    };

    let row = move |entry: WishlistEntry| {
        let code = entry.corp_code.clone();
        let busy = {
            let code = code.clone();
            move || state.with(|s| s.is_syncing(&code))
        };
        let select = {
            let code = code.clone();
            move |_| selection.with_value(|sel| sel.select(code.value()))
        };
        let sync = {
            let code = code.clone();
            move |_| flow.with_value(|f| f.request_sync(code.clone()))
        };
        let remove = {
            let code = code.clone();
            move |_| flow.with_value(|f| f.request_remove(code.clone()))
        };

        view! {
            <li class="rounded border p-2 flex items-center justify-between">
                <button class="text-left" title=code.to_string() on:click=select>
                    <div class="flex flex-col">
                        <span class="text-gray-900">{entry.display_name().to_string()}</span>
                        <span class="text-[11px] text-gray-500">{entry.subtitle()}</span>
                    </div>
                </button>
                <div class="flex items-center gap-2">
                    <Show when=move || !state.with(|s| s.auto_sync)>
                        <button
                            class="px-2 py-1 text-[11px] rounded border hover:bg-blue-50 text-blue-600 disabled:opacity-50"
                            title="2022~2024, 11011~11014 동기화"
                            disabled=busy.clone()
                            on:click=sync.clone()
                        >
                            {
                                let busy = busy.clone();
                                move || if busy() { "동기화..." } else { "동기화" }
                            }
                        </button>
                    </Show>
                    <button class="px-2 py-1 text-[11px] rounded border hover:bg-gray-50" on:click=remove>
                        "삭제"
                    </button>
                </div>
            </li>
        }
    };

    view! {
        <div class=variant.wrapper_class()>
            <Show
                when=move || logged_in.get()
                fallback=|| {
                    view! {
                        <section class="rounded-md border p-3">
                            <h3 class="text-sm mb-2">"WISH:LIST"</h3>
                            <p class="text-xs text-gray-500">{MSG_LOGIN_REQUIRED}</p>
                        </section>
                    }
                }
            >
                <div class="flex items-center justify-between">
                    <h3 class="text-md">"WISH:LIST"</h3>
                    <button
                        class=move || {
                            if state.with(|s| s.auto_sync) {
                                "px-2 py-1 text-[11px] rounded border bg-green-50 text-green-700 border-green-300"
                            } else {
                                "px-2 py-1 text-[11px] rounded border hover:bg-gray-50"
                            }
                        }
                        title="자동 동기화"
                        on:click=toggle
                    >
                        {move || format!("자동 동기화 {}", if state.with(|s| s.auto_sync) { "ON" } else { "OFF" })}
                    </button>
                </div>
                <div class="text-xs text-gray-500 h-5">
                    {move || state.with(|s| s.error.clone().unwrap_or_default())}
                </div>
                <div class="flex-1 min-h-0 overflow-y-auto">
                    <Show when=move || state.with(|s| s.auto_sync)>
                        <div class="text-[11px] text-gray-500 mb-2 px-1">
                            {move || state.with(|s| s.phase.label())}
                        </div>
                    </Show>
                    <Show
                        when=move || !state.with(|s| s.is_empty_view())
                        fallback=|| view! { <p class="text-xs text-gray-500">{MSG_EMPTY}</p> }
                    >
                        <ul class="grid grid-cols-1 gap-2 text-xs text-gray-700 pb-2">
                            <For
                                each=move || state.with(|s| s.rows.clone())
                                key=|entry| entry.corp_code.clone()
                                children=row
                            />
                        </ul>
                    </Show>
                </div>
            </Show>
        </div>
    }
}

/// Always-visible wishlist column next to the routed page
#[component]
pub fn WishlistPanel() -> impl IntoView {
    view! {
        <aside class="w-[300px] shrink-0">
            <div class="mt-1 rounded-lg border bg-white h-[81vh] flex flex-col min-h-0">
                <div class="flex-1 min-h-0 overflow-hidden">
                    <WishlistContent variant=WishlistVariant::Panel/>
                </div>
            </div>
        </aside>
    }
}

/// Dialog variant; closes on Escape, on the close button, or on a press
/// on the backdrop itself.
#[component]
pub fn WishlistModal(#[prop(into)] on_close: Callback<()>) -> impl IntoView {
    let on_key = window_listener("keydown", &EventOptions::default(), move |e| {
        let escape = e
            .dyn_ref::<KeyboardEvent>()
            .is_some_and(|k| k.key() == "Escape");
        if escape {
            on_close.call(());
        }
    });
    on_cleanup(move || drop(on_key));

    let on_backdrop = move |e: ev::MouseEvent| {
        let is_backdrop = match (e.target(), e.current_target()) {
            (Some(target), Some(current)) => target.unchecked_into::<web_sys::Node>()
                == current.unchecked_into::<web_sys::Node>(),
            _ => false,
        };
        if is_backdrop {
            on_close.call(());
        }
    };

    let panel = create_node_ref::<html::Div>();
    create_effect(move |_| {
        if let Some(el) = panel.get() {
            let _ = el.focus();
        }
    });

    view! {
        <div
            class="fixed inset-0 z-50 bg-black/30 backdrop-blur-[1px]"
            role="dialog"
            aria-modal="true"
            on:mousedown=on_backdrop
        >
            <div
                node_ref=panel
                tabindex="-1"
                class="mx-auto mt-20 w-[92%] max-w-md rounded-xl border bg-white shadow-lg outline-none"
            >
                <div class="flex items-center justify-between p-3 border-b">
                    <h2 class="text-base"></h2>
                    <button
                        type="button"
                        class="text-sm text-gray-500 hover:text-gray-700 px-2 py-1"
                        aria-label="Close wishlist"
                        on:click=move |_| on_close.call(())
                    >
                        "X"
                    </button>
                </div>
                <div class="max-h-[70vh] overflow-auto">
                    <WishlistContent variant=WishlistVariant::Modal/>
                </div>
            </div>
        </div>
    }
}
