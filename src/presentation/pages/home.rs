//! Landing page: a short guide and the company search.

use gloo_timers::callback::Timeout;
use leptos::*;

use crate::app::AppContext;
use crate::application::search::SearchController;
use crate::domain::search::{CorpSummary, MSG_NO_RESULTS};
use crate::infrastructure::http::ApiClient;
use crate::presentation::hooks::watch;

#[component]
fn Guide() -> impl IntoView {
    view! {
        <section class="card-surface-lg">
            <h2 class="text-lg font-medium mb-2">"DART:Lens 안내"</h2>
            <ul class="list-bullet">
                <li>"검색창에서 원하는 기업을 검색해 선택하면 위시리스트에 추가할 수 있습니다."</li>
                <li>"위시리스트에 추가된 기업은 모니터링 페이지에서 인사이트를 확인할 수 있습니다."</li>
            </ul>
        </section>
    }
}

#[component]
pub fn HomePage() -> impl IntoView {
    let ctx = expect_context::<AppContext>();
    let controller: SearchController<ApiClient> = SearchController::new(
        ctx.api.clone(),
        ctx.config.search_limit,
        ctx.bus.clone(),
        ctx.notifier(),
        ctx.prefs.clone(),
        ctx.spawner.clone(),
    );
    let state = watch(controller.state(), |emit| controller.subscribe(emit));
    let debounce_ms = ctx.config.debounce_millis();

    let controller = store_value(controller);
    let pending = store_value(None::<Timeout>);

    on_cleanup(move || {
        pending.try_update_value(|timer| timer.take());
        controller.try_with_value(|c| c.cancel());
    });

    let on_input = move |ev: ev::Event| {
        let raw = event_target_value(&ev);
        // Replacing the timer drops, and so cancels, the previous one.
        let next = controller.with_value(|c| c.set_query(&raw)).map(|query| {
            Timeout::new(debounce_ms, move || {
                controller.try_with_value(|c| c.submit(query));
            })
        });
        pending.set_value(next);
    };

    let row = move |corp: CorpSummary| {
        let add = {
            let corp = corp.clone();
            move |_| controller.with_value(|c| c.request_add(corp.clone()))
        };
        view! {
            <li
                class="flex items-center justify-between px-3 py-2 text-sm hover:bg-gray-50"
                title=corp.corp_code.to_string()
            >
                <div class="flex flex-col">
                    <span class="text-gray-900">{corp.label().to_string()}</span>
                    <span class="text-xs text-gray-500">{corp.corp_code.to_string()}</span>
                </div>
                <button
                    class="text-xs px-2 py-1 border rounded hover:bg-blue-50 text-blue-600"
                    on:click=add
                >
                    "추가"
                </button>
            </li>
        }
    };

    view! {
        <div class="h-full w-full p-4 space-y-4 flex flex-col min-h-0">
            <Guide/>
            <section class="card-surface-lg flex flex-col min-h-0">
                <div class="flex items-center gap-2">
                    <label for="corp-search" class="text-sm text-gray-600">
                        "기업 검색"
                    </label>
                    <span class="text-xs text-gray-400">"(기업명 또는 기업코드/종목코드)"</span>
                </div>
                <div class="mt-2 flex items-center gap-2">
                    <input
                        id="corp-search"
                        type="text"
                        class="input-base focus:ring-blue-200"
                        placeholder="예: 더존비즈온 또는 00172291"
                        aria-label="기업 검색"
                        autocomplete="off"
                        prop:value=move || state.with(|s| s.query.clone())
                        on:input=on_input
                    />
                </div>
                <div class="mt-2 h-5 text-xs text-gray-500" aria-live="polite">
                    {move || state.with(|s| s.status_line()).unwrap_or_default()}
                </div>
                <div class="mt-2 flex-1 min-h-0">
                    <Show when=move || state.with(|s| s.shows_no_results())>
                        <p class="text-sm text-gray-500">{MSG_NO_RESULTS}</p>
                    </Show>
                    <Show when=move || state.with(|s| !s.rows.is_empty())>
                        <div
                            class="h-full overflow-y-auto rounded-md border"
                            tabindex="0"
                            aria-label="검색 결과 목록"
                        >
                            <ul class="divide-y">
                                <For
                                    each=move || state.with(|s| s.rows.clone())
                                    key=|corp| corp.corp_code.clone()
                                    children=row
                                />
                            </ul>
                        </div>
                    </Show>
                </div>
            </section>
        </div>
    }
}
