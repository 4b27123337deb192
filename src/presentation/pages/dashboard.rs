//! Monitoring view for the selected company.

use leptos::*;
use leptos_router::*;

use crate::app::AppContext;
use crate::application::insights::InsightsController;
use crate::domain::events::BusEvent;
use crate::domain::insights::{MSG_LOADING, MSG_NO_DATA, MSG_NO_SELECTION};
use crate::infrastructure::http::ApiClient;
use crate::presentation::components::insight_cards::InsightCards;
use crate::presentation::hooks::watch;

#[component]
fn EmptyNote(text: &'static str) -> impl IntoView {
    view! { <div class="rounded-md border border-dashed p-6 text-sm text-gray-500">{text}</div> }
}

#[component]
pub fn DashboardPage() -> impl IntoView {
    let ctx = expect_context::<AppContext>();
    let controller: InsightsController<ApiClient> = InsightsController::new(
        ctx.api.clone(),
        ctx.config.insight_query.clone(),
        ctx.spawner.clone(),
    );
    let state = watch(controller.state(), |emit| controller.subscribe(emit));

    // `?corp=` takes over the shared selection.
    let query = use_query_map();
    {
        let selection = ctx.selection.clone();
        create_effect(move |_| {
            let code = query.with(|q| q.get("corp").cloned());
            selection.select_from_query(code.as_deref());
        });
    }

    let selected = ctx.selected;
    {
        let controller = controller.clone();
        create_effect(move |_| controller.select(selected.get()));
    }

    let invalidations = {
        let controller = controller.clone();
        ctx.bus.subscribe(move |event| {
            if *event == BusEvent::InsightsInvalidated {
                controller.reload();
            }
        })
    };
    on_cleanup(move || {
        drop(invalidations);
        controller.cancel();
    });

    view! {
        <div class="w-full h-full p-4 flex flex-col min-h-0">
            <div class="panel-surface h-full">
                <div class="flex items-center justify-between">
                    <h2 class="text-lg font-medium">"MONITORING"</h2>
                    <span class="text-sm text-gray-700 font-medium">
                        {move || state.with(|s| s.heading()).unwrap_or_default()}
                    </span>
                </div>
                <div class="text-xs text-gray-500 h-5 mt-1" aria-live="polite">
                    {move || {
                        state.with(|s| {
                            if s.loading {
                                MSG_LOADING.to_string()
                            } else {
                                s.error.clone().unwrap_or_default()
                            }
                        })
                    }}
                </div>
                <div class="mt-2 flex-1 min-h-0 overflow-y-auto">
                    {move || {
                        state.with(|s| {
                            if s.corp_code.is_none() {
                                view! { <EmptyNote text=MSG_NO_SELECTION/> }.into_view()
                            } else if !s.snapshots.is_empty() {
                                view! { <InsightCards records=s.snapshots.clone()/> }.into_view()
                            } else if s.shows_no_data() {
                                view! { <EmptyNote text=MSG_NO_DATA/> }.into_view()
                            } else {
                                ().into_view()
                            }
                        })
                    }}
                </div>
            </div>
        </div>
    }
}
