use leptos::*;

use crate::domain::info::InfoDocument;
use crate::domain::logging::LogComponent;
use crate::log_error;

const INFO_JSON: &str = include_str!("../../../assets/info.json");

fn load_document() -> InfoDocument {
    InfoDocument::parse(INFO_JSON).unwrap_or_else(|e| {
        log_error!(LogComponent::Presentation("InfoPage"), "bundled info.json is invalid: {}", e);
        InfoDocument::default()
    })
}

#[component]
pub fn InfoPage() -> impl IntoView {
    let doc = load_document();
    let sections = doc
        .sections()
        .into_iter()
        .map(|section| {
            let items = section
                .items
                .into_iter()
                .map(|item| view! { <li>{item}</li> })
                .collect_view();
            view! {
                <section class="card-outline">
                    <h3 class="text-base font-medium mb-2">{section.title}</h3>
                    <ul class="list-bullet">{items}</ul>
                </section>
            }
        })
        .collect_view();

    view! {
        <div class="w-full h-full p-4">
            <div class="h-full panel-surface">
                <div class="flex items-center justify-between mb-2">
                    <h2 class="text-lg font-medium">"정보"</h2>
                    <div class="text-xs text-gray-500">{doc.version_line()}</div>
                </div>
                <div class="flex-1 min-h-0 overflow-y-auto space-y-6 pr-1">{sections}</div>
            </div>
        </div>
    }
}
