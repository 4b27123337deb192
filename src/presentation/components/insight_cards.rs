//! The five metric cards plus the legend and reading guide under them.

use leptos::*;
use strum::IntoEnumIterator;

use crate::domain::insights::{INTERPRETATION_FLOW, InsightMetric, MetricCard, YearRecord, build_cards};
use crate::presentation::components::sparkline::Sparkline;

#[component]
fn Card(card: MetricCard) -> impl IntoView {
    let values: Vec<Option<f64>> = card.series.iter().map(|(_, v)| *v).collect();
    let format = card.metric.format();
    let years = card
        .series
        .iter()
        .map(|(year, value)| {
            view! {
                <li class="flex justify-between">
                    <span class="text-gray-500">{year.clone()}</span>
                    <span class=card.metric.tone(*value).css_class()>{format.format(*value)}</span>
                </li>
            }
        })
        .collect_view();

    view! {
        <div class="card-surface flex flex-col gap-2" data-metric=card.metric.key()>
            <div class="text-xs text-gray-500">{card.metric.title()}</div>
            <div class=format!("text-xl font-semibold {}", card.tone.css_class())>
                {card.headline.clone()}
            </div>
            <Sparkline values=values tone=card.tone/>
            <ul class="text-[11px] space-y-0.5">{years}</ul>
        </div>
    }
}

#[component]
fn Legend() -> impl IntoView {
    let rows = InsightMetric::iter()
        .map(|metric| {
            let ranges = metric
                .ranges()
                .iter()
                .map(|(label, tone)| view! { <span class=tone.css_class()>{*label}</span> })
                .collect_view();
            view! {
                <li>
                    <span class="font-medium">{metric.heading()}</span>
                    " "
                    {ranges}
                </li>
            }
        })
        .collect_view();

    view! {
        <section class="card-outline">
            <h3 class="text-sm font-semibold mb-2">"지표 설명과 기준"</h3>
            <ul class="list-bullet space-y-1">{rows}</ul>
        </section>
    }
}

#[component]
pub fn InsightCards(records: Vec<YearRecord>) -> impl IntoView {
    let cards = build_cards(&records)
        .into_iter()
        .map(|card| view! { <Card card=card/> })
        .collect_view();

    view! {
        <div class="flex flex-col gap-4">
            <div class="grid grid-cols-2 lg:grid-cols-5 gap-3">{cards}</div>
            <Legend/>
            <section class="card-outline">
                <h3 class="text-sm font-semibold mb-2">"해석 흐름"</h3>
                <p class="text-sm text-gray-700">{INTERPRETATION_FLOW}</p>
            </section>
        </div>
    }
}
