use leptos::*;

use crate::domain::insights::{Tone, sparkline_segments};

const WIDTH: f64 = 120.0;
const HEIGHT: f64 = 32.0;

fn points_attr(segment: &[(f64, f64)]) -> String {
    segment
        .iter()
        .map(|(x, y)| format!("{:.1},{:.1}", x, y))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Yearly trend line; gaps in the series break the line.
#[component]
pub fn Sparkline(values: Vec<Option<f64>>, tone: Tone) -> impl IntoView {
    let segments = sparkline_segments(&values, WIDTH, HEIGHT);
    let class = format!("{} stroke-current", tone.css_class());

    view! {
        <svg
            class=class
            width=WIDTH
            height=HEIGHT
            viewBox=format!("-2 -2 {} {}", WIDTH + 4.0, HEIGHT + 4.0)
            fill="none"
            aria-hidden="true"
        >
            {segments
                .iter()
                .map(|segment| {
                    if segment.len() == 1 {
                        let (x, y) = segment[0];
                        view! { <circle cx=x cy=y r="1.5" fill="currentColor"></circle> }.into_view()
                    } else {
                        view! {
                            <polyline points=points_attr(segment) stroke-width="1.5"></polyline>
                        }
                            .into_view()
                    }
                })
                .collect_view()}
        </svg>
    }
}
