use leptos::*;
use leptos_router::*;
use strum::IntoEnumIterator;

use crate::presentation::routes::NavItem;

#[component]
pub fn Sidebar() -> impl IntoView {
    let location = use_location();

    view! {
        <aside class="w-[200px] shrink-0 rounded-lg border bg-white p-3 flex flex-col items-center mt-1">
            {NavItem::iter()
                .map(|item| {
                    let active = move || location.pathname.with(|p| item.is_active(p));
                    view! {
                        <A href=item.path() class="block w-[200px] h-[56px]">
                            <img
                                src=move || item.image(active())
                                alt=item.key()
                                class="w-[200px] h-[56px] object-contain transition-transform duration-150 hover:brightness-110 active:scale-95"
                            />
                        </A>
                    }
                })
                .collect_view()}
        </aside>
    }
}
