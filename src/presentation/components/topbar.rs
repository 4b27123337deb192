use leptos::*;
use leptos_router::*;

use crate::app::AppContext;
use crate::global_state::wishlist_modal_open;
use crate::presentation::components::wishlist::WishlistModal;

#[component]
pub fn Topbar() -> impl IntoView {
    let ctx = expect_context::<AppContext>();
    let session_state = ctx.session_state;
    let logged_in = move || session_state.with(|s| s.is_logged_in());
    let modal_open = wishlist_modal_open();

    // Navigating anywhere closes the modal.
    let location = use_location();
    create_effect(move |_| {
        location.pathname.with(|_| ());
        modal_open.set(false);
    });

    let logout = {
        let session = ctx.session.clone();
        move |_| {
            let session = session.clone();
            spawn_local(async move { session.logout().await });
        }
    };

    view! {
        <header class="sticky top-0 z-40 border-b bg-white">
            <div class="mx-auto max-w-[1400px] h-20 px-4 flex items-center justify-between">
                <div class="flex items-center gap-3 ml-4">
                    <A href="/">
                        <img src="/DL_logo.png" alt="DART : Lens" class="h-12 w-auto img-interactive cursor-pointer"/>
                    </A>
                </div>
                <nav class="flex items-center gap-3 mr-4">
                    <Show when=logged_in>
                        <button
                            type="button"
                            class="inline-block xl:hidden"
                            aria-label="Open wishlist"
                            title="Open wishlist"
                            on:click=move |_| modal_open.set(true)
                        >
                            <img src="/wishlist_BTN.png" alt="Wishlist" class="h-9 w-auto img-interactive"/>
                        </button>
                    </Show>
                    <Show
                        when=logged_in
                        fallback=|| {
                            view! {
                                <A href="/signup">
                                    <img src="/sign%20up_BTN.png" alt="Sign up" class="h-9 w-auto img-interactive"/>
                                </A>
                                <A href="/login">
                                    <img src="/login_BTN.png" alt="Login" class="h-9 w-auto img-interactive"/>
                                </A>
                            }
                        }
                    >
                        <button
                            type="button"
                            aria-label="Logout"
                            title="Logout"
                            class="inline-block transition-transform duration-150 hover:scale-95 active:scale-90"
                            on:click=logout.clone()
                        >
                            <img src="/logout_BTN.png" alt="Logout" class="h-6 w-auto"/>
                        </button>
                    </Show>
                </nav>
            </div>
            <Show when=move || modal_open.get()>
                <WishlistModal on_close=Callback::new(move |_| modal_open.set(false))/>
            </Show>
        </header>
    }
}
