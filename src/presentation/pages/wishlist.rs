use leptos::*;

use crate::presentation::components::wishlist::{WishlistContent, WishlistVariant};

/// Full-page list for narrow screens
#[component]
pub fn WishlistPage() -> impl IntoView {
    view! {
        <div class="w-full h-full">
            <WishlistContent variant=WishlistVariant::Page/>
        </div>
    }
}
