//! Shell-wide UI flags that are not tied to any view-model.

use leptos::*;
use once_cell::sync::OnceCell;

pub struct Globals {
    pub wishlist_modal_open: RwSignal<bool>,
}

static GLOBALS: OnceCell<Globals> = OnceCell::new();

/// Must first be called under the root owner so the signals outlive pages.
pub fn globals() -> &'static Globals {
    GLOBALS.get_or_init(|| Globals {
        wishlist_modal_open: create_rw_signal(false),
    })
}

/// Whether the topbar's wishlist dialog is showing
pub fn wishlist_modal_open() -> RwSignal<bool> {
    globals().wishlist_modal_open
}
