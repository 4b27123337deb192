//! Pieces shared by the login and signup forms.

use leptos::*;
use leptos_router::*;

use crate::domain::validation::{Field, FieldErrors};

/// Inline message under an input, if the field currently has one
#[component]
pub fn FieldError(errors: RwSignal<FieldErrors>, field: Field, id: &'static str) -> impl IntoView {
    move || {
        errors.with(|e| e.get(field)).map(|message| {
            view! {
                <p id=id class="mt-1 text-xs text-red-600" role="alert">
                    {message}
                </p>
            }
        })
    }
}

#[component]
pub fn PasswordToggle(shown: RwSignal<bool>) -> impl IntoView {
    view! {
        <button
            type="button"
            class="text-xs text-gray-500 hover:text-gray-700 px-2 py-1"
            aria-pressed=move || shown.get().to_string()
            title=move || if shown.get() { "비밀번호 숨기기" } else { "비밀번호 표시" }
            on:click=move |_| shown.update(|v| *v = !*v)
        >
            {move || if shown.get() { "숨기기" } else { "표시" }}
        </button>
    }
}

/// Title, subtitle and the logo linking home
#[component]
pub fn AuthHeader(title: &'static str, subtitle: &'static str) -> impl IntoView {
    view! {
        <div class="mb-5 flex items-center justify-between gap-3">
            <div>
                <h1 class="text-xl mb-1">{title}</h1>
                <p class="text-sm text-gray-500 mb-5">{subtitle}</p>
            </div>
            <A href="/" class="shrink-0">
                <img src="/DL_logo.png" alt="DART : Lens" class="h-12 w-auto img-interactive mb-6"/>
            </A>
        </div>
    }
}

/// Form-level failure such as a dropped connection
#[component]
pub fn SubmitBanner(message: RwSignal<Option<String>>) -> impl IntoView {
    move || {
        message.get().map(|text| {
            view! {
                <div class="mb-4 rounded-md border border-red-200 bg-red-50 p-3 text-sm text-red-700" role="alert">
                    {text}
                </div>
            }
        })
    }
}

pub fn input_class(errors: RwSignal<FieldErrors>, field: Field) -> impl Fn() -> String {
    move || {
        let invalid = errors.with(|e| e.get(field).is_some());
        format!(
            "input-base {}",
            if invalid { "border-red-400 focus:ring-red-200" } else { "focus:ring-blue-200" }
        )
    }
}
