use leptos::*;
use leptos_router::*;

use crate::app::AppContext;
use crate::domain::errors::SubmitError;
use crate::domain::validation::{Field, FieldErrors, LoginForm};
use crate::presentation::components::form::{
    AuthHeader, FieldError, PasswordToggle, SubmitBanner, input_class,
};

#[component]
pub fn LoginPage() -> impl IntoView {
    let ctx = expect_context::<AppContext>();
    let navigate = use_navigate();

    let form = create_rw_signal(LoginForm::default());
    let errors = create_rw_signal(FieldErrors::default());
    let submitting = create_rw_signal(false);
    let submit_error = create_rw_signal(None::<String>);
    let show_password = create_rw_signal(false);

    // Every edit re-checks the edited field.
    let edit = move |field: Field, apply: Box<dyn FnOnce(&mut LoginForm)>| {
        form.update(|f| apply(f));
        let result = form.with_untracked(|f| f.validate_field(field));
        errors.update(|e| e.apply(field, result));
    };

    let on_submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        if submitting.get_untracked() {
            return;
        }
        let current = form.get_untracked();
        let checked = current.validate();
        let blocked = !checked.is_empty();
        errors.set(checked);
        if blocked {
            return;
        }

        submitting.set(true);
        submit_error.set(None);
        let session = ctx.session.clone();
        let navigate = navigate.clone();
        spawn_local(async move {
            let outcome = session.login(&current).await;
            let _ = submitting.try_set(false);
            match outcome {
                Ok(()) => navigate(
                    "/",
                    NavigateOptions {
                        replace: true,
                        ..Default::default()
                    },
                ),
                Err(SubmitError::Invalid(found)) => {
                    let _ = errors.try_set(found);
                }
                // Already shown as a notification.
                Err(SubmitError::Rejected(_)) => {}
                Err(SubmitError::Failed(message)) => {
                    let _ = submit_error.try_set(Some(message));
                }
            }
        });
    };

    let disabled = move || submitting.get() || !form.with(LoginForm::is_submittable);

    view! {
        <div class="min-h-[calc(100vh-5rem)] flex items-center justify-center px-4 py-10">
            <div class="w-full max-w-md rounded-lg border bg-white p-6">
                <AuthHeader title="로그인" subtitle="이메일과 비밀번호를 입력하세요."/>
                <SubmitBanner message=submit_error/>
                <form on:submit=on_submit novalidate=true>
                    <label for="email" class="block text-sm mb-1">"이메일"</label>
                    <input
                        id="email"
                        name="email"
                        type="email"
                        autocomplete="email"
                        class=input_class(errors, Field::Email)
                        placeholder="user@example.com"
                        aria-invalid=move || errors.with(|e| e.get(Field::Email).is_some()).to_string()
                        prop:value=move || form.with(|f| f.email.clone())
                        on:input=move |ev| {
                            let value = event_target_value(&ev);
                            edit(Field::Email, Box::new(move |f| f.email = value));
                        }
                    />
                    <FieldError errors=errors field=Field::Email id="email-error"/>

                    <div class="flex items-center justify-between mt-4">
                        <label for="password" class="block text-sm">"비밀번호"</label>
                        <PasswordToggle shown=show_password/>
                    </div>
                    <input
                        id="password"
                        name="password"
                        type=move || if show_password.get() { "text" } else { "password" }
                        autocomplete="current-password"
                        class=input_class(errors, Field::Password)
                        placeholder="비밀번호"
                        aria-invalid=move || errors.with(|e| e.get(Field::Password).is_some()).to_string()
                        prop:value=move || form.with(|f| f.password.clone())
                        on:input=move |ev| {
                            let value = event_target_value(&ev);
                            edit(Field::Password, Box::new(move |f| f.password = value));
                        }
                    />
                    <FieldError errors=errors field=Field::Password id="password-error"/>

                    <label class="mt-4 flex items-center gap-2 text-sm text-gray-600">
                        <input
                            type="checkbox"
                            name="remember"
                            prop:checked=move || form.with(|f| f.remember)
                            on:change=move |ev| {
                                let checked = event_target_checked(&ev);
                                form.update(|f| f.remember = checked);
                            }
                        />
                        "로그인 상태 유지"
                    </label>

                    <button
                        type="submit"
                        class=move || {
                            format!(
                                "mt-6 w-full rounded-md px-4 py-2 text-sm text-white {}",
                                if disabled() { "bg-gray-400 cursor-not-allowed" } else { "bg-blue-600 hover:bg-blue-700" }
                            )
                        }
                        disabled=disabled
                        aria-disabled=move || disabled().to_string()
                    >
                        {move || if submitting.get() { "로그인 중..." } else { "로그인" }}
                    </button>
                </form>
                <p class="mt-4 text-xs text-gray-600">
                    "계정이 없으신가요? "
                    <A href="/signup" class="text-blue-600 hover:underline">"회원가입"</A>
                </p>
            </div>
        </div>
    }
}
