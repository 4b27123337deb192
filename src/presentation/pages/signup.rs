use leptos::*;
use leptos_router::*;

use crate::app::AppContext;
use crate::domain::errors::SubmitError;
use crate::domain::validation::{Field, FieldErrors, SignupForm};
use crate::presentation::components::form::{
    AuthHeader, FieldError, PasswordToggle, SubmitBanner, input_class,
};

#[component]
pub fn SignupPage() -> impl IntoView {
    let ctx = expect_context::<AppContext>();
    let navigate = use_navigate();

    let form = create_rw_signal(SignupForm::default());
    let errors = create_rw_signal(FieldErrors::default());
    let submitting = create_rw_signal(false);
    let submit_error = create_rw_signal(None::<String>);
    let show_password = create_rw_signal(false);
    let show_confirm = create_rw_signal(false);

    let edit = move |field: Field, apply: Box<dyn FnOnce(&mut SignupForm)>| {
        form.update(|f| apply(f));
        form.with_untracked(|f| errors.update(|e| f.revalidate(field, e)));
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
            let outcome = session.signup(&current).await;
            let _ = submitting.try_set(false);
            match outcome {
                Ok(()) => navigate(
                    "/login",
                    NavigateOptions {
                        replace: true,
                        ..Default::default()
                    },
                ),
                Err(SubmitError::Invalid(found)) => {
                    let _ = errors.try_set(found);
                }
                Err(SubmitError::Rejected(message) | SubmitError::Failed(message)) => {
                    let _ = submit_error.try_set(Some(message));
                }
            }
        });
    };

    let disabled = move || submitting.get() || !form.with(SignupForm::is_submittable);
    let invalid = move |field: Field| move || errors.with(|e| e.get(field).is_some()).to_string();

    view! {
        <div class="min-h-[calc(100vh-5rem)] flex items-center justify-center px-4 py-10">
            <div class="w-full max-w-md rounded-lg border bg-white p-6">
                <AuthHeader title="회원가입" subtitle="아래 정보를 입력하고 약관에 동의하세요."/>
                <SubmitBanner message=submit_error/>
                <form on:submit=on_submit novalidate=true>
                    <label for="name" class="block text-sm mb-1">"이름"</label>
                    <input
                        id="name"
                        name="name"
                        type="text"
                        autocomplete="name"
                        class=input_class(errors, Field::Name)
                        placeholder="홍길동"
                        aria-invalid=invalid(Field::Name)
                        prop:value=move || form.with(|f| f.name.clone())
                        on:input=move |ev| {
                            let value = event_target_value(&ev);
                            edit(Field::Name, Box::new(move |f| f.name = value));
                        }
                    />
                    <FieldError errors=errors field=Field::Name id="name-error"/>

                    <label for="email" class="block text-sm mt-4 mb-1">"이메일"</label>
                    <input
                        id="email"
                        name="email"
                        type="email"
                        autocomplete="email"
                        class=input_class(errors, Field::Email)
                        placeholder="user@example.com"
                        aria-invalid=invalid(Field::Email)
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
                        autocomplete="new-password"
                        class=input_class(errors, Field::Password)
                        placeholder="8자 이상, 영문과 숫자 포함"
                        aria-invalid=invalid(Field::Password)
                        prop:value=move || form.with(|f| f.password.clone())
                        on:input=move |ev| {
                            let value = event_target_value(&ev);
                            edit(Field::Password, Box::new(move |f| f.password = value));
                        }
                    />
                    <FieldError errors=errors field=Field::Password id="password-error"/>

                    <div class="flex items-center justify-between mt-4">
                        <label for="confirm" class="block text-sm">"비밀번호 확인"</label>
                        <PasswordToggle shown=show_confirm/>
                    </div>
                    <input
                        id="confirm"
                        name="confirm"
                        type=move || if show_confirm.get() { "text" } else { "password" }
                        autocomplete="new-password"
                        class=input_class(errors, Field::Confirm)
                        placeholder="비밀번호 재입력"
                        aria-invalid=invalid(Field::Confirm)
                        prop:value=move || form.with(|f| f.confirm.clone())
                        on:input=move |ev| {
                            let value = event_target_value(&ev);
                            edit(Field::Confirm, Box::new(move |f| f.confirm = value));
                        }
                    />
                    <FieldError errors=errors field=Field::Confirm id="confirm-error"/>

                    <div class="mt-5 space-y-2">
                        <label class="flex items-start gap-2 text-sm">
                            <input
                                type="checkbox"
                                name="agreeTerms"
                                class="mt-0.5"
                                aria-invalid=invalid(Field::AgreeTerms)
                                prop:checked=move || form.with(|f| f.agree_terms)
                                on:change=move |ev| {
                                    let checked = event_target_checked(&ev);
                                    edit(Field::AgreeTerms, Box::new(move |f| f.agree_terms = checked));
                                }
                            />
                            <span>
                                "서비스 이용약관 및 개인정보 처리방침에 동의합니다"
                                <span class="text-gray-500">" (필수)"</span>
                            </span>
                        </label>
                        <FieldError errors=errors field=Field::AgreeTerms id="terms-error"/>
                        <label class="flex items-start gap-2 text-sm">
                            <input
                                type="checkbox"
                                name="agreeMarketing"
                                class="mt-0.5"
                                prop:checked=move || form.with(|f| f.agree_marketing)
                                on:change=move |ev| {
                                    let checked = event_target_checked(&ev);
                                    form.update(|f| f.agree_marketing = checked);
                                }
                            />
                            <span>
                                "이메일 및 푸시를 통한 이벤트, 혜택 안내 수신에 동의합니다"
                                <span class="text-gray-500">" (선택)"</span>
                            </span>
                        </label>
                    </div>

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
                        {move || if submitting.get() { "가입 처리 중..." } else { "가입하기" }}
                    </button>
                </form>
                <p class="mt-4 text-xs text-gray-600">
                    "이미 계정이 있으신가요? "
                    <A href="/login" class="text-blue-600 hover:underline">"로그인"</A>
                </p>
            </div>
        </div>
    }
}
