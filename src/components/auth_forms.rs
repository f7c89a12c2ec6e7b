//! Auth Form Components
//!
//! Login and registration. Both finish through `AppContext::complete_login`,
//! which picks the post-login destination.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api;
use crate::components::{input_class, FieldMessage};
use crate::context::use_app_context;
use crate::error::FieldErrors;
use crate::models::{LoginRequest, RegisterRequest};
use crate::notifications::Notification;
use crate::routes::Route;

#[component]
pub fn LoginForm(next: Option<String>) -> impl IntoView {
    let ctx = use_app_context();

    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let error = RwSignal::new(None::<String>);
    let loading = RwSignal::new(false);
    let register_path = Route::Register.to_path();

    let submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if loading.get_untracked() {
            return;
        }
        let request = LoginRequest {
            email: email.get_untracked().trim().to_string(),
            password: password.get_untracked(),
        };
        error.set(None);
        loading.set(true);
        let next = next.clone();
        let client = ctx.client();
        spawn_local(async move {
            let result = api::login(&client, &request).await;
            loading.set(false);
            match result {
                Ok(token) => {
                    ctx.notify(Notification::success("Logged in successfully"));
                    ctx.complete_login(token, next);
                }
                Err(err) => {
                    let message = err.user_message("Login failed");
                    tracing::info!("login rejected: {}", err);
                    ctx.notify(Notification::error("Login failed").with_description(message.clone()));
                    error.set(Some(message));
                }
            }
        });
    };

    view! {
        <form class="auth-form" on:submit=submit>
            <label>"Email"</label>
            <input
                type="email"
                class="input"
                autocomplete="email"
                prop:value=move || email.get()
                on:input=move |ev| email.set(event_target_value(&ev))
            />
            <label>"Password"</label>
            <input
                type="password"
                class="input"
                autocomplete="current-password"
                prop:value=move || password.get()
                on:input=move |ev| password.set(event_target_value(&ev))
            />
            {move || error.get().map(|e| view! { <p class="form-error">{e}</p> })}
            <button type="submit" class="primary-btn" disabled=move || loading.get()>
                {move || if loading.get() { "Signing in…" } else { "Sign in" }}
            </button>
            <p class="auth-switch">
                "No account yet? "
                <button type="button" class="link-btn" on:click=move |_| ctx.navigate(&register_path)>
                    "Create one"
                </button>
            </p>
        </form>
    }
}

#[component]
pub fn RegisterForm() -> impl IntoView {
    let ctx = use_app_context();

    let name = RwSignal::new(String::new());
    let surname = RwSignal::new(String::new());
    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let password_confirm = RwSignal::new(String::new());
    let errors = RwSignal::new(FieldErrors::new());
    let error = RwSignal::new(None::<String>);
    let loading = RwSignal::new(false);

    let submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if loading.get_untracked() {
            return;
        }
        let request = RegisterRequest {
            name: name.get_untracked().trim().to_string(),
            surname: surname.get_untracked().trim().to_string(),
            email: email.get_untracked().trim().to_string(),
            password: password.get_untracked(),
            password_confirm: password_confirm.get_untracked(),
        };
        errors.set(FieldErrors::new());
        error.set(None);
        loading.set(true);
        let client = ctx.client();
        spawn_local(async move {
            let result = api::register(&client, &request).await;
            loading.set(false);
            match result {
                Ok(token) => {
                    ctx.notify(Notification::success("Account created"));
                    ctx.complete_login(token, None);
                }
                Err(err) => match err.field_errors() {
                    Some(field_errors) => errors.set(field_errors.clone()),
                    None => error.set(Some(err.user_message(
                        "Authentication failed. Please check your details and try again.",
                    ))),
                },
            }
        });
    };

    let text_field = move |label: &'static str, field: &'static str, kind: &'static str, value: RwSignal<String>| {
        view! {
            <label>{label}</label>
            <input
                type=kind
                class=input_class(errors, field)
                prop:value=move || value.get()
                on:input=move |ev| value.set(event_target_value(&ev))
            />
            <FieldMessage errors=errors field=field />
        }
    };

    view! {
        <form class="auth-form" on:submit=submit>
            {text_field("First name", "name", "text", name)}
            {text_field("Last name", "surname", "text", surname)}
            {text_field("Email", "email", "email", email)}
            {text_field("Password", "password", "password", password)}
            {text_field("Confirm password", "password_confirm", "password", password_confirm)}
            {move || error.get().map(|e| view! { <p class="form-error">{e}</p> })}
            <button type="submit" class="primary-btn" disabled=move || loading.get()>
                {move || if loading.get() { "Creating account…" } else { "Create account" }}
            </button>
            <p class="auth-switch">
                "Already registered? "
                <button type="button" class="link-btn" on:click=move |_| ctx.navigate(&Route::Login { next: None }.to_path())>
                    "Sign in"
                </button>
            </p>
        </form>
    }
}
