//! Settings Pages
//!
//! Profile, password and time & date preferences under one tabbed layout.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api;
use crate::components::{input_class, FieldMessage};
use crate::context::use_app_context;
use crate::error::{ApiError, FieldErrors};
use crate::notifications::Notification;
use crate::prefs::{HourFormat, Preferences, COMMON_TIMEZONES};
use crate::routes::{Route, SettingsTab};
use crate::settings::{apply_profile_update, password_update, profile_update};
use crate::store::{store_set_preferences, store_set_user, AppStateStoreFields};
use crate::time::{format_for_user, DisplayStyle};

/// Inline result line under a settings form
#[derive(Clone, Debug, PartialEq)]
enum FormMessage {
    Success(String),
    Error(String),
}

fn message_view(message: RwSignal<Option<FormMessage>>) -> impl IntoView {
    move || {
        message.get().map(|m| match m {
            FormMessage::Success(text) => view! { <p class="form-success">{text}</p> }.into_any(),
            FormMessage::Error(text) => view! { <p class="form-error">{text}</p> }.into_any(),
        })
    }
}

/// Field errors go next to inputs; anything else becomes the form message
fn apply_error(err: &ApiError, fallback: &str, errors: RwSignal<FieldErrors>, message: RwSignal<Option<FormMessage>>) {
    match err.field_errors() {
        Some(field_errors) => errors.set(field_errors.clone()),
        None => message.set(Some(FormMessage::Error(err.user_message(fallback)))),
    }
}

#[component]
pub fn SettingsPage(tab: SettingsTab) -> impl IntoView {
    let ctx = use_app_context();
    let store = ctx.store();
    let description = move || {
        let first = store
            .session()
            .with(|s| s.user().map(|u| u.first_name().to_string()))
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| "there".to_string());
        format!("Manage your profile and preferences, {}.", first)
    };

    view! {
        <div class="settings-page">
            <header class="page-header">
                <h1>"Settings"</h1>
                <p class="page-subtitle">{description}</p>
            </header>
            <nav class="settings-tabs">
                {SettingsTab::ALL.into_iter().map(|t| view! {
                    <button
                        class=if t == tab { "tab-btn active" } else { "tab-btn" }
                        on:click=move |_| {
                            if t != tab {
                                ctx.navigate(&Route::SettingsTab(t).to_path());
                            }
                        }
                    >
                        {t.label()}
                    </button>
                }).collect_view()}
            </nav>
            {match tab {
                SettingsTab::Profile => view! { <ProfileSettings /> }.into_any(),
                SettingsTab::Security => view! { <SecuritySettings /> }.into_any(),
                SettingsTab::Time => view! { <TimeSettings /> }.into_any(),
            }}
        </div>
    }
}

#[component]
fn ProfileSettings() -> impl IntoView {
    let ctx = use_app_context();
    let store = ctx.store();

    let name = RwSignal::new(String::new());
    let email = RwSignal::new(String::new());
    let errors = RwSignal::new(FieldErrors::new());
    let message = RwSignal::new(None::<FormMessage>);
    let saving = RwSignal::new(false);

    // Prefill once the profile is known
    Effect::new(move |_| {
        if let Some((n, e)) = store.session().with(|s| s.user().map(|u| (u.name.clone(), u.email.clone()))) {
            name.set(n);
            email.set(e);
        }
    });

    let submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if saving.get_untracked() {
            return;
        }
        message.set(None);
        errors.set(FieldErrors::new());
        let update = match profile_update(&name.get_untracked(), &email.get_untracked()) {
            Ok(update) => update,
            Err(field_errors) => {
                errors.set(field_errors);
                return;
            }
        };
        saving.set(true);
        let client = ctx.client();
        spawn_local(async move {
            let result = api::update_profile(&client, &update).await;
            saving.set(false);
            match result {
                Ok(saved) => {
                    let user = saved.or_else(|| {
                        store.session().with_untracked(|s| s.user().map(|current| apply_profile_update(current, &update)))
                    });
                    if let Some(user) = user {
                        store_set_user(&store, user);
                    }
                    message.set(Some(FormMessage::Success("Profile updated successfully!".to_string())));
                    ctx.notify(Notification::success("Profile updated").with_description("Your profile information was updated."));
                }
                Err(ApiError::SessionExpired) => ctx.expire_session(),
                Err(err) => apply_error(&err, "Failed to update profile. Please try again.", errors, message),
            }
        });
    };

    view! {
        <form class="settings-card" on:submit=submit>
            <h2>"Profile Information"</h2>
            <p class="card-hint">"Update your account's profile information."</p>
            <label>"Full name"</label>
            <input
                type="text"
                class=input_class(errors, "name")
                prop:value=move || name.get()
                on:input=move |ev| name.set(event_target_value(&ev))
            />
            <FieldMessage errors=errors field="name" />
            <FieldMessage errors=errors field="surname" />
            <label>"Email"</label>
            <input
                type="email"
                class=input_class(errors, "email")
                prop:value=move || email.get()
                on:input=move |ev| email.set(event_target_value(&ev))
            />
            <FieldMessage errors=errors field="email" />
            {message_view(message)}
            <button type="submit" class="primary-btn" disabled=move || saving.get()>
                {move || if saving.get() { "Saving…" } else { "Save changes" }}
            </button>
        </form>
    }
}

#[component]
fn SecuritySettings() -> impl IntoView {
    let ctx = use_app_context();

    let current = RwSignal::new(String::new());
    let new_password = RwSignal::new(String::new());
    let confirm = RwSignal::new(String::new());
    let errors = RwSignal::new(FieldErrors::new());
    let message = RwSignal::new(None::<FormMessage>);
    let saving = RwSignal::new(false);

    let submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if saving.get_untracked() {
            return;
        }
        message.set(None);
        errors.set(FieldErrors::new());
        let update = match password_update(&current.get_untracked(), &new_password.get_untracked(), &confirm.get_untracked()) {
            Ok(update) => update,
            Err(text) => {
                message.set(Some(FormMessage::Error(text)));
                return;
            }
        };
        saving.set(true);
        let client = ctx.client();
        spawn_local(async move {
            let result = api::update_password(&client, &update).await;
            saving.set(false);
            match result {
                Ok(()) => {
                    current.set(String::new());
                    new_password.set(String::new());
                    confirm.set(String::new());
                    message.set(Some(FormMessage::Success("Password changed successfully!".to_string())));
                    ctx.notify(Notification::success("Password updated").with_description("Your password was changed successfully."));
                }
                Err(ApiError::SessionExpired) => ctx.expire_session(),
                Err(err) => apply_error(&err, "Failed to change password. Please try again.", errors, message),
            }
        });
    };

    let password_field = move |label: &'static str, field: &'static str, autocomplete: &'static str, value: RwSignal<String>| {
        view! {
            <label>{label}</label>
            <input
                type="password"
                class=input_class(errors, field)
                autocomplete=autocomplete
                prop:value=move || value.get()
                on:input=move |ev| value.set(event_target_value(&ev))
            />
            <FieldMessage errors=errors field=field />
        }
    };

    view! {
        <form class="settings-card" on:submit=submit>
            <h2>"Change Password"</h2>
            {password_field("Current password", "old_password", "current-password", current)}
            {password_field("New password", "password", "new-password", new_password)}
            {password_field("Confirm new password", "password_confirm", "new-password", confirm)}
            {message_view(message)}
            <button type="submit" class="primary-btn" disabled=move || saving.get()>
                {move || if saving.get() { "Saving…" } else { "Update password" }}
            </button>
        </form>
    }
}

#[component]
fn TimeSettings() -> impl IntoView {
    let ctx = use_app_context();
    let store = ctx.store();

    let initial = store.preferences().get_untracked();
    let timezone = RwSignal::new(initial.timezone.clone());
    let hour_format = RwSignal::new(initial.hour_format);
    let errors = RwSignal::new(FieldErrors::new());
    let message = RwSignal::new(None::<FormMessage>);

    // The saved zone first, then the common ones
    let zones = {
        let mut zones = vec![initial.timezone.clone()];
        zones.extend(COMMON_TIMEZONES.iter().map(|z| z.to_string()).filter(|z| *z != initial.timezone));
        zones
    };

    let preview = move || {
        let prefs = Preferences { timezone: timezone.get(), hour_format: hour_format.get() };
        format_for_user(chrono::Utc::now(), &prefs, DisplayStyle::DateTime)
    };

    let save = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        message.set(None);
        match Preferences::save(&timezone.get_untracked(), hour_format.get_untracked()) {
            Ok(prefs) => {
                errors.set(FieldErrors::new());
                store_set_preferences(&store, prefs);
                message.set(Some(FormMessage::Success("Time & date preferences saved.".to_string())));
                ctx.notify(Notification::success("Time & date updated").with_description("Your time & date preferences were updated."));
            }
            Err(field_errors) => errors.set(field_errors),
        }
    };

    view! {
        <form class="settings-card" on:submit=save>
            <h2>"Time & Date"</h2>
            <p class="card-hint">"Control how dates and times are displayed in your dashboard."</p>

            <label>"Timezone"</label>
            <select
                class=input_class(errors, "timezone")
                prop:value=move || timezone.get()
                on:change=move |ev| timezone.set(event_target_value(&ev))
            >
                {zones.into_iter().enumerate().map(|(i, zone)| {
                    let label = if i == 0 { format!("Current: {}", zone) } else { zone.clone() };
                    view! { <option value=zone>{label}</option> }
                }).collect_view()}
            </select>
            <FieldMessage errors=errors field="timezone" />

            <label>"Hour format"</label>
            <div class="segmented">
                {[HourFormat::H24, HourFormat::H12].into_iter().map(|format| view! {
                    <button
                        type="button"
                        class=move || if hour_format.get() == format { "segment active" } else { "segment" }
                        on:click=move |_| hour_format.set(format)
                    >
                        {match format {
                            HourFormat::H24 => "24-hour",
                            HourFormat::H12 => "12-hour",
                        }}
                    </button>
                }).collect_view()}
            </div>

            <p class="card-hint">"Preview: " {preview}</p>
            {message_view(message)}
            <button type="submit" class="primary-btn">"Save Time & Date"</button>
        </form>
    }
}
