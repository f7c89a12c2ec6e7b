//! Login and Registration Pages

use leptos::prelude::*;

use crate::components::{LoginForm, RegisterForm};

#[component]
pub fn LoginPage(next: Option<String>) -> impl IntoView {
    view! {
        <div class="auth-page">
            <div class="auth-card">
                <h1>"Welcome back"</h1>
                <p class="auth-subtitle">"Sign in to continue to your tasks."</p>
                <LoginForm next=next />
            </div>
        </div>
    }
}

#[component]
pub fn RegisterPage() -> impl IntoView {
    view! {
        <div class="auth-page">
            <div class="auth-card">
                <h1>"Create your account"</h1>
                <RegisterForm />
            </div>
        </div>
    }
}
