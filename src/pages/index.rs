//! Landing Page

use leptos::prelude::*;

use crate::context::use_app_context;
use crate::routes::Route;
use crate::store::AppStateStoreFields;

#[component]
pub fn IndexPage() -> impl IntoView {
    let ctx = use_app_context();
    let signed_in = move || ctx.store().session().with(|s| s.is_authenticated());

    view! {
        <div class="landing">
            <header class="landing-header">
                <span class="brand">"Tasklane"</span>
                <Show
                    when=signed_in
                    fallback=move || view! {
                        <button class="link-btn" on:click=move |_| ctx.navigate(&Route::Login { next: None }.to_path())>
                            "Sign in"
                        </button>
                    }
                >
                    <button class="link-btn" on:click=move |_| ctx.navigate(&Route::Dashboard { priority: None }.to_path())>
                        "Open dashboard"
                    </button>
                </Show>
            </header>
            <section class="hero">
                <h1>"Plan the day, finish the list."</h1>
                <p>"Prioritize tasks, set due dates, drag them into order and check them off."</p>
                <button class="primary-btn" on:click=move |_| ctx.navigate(&Route::Dashboard { priority: None }.to_path())>
                    "Get started"
                </button>
            </section>
        </div>
    }
}
