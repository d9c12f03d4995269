use leptos::prelude::*;

use crate::browser::set_dark_mode;
use crate::content::NAV_LINKS;

#[component]
pub fn Header() -> impl IntoView {
    let (dark, set_dark) = signal(false);

    let toggle = move |_| {
        let enabled = !dark.get();
        set_dark.set(enabled);
        set_dark_mode(enabled);
    };

    view! {
        <header class="site-header">
            <a href="#" class="brand">"🌱 AgriGuru"</a>
            <nav class="nav">
                {NAV_LINKS
                    .iter()
                    .map(|(label, anchor)| view! { <a href=*anchor>{*label}</a> })
                    .collect_view()}
            </nav>
            <button class="theme-toggle" on:click=toggle title="Toggle dark mode">
                {move || if dark.get() { "☀️" } else { "🌙" }}
            </button>
        </header>
    }
}
