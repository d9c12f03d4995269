use chrono::Datelike;
use leptos::prelude::*;

#[component]
pub fn Footer() -> impl IntoView {
    let year = chrono::Local::now().year();

    view! {
        <footer class="site-footer">
            <p>{format!("© {year} AgriGuru AI. All Rights Reserved.")}</p>
            <p class="tagline">"Empowering Indian Agriculture through AI."</p>
        </footer>
    }
}
