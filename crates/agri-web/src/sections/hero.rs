use leptos::prelude::*;

#[component]
pub fn HeroSection() -> impl IntoView {
    view! {
        <section class="hero">
            <h1>"Empowering Farmers with AI-Driven Insights"</h1>
            <p class="tagline">
                "Get instant analysis on crop health, soil, market trends, and live weather data. Make smarter decisions for your farm."
            </p>
            <a href="#dashboard" class="btn btn-primary">"Go to Dashboard"</a>
        </section>
    }
}
