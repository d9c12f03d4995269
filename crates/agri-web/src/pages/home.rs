//! Home Page

use leptos::prelude::*;

use crate::sections::{
    AiToolsSection, ChatWidget, DashboardSection, Footer, Header, HeroSection, Testimonials,
};

#[component]
pub fn HomePage() -> impl IntoView {
    view! {
        <div class="home">
            <Header />
            <main>
                <HeroSection />
                <DashboardSection />
                <AiToolsSection />
                <Testimonials />
            </main>
            <Footer />
            <ChatWidget />
        </div>
    }
}
