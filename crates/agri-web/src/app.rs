//! Main App Component

use leptos::prelude::*;
use leptos_router::{components::*, path};

use crate::pages::HomePage;

/// Root application component
#[component]
pub fn App() -> impl IntoView {
    view! {
        <Router>
            <Routes fallback=|| view! { <p class="not-found">"Page not found"</p> }>
                <Route path=path!("/") view=HomePage />
            </Routes>
        </Router>
    }
}
