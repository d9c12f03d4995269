//! UI Components

use agri_markdown::Renderer;
use leptos::prelude::*;

use crate::api::ChatMessage;

/// Model output is rendered with markup escaped
const RENDERER: Renderer = Renderer::new().escape_html(true);

/// Markdown fragment rendered to HTML
#[component]
pub fn Markdown(text: String, #[prop(optional)] class: &'static str) -> impl IntoView {
    let html = RENDERER.render(text.as_str()).into_string();
    let class = if class.is_empty() { "markdown" } else { class };

    view! { <div class=class inner_html=html></div> }
}

/// Message bubble component
#[component]
pub fn MessageBubble(message: ChatMessage) -> impl IntoView {
    let class = format!("message message-{}", message.role);

    view! {
        <div class=class>
            <Markdown text=message.content class="content" />
        </div>
    }
}

#[component]
pub fn Spinner(#[prop(optional)] label: &'static str) -> impl IntoView {
    view! {
        <div class="spinner" role="status">
            <span class="spinner-dot"></span>
            {(!label.is_empty()).then_some(label)}
        </div>
    }
}
