//! Photo analysis tools

use leptos::html;
use leptos::prelude::*;
use leptos::task::spawn_local;
use web_sys::HtmlInputElement;

use crate::api::{self, TaskInfo};
use crate::browser::read_as_data_url;
use crate::components::{Markdown, Spinner};
use crate::content::NO_IMAGE;

const FIRST_TASK: &str = "DISEASE_DETECTION";

#[component]
pub fn AiToolsSection() -> impl IntoView {
    let (tasks, set_tasks) = signal(Vec::<TaskInfo>::new());
    let (active, set_active) = signal(FIRST_TASK.to_string());
    let (image, set_image) = signal(None::<String>);
    let (loading, set_loading) = signal(false);
    let (result, set_result) = signal(None::<String>);
    let (error, set_error) = signal(None::<String>);
    let file_input: NodeRef<html::Input> = NodeRef::new();

    spawn_local(async move {
        match api::fetch_tasks().await {
            Ok(list) => set_tasks.set(list),
            Err(e) => set_error.set(Some(e)),
        }
    });

    let select = move |id: String| {
        set_active.set(id);
        set_image.set(None);
        set_result.set(None);
        set_error.set(None);
        set_loading.set(false);
        if let Some(input) = file_input.get_untracked() {
            input.set_value("");
        }
    };

    let on_file = move |ev: leptos::ev::Event| {
        let input = event_target::<HtmlInputElement>(&ev);
        let Some(file) = input.files().and_then(|files| files.get(0)) else {
            return;
        };
        set_result.set(None);
        set_error.set(None);
        spawn_local(async move {
            match read_as_data_url(&file).await {
                Ok(url) => set_image.set(Some(url)),
                Err(e) => set_error.set(Some(e)),
            }
        });
    };

    let analyze = move |_| {
        let Some(data_url) = image.get_untracked() else {
            set_error.set(Some(NO_IMAGE.into()));
            return;
        };
        let task = active.get_untracked();
        set_loading.set(true);
        set_result.set(None);
        set_error.set(None);

        spawn_local(async move {
            match api::analyze_image(&task, &data_url).await {
                Ok(report) => set_result.set(Some(report)),
                Err(_) => set_error.set(Some("An unexpected error occurred. Please try again.".into())),
            }
            set_loading.set(false);
        });
    };

    let current = move || tasks.get().into_iter().find(|t| t.id == active.get());

    view! {
        <section id="ai-tools" class="ai-tools">
            <div class="section-heading">
                <h2>"Your AI Farming Assistant"</h2>
                <p>"Harness the power of AI to gain instant insights from images."</p>
            </div>

            <nav class="tabs" aria-label="Tabs">
                {move || {
                    tasks
                        .get()
                        .into_iter()
                        .map(|task| {
                            let id = task.id.clone();
                            let selected = task.id.clone();
                            view! {
                                <button
                                    class=move || if active.get() == selected { "tab tab-active" } else { "tab" }
                                    on:click=move |_| select(id.clone())
                                >
                                    {task.title}
                                </button>
                            }
                        })
                        .collect_view()
                }}
            </nav>

            <div class="tool-panel">
                <div class="tool-input">
                    {move || current().map(|task| view! {
                        <h3>{task.title}</h3>
                        <p>{task.description}</p>
                    })}
                    <input
                        type="file"
                        id="ai-image-upload"
                        accept="image/*"
                        class="visually-hidden"
                        node_ref=file_input
                        on:change=on_file
                    />
                    <label for="ai-image-upload" class="upload-area">
                        {move || match image.get() {
                            Some(src) => view! { <img src=src alt="Upload preview" /> }.into_any(),
                            None => view! { <p>"Click to upload an image"</p> }.into_any(),
                        }}
                    </label>
                    {move || error.get().map(|e| view! { <p class="alert alert-error">{e}</p> })}
                    <button
                        class="btn btn-primary"
                        on:click=analyze
                        disabled=move || image.get().is_none() || loading.get()
                    >
                        {move || if loading.get() { "Analyzing..." } else { "✨ Analyze Image" }}
                    </button>
                </div>

                <div class="tool-result">
                    <h4>"Analysis Result"</h4>
                    <Show when=move || loading.get()>
                        <Spinner label="Thinking... Please wait." />
                    </Show>
                    {move || match result.get() {
                        Some(report) => view! { <Markdown text=report /> }.into_any(),
                        None if !loading.get() => {
                            view! { <p class="placeholder">"Your analysis will appear here."</p> }.into_any()
                        }
                        None => ().into_any(),
                    }}
                </div>
            </div>
        </section>
    }
}
