//! Floating chat with the assistant

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::{self, ChatMessage};
use crate::components::{MessageBubble, Spinner};

const GREETING: &str =
    "Hi there! I am AgriGuru, your AI assistant. How can I help you with your farming questions today?";

#[component]
pub fn ChatWidget() -> impl IntoView {
    let (open, set_open) = signal(false);
    let (messages, set_messages) = signal(vec![ChatMessage::model(GREETING)]);
    let (input, set_input) = signal(String::new());
    let (loading, set_loading) = signal(false);
    let (conversation, set_conversation) = signal(None::<String>);

    let send = move || {
        let text = input.get_untracked();
        if text.trim().is_empty() || loading.get_untracked() {
            return;
        }

        set_messages.update(|msgs| msgs.push(ChatMessage::user(text.clone())));
        set_input.set(String::new());
        set_loading.set(true);

        let id = conversation.get_untracked();
        spawn_local(async move {
            let reply = match api::send_chat(&text, id.as_deref()).await {
                Ok(reply) => {
                    set_conversation.set(Some(reply.conversation_id));
                    reply.message
                }
                Err(e) => e,
            };
            set_messages.update(|msgs| msgs.push(ChatMessage::model(reply)));
            set_loading.set(false);
        });
    };

    view! {
        <div class="chat-widget">
            <Show when=move || open.get()>
                <div class="chat-window">
                    <div class="chat-header">
                        <h3>"AgriGuru Assistant"</h3>
                        <button on:click=move |_| set_open.set(false) title="Close chat">"✕"</button>
                    </div>
                    <div class="messages">
                        <For
                            each=move || messages.get().into_iter().enumerate()
                            key=|(index, _)| *index
                            children=move |(_, msg)| view! { <MessageBubble message=msg /> }
                        />
                        <Show when=move || loading.get()>
                            <Spinner />
                        </Show>
                    </div>
                    <div class="input-area">
                        <input
                            type="text"
                            placeholder="Ask anything..."
                            prop:value=move || input.get()
                            on:input=move |ev| set_input.set(event_target_value(&ev))
                            on:keydown=move |ev| {
                                if ev.key() == "Enter" {
                                    ev.prevent_default();
                                    send();
                                }
                            }
                        />
                        <button on:click=move |_| send() disabled=move || loading.get()>"Send"</button>
                    </div>
                </div>
            </Show>
            <button class="chat-toggle" on:click=move |_| set_open.update(|o| *o = !*o) title="Chat with AgriGuru">
                {move || if open.get() { "✕" } else { "💬" }}
            </button>
        </div>
    }
}
