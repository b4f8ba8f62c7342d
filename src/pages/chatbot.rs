//! Assistant chat panel backed by `POST /chatbot/ask`.

#[cfg(test)]
#[path = "chatbot_test.rs"]
mod chatbot_test;

use leptos::prelude::*;

use crate::net::error::ApiError;
use crate::state::session::AppSession;
use crate::util::task::spawn_ui;

pub const FALLBACK_REPLY: &str = "Sorry, I couldn't process your request right now. Please try again later.";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Sender {
    User,
    Bot,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChatMessage {
    pub id: u64,
    pub sender: Sender,
    pub text: String,
}

/// Conversation transcript with stable per-message ids.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ChatLog {
    messages: Vec<ChatMessage>,
    next_id: u64,
}

impl ChatLog {
    pub fn greeting(username: &str) -> Self {
        let mut log = Self::default();
        log.push(Sender::Bot, format!("Hello {username}! I'm your AI assistant. How can I help you today?"));
        log
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn push(&mut self, sender: Sender, text: impl Into<String>) {
        self.messages.push(ChatMessage { id: self.next_id, sender, text: text.into() });
        self.next_id += 1;
    }
}

/// Bot-side text for a failed ask: the backend's own wording when it sent
/// one, otherwise a generic apology.
pub fn failure_reply(error: &ApiError) -> String {
    match error {
        ApiError::Network(_) | ApiError::Encode(_) | ApiError::Decode(_) => FALLBACK_REPLY.to_owned(),
        other => other.user_message(),
    }
}

#[component]
pub fn ChatbotPage() -> impl IntoView {
    let session = expect_context::<AppSession>();
    let state = session.state();
    let username = state.with_untracked(|s| s.user().map(|u| u.username.clone()).unwrap_or_default());
    let chat = RwSignal::new(ChatLog::greeting(&username));
    let input = RwSignal::new(String::new());
    let busy = RwSignal::new(false);

    let can_send = move || !busy.get() && !input.with(|i| i.trim().is_empty());

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if !can_send() {
            return;
        }
        let message = input.get_untracked();
        chat.update(|c| c.push(Sender::User, message.clone()));
        input.set(String::new());
        busy.set(true);
        let session = session.clone();
        spawn_ui(async move {
            let reply = match session.api().ask_chatbot(&message).await {
                Ok(reply) => reply,
                Err(e) => {
                    log::warn!("chatbot ask failed: {e}");
                    session.absorb(&e);
                    failure_reply(&e)
                }
            };
            chat.update(|c| c.push(Sender::Bot, reply));
            busy.set(false);
        });
    };

    view! {
        <div class="chat">
            <header class="chat__header">
                <h1>"AI Chat Assistant"</h1>
            </header>
            <div class="chat__log">
                <For
                    each=move || chat.with(|c| c.messages().to_vec())
                    key=|m| m.id
                    children=|m| {
                        let class = match m.sender {
                            Sender::User => "chat__bubble chat__bubble--user",
                            Sender::Bot => "chat__bubble chat__bubble--bot",
                        };
                        view! { <p class=class>{m.text}</p> }
                    }
                />
            </div>
            <form class="chat__form" on:submit=on_submit>
                <input
                    type="text"
                    placeholder="Ask me anything..."
                    disabled=move || busy.get()
                    prop:value=move || input.get()
                    on:input=move |ev| input.set(event_target_value(&ev))
                />
                <button class="btn btn--primary" type="submit" disabled=move || !can_send()>
                    {move || if busy.get() { "Thinking..." } else { "Send" }}
                </button>
            </form>
        </div>
    }
}
