use crate::auth::use_auth;
use crate::components::toast::use_toast;
use chrono::Utc;
use leptos::prelude::*;
use leptos::task::spawn_local;
use travella::views::predict::{self, ChatMessage, ChatSession, Sender};

fn bubble(message: ChatMessage) -> impl IntoView {
    let (side, tone) = match message.sender {
        Sender::User => ("chat chat-end", "chat-bubble chat-bubble-primary"),
        Sender::Bot => ("chat chat-start", "chat-bubble"),
    };
    view! {
        <div class=side>
            <div class=tone>
                <p class="whitespace-pre-line">{message.content}</p>
            </div>
            <div class="chat-footer opacity-50 text-xs">
                {message.sent_at.format("%H:%M").to_string()}
            </div>
        </div>
    }
}

#[component]
pub fn PredictPage() -> impl IntoView {
    let auth = use_auth();
    let toast = use_toast();

    let chat = RwSignal::new(ChatSession::new(Utc::now()));
    let (input, set_input) = signal(String::new());

    // 对话状态不能跨 await 借用：先记录提问，回复到达后再写回
    let send = move |text: String| {
        let Some(text) = chat.try_update(|c| c.push_user(&text, Utc::now())).flatten() else {
            return;
        };
        set_input.set(String::new());
        let api = auth.client().api.clone();
        spawn_local(async move {
            let reply = predict::respond(&*api, &text).await;
            if let Some(notice) = chat.try_update(|c| c.push_reply(reply, Utc::now())) {
                toast.show(notice);
            }
        });
    };

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        send(input.get_untracked());
    };

    let suggestions = predict::SUGGESTIONS
        .into_iter()
        .map(|suggestion| {
            view! {
                <button
                    class="btn btn-sm btn-outline"
                    on:click=move |_| {
                        let text = chat.try_update(|c| c.pick_suggestion(&suggestion)).unwrap_or_default();
                        set_input.set(text);
                    }
                >
                    {suggestion.text}
                </button>
            }
        })
        .collect_view();

    view! {
        <div class="max-w-4xl mx-auto p-4 md:p-8 grid grid-cols-1 md:grid-cols-3 gap-6">
            <div class="md:col-span-2 card bg-base-100 shadow-xl">
                <div class="card-body">
                    <h1 class="card-title">"AI Travel Assistant"</h1>
                    <div class="h-96 overflow-y-auto space-y-2">
                        {move || chat.get().messages.into_iter().map(bubble).collect_view()}
                        <Show when=move || chat.with(|c| c.is_pending())>
                            <div class="chat chat-start">
                                <div class="chat-bubble"><span class="loading loading-dots"></span></div>
                            </div>
                        </Show>
                    </div>
                    <form class="join w-full" on:submit=on_submit>
                        <input
                            type="text"
                            placeholder="Ask me anything about travel..."
                            class="input input-bordered join-item w-full"
                            prop:value=input
                            on:input=move |ev| set_input.set(event_target_value(&ev))
                        />
                        <button type="submit" class="btn btn-primary join-item" disabled=move || chat.with(|c| c.is_pending())>
                            "Send"
                        </button>
                    </form>
                </div>
            </div>
            <div class="space-y-6">
                <div class="card bg-base-100 shadow">
                    <div class="card-body">
                        <h2 class="card-title text-base">"Try asking"</h2>
                        <div class="flex flex-col gap-2">{suggestions}</div>
                    </div>
                </div>
                <div class="card bg-base-100 shadow">
                    <div class="card-body">
                        <h2 class="card-title text-base">"Detected Entities"</h2>
                        <div class="flex flex-wrap gap-2">
                            {move || {
                                chat.get()
                                    .detected_entities
                                    .into_iter()
                                    .map(|e| view! { <span class="badge badge-secondary">{e}</span> })
                                    .collect_view()
                            }}
                        </div>
                    </div>
                </div>
            </div>
        </div>
    }
}
