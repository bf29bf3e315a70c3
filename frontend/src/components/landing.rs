use crate::app::use_nav;
use crate::auth::use_auth;
use crate::components::toast::use_toast;
use leptos::prelude::*;
use leptos::task::spawn_local;
use travella::Screen;
use travella::views::landing;

const FEATURES: [(Screen, &str, &str); 4] = [
    (Screen::Planner, "Smart Itineraries", "Day-by-day plans tuned to your travel style"),
    (Screen::Predict, "AI Travel Chat", "Ask anything about destinations and budgets"),
    (Screen::Videos, "Travel Videos", "Short clips from creators on the ground"),
    (Screen::Booking, "Flights & Hotels", "Compare offers and book in one place"),
];

#[component]
pub fn LandingPage() -> impl IntoView {
    let auth = use_auth();
    let nav = use_nav();
    let toast = use_toast();

    let (query, set_query) = signal(String::new());
    let (is_searching, set_is_searching) = signal(false);

    let run_search = move |text: String| {
        set_is_searching.set(true);
        let api = auth.client().api.clone();
        spawn_local(async move {
            match landing::search(&*api, &text).await {
                Ok(result) => {
                    if let Some(notice) = result.notice {
                        toast.show(notice);
                    }
                    nav.go(result.next);
                }
                Err(notice) => toast.show(notice),
            }
            set_is_searching.set(false);
        });
    };

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        run_search(query.get_untracked());
    };

    let suggestions = move || {
        landing::suggestions(&query.get())
            .into_iter()
            .map(|text| {
                let picked = text.clone();
                view! {
                    <li>
                        <a on:click=move |_| {
                            set_query.set(picked.clone());
                            run_search(picked.clone());
                        }>{text}</a>
                    </li>
                }
            })
            .collect_view()
    };

    let features = FEATURES
        .into_iter()
        .map(|(screen, title, blurb)| {
            view! {
                <div class="card bg-base-100 shadow-xl cursor-pointer hover:shadow-2xl" on:click=move |_| nav.go(screen)>
                    <div class="card-body">
                        <h3 class="card-title">{title}</h3>
                        <p class="text-base-content/70">{blurb}</p>
                    </div>
                </div>
            }
        })
        .collect_view();

    view! {
        <div class="max-w-5xl mx-auto p-4 md:p-8 space-y-10">
            <div class="hero py-12">
                <div class="hero-content text-center flex-col">
                    <h1 class="text-5xl font-bold">"Your AI Travel Companion"</h1>
                    <p class="text-base-content/70 text-lg">
                        "Plan trips, chat with AI, watch travel videos and book, all in one place."
                    </p>
                    <form class="w-full max-w-xl relative" on:submit=on_submit>
                        <div class="join w-full">
                            <input
                                type="text"
                                placeholder="Where do you want to go?"
                                class="input input-bordered join-item w-full"
                                prop:value=query
                                on:input=move |ev| set_query.set(event_target_value(&ev))
                            />
                            <button type="submit" class="btn btn-primary join-item" disabled=move || is_searching.get()>
                                {move || if is_searching.get() {
                                    view! { <span class="loading loading-spinner"></span> }.into_any()
                                } else {
                                    "Search".into_any()
                                }}
                            </button>
                        </div>
                        <ul class="menu bg-base-100 rounded-box shadow mt-2 text-left">
                            {suggestions}
                        </ul>
                    </form>
                </div>
            </div>
            <div class="grid grid-cols-1 md:grid-cols-2 gap-6">{features}</div>
        </div>
    }
}
