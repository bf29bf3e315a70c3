use crate::auth::use_auth;
use crate::components::toast::use_toast;
use leptos::prelude::*;
use leptos::task::spawn_local;
use travella::views::videos::{self, DEFAULT_PLACE, FILTERS};
use travella_shared::Video;

fn video_card(video: Video) -> impl IntoView {
    let href = if video.url.is_empty() { None } else { Some(video.url.clone()) };
    view! {
        <div class="card bg-base-100 shadow-xl">
            <figure class="relative">
                <img src=video.thumbnail alt=video.title.clone() class="h-48 w-full object-cover" />
                <span class="badge badge-neutral absolute bottom-2 right-2">{video.duration}</span>
            </figure>
            <div class="card-body p-4">
                <a class="card-title text-base link-hover" href=href target="_blank">{video.title}</a>
                <p class="text-sm text-base-content/70">{video.creator} " · " {video.location}</p>
                <div class="flex gap-2 text-xs">
                    <span class="badge badge-ghost">{video.platform}</span>
                    <span>{video.views} " views"</span>
                    <span>{video.likes} " likes"</span>
                </div>
            </div>
        </div>
    }
}

#[component]
pub fn VideosPage() -> impl IntoView {
    let auth = use_auth();
    let toast = use_toast();

    let list = RwSignal::new(Vec::<Video>::new());
    let place = RwSignal::new(DEFAULT_PLACE.to_string());
    let category = RwSignal::new("all".to_string());
    let (query, set_query) = signal(String::new());
    let (is_loading, set_is_loading) = signal(true);

    // 初始加载
    {
        let api = auth.client().api.clone();
        spawn_local(async move {
            let loaded = videos::load(&*api, DEFAULT_PLACE).await;
            if loaded.is_fallback() {
                toast.show(loaded.notice);
            }
            list.set(loaded.data);
            set_is_loading.set(false);
        });
    }

    let on_search = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let text = query.get_untracked();
        let api = auth.client().api.clone();
        set_is_loading.set(true);
        spawn_local(async move {
            match videos::search(&*api, &text).await {
                Ok(Some(found)) => {
                    place.set(found.place);
                    list.set(found.videos);
                }
                Ok(None) => {}
                Err(notice) => toast.show(notice),
            }
            set_is_loading.set(false);
        });
    };

    let filters = FILTERS
        .into_iter()
        .map(|(value, label)| {
            let class = move || {
                if category.with(|c| c == value) {
                    "btn btn-sm btn-primary"
                } else {
                    "btn btn-sm btn-ghost"
                }
            };
            view! {
                <button class=class on:click=move |_| category.set(value.to_string())>
                    {label}
                </button>
            }
        })
        .collect_view();

    let visible = move || {
        list.with(|all| {
            category.with(|c| {
                videos::filter(all, c, &query.get())
                    .into_iter()
                    .cloned()
                    .map(video_card)
                    .collect_view()
            })
        })
    };

    view! {
        <div class="max-w-6xl mx-auto p-4 md:p-8 space-y-6">
            <div class="flex flex-col md:flex-row md:items-end justify-between gap-4">
                <div>
                    <h1 class="text-3xl font-bold">"Travel Videos"</h1>
                    <p class="text-base-content/70">"Showing videos for " {move || place.get()}</p>
                </div>
                <form class="join" on:submit=on_search>
                    <input
                        type="text"
                        placeholder="Search destination..."
                        class="input input-bordered join-item"
                        prop:value=query
                        on:input=move |ev| set_query.set(event_target_value(&ev))
                    />
                    <button type="submit" class="btn btn-primary join-item">"Search"</button>
                </form>
            </div>
            <div class="flex flex-wrap gap-2">{filters}</div>
            <Show
                when=move || !is_loading.get()
                fallback=|| view! { <div class="flex justify-center py-12"><span class="loading loading-spinner loading-lg"></span></div> }
            >
                <div class="grid grid-cols-1 md:grid-cols-3 gap-6">{visible}</div>
            </Show>
        </div>
    }
}
