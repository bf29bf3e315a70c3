use crate::auth::use_auth;
use crate::components::toast::use_toast;
use leptos::prelude::*;
use leptos::task::spawn_local;
use travella::views::profile::{self, INTERESTS};
use travella_shared::{ActivityStats, UserProfile};

#[component]
pub fn ProfilePage() -> impl IntoView {
    let auth = use_auth();
    let toast = use_toast();

    let draft = RwSignal::new(profile::draft(
        auth.state.with_untracked(|s| s.user.as_ref().map(|u| u.profile.clone())).as_ref(),
    ));
    let stats = RwSignal::new(Option::<ActivityStats>::None);
    let (is_saving, set_is_saving) = signal(false);

    // 初始加载
    {
        let client = auth.client();
        spawn_local(async move {
            match profile::load_stats(&client.user).await {
                Ok(loaded) => stats.set(Some(loaded.data)),
                Err(notice) => toast.show(notice),
            }
        });
    }

    let on_save = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let edited = draft.get_untracked();
        set_is_saving.set(true);
        spawn_local(async move {
            let result = profile::save(&auth.client().user, &edited).await;
            auth.sync();
            match result {
                Ok(notice) => {
                    toast.show(notice);
                    let saved = auth.state.with_untracked(|s| s.user.as_ref().map(|u| u.profile.clone()));
                    draft.set(profile::draft(saved.as_ref()));
                }
                Err(notice) => toast.show(notice),
            }
            set_is_saving.set(false);
        });
    };

    let text_field = move |label: &'static str, get: fn(&UserProfile) -> String, set: fn(&mut UserProfile, String)| {
        view! {
            <label class="form-control">
                <span class="label-text">{label}</span>
                <input
                    type="text"
                    class="input input-bordered"
                    prop:value=move || draft.with(get)
                    on:input=move |ev| {
                        let value = event_target_value(&ev);
                        draft.update(|d| set(d, value));
                    }
                />
            </label>
        }
    };

    let interests = INTERESTS
        .into_iter()
        .map(|interest| {
            let class = move || {
                if draft.with(|d| d.preferences.interests.iter().any(|i| i == interest)) {
                    "badge badge-primary cursor-pointer"
                } else {
                    "badge badge-outline cursor-pointer"
                }
            };
            view! {
                <span class=class on:click=move |_| draft.update(|d| profile::toggle_interest(&mut d.preferences, interest))>
                    {interest}
                </span>
            }
        })
        .collect_view();

    let stat_tiles = move || {
        stats.get().map(|s| {
            let tiles = [
                ("Searches", s.total_searches),
                ("Plans", s.total_plans),
                ("Videos", s.total_videos),
                ("Bookings", s.total_bookings),
            ];
            let recent = s
                .recent_activities
                .into_iter()
                .map(|a| {
                    view! {
                        <li class="py-2">
                            <span class="font-medium">{a.details}</span>
                            <span class="text-xs text-base-content/50 ml-2">{a.timestamp}</span>
                        </li>
                    }
                })
                .collect_view();
            view! {
                <div class="stats shadow w-full stats-vertical md:stats-horizontal bg-base-100">
                    {tiles
                        .into_iter()
                        .map(|(title, value)| view! {
                            <div class="stat">
                                <div class="stat-title">{title}</div>
                                <div class="stat-value text-primary">{value}</div>
                            </div>
                        })
                        .collect_view()}
                </div>
                <div class="card bg-base-100 shadow">
                    <div class="card-body">
                        <h2 class="card-title">"Recent Activity"</h2>
                        <ul class="divide-y">{recent}</ul>
                    </div>
                </div>
            }
        })
    };

    view! {
        <div class="max-w-5xl mx-auto p-4 md:p-8 space-y-6">
            <div>
                <h1 class="text-3xl font-bold">
                    {move || auth.state.with(|s| {
                        s.user
                            .as_ref()
                            .map(|u| u.profile.display_name().unwrap_or_else(|| u.username.clone()))
                            .unwrap_or_default()
                    })}
                </h1>
                <p class="text-base-content/70">
                    {move || auth.state.with(|s| s.user.as_ref().map(|u| u.email.clone()).unwrap_or_default())}
                </p>
            </div>
            {stat_tiles}
            <form class="card bg-base-100 shadow-xl" on:submit=on_save>
                <div class="card-body grid grid-cols-1 md:grid-cols-3 gap-4">
                    {text_field("First name", |p| p.first_name.clone(), |p, v| p.first_name = v)}
                    {text_field("Last name", |p| p.last_name.clone(), |p, v| p.last_name = v)}
                    {text_field("Phone", |p| p.phone.clone(), |p, v| p.phone = v)}
                    <label class="form-control">
                        <span class="label-text">"Travel style"</span>
                        <select
                            class="select select-bordered"
                            prop:value=move || draft.with(|d| d.preferences.travel_style.clone())
                            on:change=move |ev| {
                                let value = event_target_value(&ev);
                                draft.update(|d| d.preferences.travel_style = value);
                            }
                        >
                            <option value="budget">"Budget"</option>
                            <option value="balanced">"Balanced"</option>
                            <option value="luxury">"Luxury"</option>
                        </select>
                    </label>
                    <label class="form-control">
                        <span class="label-text">"Budget range"</span>
                        <select
                            class="select select-bordered"
                            prop:value=move || draft.with(|d| d.preferences.budget_range.clone())
                            on:change=move |ev| {
                                let value = event_target_value(&ev);
                                draft.update(|d| d.preferences.budget_range = value);
                            }
                        >
                            <option value="low">"Low"</option>
                            <option value="medium">"Medium"</option>
                            <option value="high">"High"</option>
                        </select>
                    </label>
                    <div class="md:col-span-3 flex flex-wrap gap-2">{interests}</div>
                    <button type="submit" class="btn btn-primary md:col-span-3" disabled=move || is_saving.get()>
                        {move || if is_saving.get() { "Saving..." } else { "Save Profile" }}
                    </button>
                </div>
            </form>
        </div>
    }
}
