use crate::auth::use_auth;
use crate::components::toast::use_toast;
use leptos::prelude::*;
use leptos::task::spawn_local;
use travella::views::planner::{self, PlanForm};
use travella_shared::{PlanDay, PlanResponse};

const STYLES: [(&str, &str); 3] = [
    ("budget", "Budget"),
    ("balanced", "Balanced"),
    ("luxury", "Luxury"),
];

fn day_card(day: PlanDay) -> impl IntoView {
    let activities = day
        .activities
        .into_iter()
        .map(|a| {
            view! {
                <li class="flex gap-4 py-2">
                    <span class="badge badge-outline w-24 shrink-0">{a.time}</span>
                    <div class="flex-1">
                        <div class="font-semibold">{a.title} " " <span class="badge badge-ghost">{a.kind}</span></div>
                        <p class="text-sm text-base-content/70">{a.description}</p>
                        <p class="text-xs text-base-content/50">
                            {a.duration} " · " {a.cost} " · ★ " {format!("{:.1}", a.rating)}
                        </p>
                    </div>
                </li>
            }
        })
        .collect_view();

    view! {
        <div class="card bg-base-100 shadow">
            <div class="card-body">
                <h3 class="card-title">"Day " {day.day} ": " {day.title}</h3>
                <ul class="divide-y">{activities}</ul>
            </div>
        </div>
    }
}

#[component]
pub fn PlannerPage() -> impl IntoView {
    let auth = use_auth();
    let toast = use_toast();

    let form = RwSignal::new(PlanForm::default());
    let plan = RwSignal::new(PlanResponse {
        title: "Sample Pokhara Itinerary".to_string(),
        days: planner::default_itinerary(),
    });
    let (is_generating, set_is_generating) = signal(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let current = form.get_untracked();
        let api = auth.client().api.clone();
        set_is_generating.set(true);
        spawn_local(async move {
            match planner::generate(&*api, &current).await {
                Ok(loaded) => {
                    toast.show(loaded.notice);
                    plan.set(loaded.data);
                }
                Err(notice) => toast.show(notice),
            }
            set_is_generating.set(false);
        });
    };

    let parse = |value: String, fallback: u32| value.trim().parse::<u32>().unwrap_or(fallback);

    let styles = STYLES
        .into_iter()
        .map(|(value, label)| {
            view! {
                <option value=value selected=move || form.with(|f| f.travel_style == value)>
                    {label}
                </option>
            }
        })
        .collect_view();

    view! {
        <div class="max-w-5xl mx-auto p-4 md:p-8 space-y-6">
            <h1 class="text-3xl font-bold">"AI Trip Planner"</h1>
            <form class="card bg-base-100 shadow-xl" on:submit=on_submit>
                <div class="card-body grid grid-cols-1 md:grid-cols-4 gap-4">
                    <input
                        type="text"
                        placeholder="Destination"
                        class="input input-bordered"
                        prop:value=move || form.with(|f| f.destination.clone())
                        on:input=move |ev| form.update(|f| f.destination = event_target_value(&ev))
                    />
                    <input
                        type="number"
                        min="1"
                        class="input input-bordered"
                        prop:value=move || form.with(|f| f.days.to_string())
                        on:input=move |ev| {
                            let value = event_target_value(&ev);
                            form.update(|f| f.days = parse(value, f.days));
                        }
                    />
                    <input
                        type="number"
                        min="1"
                        class="input input-bordered"
                        prop:value=move || form.with(|f| f.travelers.to_string())
                        on:input=move |ev| {
                            let value = event_target_value(&ev);
                            form.update(|f| f.travelers = parse(value, f.travelers));
                        }
                    />
                    <select
                        class="select select-bordered"
                        on:change=move |ev| form.update(|f| f.travel_style = event_target_value(&ev))
                    >
                        {styles}
                    </select>
                    <button type="submit" class="btn btn-primary md:col-span-4" disabled=move || is_generating.get()>
                        {move || if is_generating.get() { "Generating..." } else { "Generate Itinerary" }}
                    </button>
                </div>
            </form>
            <h2 class="text-2xl font-semibold">{move || plan.with(|p| p.title.clone())}</h2>
            <div class="space-y-4">
                {move || plan.get().days.into_iter().map(day_card).collect_view()}
            </div>
        </div>
    }
}
