use crate::auth::use_auth;
use crate::components::toast::use_toast;
use chrono::Utc;
use leptos::prelude::*;
use leptos::task::spawn_local;
use travella::views::booking::{self, Bookable, BookingForm, BookingTab, Offers};
use travella_shared::{BookingRecord, FlightOffer, HotelOffer};

#[component]
pub fn BookingPage() -> impl IntoView {
    let auth = use_auth();
    let toast = use_toast();

    let tab = RwSignal::new(BookingTab::Flights);
    let form = RwSignal::new(BookingForm::default());
    let offers = RwSignal::new(booking::sample_offers(BookingTab::Flights));
    let bookings = RwSignal::new(Vec::<BookingRecord>::new());
    let (is_searching, set_is_searching) = signal(false);

    let load_bookings = move || {
        let client = auth.client();
        spawn_local(async move {
            bookings.set(booking::my_bookings(&client.user).await);
        });
    };

    // 初始加载
    load_bookings();

    let switch_tab = move |next: BookingTab| {
        tab.set(next);
        offers.set(booking::sample_offers(next));
    };

    let on_search = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let (current, selected) = (form.get_untracked(), tab.get_untracked());
        let client = auth.client();
        set_is_searching.set(true);
        spawn_local(async move {
            match booking::search(&*client.api, &current, selected).await {
                Ok(loaded) => {
                    toast.show(loaded.notice);
                    if tab.get_untracked() == selected {
                        offers.set(loaded.data);
                    }
                }
                Err(notice) => toast.show(notice),
            }
            set_is_searching.set(false);
        });
    };

    let on_book = move |item: Bookable| {
        let current = form.get_untracked();
        let client = auth.client();
        spawn_local(async move {
            let today = Utc::now().date_naive();
            match booking::book(&client.user, item, &current, today).await {
                Ok((record, notice)) => {
                    toast.show(notice);
                    bookings.update(|list| list.insert(0, record));
                }
                Err(notice) => toast.show(notice),
            }
        });
    };

    let flight_row = move |f: FlightOffer| {
        let item = Bookable::from(&f);
        view! {
            <div class="card bg-base-100 shadow">
                <div class="card-body flex-row items-center justify-between">
                    <div>
                        <div class="font-semibold">{f.logo} " " {f.airline}</div>
                        <div class="text-sm text-base-content/70">
                            {f.route} " · " {f.departure} " → " {f.arrival} " · " {f.duration} " · " {f.stops}
                        </div>
                        <div class="text-xs text-base-content/50">{f.cabin} " · via " {f.partner}</div>
                    </div>
                    <div class="text-right">
                        <div class="text-2xl font-bold">{format!("${:.0}", f.price)}</div>
                        <button class="btn btn-primary btn-sm" on:click=move |_| on_book(item)>"Book"</button>
                    </div>
                </div>
            </div>
        }
    };

    let hotel_row = move |h: HotelOffer| {
        let item = Bookable::from(&h);
        let was = h.original_price.map(|p| format!("${:.0}", p)).unwrap_or_default();
        view! {
            <div class="card bg-base-100 shadow">
                <div class="card-body flex-row items-center justify-between">
                    <div>
                        <div class="font-semibold">{h.name} " " <span class="badge badge-accent">{h.deal.unwrap_or_default()}</span></div>
                        <div class="text-sm text-base-content/70">
                            {h.location} " · ★ " {format!("{:.1}", h.rating)} " (" {h.reviews} " reviews)"
                        </div>
                        <div class="text-xs text-base-content/50">{h.amenities.join(", ")} " · via " {h.partner}</div>
                    </div>
                    <div class="text-right">
                        <div class="line-through text-sm text-base-content/50">{was}</div>
                        <div class="text-2xl font-bold">{format!("${:.0}", h.price)}</div>
                        <button class="btn btn-primary btn-sm" on:click=move |_| on_book(item)>"Book"</button>
                    </div>
                </div>
            </div>
        }
    };

    let results = move || match offers.get() {
        Offers::Flights(list) => list.into_iter().map(flight_row).collect_view().into_any(),
        Offers::Hotels(list) => list.into_iter().map(hotel_row).collect_view().into_any(),
    };

    let tab_class = move |t: BookingTab| if tab.get() == t { "tab tab-active" } else { "tab" };

    view! {
        <div class="max-w-5xl mx-auto p-4 md:p-8 space-y-6">
            <h1 class="text-3xl font-bold">"Book Your Trip"</h1>
            <div role="tablist" class="tabs tabs-boxed w-fit">
                <a role="tab" class=move || tab_class(BookingTab::Flights) on:click=move |_| switch_tab(BookingTab::Flights)>"Flights"</a>
                <a role="tab" class=move || tab_class(BookingTab::Hotels) on:click=move |_| switch_tab(BookingTab::Hotels)>"Hotels"</a>
            </div>
            <form class="card bg-base-100 shadow-xl" on:submit=on_search>
                <div class="card-body grid grid-cols-1 md:grid-cols-5 gap-4">
                    <input
                        type="text"
                        placeholder="From"
                        class="input input-bordered"
                        prop:value=move || form.with(|f| f.from.clone())
                        on:input=move |ev| form.update(|f| f.from = event_target_value(&ev))
                    />
                    <input
                        type="text"
                        placeholder="To"
                        class="input input-bordered"
                        prop:value=move || form.with(|f| f.to.clone())
                        on:input=move |ev| form.update(|f| f.to = event_target_value(&ev))
                    />
                    <input
                        type="date"
                        class="input input-bordered"
                        prop:value=move || form.with(|f| f.date.clone())
                        on:input=move |ev| form.update(|f| f.date = event_target_value(&ev))
                    />
                    <input
                        type="number"
                        min="1"
                        class="input input-bordered"
                        prop:value=move || form.with(|f| f.travelers.to_string())
                        on:input=move |ev| {
                            let value = event_target_value(&ev);
                            form.update(|f| f.travelers = value.trim().parse().unwrap_or(f.travelers));
                        }
                    />
                    <button type="submit" class="btn btn-primary" disabled=move || is_searching.get()>
                        {move || if is_searching.get() { "Searching..." } else { "Search" }}
                    </button>
                </div>
            </form>
            <div class="space-y-4">{results}</div>
            <Show when=move || bookings.with(|b| !b.is_empty())>
                <h2 class="text-2xl font-semibold">"My Bookings"</h2>
                <ul class="menu bg-base-100 rounded-box shadow">
                    {move || {
                        bookings
                            .get()
                            .into_iter()
                            .map(|b| {
                                view! {
                                    <li>
                                        <span>
                                            "#" {b.id.to_string()} " · " {b.destination} " · "
                                            {b.check_in.unwrap_or_default()} " · "
                                            {b.status.unwrap_or_else(|| "pending".to_string())}
                                        </span>
                                    </li>
                                }
                            })
                            .collect_view()
                    }}
                </ul>
            </Show>
        </div>
    }
}
