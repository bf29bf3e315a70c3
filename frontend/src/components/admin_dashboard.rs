use crate::app::use_nav;
use crate::auth::use_admin;
use crate::components::toast::use_toast;
use crate::web::BrowserSleeper;
use chrono::{DateTime, Utc};
use leptos::prelude::*;
use leptos::task::spawn_local;
use std::ops::ControlFlow;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use travella::{SessionError, Sleeper, poll_dashboard};
use travella_shared::DashboardStats;

fn health_class(status: &str) -> &'static str {
    match status {
        "healthy" | "online" | "ok" => "badge badge-success",
        "" => "badge badge-ghost",
        _ => "badge badge-warning",
    }
}

#[component]
pub fn AdminDashboardPage() -> impl IntoView {
    let admin = use_admin();
    let nav = use_nav();
    let toast = use_toast();

    let stats = RwSignal::new(Option::<DashboardStats>::None);
    let updated = RwSignal::new(Option::<DateTime<Utc>>::None);
    let (is_refreshing, set_is_refreshing) = signal(false);

    // 组件卸载后不再发起新的拉取
    let alive = Arc::new(AtomicBool::new(true));
    on_cleanup({
        let alive = alive.clone();
        move || alive.store(false, Ordering::Relaxed)
    });

    let apply = move |result: Result<DashboardStats, SessionError>| match result {
        Ok(s) => {
            stats.set(Some(s));
            updated.set(Some(Utc::now()));
        }
        Err(SessionError::Unauthenticated) => {
            admin.sync();
            toast.error("Session expired. Please sign in again.");
        }
        Err(SessionError::Superseded) => {}
        Err(e) => {
            log::warn!("dashboard refresh failed: {}", e);
            toast.error("Failed to load dashboard data");
        }
    };

    // 打开时并发校验身份和拉取统计，之后按间隔轮询
    {
        let client = admin.client();
        spawn_local(async move {
            let opened = client.admin.open_dashboard().await;
            if !alive.load(Ordering::Relaxed) {
                return;
            }
            match opened {
                Ok(open) => {
                    admin.sync();
                    apply(open.stats);
                }
                Err(e) => {
                    apply(Err(e));
                    return;
                }
            }

            let interval = client.config.dashboard_refresh;
            BrowserSleeper.sleep(interval).await;
            let is_alive = || alive.load(Ordering::Relaxed);
            let exit = poll_dashboard(&client.admin, &BrowserSleeper, interval, is_alive, |result| {
                // 卸载时可能仍有一次拉取在途
                if !is_alive() {
                    return ControlFlow::Break(());
                }
                apply(result);
                ControlFlow::Continue(())
            })
            .await;
            log::info!("dashboard polling stopped: {:?}", exit);
        });
    }

    let on_refresh = move |_| {
        let client = admin.client();
        set_is_refreshing.set(true);
        spawn_local(async move {
            apply(client.admin.dashboard_stats().await);
            set_is_refreshing.set(false);
        });
    };

    let on_logout = move |_| {
        nav.leave_admin();
        spawn_local(async move { admin.logout().await });
    };

    let tiles = move || {
        stats.get().map(|s| {
            [
                ("Total Searches", s.total_searches),
                ("Plans Generated", s.total_plans),
                ("Videos Watched", s.total_videos),
                ("Bookings", s.total_bookings),
            ]
            .into_iter()
            .map(|(title, value)| {
                view! {
                    <div class="stat">
                        <div class="stat-title">{title}</div>
                        <div class="stat-value text-primary">{value}</div>
                    </div>
                }
            })
            .collect_view()
        })
    };

    let destinations = move || {
        stats.with(|s| s.as_ref().map(|s| s.popular_destinations.clone()).unwrap_or_default())
            .into_iter()
            .map(|d| {
                view! {
                    <tr>
                        <td>{d.name}</td>
                        <td>{d.searches}</td>
                        <td>{d.trend}</td>
                    </tr>
                }
            })
            .collect_view()
    };

    let activity = move || {
        stats.with(|s| s.as_ref().map(|s| s.recent_activity.clone()).unwrap_or_default())
            .into_iter()
            .map(|a| {
                view! {
                    <li class="py-2 text-sm">
                        <span class="badge badge-ghost mr-2">{a.action}</span>
                        {a.details}
                        <span class="text-xs text-base-content/50 ml-2">
                            {a.user.unwrap_or_default()} " " {a.timestamp}
                        </span>
                    </li>
                }
            })
            .collect_view()
    };

    let health = move || {
        stats.with(|s| {
            s.as_ref()
                .map(|s| {
                    s.system_health
                        .components()
                        .into_iter()
                        .map(|(name, status)| {
                            let status = status.to_string();
                            view! {
                                <div class="flex justify-between py-1">
                                    <span>{name}</span>
                                    <span class=health_class(&status)>{status.clone()}</span>
                                </div>
                            }
                        })
                        .collect::<Vec<_>>()
                })
                .unwrap_or_default()
        })
    };

    view! {
        <div class="min-h-screen bg-base-200 p-4 md:p-8 font-sans">
            <div class="max-w-7xl mx-auto space-y-8">
                <div class="navbar bg-base-100 rounded-box shadow-xl">
                    <div class="flex-1 gap-2">
                        <a class="btn btn-ghost text-xl">"Travella Admin"</a>
                        <span class="badge badge-neutral hidden md:inline-flex">
                            {move || admin.state.with(|s| s.username.clone().unwrap_or_default())}
                        </span>
                    </div>
                    <div class="flex-none gap-2">
                        <span class="text-xs text-base-content/50 hidden md:inline">
                            {move || updated.get().map(|t| format!("Last updated {}", t.format("%H:%M:%S"))).unwrap_or_default()}
                        </span>
                        <button on:click=on_refresh disabled=move || is_refreshing.get() class="btn btn-ghost">
                            "Refresh"
                        </button>
                        <button on:click=on_logout class="btn btn-outline btn-error">
                            "Logout"
                        </button>
                    </div>
                </div>

                <Show
                    when=move || stats.with(Option::is_some)
                    fallback=|| view! { <div class="flex justify-center py-12"><span class="loading loading-spinner loading-lg"></span></div> }
                >
                    <div class="stats shadow w-full stats-vertical md:stats-horizontal bg-base-100">{tiles}</div>

                    <div class="grid grid-cols-1 md:grid-cols-3 gap-6">
                        <div class="card bg-base-100 shadow-xl md:col-span-2">
                            <div class="card-body">
                                <h3 class="card-title">"Popular Destinations"</h3>
                                <table class="table table-zebra w-full">
                                    <thead>
                                        <tr>
                                            <th>"Destination"</th>
                                            <th>"Searches"</th>
                                            <th>"Trend"</th>
                                        </tr>
                                    </thead>
                                    <tbody>{destinations}</tbody>
                                </table>
                            </div>
                        </div>
                        <div class="card bg-base-100 shadow-xl">
                            <div class="card-body">
                                <h3 class="card-title">"System Health"</h3>
                                {health}
                            </div>
                        </div>
                    </div>

                    <div class="card bg-base-100 shadow-xl">
                        <div class="card-body">
                            <h3 class="card-title">"Recent Activity"</h3>
                            <ul class="divide-y">{activity}</ul>
                        </div>
                    </div>
                </Show>
            </div>
        </div>
    }
}
