use crate::app::use_nav;
use crate::auth::use_auth;
use leptos::prelude::*;
use leptos::task::spawn_local;
use travella::Screen;

#[component]
pub fn NavigationBar() -> impl IntoView {
    let auth = use_auth();
    let nav = use_nav();
    let current = nav.current_signal();
    let is_authenticated = auth.is_authenticated_signal();

    let username = move || {
        auth.state
            .with(|s| s.username().map(str::to_string))
            .unwrap_or_default()
    };
    let is_admin = move || {
        auth.state
            .with(|s| s.user.as_ref().is_some_and(|u| u.role == "admin"))
    };

    let on_logout = move |_| {
        spawn_local(async move { auth.logout().await });
    };

    let items = Screen::ALL
        .into_iter()
        .map(|screen| {
            let class = move || {
                if current.get() == screen {
                    "btn btn-sm btn-primary"
                } else {
                    "btn btn-sm btn-ghost"
                }
            };
            view! {
                <button class=class on:click=move |_| nav.go(screen)>
                    {screen.label()}
                </button>
            }
        })
        .collect_view();

    view! {
        <nav class="navbar fixed top-0 left-0 right-0 z-50 bg-base-100/80 backdrop-blur-sm shadow">
            <div class="flex-1 gap-2">
                <button class="btn btn-ghost text-xl font-bold" on:click=move |_| nav.go(Screen::Home)>
                    "Travella AI"
                </button>
            </div>
            <div class="flex-none gap-1 flex-wrap">
                {items}
                <Show
                    when=move || is_authenticated.get()
                    fallback=move || view! {
                        <button class="btn btn-sm btn-outline" on:click=move |_| nav.sign_in_open.set(true)>
                            "Sign In"
                        </button>
                    }
                >
                    <span class="text-sm text-base-content/70 hidden lg:inline">
                        "Welcome, " {username}
                    </span>
                    <button class="btn btn-sm btn-outline" on:click=on_logout>
                        "Logout"
                    </button>
                </Show>
                <Show when=is_admin>
                    <button class="btn btn-sm btn-outline btn-warning" on:click=move |_| nav.enter_admin()>
                        "Admin"
                    </button>
                </Show>
            </div>
        </nav>
    }
}
