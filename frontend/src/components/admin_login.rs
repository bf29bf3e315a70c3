use crate::app::use_nav;
use crate::auth::use_admin;
use crate::components::toast::use_toast;
use leptos::prelude::*;
use leptos::task::spawn_local;
use travella::SessionError;

#[component]
pub fn AdminLoginPage() -> impl IntoView {
    let admin = use_admin();
    let nav = use_nav();
    let toast = use_toast();

    let (username, set_username) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (is_submitting, set_is_submitting) = signal(false);
    let (error_msg, set_error_msg) = signal(Option::<String>::None);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let (user, pass) = (username.get_untracked().trim().to_string(), password.get_untracked());
        if user.is_empty() || pass.is_empty() {
            set_error_msg.set(Some("Please fill in all fields".to_string()));
            return;
        }

        set_is_submitting.set(true);
        set_error_msg.set(None);

        spawn_local(async move {
            match admin.login(user, pass).await {
                Ok(()) => toast.success("Admin login successful"),
                Err(SessionError::Rejected { .. }) => {
                    set_error_msg.set(Some("Invalid admin credentials".to_string()))
                }
                Err(e) => {
                    log::warn!("admin login failed: {}", e);
                    set_error_msg.set(Some("Connection failed. Please try again.".to_string()))
                }
            }
            set_is_submitting.set(false);
        });
    };

    view! {
        <div class="hero min-h-screen bg-base-200">
            <div class="hero-content flex-col w-full max-w-md">
                <div class="text-center mb-4">
                    <h1 class="text-3xl font-bold">"Travella Admin"</h1>
                    <p class="text-base-content/70">"Sign in to view the dashboard"</p>
                </div>

                <div class="card shrink-0 w-full shadow-2xl bg-base-100">
                    <form class="card-body" on:submit=on_submit>
                        <Show when=move || error_msg.get().is_some()>
                            <div role="alert" class="alert alert-error text-sm py-2">
                                <span>{move || error_msg.get().unwrap_or_default()}</span>
                            </div>
                        </Show>

                        <div class="form-control">
                            <label class="label" for="admin-username">
                                <span class="label-text">"Username"</span>
                            </label>
                            <input
                                id="admin-username"
                                type="text"
                                on:input=move |ev| set_username.set(event_target_value(&ev))
                                prop:value=username
                                class="input input-bordered"
                                required
                            />
                        </div>
                        <div class="form-control">
                            <label class="label" for="admin-password">
                                <span class="label-text">"Password"</span>
                            </label>
                            <input
                                id="admin-password"
                                type="password"
                                placeholder="••••••••"
                                on:input=move |ev| set_password.set(event_target_value(&ev))
                                prop:value=password
                                class="input input-bordered"
                                required
                            />
                        </div>
                        <div class="form-control mt-6 gap-2">
                            <button class="btn btn-primary" disabled=move || is_submitting.get()>
                                {move || if is_submitting.get() {
                                    view! { <span class="loading loading-spinner"></span> "Signing in..." }.into_any()
                                } else {
                                    "Sign In".into_any()
                                }}
                            </button>
                            <button type="button" class="btn btn-ghost" on:click=move |_| nav.leave_admin()>
                                "Back to Travella"
                            </button>
                        </div>
                    </form>
                </div>
            </div>
        </div>
    }
}
