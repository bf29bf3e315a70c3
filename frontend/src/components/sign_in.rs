use crate::app::use_nav;
use crate::auth::use_auth;
use crate::components::toast::use_toast;
use leptos::prelude::*;
use leptos::task::spawn_local;
use travella::SessionError;

fn failure_message(err: &SessionError, registering: bool) -> &'static str {
    match (err, registering) {
        (SessionError::Rejected { .. }, false) => "Invalid username or password",
        (SessionError::Rejected { .. }, true) => "Registration failed. Username or email may already be taken.",
        (SessionError::Superseded, _) => "Sign-in was cancelled",
        _ => "Unable to reach the server. Please try again.",
    }
}

/// 登录 / 注册弹框
#[component]
pub fn SignInModal() -> impl IntoView {
    let auth = use_auth();
    let nav = use_nav();
    let toast = use_toast();

    let (registering, set_registering) = signal(false);
    let (username, set_username) = signal(String::new());
    let (email, set_email) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (is_submitting, set_is_submitting) = signal(false);
    let (error_msg, set_error_msg) = signal(Option::<String>::None);

    let close = move || {
        nav.sign_in_open.set(false);
        set_password.set(String::new());
        set_error_msg.set(None);
    };

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let register = registering.get_untracked();
        let (user, mail, pass) = (
            username.get_untracked().trim().to_string(),
            email.get_untracked().trim().to_string(),
            password.get_untracked(),
        );
        if user.is_empty() || pass.is_empty() || (register && mail.is_empty()) {
            set_error_msg.set(Some("Please fill in all fields".to_string()));
            return;
        }

        set_is_submitting.set(true);
        set_error_msg.set(None);

        spawn_local(async move {
            let result = if register {
                auth.register(user, mail, pass).await
            } else {
                auth.login(user, pass).await
            };
            match result {
                Ok(()) => {
                    toast.success(if register { "Account created successfully!" } else { "Welcome back!" });
                    close();
                }
                Err(e) => set_error_msg.set(Some(failure_message(&e, register).to_string())),
            }
            set_is_submitting.set(false);
        });
    };

    let tab_class = move |active: bool| {
        if registering.get() == active {
            "tab tab-active"
        } else {
            "tab"
        }
    };

    view! {
        <Show when=move || nav.sign_in_open.get()>
            <div class="modal modal-open">
                <div class="modal-box">
                    <div role="tablist" class="tabs tabs-boxed mb-4">
                        <a role="tab" class=move || tab_class(false) on:click=move |_| set_registering.set(false)>
                            "Sign In"
                        </a>
                        <a role="tab" class=move || tab_class(true) on:click=move |_| set_registering.set(true)>
                            "Register"
                        </a>
                    </div>
                    <form class="space-y-3" on:submit=on_submit>
                        <Show when=move || error_msg.get().is_some()>
                            <div role="alert" class="alert alert-error text-sm py-2">
                                <span>{move || error_msg.get().unwrap_or_default()}</span>
                            </div>
                        </Show>
                        <input
                            type="text"
                            placeholder="Username"
                            class="input input-bordered w-full"
                            prop:value=username
                            on:input=move |ev| set_username.set(event_target_value(&ev))
                        />
                        <Show when=move || registering.get()>
                            <input
                                type="email"
                                placeholder="Email"
                                class="input input-bordered w-full"
                                prop:value=email
                                on:input=move |ev| set_email.set(event_target_value(&ev))
                            />
                        </Show>
                        <input
                            type="password"
                            placeholder="Password"
                            class="input input-bordered w-full"
                            prop:value=password
                            on:input=move |ev| set_password.set(event_target_value(&ev))
                        />
                        <div class="modal-action">
                            <button type="button" class="btn btn-ghost" on:click=move |_| close()>
                                "Cancel"
                            </button>
                            <button type="submit" class="btn btn-primary" disabled=move || is_submitting.get()>
                                {move || match (is_submitting.get(), registering.get()) {
                                    (true, _) => view! { <span class="loading loading-spinner"></span> }.into_any(),
                                    (false, true) => "Create Account".into_any(),
                                    (false, false) => "Sign In".into_any(),
                                }}
                            </button>
                        </div>
                    </form>
                </div>
            </div>
        </Show>
    }
}
