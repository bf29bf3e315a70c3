use leptos::prelude::*;
use std::time::Duration;
use travella::views::{Notice, NoticeLevel};

/// 全局提示
#[derive(Clone, Copy)]
pub struct ToastContext(RwSignal<Option<Notice>>);

impl ToastContext {
    pub fn new() -> Self {
        Self(RwSignal::new(None))
    }

    pub fn show(&self, notice: Notice) {
        self.0.set(Some(notice));
    }

    pub fn success(&self, message: &str) {
        self.show(Notice::success(message));
    }

    pub fn error(&self, message: &str) {
        self.show(Notice::error(message));
    }
}

pub fn use_toast() -> ToastContext {
    use_context::<ToastContext>().expect("ToastContext should be provided")
}

#[component]
pub fn Toast() -> impl IntoView {
    let ToastContext(notice) = use_toast();

    // 3秒后清除通知
    Effect::new(move |_| {
        if notice.get().is_some() {
            set_timeout(move || notice.set(None), Duration::from_secs(3));
        }
    });

    let class = move || match notice.with(|n| n.as_ref().map(|n| n.level)) {
        Some(NoticeLevel::Error) => "alert alert-error shadow-lg",
        _ => "alert alert-success shadow-lg",
    };
    let message = move || notice.with(|n| n.as_ref().map(|n| n.message.clone()).unwrap_or_default());

    view! {
        <Show when=move || notice.with(Option::is_some)>
            <div class="toast toast-top toast-end z-50">
                <div class=class>
                    <span>{message}</span>
                </div>
            </div>
        </Show>
    }
}
