use crate::auth::{AdminContext, AuthContext};
use crate::components::admin_dashboard::AdminDashboardPage;
use crate::components::admin_login::AdminLoginPage;
use crate::components::booking::BookingPage;
use crate::components::landing::LandingPage;
use crate::components::navigation::NavigationBar;
use crate::components::planner::PlannerPage;
use crate::components::predict::PredictPage;
use crate::components::profile::ProfilePage;
use crate::components::sign_in::SignInModal;
use crate::components::toast::{Toast, ToastContext};
use crate::components::videos::VideosPage;
use crate::web::{BrowserHttpClient, BrowserStorage};
use leptos::prelude::*;
use leptos::task::spawn_local;
use std::rc::Rc;
use travella::{ClientConfig, Navigation, Outlet, Screen, ScreenRouter, SessionPhase, Travella};

// =========================================================
// 导航上下文
// =========================================================

/// 屏幕路由与登录框开关
///
/// 认证阶段以信号形式注入，路由本身不依赖认证模块。
#[derive(Clone, Copy)]
pub struct NavContext {
    pub router: RwSignal<ScreenRouter>,
    pub sign_in_open: RwSignal<bool>,
    phase: Signal<SessionPhase>,
}

impl NavContext {
    pub fn new(phase: Signal<SessionPhase>) -> Self {
        Self {
            router: RwSignal::new(ScreenRouter::new()),
            sign_in_open: RwSignal::new(false),
            phase,
        }
    }

    /// 导航；受保护屏幕在未登录时打开登录框，屏幕不变
    pub fn go(&self, screen: Screen) {
        let phase = self.phase.get_untracked();
        let navigation = self.router.try_update(|r| r.change_screen(screen, phase));
        if let Some(Navigation::SignInRequired { requested }) = navigation {
            log::info!("[Router] {} requires sign-in", requested);
            self.sign_in_open.set(true);
        }
    }

    pub fn current_signal(&self) -> Signal<Screen> {
        let router = self.router;
        Signal::derive(move || router.with(|r| r.current()))
    }

    pub fn enter_admin(&self) {
        self.router.update(|r| r.enter_admin());
    }

    pub fn leave_admin(&self) {
        self.router.update(|r| r.leave_admin());
    }
}

pub fn use_nav() -> NavContext {
    use_context::<NavContext>().expect("NavContext should be provided")
}

// =========================================================
// 根组件
// =========================================================

/// 根据当前出口返回对应的视图组件
fn outlet_matcher(outlet: Outlet) -> AnyView {
    match outlet {
        Outlet::Loading => view! {
            <div class="flex flex-col items-center justify-center min-h-screen gap-4">
                <span class="loading loading-spinner loading-lg text-primary"></span>
                <p class="text-base-content/70">"Loading Travella AI..."</p>
            </div>
        }
        .into_any(),
        Outlet::Screen(Screen::Home) => view! { <LandingPage /> }.into_any(),
        Outlet::Screen(Screen::Planner) => view! { <PlannerPage /> }.into_any(),
        Outlet::Screen(Screen::Predict) => view! { <PredictPage /> }.into_any(),
        Outlet::Screen(Screen::Videos) => view! { <VideosPage /> }.into_any(),
        Outlet::Screen(Screen::Booking) => view! { <BookingPage /> }.into_any(),
        Outlet::Screen(Screen::Profile) => view! { <ProfilePage /> }.into_any(),
        Outlet::AdminLogin => view! { <AdminLoginPage /> }.into_any(),
        Outlet::AdminDashboard => view! { <AdminDashboardPage /> }.into_any(),
    }
}

#[component]
pub fn App() -> impl IntoView {
    // 1. 装配客户端
    let config = ClientConfig::default();
    let client = Rc::new(Travella::new(config, BrowserHttpClient, BrowserStorage));
    let handle = StoredValue::new_local(client);

    // 2. 创建上下文
    let auth = AuthContext::new(handle);
    let admin = AdminContext::new(handle);
    let nav = NavContext::new(auth.phase_signal());
    provide_context(auth);
    provide_context(admin);
    provide_context(nav);
    provide_context(ToastContext::new());

    // 3. 恢复持久化会话；存在管理员令牌时直接进入管理模式
    if admin.has_stored_token() {
        nav.enter_admin();
    }
    spawn_local(async move {
        let (user, admin_phase) = futures::join!(auth.restore(), admin.restore());
        log::info!("sessions restored: user={:?} admin={:?}", user, admin_phase);
    });

    // 4. 登出后离开受保护屏幕
    Effect::new(move |_| {
        let phase = auth.state.with(|s| s.phase);
        if nav.router.with_untracked(|r| r.current().requires_auth()) {
            nav.router.update(|r| {
                r.on_session_change(phase);
            });
        }
    });

    let outlet = Memo::new(move |_| {
        let phase = auth.state.with(|s| s.phase);
        let admin_phase = admin.state.with(|s| s.phase);
        nav.router.with(|r| r.outlet(phase, admin_phase))
    });

    view! {
        <div class="min-h-screen bg-base-200 font-sans antialiased">
            <Show when=move || outlet.get().shows_navigation()>
                <NavigationBar />
            </Show>
            <main class="pt-16">{move || outlet_matcher(outlet.get())}</main>
            <div class="fixed bottom-4 right-4 z-40 badge badge-success badge-outline gap-2 p-3">
                "Travella AI Online"
            </div>
            <SignInModal />
            <Toast />
        </div>
    }
}
