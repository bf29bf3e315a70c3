//! 屏幕路由 - 领域模型
//!
//! 纯业务逻辑，不依赖 DOM：决定当前显示哪个屏幕，以及哪些屏幕需要登录。
//! 屏幕状态只存在于内存中，刷新后回到首页。

use crate::session::SessionPhase;
use std::fmt::Display;

/// 应用屏幕
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Screen {
    #[default]
    Home,
    Planner,
    Predict,
    Videos,
    /// 需要登录
    Booking,
    /// 需要登录
    Profile,
}

impl Screen {
    /// 导航栏顺序
    pub const ALL: [Screen; 6] = [
        Screen::Home,
        Screen::Planner,
        Screen::Predict,
        Screen::Videos,
        Screen::Booking,
        Screen::Profile,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            Self::Home => "home",
            Self::Planner => "planner",
            Self::Predict => "predict",
            Self::Videos => "videos",
            Self::Booking => "booking",
            Self::Profile => "profile",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.id() == id)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Home => "Home",
            Self::Planner => "Planner",
            Self::Predict => "AI Chat",
            Self::Videos => "Videos",
            Self::Booking => "Booking",
            Self::Profile => "Profile",
        }
    }

    /// **核心守卫逻辑：该屏幕是否需要认证**
    pub fn requires_auth(&self) -> bool {
        matches!(self, Self::Booking | Self::Profile)
    }
}

impl Display for Screen {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.id())
    }
}

/// 导航结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    Moved(Screen),
    /// 目标需要登录，屏幕未改变，应弹出登录框
    SignInRequired { requested: Screen },
}

/// 当前应渲染的内容
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outlet {
    /// 正在校验持久化令牌
    Loading,
    Screen(Screen),
    AdminLogin,
    AdminDashboard,
}

impl Outlet {
    /// 只有普通屏幕带导航栏；加载中和管理界面都不带
    pub fn shows_navigation(&self) -> bool {
        matches!(self, Outlet::Screen(_))
    }
}

/// 屏幕路由器
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScreenRouter {
    current: Screen,
    admin_mode: bool,
}

impl ScreenRouter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Screen {
        self.current
    }

    pub fn is_admin_mode(&self) -> bool {
        self.admin_mode
    }

    /// 导航与守卫：同步、无网络
    pub fn change_screen(&mut self, target: Screen, phase: SessionPhase) -> Navigation {
        if target.requires_auth() && phase != SessionPhase::LoggedIn {
            log::debug!("[Router] {} requires sign-in", target);
            return Navigation::SignInRequired { requested: target };
        }
        self.current = target;
        Navigation::Moved(target)
    }

    /// 会话结束时离开受保护屏幕
    pub fn on_session_change(&mut self, phase: SessionPhase) -> Option<Screen> {
        if phase == SessionPhase::LoggedOut && self.current.requires_auth() {
            log::debug!("[Router] signed out, leaving {}", self.current);
            self.current = Screen::Home;
            return Some(Screen::Home);
        }
        None
    }

    pub fn enter_admin(&mut self) {
        self.admin_mode = true;
    }

    pub fn leave_admin(&mut self) {
        self.admin_mode = false;
    }

    /// 任一相关会话仍在校验时只显示加载界面
    pub fn outlet(&self, user: SessionPhase, admin: SessionPhase) -> Outlet {
        if user == SessionPhase::Verifying {
            return Outlet::Loading;
        }
        if !self.admin_mode {
            return Outlet::Screen(self.current);
        }
        match admin {
            SessionPhase::Verifying => Outlet::Loading,
            SessionPhase::LoggedIn => Outlet::AdminDashboard,
            SessionPhase::LoggedOut => Outlet::AdminLogin,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PHASES: [SessionPhase; 3] = [
        SessionPhase::LoggedOut,
        SessionPhase::Verifying,
        SessionPhase::LoggedIn,
    ];

    #[test]
    fn test_ids_round_trip() {
        for screen in Screen::ALL {
            assert_eq!(Screen::from_id(screen.id()), Some(screen));
        }
        assert_eq!(Screen::from_id("admin"), None);
    }

    #[test]
    fn test_protected_targets_need_sign_in() {
        for phase in [SessionPhase::LoggedOut, SessionPhase::Verifying] {
            for target in [Screen::Booking, Screen::Profile] {
                let mut router = ScreenRouter::new();
                router.change_screen(Screen::Videos, phase);

                let nav = router.change_screen(target, phase);
                assert_eq!(nav, Navigation::SignInRequired { requested: target });
                assert_eq!(router.current(), Screen::Videos);
            }
        }
    }

    #[test]
    fn test_unprotected_targets_always_move() {
        for phase in PHASES {
            for target in Screen::ALL.into_iter().filter(|s| !s.requires_auth()) {
                let mut router = ScreenRouter::new();
                assert_eq!(router.change_screen(target, phase), Navigation::Moved(target));
                assert_eq!(router.current(), target);
            }
        }
    }

    #[test]
    fn test_logged_in_reaches_protected() {
        let mut router = ScreenRouter::new();
        assert_eq!(
            router.change_screen(Screen::Profile, SessionPhase::LoggedIn),
            Navigation::Moved(Screen::Profile)
        );
    }

    #[test]
    fn test_logout_leaves_protected_screen() {
        let mut router = ScreenRouter::new();
        router.change_screen(Screen::Booking, SessionPhase::LoggedIn);
        assert_eq!(router.on_session_change(SessionPhase::LoggedOut), Some(Screen::Home));
        assert_eq!(router.current(), Screen::Home);

        router.change_screen(Screen::Planner, SessionPhase::LoggedOut);
        assert_eq!(router.on_session_change(SessionPhase::LoggedOut), None);
        assert_eq!(router.current(), Screen::Planner);
    }

    #[test]
    fn test_outlet() {
        use SessionPhase::*;

        let mut router = ScreenRouter::new();
        assert_eq!(router.outlet(Verifying, LoggedOut), Outlet::Loading);
        assert_eq!(router.outlet(LoggedOut, LoggedIn), Outlet::Screen(Screen::Home));
        // 不在管理模式时忽略管理员会话状态
        assert_eq!(router.outlet(LoggedIn, Verifying), Outlet::Screen(Screen::Home));

        router.enter_admin();
        assert_eq!(router.outlet(LoggedOut, LoggedOut), Outlet::AdminLogin);
        assert_eq!(router.outlet(LoggedIn, LoggedIn), Outlet::AdminDashboard);
        assert_eq!(router.outlet(LoggedOut, Verifying), Outlet::Loading);
        assert_eq!(router.outlet(Verifying, LoggedIn), Outlet::Loading);

        router.leave_admin();
        assert!(!router.is_admin_mode());
    }

    #[test]
    fn test_navigation_only_on_screens() {
        assert!(Outlet::Screen(Screen::Videos).shows_navigation());
        assert!(!Outlet::Loading.shows_navigation());
        assert!(!Outlet::AdminLogin.shows_navigation());
        assert!(!Outlet::AdminDashboard.shows_navigation());
    }
}
