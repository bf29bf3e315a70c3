use crate::client::{ApiClient, ApiError, RequestOptions};
use crate::request::HttpClient;
use travella_shared::*;

/// 请求使用哪个凭据
#[derive(Debug, Clone, Copy)]
enum Auth<'a> {
    None,
    Bearer(&'a str),
}

// =========================================================
// 业务网关: TravellaApi
// =========================================================

/// Travella REST API 的类型化入口
///
/// 每个端点的路径、方法和响应类型由 `ApiRequest` 描述，
/// 这里只负责挑选凭据和语言头。
pub struct TravellaApi<C> {
    client: ApiClient<C>,
    language: Option<String>,
}

impl<C: HttpClient> TravellaApi<C> {
    pub fn new(client: ApiClient<C>) -> Self {
        Self {
            client,
            language: None,
        }
    }

    pub fn with_language(mut self, language: Option<String>) -> Self {
        self.language = language;
        self
    }

    pub fn client(&self) -> &ApiClient<C> {
        &self.client
    }

    pub fn language(&self) -> Option<&str> {
        self.language.as_deref()
    }

    async fn call<R: ApiRequest>(
        &self,
        req: &R,
        auth: Auth<'_>,
        lang: bool,
    ) -> Result<R::Response, ApiError> {
        let mut options = RequestOptions::new(R::METHOD);
        if R::METHOD.has_body() {
            // 单元结构体（如登出）序列化为 null，不发送请求体
            let body = serde_json::to_value(req).map_err(|e| ApiError::Encode(e.to_string()))?;
            if !body.is_null() {
                options = options.json(&body)?;
            }
        }
        if let Auth::Bearer(token) = auth {
            options = options.bearer(token);
        }
        if lang {
            options = options.lang(self.language());
        }
        self.client.request(R::PATH, options).await
    }

    // ---------------------------------------------------------
    // 公开端点
    // ---------------------------------------------------------

    pub async fn health(&self) -> Result<HealthResponse, ApiError> {
        self.call(&HealthRequest, Auth::None, false).await
    }

    pub async fn predict(&self, req: &PredictRequest) -> Result<PredictResponse, ApiError> {
        self.call(req, Auth::None, true).await
    }

    pub async fn plan(&self, req: &PlanRequest) -> Result<PlanResponse, ApiError> {
        self.call(req, Auth::None, true).await
    }

    pub async fn videos(&self, req: &VideoRequest) -> Result<VideoResponse, ApiError> {
        self.call(req, Auth::None, true).await
    }

    pub async fn booking_suggestions(
        &self,
        req: &BookingSuggestRequest,
    ) -> Result<BookingSuggestResponse, ApiError> {
        self.call(req, Auth::None, true).await
    }

    pub async fn search_flights(
        &self,
        req: &FlightSearchRequest,
    ) -> Result<FlightSearchResponse, ApiError> {
        self.call(req, Auth::None, true).await
    }

    pub async fn search_hotels(
        &self,
        req: &HotelSearchRequest,
    ) -> Result<HotelSearchResponse, ApiError> {
        self.call(req, Auth::None, true).await
    }

    // ---------------------------------------------------------
    // 用户域
    // ---------------------------------------------------------

    pub async fn login(&self, req: &LoginRequest) -> Result<AuthResponse, ApiError> {
        self.call(req, Auth::None, false).await
    }

    pub async fn register(&self, req: &RegisterRequest) -> Result<AuthResponse, ApiError> {
        self.call(req, Auth::None, false).await
    }

    pub async fn verify_user(&self, token: &str) -> Result<VerifyUserResponse, ApiError> {
        self.call(&VerifyUserRequest, Auth::Bearer(token), false)
            .await
    }

    pub async fn logout_user(&self, token: &str) -> Result<MessageResponse, ApiError> {
        self.call(&UserLogoutRequest, Auth::Bearer(token), false)
            .await
    }

    pub async fn profile(&self, token: &str) -> Result<ProfileResponse, ApiError> {
        self.call(&ProfileRequest, Auth::Bearer(token), false).await
    }

    pub async fn update_profile(
        &self,
        token: &str,
        update: &ProfileUpdate,
    ) -> Result<ProfileUpdateResponse, ApiError> {
        self.call(update, Auth::Bearer(token), false).await
    }

    pub async fn activity_stats(&self, token: &str) -> Result<ActivityStats, ApiError> {
        self.call(&ActivityStatsRequest, Auth::Bearer(token), false)
            .await
    }

    pub async fn create_booking(
        &self,
        token: &str,
        req: &BookingCreateRequest,
    ) -> Result<BookingRecord, ApiError> {
        self.call(req, Auth::Bearer(token), false).await
    }

    pub async fn user_bookings(&self, token: &str) -> Result<Vec<BookingRecord>, ApiError> {
        self.call(&UserBookingsRequest, Auth::Bearer(token), false)
            .await
    }

    // ---------------------------------------------------------
    // 管理员域
    // ---------------------------------------------------------

    pub async fn admin_login(
        &self,
        req: &AdminLoginRequest,
    ) -> Result<AdminLoginResponse, ApiError> {
        self.call(req, Auth::None, false).await
    }

    pub async fn admin_logout(&self, token: &str) -> Result<MessageResponse, ApiError> {
        self.call(&AdminLogoutRequest, Auth::Bearer(token), false)
            .await
    }

    pub async fn verify_admin(&self, token: &str) -> Result<AdminVerifyResponse, ApiError> {
        self.call(&AdminVerifyRequest, Auth::Bearer(token), false)
            .await
    }

    pub async fn dashboard_stats(&self, token: &str) -> Result<DashboardStats, ApiError> {
        self.call(&DashboardRequest, Auth::Bearer(token), false)
            .await
    }
}
