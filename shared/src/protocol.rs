use crate::*;
use serde::{Deserialize, Serialize, de::DeserializeOwned};

/// HTTP Methods for API Requests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        }
    }

    /// Whether a request with this method carries a JSON body.
    pub fn has_body(&self) -> bool {
        matches!(self, HttpMethod::Post | HttpMethod::Put)
    }
}

/// A trait that defines the request-response relationship and metadata for an API endpoint.
pub trait ApiRequest: Serialize + DeserializeOwned {
    /// The response type returned by this request.
    type Response: Serialize + DeserializeOwned;
    /// The URL path (or suffix).
    const PATH: &'static str;
    /// The HTTP method.
    const METHOD: HttpMethod;
}

// =========================================================
// Public travel endpoints
// =========================================================

impl ApiRequest for HealthRequest {
    type Response = HealthResponse;
    const PATH: &'static str = "/health";
    const METHOD: HttpMethod = HttpMethod::Get;
}

impl ApiRequest for PredictRequest {
    type Response = PredictResponse;
    const PATH: &'static str = "/predict";
    const METHOD: HttpMethod = HttpMethod::Post;
}

impl ApiRequest for PlanRequest {
    type Response = PlanResponse;
    const PATH: &'static str = "/plan";
    const METHOD: HttpMethod = HttpMethod::Post;
}

impl ApiRequest for VideoRequest {
    type Response = VideoResponse;
    const PATH: &'static str = "/videos";
    const METHOD: HttpMethod = HttpMethod::Post;
}

impl ApiRequest for BookingSuggestRequest {
    type Response = BookingSuggestResponse;
    const PATH: &'static str = "/book/suggest";
    const METHOD: HttpMethod = HttpMethod::Post;
}

impl ApiRequest for FlightSearchRequest {
    type Response = FlightSearchResponse;
    const PATH: &'static str = "/book/flights/enhanced";
    const METHOD: HttpMethod = HttpMethod::Post;
}

impl ApiRequest for HotelSearchRequest {
    type Response = HotelSearchResponse;
    const PATH: &'static str = "/book/hotels/enhanced";
    const METHOD: HttpMethod = HttpMethod::Post;
}

// =========================================================
// User realm (bearer = user token)
// =========================================================

impl ApiRequest for LoginRequest {
    type Response = AuthResponse;
    const PATH: &'static str = "/auth/login";
    const METHOD: HttpMethod = HttpMethod::Post;
}

impl ApiRequest for RegisterRequest {
    type Response = AuthResponse;
    const PATH: &'static str = "/auth/register";
    const METHOD: HttpMethod = HttpMethod::Post;
}

impl ApiRequest for VerifyUserRequest {
    type Response = VerifyUserResponse;
    const PATH: &'static str = "/auth/verify";
    const METHOD: HttpMethod = HttpMethod::Get;
}

/// Best-effort logout notification; the server may not implement it.
impl ApiRequest for UserLogoutRequest {
    type Response = MessageResponse;
    const PATH: &'static str = "/auth/logout";
    const METHOD: HttpMethod = HttpMethod::Post;
}

impl ApiRequest for ProfileRequest {
    type Response = ProfileResponse;
    const PATH: &'static str = "/user/profile";
    const METHOD: HttpMethod = HttpMethod::Get;
}

impl ApiRequest for ProfileUpdate {
    type Response = ProfileUpdateResponse;
    const PATH: &'static str = "/user/profile";
    const METHOD: HttpMethod = HttpMethod::Put;
}

impl ApiRequest for ActivityStatsRequest {
    type Response = ActivityStats;
    const PATH: &'static str = "/user/activity-stats";
    const METHOD: HttpMethod = HttpMethod::Get;
}

impl ApiRequest for BookingCreateRequest {
    type Response = BookingRecord;
    const PATH: &'static str = "/bookings";
    const METHOD: HttpMethod = HttpMethod::Post;
}

impl ApiRequest for UserBookingsRequest {
    type Response = Vec<BookingRecord>;
    const PATH: &'static str = "/bookings";
    const METHOD: HttpMethod = HttpMethod::Get;
}

// =========================================================
// Admin realm (bearer = admin token)
// =========================================================

impl ApiRequest for AdminLoginRequest {
    type Response = AdminLoginResponse;
    const PATH: &'static str = "/admin/login";
    const METHOD: HttpMethod = HttpMethod::Post;
}

impl ApiRequest for AdminLogoutRequest {
    type Response = MessageResponse;
    const PATH: &'static str = "/admin/logout";
    const METHOD: HttpMethod = HttpMethod::Post;
}

impl ApiRequest for AdminVerifyRequest {
    type Response = AdminVerifyResponse;
    const PATH: &'static str = "/admin/verify";
    const METHOD: HttpMethod = HttpMethod::Get;
}

impl ApiRequest for DashboardRequest {
    type Response = DashboardStats;
    const PATH: &'static str = "/admin/dashboard";
    const METHOD: HttpMethod = HttpMethod::Get;
}
