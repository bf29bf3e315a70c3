//! 旅行相关的请求/响应模型
//!
//! 服务端响应形状并不稳定，因此除注明的必需字段外全部带 `#[serde(default)]`。
//! 展示用的字段还会把显式的 `null` 当作缺省值。

use crate::RecordId;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

// =========================================================
// Predict
// =========================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictRequest {
    pub text: String,
}

/// 意图预测结果
///
/// 必需字段: 无。`entities` 与 `suggestions` 是开放的键值包。
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PredictResponse {
    #[serde(default)]
    pub intent: String,
    #[serde(default)]
    pub confidence: f64,
    #[serde(default)]
    pub entities: Map<String, Value>,
    #[serde(default)]
    pub suggestions: Map<String, Value>,
    #[serde(default)]
    pub llm_response: Option<String>,
    #[serde(default)]
    pub llm_available: bool,
}

impl PredictResponse {
    /// 值为"真"的实体键，保持服务端给出的顺序
    pub fn detected_entities(&self) -> Vec<String> {
        self.entities
            .iter()
            .filter(|(_, v)| is_truthy(v))
            .map(|(k, _)| k.clone())
            .collect()
    }

    /// 非空的模型回复
    pub fn reply(&self) -> Option<&str> {
        self.llm_response
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

// =========================================================
// Plan
// =========================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    pub days: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile: Option<String>,
    pub pax: u32,
    pub budget: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PlanActivity {
    #[serde(default, deserialize_with = "crate::null_as_default")]
    pub time: String,
    #[serde(default, deserialize_with = "crate::null_as_default")]
    pub title: String,
    #[serde(rename = "type", default, deserialize_with = "crate::null_as_default")]
    pub kind: String,
    #[serde(default, deserialize_with = "crate::null_as_default")]
    pub description: String,
    #[serde(default, deserialize_with = "crate::null_as_default")]
    pub duration: String,
    #[serde(default, deserialize_with = "crate::null_as_default")]
    pub cost: String,
    #[serde(default, deserialize_with = "crate::null_as_default")]
    pub rating: f32,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PlanDay {
    #[serde(default, deserialize_with = "crate::null_as_default")]
    pub day: u32,
    #[serde(default, deserialize_with = "crate::null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "crate::null_as_default")]
    pub activities: Vec<PlanActivity>,
}

/// 行程
///
/// 必需字段: 无；缺少 `days` 视为空行程。
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PlanResponse {
    #[serde(default, deserialize_with = "crate::null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "crate::null_as_default")]
    pub days: Vec<PlanDay>,
}

// =========================================================
// Videos
// =========================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VideoRequest {
    pub place: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Video {
    #[serde(default, deserialize_with = "crate::null_as_default")]
    pub id: RecordId,
    #[serde(default, deserialize_with = "crate::null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "crate::null_as_default")]
    pub url: String,
    #[serde(default, deserialize_with = "crate::null_as_default")]
    pub thumbnail: String,
    #[serde(default, deserialize_with = "crate::null_as_default")]
    pub duration: String,
    #[serde(default, deserialize_with = "crate::null_as_default")]
    pub platform: String,
    #[serde(default, deserialize_with = "crate::null_as_default")]
    pub views: String,
    #[serde(default, deserialize_with = "crate::null_as_default")]
    pub likes: String,
    #[serde(default, deserialize_with = "crate::null_as_default")]
    pub creator: String,
    #[serde(default, deserialize_with = "crate::null_as_default")]
    pub location: String,
    #[serde(default, deserialize_with = "crate::null_as_default")]
    pub category: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VideoResponse {
    #[serde(default, deserialize_with = "crate::null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "crate::null_as_default")]
    pub videos: Vec<Video>,
}

// =========================================================
// Booking
// =========================================================

/// 酒店/航班建议查询
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BookingSuggestRequest {
    pub city: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origin: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nights: Option<u32>,
    pub pax: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub budget: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct HotelOffer {
    #[serde(default, deserialize_with = "crate::null_as_default")]
    pub id: RecordId,
    #[serde(default, deserialize_with = "crate::null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "crate::null_as_default")]
    pub rating: f32,
    #[serde(default, deserialize_with = "crate::null_as_default")]
    pub reviews: u32,
    #[serde(default, deserialize_with = "crate::null_as_default")]
    pub location: String,
    #[serde(default, deserialize_with = "crate::null_as_default")]
    pub image: String,
    #[serde(default, deserialize_with = "crate::null_as_default")]
    pub price: f64,
    #[serde(rename = "originalPrice", default, deserialize_with = "crate::null_as_default")]
    pub original_price: Option<f64>,
    #[serde(default, deserialize_with = "crate::null_as_default")]
    pub amenities: Vec<String>,
    #[serde(default, deserialize_with = "crate::null_as_default")]
    pub partner: String,
    #[serde(default, deserialize_with = "crate::null_as_default")]
    pub deal: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FlightOffer {
    #[serde(default, deserialize_with = "crate::null_as_default")]
    pub id: RecordId,
    #[serde(default, deserialize_with = "crate::null_as_default")]
    pub airline: String,
    #[serde(default, deserialize_with = "crate::null_as_default")]
    pub logo: String,
    #[serde(default, deserialize_with = "crate::null_as_default")]
    pub route: String,
    #[serde(default, deserialize_with = "crate::null_as_default")]
    pub departure: String,
    #[serde(default, deserialize_with = "crate::null_as_default")]
    pub arrival: String,
    #[serde(default, deserialize_with = "crate::null_as_default")]
    pub duration: String,
    #[serde(default, deserialize_with = "crate::null_as_default")]
    pub price: f64,
    #[serde(rename = "class", default, deserialize_with = "crate::null_as_default")]
    pub cabin: String,
    #[serde(default, deserialize_with = "crate::null_as_default")]
    pub stops: String,
    #[serde(default, deserialize_with = "crate::null_as_default")]
    pub partner: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BookingSuggestResponse {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub hotels: Vec<HotelOffer>,
    #[serde(default)]
    pub flights: Vec<FlightOffer>,
}

/// 航班搜索（航班标签页）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlightSearchRequest {
    pub origin: String,
    pub destination: String,
    pub date: String,
    pub pax: u32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FlightSearchResponse {
    #[serde(default, deserialize_with = "crate::null_as_default")]
    pub flights: Vec<FlightOffer>,
}

/// 酒店推荐（酒店标签页）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HotelSearchRequest {
    pub city: String,
    pub pax: u32,
    pub date: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HotelSearchResponse {
    #[serde(default, deserialize_with = "crate::null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "crate::null_as_default")]
    pub hotels: Vec<HotelOffer>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookingKind {
    Flight,
    Hotel,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingCreateRequest {
    #[serde(rename = "type")]
    pub kind: BookingKind,
    pub destination: String,
    pub check_in: NaiveDate,
    pub travelers: u32,
    pub budget: f64,
}

/// 预订记录
///
/// 必需字段: `id`。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookingRecord {
    pub id: RecordId,
    #[serde(rename = "type", default)]
    pub kind: Option<BookingKind>,
    #[serde(default)]
    pub destination: String,
    #[serde(default)]
    pub check_in: Option<String>,
    #[serde(default)]
    pub travelers: u32,
    #[serde(default)]
    pub budget: f64,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserBookingsRequest;

// =========================================================
// Activity
// =========================================================

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ActivityEntry {
    #[serde(default)]
    pub timestamp: String,
    #[serde(default)]
    pub action: String,
    #[serde(default)]
    pub details: String,
    #[serde(default)]
    pub user_ip: String,
    #[serde(default)]
    pub user: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityStatsRequest;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ActivityStats {
    #[serde(default)]
    pub total_searches: u64,
    #[serde(default)]
    pub total_plans: u64,
    #[serde(default)]
    pub total_videos: u64,
    #[serde(default)]
    pub total_bookings: u64,
    #[serde(default)]
    pub recent_activities: Vec<ActivityEntry>,
}

// =========================================================
// Health
// =========================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthRequest;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HealthResponse {
    #[serde(default)]
    pub status: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_detected_entities_skips_falsy_values() {
        let resp: PredictResponse = serde_json::from_value(json!({
            "intent": "plan_trip",
            "entities": { "city": "pokhara", "days": 0, "budget": null, "pax": 2, "style": "" },
        }))
        .unwrap();
        assert_eq!(resp.detected_entities(), vec!["city".to_string(), "pax".to_string()]);
        assert_eq!(resp.reply(), None);
    }

    #[test]
    fn test_detected_entities_keep_server_order() {
        let resp: PredictResponse = serde_json::from_str(
            r#"{ "entities": { "style": "trek", "city": "pokhara", "days": 3 } }"#,
        )
        .unwrap();
        assert_eq!(resp.detected_entities(), vec!["style", "city", "days"]);
    }

    #[test]
    fn test_null_fields_decode_as_empty() {
        let plan: PlanResponse = serde_json::from_value(json!({
            "title": null,
            "days": [{ "day": 1, "title": null, "activities": [{ "time": null, "title": "Lake walk", "rating": null }] }]
        }))
        .unwrap();
        assert_eq!(plan.title, "");
        assert_eq!(plan.days[0].activities[0].title, "Lake walk");
        assert_eq!(plan.days[0].activities[0].time, "");

        let video: Video = serde_json::from_value(json!({
            "id": 3, "title": "Phewa sunrise", "thumbnail": null, "views": null, "category": null
        }))
        .unwrap();
        assert_eq!(video.title, "Phewa sunrise");
        assert_eq!(video.thumbnail, "");
        assert_eq!(video.category, "");

        let resp: FlightSearchResponse = serde_json::from_value(json!({ "flights": null })).unwrap();
        assert!(resp.flights.is_empty());
    }

    #[test]
    fn test_offer_field_renames() {
        let hotel: HotelOffer = serde_json::from_value(json!({
            "id": "h1", "name": "Lakeside", "price": 65.0, "originalPrice": 85.0
        }))
        .unwrap();
        assert_eq!(hotel.original_price, Some(85.0));

        let flight: FlightOffer =
            serde_json::from_value(json!({ "id": 1, "class": "Economy" })).unwrap();
        assert_eq!(flight.cabin, "Economy");
    }

    #[test]
    fn test_booking_request_wire_shape() {
        let req = BookingCreateRequest {
            kind: BookingKind::Hotel,
            destination: "pokhara".into(),
            check_in: NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
            travelers: 2,
            budget: 85.0,
        };
        assert_eq!(
            serde_json::to_value(&req).unwrap(),
            json!({
                "type": "hotel",
                "destination": "pokhara",
                "check_in": "2025-03-01",
                "travelers": 2,
                "budget": 85.0
            })
        );
    }
}
