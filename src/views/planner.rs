use super::{Loaded, Notice};
use crate::api::TravellaApi;
use crate::request::HttpClient;
use travella_shared::{PlanActivity, PlanDay, PlanRequest, PlanResponse};

/// 行程规划表单
#[derive(Debug, Clone, PartialEq)]
pub struct PlanForm {
    pub destination: String,
    pub days: u32,
    pub travelers: u32,
    /// budget / balanced / luxury
    pub travel_style: String,
}

impl Default for PlanForm {
    fn default() -> Self {
        Self {
            destination: String::new(),
            days: 3,
            travelers: 2,
            travel_style: "balanced".to_string(),
        }
    }
}

impl PlanForm {
    fn to_request(&self) -> PlanRequest {
        PlanRequest {
            city: Some(self.destination.trim().to_lowercase()),
            days: self.days,
            profile: Some(self.travel_style.clone()),
            pax: self.travelers,
            budget: self.travel_style.clone(),
        }
    }
}

/// 生成行程；失败时返回以目的地命名的默认行程
pub async fn generate<C: HttpClient>(
    api: &TravellaApi<C>,
    form: &PlanForm,
) -> Result<Loaded<PlanResponse>, Notice> {
    if form.destination.trim().is_empty() {
        return Err(Notice::error("Please enter a destination"));
    }

    match api.plan(&form.to_request()).await {
        Ok(plan) => Ok(Loaded::live(plan, "Itinerary generated successfully!")),
        Err(e) => {
            log::warn!("itinerary generation failed: {}", e);
            Ok(Loaded::fallback(fallback_plan(form.destination.trim())))
        }
    }
}

pub fn fallback_plan(destination: &str) -> PlanResponse {
    PlanResponse {
        title: format!("Your {} Adventure", destination),
        days: default_itinerary(),
    }
}

fn activity(
    time: &str,
    title: &str,
    kind: &str,
    description: &str,
    duration: &str,
    cost: &str,
    rating: f32,
) -> PlanActivity {
    PlanActivity {
        time: time.to_string(),
        title: title.to_string(),
        kind: kind.to_string(),
        description: description.to_string(),
        duration: duration.to_string(),
        cost: cost.to_string(),
        rating,
    }
}

/// 三天的 Pokhara 示例行程
pub fn default_itinerary() -> Vec<PlanDay> {
    vec![
        PlanDay {
            day: 1,
            title: "Arrival & City Exploration".to_string(),
            activities: vec![
                activity(
                    "09:00 AM",
                    "Lakeside Walk",
                    "sightseeing",
                    "Peaceful morning walk along Phewa Lake with mountain views",
                    "2 hours",
                    "Free",
                    4.8,
                ),
                activity(
                    "12:00 PM",
                    "Local Dal Bhat",
                    "food",
                    "Authentic Nepali meal at a local restaurant",
                    "1 hour",
                    "$5-8",
                    4.6,
                ),
                activity(
                    "03:00 PM",
                    "World Peace Pagoda",
                    "sightseeing",
                    "Stunning panoramic views of Pokhara valley",
                    "3 hours",
                    "$2 entry",
                    4.9,
                ),
            ],
        },
        PlanDay {
            day: 2,
            title: "Adventure & Culture".to_string(),
            activities: vec![
                activity(
                    "06:00 AM",
                    "Sarangkot Sunrise",
                    "sightseeing",
                    "Breathtaking sunrise views over the Himalayas",
                    "4 hours",
                    "$15 transport",
                    4.9,
                ),
                activity(
                    "02:00 PM",
                    "Paragliding",
                    "adventure",
                    "Fly over Pokhara valley with professional guides",
                    "2 hours",
                    "$80-120",
                    4.7,
                ),
                activity(
                    "07:00 PM",
                    "Lakeside Dinner",
                    "food",
                    "International cuisine with lake views",
                    "2 hours",
                    "$15-25",
                    4.5,
                ),
            ],
        },
        PlanDay {
            day: 3,
            title: "Relaxation & Departure".to_string(),
            activities: vec![
                activity(
                    "10:00 AM",
                    "Begnas Lake",
                    "sightseeing",
                    "Peaceful lake perfect for reflection and photos",
                    "3 hours",
                    "$10 transport",
                    4.4,
                ),
                activity(
                    "02:00 PM",
                    "Souvenir Shopping",
                    "shopping",
                    "Local handicrafts and traditional items",
                    "2 hours",
                    "$20-50",
                    4.2,
                ),
            ],
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::HttpMethod;
    use crate::views::DataSource;
    use crate::views::testing::{api, url};
    use serde_json::json;

    fn form(destination: &str) -> PlanForm {
        PlanForm {
            destination: destination.to_string(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_generate_sends_form() {
        let api = api();
        api.client().transport().mock_response(
            HttpMethod::Post,
            &url("/plan"),
            200,
            json!({
                "title": "3 Days in Kathmandu",
                "days": [{ "day": 1, "title": "Temples", "activities": [{ "title": "Boudhanath", "type": "culture" }] }]
            }),
        );

        let loaded = generate(&api, &form(" Kathmandu ")).await.unwrap();
        assert_eq!(loaded.source, DataSource::Live);
        assert_eq!(loaded.data.days[0].activities[0].kind, "culture");

        let sent = api.client().transport().requests.borrow()[0].json_body();
        assert_eq!(
            sent,
            json!({ "city": "kathmandu", "days": 3, "profile": "balanced", "pax": 2, "budget": "balanced" })
        );
    }

    #[tokio::test]
    async fn test_failure_uses_default_itinerary() {
        let api = api();
        api.client()
            .transport()
            .mock_response(HttpMethod::Post, &url("/plan"), 500, json!({}));

        let loaded = generate(&api, &form("Pokhara")).await.unwrap();
        assert!(loaded.is_fallback());
        assert_eq!(loaded.data.title, "Your Pokhara Adventure");
        assert_eq!(loaded.data.days.len(), 3);
        assert_eq!(loaded.data.days[0].activities[0].title, "Lakeside Walk");
    }

    #[tokio::test]
    async fn test_blank_destination_rejected() {
        let api = api();
        let err = generate(&api, &form("")).await.unwrap_err();
        assert_eq!(err.message, "Please enter a destination");
        assert_eq!(api.client().transport().request_count(), 0);
    }
}
