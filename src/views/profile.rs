use super::{Loaded, Notice};
use crate::request::HttpClient;
use crate::session::{SessionError, UserSession};
use crate::storage::KeyValueStore;
use travella_shared::{ActivityEntry, ActivityStats, ProfileUpdate, TravelPreferences, UserProfile};

/// 可选的兴趣标签
pub const INTERESTS: [&str; 6] = ["adventure", "culture", "food", "nature", "nightlife", "relaxation"];

/// 编辑中的资料；空的偏好取表单默认值
pub fn draft(profile: Option<&UserProfile>) -> UserProfile {
    let mut draft = profile.cloned().unwrap_or_default();
    if draft.preferences.travel_style.is_empty() {
        draft.preferences.travel_style = "balanced".to_string();
    }
    if draft.preferences.budget_range.is_empty() {
        draft.preferences.budget_range = "medium".to_string();
    }
    draft
}

/// 活动统计，失败时使用固定的示例统计
pub async fn load_stats<C: HttpClient, S: KeyValueStore>(
    session: &UserSession<C, S>,
) -> Result<Loaded<ActivityStats>, Notice> {
    let (token, generation) = session
        .authorized()
        .map_err(|_| Notice::error("Please sign in to view your activity"))?;

    let result = session.api().activity_stats(&token).await;
    if !session.is_current(generation) {
        return Err(Notice::error("Please sign in to view your activity"));
    }
    match result {
        Ok(stats) => Ok(Loaded::live(stats, "Activity loaded")),
        Err(e) => {
            log::warn!("loading activity stats failed: {}", e);
            Ok(Loaded::fallback(sample_stats()))
        }
    }
}

/// 保存资料，成功后会话中的 `user.profile` 被服务端返回值替换
pub async fn save<C: HttpClient, S: KeyValueStore>(
    session: &UserSession<C, S>,
    profile: &UserProfile,
) -> Result<Notice, Notice> {
    let update = ProfileUpdate::from(profile.clone());
    match session.update_profile(&update).await {
        Ok(_) => Ok(Notice::success("Profile updated successfully")),
        Err(SessionError::Unauthenticated) => Err(Notice::error("Please sign in to update your profile")),
        Err(e) => {
            log::warn!("profile update failed: {}", e);
            Err(Notice::error("Failed to update profile"))
        }
    }
}

/// 在兴趣列表中切换一项，保持原有顺序
pub fn toggle_interest(preferences: &mut TravelPreferences, interest: &str) {
    if let Some(pos) = preferences.interests.iter().position(|i| i == interest) {
        preferences.interests.remove(pos);
    } else {
        preferences.interests.push(interest.to_string());
    }
}

fn entry(action: &str, details: &str, timestamp: &str) -> ActivityEntry {
    ActivityEntry {
        timestamp: timestamp.to_string(),
        action: action.to_string(),
        details: details.to_string(),
        ..Default::default()
    }
}

pub fn sample_stats() -> ActivityStats {
    ActivityStats {
        total_searches: 24,
        total_plans: 8,
        total_videos: 57,
        total_bookings: 5,
        recent_activities: vec![
            entry("search", "Searched for \"Pokhara hotels\"", "2 hours ago"),
            entry("plan", "Created 3-day Pokhara itinerary", "1 day ago"),
            entry("video", "Watched \"Pokhara travel guide\"", "2 days ago"),
            entry("booking", "Booked flight to Pokhara", "3 days ago"),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::TravellaApi;
    use crate::client::ApiClient;
    use crate::request::{HttpMethod, MockHttpClient};
    use crate::storage::MemoryStorage;
    use crate::views::{DataSource, NoticeLevel};
    use serde_json::json;
    use std::rc::Rc;

    fn session() -> UserSession<MockHttpClient, MemoryStorage> {
        let api = Rc::new(TravellaApi::new(ApiClient::new("http://api.test", MockHttpClient::new())));
        UserSession::new(api, MemoryStorage::new(), "user_token")
    }

    async fn signed_in() -> UserSession<MockHttpClient, MemoryStorage> {
        let session = session();
        session.api().client().transport().mock_response(
            HttpMethod::Post,
            "http://api.test/auth/login",
            200,
            json!({
                "access_token": "t1",
                "user": { "username": "alice", "email": "a@x.com", "profile": { "first_name": "Alice" } }
            }),
        );
        session.login("alice", "pw").await.unwrap();
        session
    }

    #[tokio::test]
    async fn test_stats_live_and_fallback() {
        let session = signed_in().await;
        let transport = session.api().client().transport();
        transport.mock_response(
            HttpMethod::Get,
            "http://api.test/user/activity-stats",
            200,
            json!({ "total_searches": 3, "recent_activities": [{ "action": "search", "details": "bali" }] }),
        );
        let loaded = load_stats(&session).await.unwrap();
        assert_eq!(loaded.source, DataSource::Live);
        assert_eq!(loaded.data.total_searches, 3);

        transport.mock_failure(HttpMethod::Get, "http://api.test/user/activity-stats", "offline");
        let loaded = load_stats(&session).await.unwrap();
        assert_eq!(loaded.data, sample_stats());
    }

    #[tokio::test]
    async fn test_stats_need_session() {
        let session = session();
        assert!(load_stats(&session).await.is_err());
        assert_eq!(session.api().client().transport().request_count(), 0);
    }

    #[tokio::test]
    async fn test_save_profile() {
        let session = signed_in().await;
        session.api().client().transport().mock_response(
            HttpMethod::Put,
            "http://api.test/user/profile",
            200,
            json!({ "profile": { "first_name": "Alice", "phone": "555", "preferences": { "travel_style": "luxury" } } }),
        );

        let mut edited = draft(session.user().map(|u| u.profile).as_ref());
        assert_eq!(edited.preferences.budget_range, "medium");
        edited.phone = "555".to_string();

        let notice = save(&session, &edited).await.unwrap();
        assert_eq!(notice.level, NoticeLevel::Success);
        let user = session.user().unwrap();
        assert_eq!(user.profile.phone, "555");
        assert_eq!(user.profile.preferences.travel_style, "luxury");
        assert_eq!(user.username, "alice");
    }

    #[tokio::test]
    async fn test_save_failure() {
        let session = signed_in().await;
        session
            .api()
            .client()
            .transport()
            .mock_response(HttpMethod::Put, "http://api.test/user/profile", 422, json!({}));
        let err = save(&session, &draft(None)).await.unwrap_err();
        assert_eq!(err.message, "Failed to update profile");
    }

    #[test]
    fn test_toggle_interest_keeps_order() {
        let mut prefs = TravelPreferences::default();
        toggle_interest(&mut prefs, "hiking");
        toggle_interest(&mut prefs, "food");
        toggle_interest(&mut prefs, "beaches");
        toggle_interest(&mut prefs, "food");
        assert_eq!(prefs.interests, vec!["hiking", "beaches"]);
    }
}
