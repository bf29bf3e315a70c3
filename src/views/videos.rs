use super::{Loaded, Notice};
use crate::api::TravellaApi;
use crate::request::HttpClient;
use travella_shared::{RecordId, Video, VideoRequest};

pub const DEFAULT_PLACE: &str = "pokhara";

/// (值, 标签)
pub const FILTERS: [(&str, &str); 6] = [
    ("all", "All Videos"),
    ("nature", "Nature"),
    ("food", "Food"),
    ("city", "City"),
    ("culture", "Culture"),
    ("tips", "Tips"),
];

/// 加载目的地视频，失败或为空时使用示例视频
pub async fn load<C: HttpClient>(api: &TravellaApi<C>, place: &str) -> Loaded<Vec<Video>> {
    let req = VideoRequest {
        place: place.to_string(),
    };
    match api.videos(&req).await {
        Ok(resp) if !resp.videos.is_empty() => Loaded::live(resp.videos, "Videos loaded successfully!"),
        Ok(_) => Loaded {
            notice: Notice::success("Videos loaded successfully!"),
            ..Loaded::fallback(sample_videos())
        },
        Err(e) => {
            log::warn!("loading videos failed: {}", e);
            Loaded::fallback(sample_videos())
        }
    }
}

/// 搜索成功后的新列表和规范化的地点
#[derive(Debug, Clone, PartialEq)]
pub struct VideoSearch {
    pub place: String,
    pub videos: Vec<Video>,
}

/// 按地点搜索；无结果或失败时不替换当前列表，只返回提示
///
/// 空查询返回 `Ok(None)`，不发请求。
pub async fn search<C: HttpClient>(
    api: &TravellaApi<C>,
    query: &str,
) -> Result<Option<VideoSearch>, Notice> {
    let place = query.trim().to_lowercase();
    if place.is_empty() {
        return Ok(None);
    }

    let req = VideoRequest {
        place: place.clone(),
    };
    match api.videos(&req).await {
        Ok(resp) if !resp.videos.is_empty() => Ok(Some(VideoSearch {
            place,
            videos: resp.videos,
        })),
        Ok(_) => Err(Notice::error("No videos found for this destination")),
        Err(e) => {
            log::warn!("video search failed: {}", e);
            Err(Notice::error("Search failed. Please try again."))
        }
    }
}

/// 按分类和关键字过滤（关键字匹配标题或地点，不区分大小写）
pub fn filter<'a>(videos: &'a [Video], category: &str, query: &str) -> Vec<&'a Video> {
    let query = query.trim().to_lowercase();
    videos
        .iter()
        .filter(|v| category == "all" || v.category == category)
        .filter(|v| {
            query.is_empty()
                || v.title.to_lowercase().contains(&query)
                || v.location.to_lowercase().contains(&query)
        })
        .collect()
}

#[allow(clippy::too_many_arguments)]
fn sample(
    id: u64,
    title: &str,
    creator: &str,
    duration: &str,
    views: &str,
    likes: &str,
    location: &str,
    platform: &str,
    thumbnail: &str,
    category: &str,
) -> Video {
    Video {
        id: RecordId::Number(id),
        title: title.to_string(),
        url: String::new(),
        thumbnail: format!("https://images.unsplash.com/{}?fit=max&w=1080", thumbnail),
        duration: duration.to_string(),
        platform: platform.to_string(),
        views: views.to_string(),
        likes: likes.to_string(),
        creator: creator.to_string(),
        location: location.to_string(),
        category: category.to_string(),
    }
}

pub fn sample_videos() -> Vec<Video> {
    vec![
        sample(1, "Hidden Waterfalls in Pokhara", "@nepalwanderer", "0:45", "124K", "8.2K", "Pokhara, Nepal", "tiktok", "photo-1552207311-2d6d6e8f1bd2", "nature"),
        sample(2, "Street Food Tour Bangkok", "@foodietravels", "1:20", "89K", "5.7K", "Bangkok, Thailand", "instagram", "photo-1645813931787-74f5249fd3a1", "food"),
        sample(3, "Tokyo Neon Nights", "@citylights_jp", "0:38", "256K", "15.3K", "Tokyo, Japan", "youtube", "photo-1652176862396-99e525e9f87b", "city"),
        sample(4, "Bali Beach Sunrise", "@tropicalvibes", "1:05", "187K", "12.1K", "Bali, Indonesia", "tiktok", "photo-1683188687217-edec620b5b5c", "nature"),
        sample(5, "Budget Backpacking Tips", "@backpackbudget", "2:15", "94K", "7.8K", "Southeast Asia", "youtube", "photo-1605446994677-9b99e0d6647f", "tips"),
        sample(6, "Himalayan Tea Gardens", "@mountaineer_stories", "1:42", "156K", "9.4K", "Darjeeling, India", "instagram", "photo-1552207311-2d6d6e8f1bd2", "culture"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::HttpMethod;
    use crate::views::DataSource;
    use crate::views::testing::{api, url};
    use serde_json::json;

    fn one_video() -> serde_json::Value {
        json!({ "title": "Kyoto", "videos": [{ "id": "yt-1", "title": "Kyoto Temples", "category": "culture" }] })
    }

    #[tokio::test]
    async fn test_load_live() {
        let api = api();
        api.client()
            .transport()
            .mock_response(HttpMethod::Post, &url("/videos"), 200, one_video());

        let loaded = load(&api, DEFAULT_PLACE).await;
        assert_eq!(loaded.source, DataSource::Live);
        assert_eq!(loaded.data[0].id, RecordId::from("yt-1"));
        assert_eq!(
            api.client().transport().requests.borrow()[0].json_body(),
            json!({ "place": "pokhara" })
        );
    }

    #[tokio::test]
    async fn test_load_empty_or_failed_uses_samples() {
        let api = api();
        api.client()
            .transport()
            .mock_response(HttpMethod::Post, &url("/videos"), 200, json!({ "videos": [] }));
        let loaded = load(&api, DEFAULT_PLACE).await;
        assert!(loaded.is_fallback());
        assert_eq!(loaded.data.len(), 6);

        api.client()
            .transport()
            .mock_failure(HttpMethod::Post, &url("/videos"), "offline");
        let loaded = load(&api, DEFAULT_PLACE).await;
        assert!(loaded.is_fallback());
        assert_eq!(loaded.notice, Notice::offline());
    }

    #[tokio::test]
    async fn test_search() {
        let api = api();
        assert_eq!(search(&api, "  ").await, Ok(None));
        assert_eq!(api.client().transport().request_count(), 0);

        api.client()
            .transport()
            .mock_response(HttpMethod::Post, &url("/videos"), 200, one_video());
        let found = search(&api, "Kyoto").await.unwrap().unwrap();
        assert_eq!(found.place, "kyoto");
        assert_eq!(found.videos.len(), 1);

        api.client()
            .transport()
            .mock_response(HttpMethod::Post, &url("/videos"), 200, json!({ "videos": [] }));
        assert_eq!(
            search(&api, "nowhere").await.unwrap_err().message,
            "No videos found for this destination"
        );

        api.client()
            .transport()
            .mock_response(HttpMethod::Post, &url("/videos"), 502, json!({}));
        assert_eq!(
            search(&api, "kyoto").await.unwrap_err().message,
            "Search failed. Please try again."
        );
    }

    #[test]
    fn test_filter() {
        let videos = sample_videos();
        assert_eq!(filter(&videos, "all", "").len(), 6);
        assert_eq!(filter(&videos, "nature", "").len(), 2);
        let bali = filter(&videos, "nature", "bali");
        assert_eq!(bali.len(), 1);
        assert_eq!(bali[0].title, "Bali Beach Sunrise");
        assert_eq!(filter(&videos, "all", "NEPAL").len(), 1);
    }
}
