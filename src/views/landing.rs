use super::Notice;
use crate::api::TravellaApi;
use crate::request::HttpClient;
use crate::router::Screen;
use travella_shared::PredictRequest;

/// 搜索后要前往的屏幕及提示
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResult {
    pub next: Screen,
    pub notice: Option<Notice>,
}

/// 首页搜索
///
/// 模型给出回答时前往 AI 对话，否则前往行程规划；请求失败时同样前往规划并提示离线。
/// 空查询直接返回错误提示，不发请求。
pub async fn search<C: HttpClient>(api: &TravellaApi<C>, query: &str) -> Result<SearchResult, Notice> {
    let query = query.trim();
    if query.is_empty() {
        return Err(Notice::error("Please enter a search query"));
    }

    let req = PredictRequest {
        text: query.to_string(),
    };
    match api.predict(&req).await {
        Ok(resp) if resp.reply().is_some() => Ok(SearchResult {
            next: Screen::Predict,
            notice: Some(Notice::success("AI found relevant information!")),
        }),
        Ok(_) => Ok(SearchResult {
            next: Screen::Planner,
            notice: None,
        }),
        Err(e) => {
            log::warn!("search failed: {}", e);
            Ok(SearchResult {
                next: Screen::Planner,
                notice: Some(Notice::offline()),
            })
        }
    }
}

/// 输入超过两个字符后给出的补全建议
pub fn suggestions(input: &str) -> Vec<String> {
    let input = input.trim();
    if input.chars().count() <= 2 {
        return Vec::new();
    }
    vec![
        format!("Plan 3 days in {}", input),
        format!("Best places to visit in {}", input),
        format!("Things to do in {}", input),
        format!("Hotels in {}", input),
        format!("Weather in {}", input),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::HttpMethod;
    use crate::views::testing::{api, url};
    use serde_json::json;

    #[tokio::test]
    async fn test_llm_reply_goes_to_chat() {
        let api = api();
        api.client().transport().mock_response(
            HttpMethod::Post,
            &url("/predict"),
            200,
            json!({ "intent": "plan", "llm_response": "Pokhara is lovely" }),
        );
        let result = search(&api, "pokhara").await.unwrap();
        assert_eq!(result.next, Screen::Predict);
    }

    #[tokio::test]
    async fn test_no_reply_goes_to_planner() {
        let api = api();
        api.client().transport().mock_response(
            HttpMethod::Post,
            &url("/predict"),
            200,
            json!({ "intent": "plan", "llm_response": null }),
        );
        let result = search(&api, "pokhara").await.unwrap();
        assert_eq!(result.next, Screen::Planner);
        assert_eq!(result.notice, None);
    }

    #[tokio::test]
    async fn test_offline_goes_to_planner_with_notice() {
        let api = api();
        api.client()
            .transport()
            .mock_failure(HttpMethod::Post, &url("/predict"), "offline");
        let result = search(&api, "pokhara").await.unwrap();
        assert_eq!(result.next, Screen::Planner);
        assert_eq!(result.notice, Some(Notice::offline()));
    }

    #[tokio::test]
    async fn test_blank_query_sends_nothing() {
        let api = api();
        let err = search(&api, "   ").await.unwrap_err();
        assert_eq!(err.message, "Please enter a search query");
        assert_eq!(api.client().transport().request_count(), 0);
    }

    #[test]
    fn test_suggestions() {
        assert!(suggestions("ba").is_empty());
        let list = suggestions("Bali");
        assert_eq!(list.len(), 5);
        assert_eq!(list[0], "Plan 3 days in Bali");
    }
}
