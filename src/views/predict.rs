//! AI 对话
//!
//! 模型不可用时由本地关键词规则生成回复并抽取实体。

use super::Notice;
use crate::api::TravellaApi;
use crate::request::HttpClient;
use chrono::{DateTime, Utc};
use travella_shared::PredictRequest;

pub const GREETING: &str = "Hi! I'm your Travella AI assistant. Ask me anything about travel planning, destinations, or get personalized recommendations!";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sender {
    User,
    Bot,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChatMessage {
    pub id: u32,
    pub sender: Sender,
    pub content: String,
    pub sent_at: DateTime<Utc>,
}

/// 预置的提问
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PromptSuggestion {
    pub text: &'static str,
    pub entities: &'static [&'static str],
}

pub const SUGGESTIONS: [PromptSuggestion; 4] = [
    PromptSuggestion {
        text: "Best places to visit in Nepal",
        entities: &["Nepal", "Places"],
    },
    PromptSuggestion {
        text: "Plan a 5-day trip to Bali",
        entities: &["5 days", "Bali", "Trip planning"],
    },
    PromptSuggestion {
        text: "Budget travel tips for Southeast Asia",
        entities: &["Budget", "Southeast Asia"],
    },
    PromptSuggestion {
        text: "Local food recommendations in Tokyo",
        entities: &["Food", "Tokyo", "Local"],
    },
];

/// 一次提问得到的回复
#[derive(Debug, Clone, PartialEq)]
pub struct BotReply {
    pub content: String,
    pub entities: Vec<String>,
    pub notice: Notice,
}

/// 请求模型回复，失败时用本地规则
pub async fn respond<C: HttpClient>(api: &TravellaApi<C>, text: &str) -> BotReply {
    let req = PredictRequest {
        text: text.to_string(),
    };
    match api.predict(&req).await {
        Ok(resp) => BotReply {
            content: resp
                .reply()
                .map(str::to_string)
                .unwrap_or_else(|| generate_reply(text).to_string()),
            entities: resp.detected_entities(),
            notice: Notice::success("AI response received!"),
        },
        Err(e) => {
            log::warn!("prediction failed, answering locally: {}", e);
            BotReply {
                content: generate_reply(text).to_string(),
                entities: extract_entities(text),
                notice: Notice::offline(),
            }
        }
    }
}

/// 对话状态
#[derive(Debug, Clone, PartialEq)]
pub struct ChatSession {
    pub messages: Vec<ChatMessage>,
    pub detected_entities: Vec<String>,
    pending: bool,
}

impl ChatSession {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            messages: vec![ChatMessage {
                id: 1,
                sender: Sender::Bot,
                content: GREETING.to_string(),
                sent_at: now,
            }],
            detected_entities: Vec::new(),
            pending: false,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    fn push(&mut self, sender: Sender, content: String, now: DateTime<Utc>) {
        let id = self.messages.len() as u32 + 1;
        self.messages.push(ChatMessage {
            id,
            sender,
            content,
            sent_at: now,
        });
    }

    /// 记录用户消息；空消息或上一条仍在等待时返回 `None`
    pub fn push_user(&mut self, text: &str, now: DateTime<Utc>) -> Option<String> {
        let text = text.trim();
        if text.is_empty() || self.pending {
            return None;
        }
        self.push(Sender::User, text.to_string(), now);
        self.pending = true;
        Some(text.to_string())
    }

    pub fn push_reply(&mut self, reply: BotReply, now: DateTime<Utc>) -> Notice {
        self.push(Sender::Bot, reply.content, now);
        self.detected_entities = reply.entities;
        self.pending = false;
        reply.notice
    }

    /// 选择预置提问时先展示它的实体
    pub fn pick_suggestion(&mut self, suggestion: &PromptSuggestion) -> String {
        self.detected_entities = suggestion.entities.iter().map(|e| e.to_string()).collect();
        suggestion.text.to_string()
    }

    pub async fn send<C: HttpClient>(
        &mut self,
        api: &TravellaApi<C>,
        text: &str,
        now: DateTime<Utc>,
    ) -> Option<Notice> {
        let text = self.push_user(text, now)?;
        let reply = respond(api, &text).await;
        Some(self.push_reply(reply, now))
    }
}

// =========================================================
// 本地规则
// =========================================================

const REPLY_NEPAL: &str = "Nepal is an incredible destination! Here are my top recommendations:\n\n\u{1F3D4}\u{FE0F} **Pokhara** - Perfect for adventure lovers with paragliding, trekking, and stunning lake views\n\u{1F3DB}\u{FE0F} **Kathmandu** - Rich cultural heritage with ancient temples and vibrant markets\n\u{1F338} **Chitwan National Park** - Amazing wildlife safari experiences\n\nBest time to visit: October to December and March to May. Would you like a detailed itinerary for any of these places?";

const REPLY_BALI: &str = "A 5-day Bali itinerary sounds amazing! Here's what I recommend:\n\n**Day 1-2: Ubud** - Rice terraces, monkey forest, traditional markets\n**Day 3-4: Seminyak** - Beautiful beaches, sunset bars, spa treatments\n**Day 5: Uluwatu** - Clifftop temple, kecak dance, beach clubs\n\nEstimated budget: $50-100/day per person. Should I create a detailed day-by-day plan for you?";

const REPLY_BUDGET: &str = "Great question about budget travel in Southeast Asia! Here are my top money-saving tips:\n\n\u{1F4B0} **Accommodation**: Hostels ($5-15/night) or guesthouses ($10-25/night)\n\u{1F35C} **Food**: Street food ($1-3/meal) and local warungs ($3-8/meal)\n\u{1F68C} **Transport**: Local buses and trains instead of private cars\n\u{1F3AF} **Activities**: Free walking tours, temples, markets, and beaches\n\nDaily budget: $20-40 per person. Which country interests you most?";

const REPLY_DEFAULT: &str = "That's a great question! Based on what you're asking about, I can help you with:\n\n\u{2708}\u{FE0F} Destination recommendations\n\u{1F4C5} Itinerary planning\n\u{1F4A1} Local insights and hidden gems\n\u{1F37D}\u{FE0F} Food and cultural experiences\n\u{1F4B0} Budget planning\n\nWhat specific aspect would you like to explore further?";

pub fn generate_reply(message: &str) -> &'static str {
    let lower = message.to_lowercase();
    if lower.contains("nepal") {
        REPLY_NEPAL
    } else if lower.contains("bali") {
        REPLY_BALI
    } else if lower.contains("budget") || lower.contains("cheap") {
        REPLY_BUDGET
    } else {
        REPLY_DEFAULT
    }
}

pub fn extract_entities(message: &str) -> Vec<String> {
    let lower = message.to_lowercase();
    let rules: [(&[&str], &str); 7] = [
        (&["nepal"], "Nepal"),
        (&["bali"], "Bali"),
        (&["tokyo"], "Tokyo"),
        (&["day", "week"], "Duration"),
        (&["food"], "Food"),
        (&["budget"], "Budget"),
        (&["adventure"], "Adventure"),
    ];
    rules
        .iter()
        .filter(|(keys, _)| keys.iter().any(|k| lower.contains(k)))
        .map(|(_, entity)| entity.to_string())
        .collect()
}
