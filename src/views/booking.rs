use super::{Loaded, Notice};
use crate::api::TravellaApi;
use crate::request::HttpClient;
use crate::session::UserSession;
use crate::storage::KeyValueStore;
use chrono::NaiveDate;
use travella_shared::{
    BookingCreateRequest, BookingKind, BookingRecord, FlightOffer, FlightSearchRequest, HotelOffer,
    HotelSearchRequest, RecordId,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BookingTab {
    #[default]
    Flights,
    Hotels,
}

/// 搜索表单；日期为 `YYYY-MM-DD`
#[derive(Debug, Clone, PartialEq)]
pub struct BookingForm {
    pub from: String,
    pub to: String,
    pub date: String,
    pub travelers: u32,
}

impl Default for BookingForm {
    fn default() -> Self {
        Self {
            from: "Kathmandu (KTM)".to_string(),
            to: "Pokhara (PKR)".to_string(),
            date: String::new(),
            travelers: 2,
        }
    }
}

impl BookingForm {
    fn is_complete(&self) -> bool {
        !self.from.trim().is_empty() && !self.to.trim().is_empty() && !self.date.trim().is_empty()
    }

    /// "Pokhara (PKR)" -> "pokhara"
    fn city(field: &str) -> String {
        field
            .split_whitespace()
            .next()
            .unwrap_or_default()
            .to_lowercase()
    }

    fn check_in(&self, today: NaiveDate) -> NaiveDate {
        let date = self.date.trim();
        if date.is_empty() {
            return today;
        }
        NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap_or_else(|e| {
            log::warn!("invalid check-in date '{}': {}, using today", date, e);
            today
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Offers {
    Flights(Vec<FlightOffer>),
    Hotels(Vec<HotelOffer>),
}

impl Offers {
    pub fn len(&self) -> usize {
        match self {
            Offers::Flights(f) => f.len(),
            Offers::Hotels(h) => h.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// 某个标签页的示例数据
pub fn sample_offers(tab: BookingTab) -> Offers {
    match tab {
        BookingTab::Flights => Offers::Flights(sample_flights()),
        BookingTab::Hotels => Offers::Hotels(sample_hotels()),
    }
}

/// 按标签页搜索航班或酒店；服务端无结果或失败时使用示例数据
pub async fn search<C: HttpClient>(
    api: &TravellaApi<C>,
    form: &BookingForm,
    tab: BookingTab,
) -> Result<Loaded<Offers>, Notice> {
    if !form.is_complete() {
        return Err(Notice::error("Please fill in all search fields"));
    }

    let date = form.date.trim().to_string();
    let result = match tab {
        BookingTab::Flights => {
            let req = FlightSearchRequest {
                origin: BookingForm::city(&form.from),
                destination: BookingForm::city(&form.to),
                date,
                pax: form.travelers,
            };
            api.search_flights(&req)
                .await
                .map(|resp| Offers::Flights(resp.flights))
        }
        BookingTab::Hotels => {
            let req = HotelSearchRequest {
                city: BookingForm::city(&form.to),
                pax: form.travelers,
                date,
            };
            api.search_hotels(&req)
                .await
                .map(|resp| Offers::Hotels(resp.hotels))
        }
    };

    match result {
        Ok(offers) => {
            let offers = if offers.is_empty() {
                sample_offers(tab)
            } else {
                offers
            };
            Ok(Loaded::live(offers, "Search completed successfully!"))
        }
        Err(e) => {
            log::warn!("booking search failed: {}", e);
            Ok(Loaded::fallback(sample_offers(tab)))
        }
    }
}

/// 可预订条目
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bookable {
    pub kind: BookingKind,
    pub price: f64,
}

impl From<&FlightOffer> for Bookable {
    fn from(f: &FlightOffer) -> Self {
        Self {
            kind: BookingKind::Flight,
            price: f.price,
        }
    }
}

impl From<&HotelOffer> for Bookable {
    fn from(h: &HotelOffer) -> Self {
        Self {
            kind: BookingKind::Hotel,
            price: h.price,
        }
    }
}

/// 创建预订，需要已登录；未填日期时以 `today` 入住
pub async fn book<C: HttpClient, S: KeyValueStore>(
    session: &UserSession<C, S>,
    item: Bookable,
    form: &BookingForm,
    today: NaiveDate,
) -> Result<(BookingRecord, Notice), Notice> {
    let (token, generation) = session
        .authorized()
        .map_err(|_| Notice::error("Please sign in to make a booking"))?;

    let req = BookingCreateRequest {
        kind: item.kind,
        destination: form.to.trim().to_string(),
        check_in: form.check_in(today),
        travelers: form.travelers,
        budget: item.price,
    };
    let result = session.api().create_booking(&token, &req).await;

    if !session.is_current(generation) {
        return Err(Notice::error("Please sign in to make a booking"));
    }
    match result {
        Ok(record) => {
            let label = match item.kind {
                BookingKind::Flight => "Flight",
                BookingKind::Hotel => "Hotel",
            };
            Ok((record, Notice::success(format!("{} booking confirmed!", label))))
        }
        Err(e) => {
            log::warn!("booking failed: {}", e);
            Err(Notice::error("Failed to create booking. Please try again."))
        }
    }
}

/// 当前用户的预订；未登录或失败时为空
pub async fn my_bookings<C: HttpClient, S: KeyValueStore>(
    session: &UserSession<C, S>,
) -> Vec<BookingRecord> {
    let Ok((token, generation)) = session.authorized() else {
        return Vec::new();
    };
    match session.api().user_bookings(&token).await {
        Ok(list) if session.is_current(generation) => list,
        Ok(_) => Vec::new(),
        Err(e) => {
            log::warn!("loading bookings failed: {}", e);
            Vec::new()
        }
    }
}

// =========================================================
// 示例数据
// =========================================================

fn flight(id: u64, airline: &str, logo: &str, departure: &str, arrival: &str, price: f64, partner: &str) -> FlightOffer {
    FlightOffer {
        id: RecordId::Number(id),
        airline: airline.to_string(),
        logo: logo.to_string(),
        route: "KTM \u{2192} PKR".to_string(),
        departure: departure.to_string(),
        arrival: arrival.to_string(),
        duration: "45m".to_string(),
        price,
        cabin: "Economy".to_string(),
        stops: "Direct".to_string(),
        partner: partner.to_string(),
    }
}

pub fn sample_flights() -> Vec<FlightOffer> {
    vec![
        flight(1, "Nepal Airlines", "\u{2708}\u{FE0F}", "08:30", "09:15", 89.0, "Expedia"),
        flight(2, "Buddha Air", "\u{1F6E9}\u{FE0F}", "14:20", "15:05", 95.0, "Booking.com"),
        flight(3, "Yeti Airlines", "\u{1F3D4}\u{FE0F}", "16:45", "17:30", 92.0, "Kayak"),
    ]
}

#[allow(clippy::too_many_arguments)]
fn hotel(
    id: u64,
    name: &str,
    rating: f32,
    reviews: u32,
    location: &str,
    price: f64,
    original_price: f64,
    amenities: &[&str],
    partner: &str,
    deal: &str,
) -> HotelOffer {
    HotelOffer {
        id: RecordId::Number(id),
        name: name.to_string(),
        rating,
        reviews,
        location: location.to_string(),
        image: "https://images.unsplash.com/photo-1563418536438-e08af0d644ea?fit=max&w=1080".to_string(),
        price,
        original_price: Some(original_price),
        amenities: amenities.iter().map(|a| a.to_string()).collect(),
        partner: partner.to_string(),
        deal: Some(deal.to_string()),
    }
}

pub fn sample_hotels() -> Vec<HotelOffer> {
    vec![
        hotel(1, "Mountain View Resort", 4.8, 2847, "Lakeside, Pokhara", 85.0, 120.0, &["wifi", "coffee", "parking"], "Hotels.com", "20% OFF"),
        hotel(2, "Lakeside Paradise Hotel", 4.6, 1923, "Phewa Lake, Pokhara", 65.0, 85.0, &["wifi", "coffee"], "Agoda", "Free Breakfast"),
        hotel(3, "Himalayan Boutique Lodge", 4.9, 856, "Old Bazaar, Pokhara", 125.0, 150.0, &["wifi", "coffee", "parking"], "Booking.com", "Luxury Experience"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::ApiClient;
    use crate::request::{HttpMethod, MockHttpClient};
    use crate::storage::MemoryStorage;
    use crate::views::DataSource;
    use crate::views::testing::{api, url};
    use serde_json::json;
    use std::rc::Rc;

    fn form() -> BookingForm {
        BookingForm {
            date: "2025-03-14".to_string(),
            ..Default::default()
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, 2).unwrap()
    }

    async fn signed_in() -> UserSession<MockHttpClient, MemoryStorage> {
        let api = Rc::new(TravellaApi::new(ApiClient::new("http://api.test", MockHttpClient::new())));
        api.client().transport().mock_response(
            HttpMethod::Post,
            "http://api.test/auth/login",
            200,
            json!({ "access_token": "t1", "user": { "username": "alice", "email": "a@x.com" } }),
        );
        let session = UserSession::new(api, MemoryStorage::new(), "user_token");
        session.login("alice", "pw").await.unwrap();
        session
    }

    #[tokio::test]
    async fn test_search_hotels_tab() {
        let api = api();
        api.client().transport().mock_response(
            HttpMethod::Post,
            &url("/book/hotels/enhanced"),
            200,
            json!({ "title": "Hotels in Pokhara", "hotels": [{ "id": 7, "name": "Fish Tail Lodge", "price": 110.0, "deal": null }] }),
        );

        let loaded = search(&api, &form(), BookingTab::Hotels).await.unwrap();
        assert_eq!(loaded.source, DataSource::Live);
        match loaded.data {
            Offers::Hotels(h) => {
                assert_eq!(h[0].name, "Fish Tail Lodge");
                assert_eq!(h[0].deal, None);
            }
            other => panic!("unexpected {:?}", other),
        }

        let transport = api.client().transport();
        assert_eq!(transport.request_count(), 1);
        let body = transport.requests_to(&url("/book/hotels/enhanced"))[0].json_body();
        assert_eq!(body, json!({ "city": "pokhara", "pax": 2, "date": "2025-03-14" }));
    }

    #[tokio::test]
    async fn test_search_flights_tab() {
        let api = api();
        api.client().transport().mock_response(
            HttpMethod::Post,
            &url("/book/flights/enhanced"),
            200,
            json!({ "flights": [{ "id": 5, "airline": "Shree Airlines", "price": 99.0, "class": "Economy" }] }),
        );

        let loaded = search(&api, &form(), BookingTab::Flights).await.unwrap();
        match loaded.data {
            Offers::Flights(f) => {
                assert_eq!(f.len(), 1);
                assert_eq!(f[0].airline, "Shree Airlines");
            }
            other => panic!("unexpected {:?}", other),
        }

        let body = api.client().transport().requests_to(&url("/book/flights/enhanced"))[0].json_body();
        assert_eq!(
            body,
            json!({ "origin": "kathmandu", "destination": "pokhara", "date": "2025-03-14", "pax": 2 })
        );
    }

    #[tokio::test]
    async fn test_search_falls_back_per_tab() {
        let api = api();
        api.client().transport().mock_response(
            HttpMethod::Post,
            &url("/book/flights/enhanced"),
            200,
            json!({ "flights": [] }),
        );
        let loaded = search(&api, &form(), BookingTab::Flights).await.unwrap();
        assert_eq!(loaded.source, DataSource::Live);
        assert_eq!(loaded.data, Offers::Flights(sample_flights()));

        api.client()
            .transport()
            .mock_failure(HttpMethod::Post, &url("/book/hotels/enhanced"), "offline");
        let loaded = search(&api, &form(), BookingTab::Hotels).await.unwrap();
        assert!(loaded.is_fallback());
        assert_eq!(loaded.data, Offers::Hotels(sample_hotels()));
    }

    #[tokio::test]
    async fn test_incomplete_form_rejected() {
        let api = api();
        let err = search(&api, &BookingForm::default(), BookingTab::Flights)
            .await
            .unwrap_err();
        assert_eq!(err.message, "Please fill in all search fields");
        assert_eq!(api.client().transport().request_count(), 0);
    }

    #[tokio::test]
    async fn test_book_requires_sign_in() {
        let api = Rc::new(api());
        let session = UserSession::new(Rc::clone(&api), MemoryStorage::new(), "user_token");
        let item = Bookable::from(&sample_flights()[0]);

        let err = book(&session, item, &form(), today()).await.unwrap_err();
        assert_eq!(err.message, "Please sign in to make a booking");
        assert_eq!(api.client().transport().request_count(), 0);
    }

    #[tokio::test]
    async fn test_book_flight() {
        let session = signed_in().await;
        let transport = session.api().client().transport();
        transport.mock_response(
            HttpMethod::Post,
            "http://api.test/bookings",
            200,
            json!({ "id": 42, "type": "flight", "destination": "Pokhara (PKR)", "status": "confirmed" }),
        );

        let item = Bookable::from(&sample_flights()[1]);
        let no_date = BookingForm::default();
        let (record, notice) = book(&session, item, &no_date, today()).await.unwrap();
        assert_eq!(record.id, RecordId::Number(42));
        assert_eq!(notice.message, "Flight booking confirmed!");

        let sent = &transport.requests_to("http://api.test/bookings")[0];
        assert_eq!(sent.header("Authorization"), Some("Bearer t1"));
        assert_eq!(
            sent.json_body(),
            json!({
                "type": "flight",
                "destination": "Pokhara (PKR)",
                "check_in": "2025-01-02",
                "travelers": 2,
                "budget": 95.0
            })
        );
    }

    #[tokio::test]
    async fn test_my_bookings() {
        let session = signed_in().await;
        session.api().client().transport().mock_response(
            HttpMethod::Get,
            "http://api.test/bookings",
            200,
            json!([{ "id": "b-1", "destination": "Bali" }]),
        );
        let list = my_bookings(&session).await;
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].destination, "Bali");

        session.sign_out();
        assert!(my_bookings(&session).await.is_empty());
    }
}
