use actix_web::{get, web, HttpResponse};
use askama::Template;
use serde::{Deserialize, Serialize};

use crate::{
    configuration::ScraperSettings,
    domain::Listing,
    services::{Aggregator, HttpFetcher, SourceFailure},
};

#[derive(Template)]
#[template(path = "search.html")]
pub struct SearchTemplate {
    pub keyword: String,
    pub page_count: u32,
    pub max_page_count: u32,
    pub searched: bool,
    pub listings: Vec<Listing>,
    pub failures: Vec<SourceFailure>,
}

impl SearchTemplate {
    pub fn empty(settings: &ScraperSettings) -> Self {
        SearchTemplate {
            keyword: String::new(),
            page_count: settings.default_page_count,
            max_page_count: settings.max_page_count,
            searched: false,
            listings: vec![],
            failures: vec![],
        }
    }
}

pub fn render(template: SearchTemplate) -> HttpResponse {
    match template.render() {
        Ok(body) => HttpResponse::Ok()
            .content_type("text/html; charset=utf-8")
            .body(body),
        Err(e) => {
            log::error!("Failed to render search page: {:?}", e);
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[derive(Deserialize)]
struct SearchQuery {
    keyword: Option<String>,
    pages: Option<u32>,
}

#[get("/search")]
async fn search(
    aggregator: web::Data<Aggregator<HttpFetcher>>,
    settings: web::Data<ScraperSettings>,
    query: web::Query<SearchQuery>,
) -> HttpResponse {
    let page_count = settings.page_count(query.pages);
    let keyword = query.keyword.clone().unwrap_or_default();

    let mut template = SearchTemplate::empty(&settings);
    template.page_count = page_count;

    if let Some((request, result)) = aggregator.search(&keyword, page_count).await {
        template.failures = result.failures();
        template.keyword = request.keyword;
        template.listings = result.listings;
        template.searched = true;
    }

    render(template)
}

#[derive(Serialize)]
struct SearchResponse {
    keyword: String,
    page_count: u32,
    listings: Vec<Listing>,
    failures: Vec<SourceFailure>,
}

#[get("/api/search")]
async fn api_search(
    aggregator: web::Data<Aggregator<HttpFetcher>>,
    settings: web::Data<ScraperSettings>,
    query: web::Query<SearchQuery>,
) -> HttpResponse {
    let page_count = settings.page_count(query.pages);
    let keyword = query.keyword.clone().unwrap_or_default();

    match aggregator.search(&keyword, page_count).await {
        Some((request, result)) => HttpResponse::Ok().json(SearchResponse {
            keyword: request.keyword,
            page_count: request.page_count,
            failures: result.failures(),
            listings: result.listings,
        }),
        None => HttpResponse::BadRequest().body("keyword must not be empty"),
    }
}

#[cfg(test)]
mod tests {
    use actix_web::{body::to_bytes, test, App};

    use crate::configuration::SourceSettings;

    use super::*;

    fn settings() -> ScraperSettings {
        ScraperSettings {
            user_agent: "Mozilla/5.0".to_string(),
            accept_language: "en-US".to_string(),
            default_page_count: 2,
            max_page_count: 5,
            request_timeout_secs: 1,
            source_deadline_secs: 1,
            delay_min_millis: 0,
            delay_max_millis: 0,
        }
    }

    fn aggregator() -> Aggregator<HttpFetcher> {
        let sources = SourceSettings {
            feebee: "http://127.0.0.1:9/s/".to_string(),
            pchome: "http://127.0.0.1:9/results".to_string(),
            amazon: "http://127.0.0.1:9/s".to_string(),
            ebay: "http://127.0.0.1:9/sch/i.html".to_string(),
        };
        let settings = settings();
        Aggregator::new(HttpFetcher::new(&settings).unwrap(), &sources, &settings)
    }

    #[actix_web::test]
    async fn blank_keyword_renders_only_the_form() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(aggregator()))
                .app_data(web::Data::new(settings()))
                .service(search),
        )
        .await;

        let req = test::TestRequest::get().uri("/search?keyword=%20").to_request();
        let res = test::call_service(&app, req).await;

        assert!(res.status().is_success());
        let body = to_bytes(res.into_body()).await.unwrap();
        let body = std::str::from_utf8(&body).unwrap();
        assert!(body.contains("<form"));
        assert!(!body.contains("<table>"));
    }

    #[actix_web::test]
    async fn zero_pages_renders_an_empty_table() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(aggregator()))
                .app_data(web::Data::new(settings()))
                .service(search),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/search?keyword=usb&pages=0")
            .to_request();
        let res = test::call_service(&app, req).await;

        let body = to_bytes(res.into_body()).await.unwrap();
        let body = std::str::from_utf8(&body).unwrap();
        assert!(body.contains("<table>"));
        assert!(body.contains(r#"0 results for "usb""#));
    }

    #[actix_web::test]
    async fn api_rejects_blank_keyword() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(aggregator()))
                .app_data(web::Data::new(settings()))
                .service(api_search),
        )
        .await;

        let req = test::TestRequest::get().uri("/api/search").to_request();
        let res = test::call_service(&app, req).await;

        assert_eq!(res.status(), actix_web::http::StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn api_returns_json_for_zero_pages() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(aggregator()))
                .app_data(web::Data::new(settings()))
                .service(api_search),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/api/search?keyword=usb&pages=0")
            .to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["keyword"], "usb");
        assert_eq!(body["page_count"], 0);
        assert_eq!(body["listings"], serde_json::json!([]));
        assert_eq!(body["failures"], serde_json::json!([]));
    }
}
