use newsletter_generator::news::{top_sources, NewsApiClient, NewsLookup, TOP_SOURCES};
use newsletter_generator::NewsletterError;
use serde_json::{json, Value};
use std::time::Duration;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn api_article(source: &str, title: &str) -> Value {
    json!({
        "source": { "id": null, "name": source },
        "author": "Someone",
        "title": title,
        "description": format!("About {}", title),
        "url": format!("https://news.example/{}", title),
        "urlToImage": null,
        "publishedAt": "2024-03-07T09:00:00Z",
        "content": "..."
    })
}

fn client_for(server: &MockServer, key: Option<&str>) -> NewsApiClient {
    NewsApiClient::new(
        key,
        &format!("{}/v2/everything", server.uri()),
        Duration::from_secs(5),
    )
    .expect("Failed to build news client")
}

#[tokio::test]
async fn searches_most_recent_five_and_ranks_sources() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v2/everything"))
        .and(query_param("q", "AI and Data Analytics"))
        .and(query_param("sortBy", "publishedAt"))
        .and(query_param("pageSize", "5"))
        .and(query_param("apiKey", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "ok",
            "totalResults": 5,
            "articles": [
                api_article("A", "one"),
                api_article("A", "two"),
                api_article("B", "three"),
                api_article("C", "four"),
                api_article("A", "five"),
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let articles = client_for(&server, Some("test-key"))
        .search("AI and Data Analytics")
        .await
        .expect("search should succeed");

    assert_eq!(articles.len(), 5);
    assert_eq!(articles[0].title, "one");
    assert_eq!(articles[0].source_name, "A");
    assert_eq!(articles[0].published_at, "2024-03-07T09:00:00Z");
    assert_eq!(articles[0].description, "About one");
    assert_eq!(articles[0].url, "https://news.example/one");

    assert_eq!(
        top_sources(&articles, TOP_SOURCES),
        vec![
            ("A".to_string(), 3),
            ("B".to_string(), 1),
            ("C".to_string(), 1)
        ]
    );
}

#[tokio::test]
async fn missing_key_is_configuration_error_without_request() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let client = client_for(&server, None);
    assert!(!client.is_available());

    let err = client.search("anything").await.expect_err("Expected failure");
    assert!(matches!(err, NewsletterError::Configuration(m) if m.contains("NEWS_API_KEY")));
}

#[tokio::test]
async fn non_success_status_is_lookup_failure() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v2/everything"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "status": "error",
            "code": "apiKeyInvalid",
            "message": "Your API key is invalid"
        })))
        .mount(&server)
        .await;

    let err = client_for(&server, Some("bad"))
        .search("AI")
        .await
        .expect_err("Expected failure");

    match err {
        NewsletterError::NewsLookupFailed(message) => {
            assert!(message.contains("401"));
            assert!(message.contains("apiKeyInvalid"));
        }
        other => panic!("Unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn malformed_article_is_lookup_failure() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v2/everything"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "ok",
            "articles": [
                { "title": "no source", "publishedAt": "x", "description": "d", "url": "u" }
            ]
        })))
        .mount(&server)
        .await;

    let err = client_for(&server, Some("key"))
        .search("AI")
        .await
        .expect_err("Expected failure");

    assert!(matches!(err, NewsletterError::NewsLookupFailed(m) if m.contains("parse")));
}

#[tokio::test]
async fn extra_articles_are_cut_to_page_size() {
    let server = MockServer::start().await;
    let articles: Vec<Value> = (0..7)
        .map(|i| api_article("Wire", &format!("story-{}", i)))
        .collect();

    Mock::given(method("GET"))
        .and(path("/v2/everything"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "status": "ok", "articles": articles })),
        )
        .mount(&server)
        .await;

    let found = client_for(&server, Some("key")).search("AI").await.unwrap();

    assert_eq!(found.len(), 5);
}
