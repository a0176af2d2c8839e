use std::time::Duration;

use wikiterm::source::{ArticleSource, LookupOutcome, SourceError, WikipediaSource};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path, query_param},
};

// ============================================================================
// Helper Functions
// ============================================================================

/// Creates a source pointed at the mock server's API endpoint
fn create_source(server: &MockServer) -> WikipediaSource {
    WikipediaSource::new(
        format!("{}/w/api.php", server.uri()),
        "https://en.wikipedia.org/wiki/",
        "wikiterm-tests",
        Duration::from_secs(5),
    )
    .unwrap()
}

fn json(body: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_raw(body, "application/json")
}

// ============================================================================
// Lookup Outcomes
// ============================================================================

#[tokio::test]
async fn test_lookup_found_article() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/w/api.php"))
        .and(query_param("action", "query"))
        .and(query_param("prop", "extracts|pageprops"))
        .and(query_param("titles", "cat"))
        .respond_with(json(
            r#"{"batchcomplete":true,"query":{
                "redirects":[{"from":"cat","to":"Cat"}],
                "pages":[{"pageid":6678,"ns":0,"title":"Cat",
                          "extract":"The cat is a small mammal.\n\n== Etymology ==\nFrom Latin."}]
            }}"#,
        ))
        .expect(1)
        .mount(&mock_server)
        .await;

    let source = create_source(&mock_server);
    let outcome = source.lookup("cat").await.unwrap();

    assert_eq!(
        outcome,
        LookupOutcome::Found {
            title: "Cat".to_string(),
            body: "The cat is a small mammal.\n\n== Etymology ==\nFrom Latin.".to_string(),
        }
    );
}

#[tokio::test]
async fn test_lookup_missing_page_is_not_found() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/w/api.php"))
        .respond_with(json(
            r#"{"batchcomplete":true,"query":{"pages":[
                {"ns":0,"title":"Xyzzynotarealpage","missing":true}
            ]}}"#,
        ))
        .mount(&mock_server)
        .await;

    let source = create_source(&mock_server);
    let outcome = source.lookup("xyzzynotarealpage").await.unwrap();
    assert_eq!(outcome, LookupOutcome::NotFound);
}

#[tokio::test]
async fn test_lookup_invalid_title_is_not_found() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/w/api.php"))
        .respond_with(json(
            r#"{"query":{"pages":[{"title":"a|b","invalidreason":"bad","invalid":true}]}}"#,
        ))
        .mount(&mock_server)
        .await;

    let source = create_source(&mock_server);
    assert_eq!(source.lookup("a|b").await.unwrap(), LookupOutcome::NotFound);
}

#[tokio::test]
async fn test_lookup_disambiguation_fetches_links() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/w/api.php"))
        .and(query_param("prop", "extracts|pageprops"))
        .respond_with(json(
            r#"{"query":{"pages":[{"pageid":19,"ns":0,"title":"Mercury",
                "extract":"Mercury may refer to:",
                "pageprops":{"disambiguation":""}}]}}"#,
        ))
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/w/api.php"))
        .and(query_param("prop", "links"))
        .and(query_param("titles", "Mercury"))
        .respond_with(json(
            r#"{"query":{"pages":[{"pageid":19,"ns":0,"title":"Mercury","links":[
                {"ns":0,"title":"Mercury (planet)"},
                {"ns":0,"title":"Mercury (element)"},
                {"ns":0,"title":"Mercury (mythology)"}
            ]}]}}"#,
        ))
        .expect(1)
        .mount(&mock_server)
        .await;

    let source = create_source(&mock_server);
    let outcome = source.lookup("Mercury").await.unwrap();

    assert_eq!(
        outcome,
        LookupOutcome::Disambiguation {
            options: vec![
                "Mercury (planet)".to_string(),
                "Mercury (element)".to_string(),
                "Mercury (mythology)".to_string(),
            ]
        }
    );
}

#[tokio::test]
async fn test_lookup_disambiguation_follows_link_continuation() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/w/api.php"))
        .and(query_param("prop", "extracts|pageprops"))
        .respond_with(json(
            r#"{"query":{"pages":[{"pageid":19,"ns":0,"title":"Mercury",
                "pageprops":{"disambiguation":""}}]}}"#,
        ))
        .mount(&mock_server)
        .await;
    // Second batch, requested with the continuation token
    Mock::given(method("GET"))
        .and(path("/w/api.php"))
        .and(query_param("prop", "links"))
        .and(query_param("plcontinue", "19|0|Mercury_(element)"))
        .respond_with(json(
            r#"{"query":{"pages":[{"pageid":19,"ns":0,"title":"Mercury","links":[
                {"ns":0,"title":"Mercury (element)"}
            ]}]}}"#,
        ))
        .with_priority(1)
        .expect(1)
        .mount(&mock_server)
        .await;
    // First batch, cut at the limit
    Mock::given(method("GET"))
        .and(path("/w/api.php"))
        .and(query_param("prop", "links"))
        .respond_with(json(
            r#"{"continue":{"plcontinue":"19|0|Mercury_(element)","continue":"||"},
                "query":{"pages":[{"pageid":19,"ns":0,"title":"Mercury","links":[
                {"ns":0,"title":"Mercury (planet)"}
            ]}]}}"#,
        ))
        .expect(1)
        .mount(&mock_server)
        .await;

    let source = create_source(&mock_server);
    let outcome = source.lookup("Mercury").await.unwrap();

    assert_eq!(
        outcome,
        LookupOutcome::Disambiguation {
            options: vec![
                "Mercury (planet)".to_string(),
                "Mercury (element)".to_string(),
            ]
        }
    );
}

// ============================================================================
// Error Handling
// ============================================================================

#[tokio::test]
async fn test_lookup_http_error() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/w/api.php"))
        .respond_with(ResponseTemplate::new(503).set_body_string("Service Unavailable"))
        .mount(&mock_server)
        .await;

    let source = create_source(&mock_server);
    let result = source.lookup("cat").await;

    match result {
        Err(SourceError::Api { status, message }) => {
            assert_eq!(status, 503);
            assert!(message.contains("Service Unavailable"));
        }
        other => panic!("Expected Api error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_lookup_api_error_body() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/w/api.php"))
        .respond_with(json(
            r#"{"error":{"code":"ratelimited","info":"You've exceeded your rate limit."}}"#,
        ))
        .mount(&mock_server)
        .await;

    let source = create_source(&mock_server);
    let result = source.lookup("cat").await;

    assert!(
        matches!(result, Err(SourceError::Api { ref message, .. }) if message.starts_with("ratelimited"))
    );
}

#[tokio::test]
async fn test_lookup_malformed_json() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/w/api.php"))
        .respond_with(json("<html>not json</html>"))
        .mount(&mock_server)
        .await;

    let source = create_source(&mock_server);
    let result = source.lookup("cat").await;
    assert!(matches!(result, Err(SourceError::Parse(_))));
}

#[tokio::test]
async fn test_lookup_connection_refused() {
    // Port 1 is reserved; nothing listens there
    let source = WikipediaSource::new(
        "http://127.0.0.1:1/w/api.php",
        "https://en.wikipedia.org/wiki/",
        "wikiterm-tests",
        Duration::from_secs(5),
    )
    .unwrap();

    let result = source.lookup("cat").await;
    assert!(matches!(result, Err(SourceError::Network(_))));
}

#[tokio::test]
async fn test_article_url_uses_underscores() {
    let mock_server = MockServer::start().await;
    let source = create_source(&mock_server);
    assert_eq!(
        source.article_url("Mercury (planet)"),
        "https://en.wikipedia.org/wiki/Mercury_(planet)"
    );
}
