use std::sync::Arc;

use publico::app::PublicoError;
use publico::config::ApiConfig;
use publico::fetcher::http_fetcher::HttpFetcher;
use publico::fetcher::PublicoClient;
use publico::normalizer::Normalizer;
use tokio_util::sync::CancellationToken;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn client_for(server: &MockServer) -> PublicoClient {
    let config = ApiConfig {
        base_url: server.uri(),
        timeout_secs: 5,
        ..Default::default()
    };
    let fetcher = HttpFetcher::new(&config).unwrap();
    PublicoClient::new(Arc::new(fetcher), &config.base_url)
}

#[tokio::test]
async fn latest_headlines_are_decoded_and_normalized() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/list/ultimas"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"[
                {"id": 2075123, "titulo": "Governo anuncia", "url": "https://www.publico.pthttps//www.publico.pt/noticia/governo-anuncia-2075123",
                 "autores": [{"nome": "Ana"}, {"nome": "Rui"}], "tags": ["Política", {"nome": "Economia"}, "undefined"]},
                "not an article",
                {"titulo": "Sem ID"}
            ]"#,
        ))
        .expect(1)
        .mount(&server)
        .await;

    let articles = client_for(&server).await.latest().await.unwrap();
    assert_eq!(articles.len(), 2);

    let view = Normalizer::new().normalize(&articles[0]);
    assert_eq!(view.id.as_deref(), Some("2075123"));
    assert_eq!(view.url, "https://www.publico.pt/noticia/governo-anuncia-2075123");
    assert_eq!(view.authors, "Ana, Rui");
    assert_eq!(view.tags, vec!["Política", "Economia"]);
}

#[tokio::test]
async fn non_array_list_is_empty() {
    let server = MockServer::start().await;
    Mock::given(path("/list/destaque"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"message": "maintenance"}"#))
        .mount(&server)
        .await;

    assert!(client_for(&server).await.top().await.unwrap().is_empty());
}

#[tokio::test]
async fn server_error_carries_status() {
    let server = MockServer::start().await;
    Mock::given(path("/list/ultimas"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    match client_for(&server).await.latest().await {
        Err(PublicoError::Status { status, reason, url }) => {
            assert_eq!(status, 500);
            assert_eq!(reason, "Internal Server Error");
            assert!(url.ends_with("/list/ultimas"));
        }
        other => panic!("expected status error, got {:?}", other),
    }
}

#[tokio::test]
async fn search_sends_encoded_query() {
    let server = MockServer::start().await;
    Mock::given(path("/list/search"))
        .and(query_param("query", "São Bento"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"[{"id": 1}]"#))
        .expect(1)
        .mount(&server)
        .await;

    let articles = client_for(&server).await.search("São Bento").await.unwrap();
    assert_eq!(articles.len(), 1);
}

#[tokio::test]
async fn blank_search_makes_no_request() {
    let server = MockServer::start().await;
    Mock::given(path("/list/search"))
        .respond_with(ResponseTemplate::new(200).set_body_string("[]"))
        .expect(0)
        .mount(&server)
        .await;

    assert!(client_for(&server).await.search("  ").await.unwrap().is_empty());
}

#[tokio::test]
async fn empty_detail_is_not_found() {
    let server = MockServer::start().await;
    Mock::given(path("/content/news/42"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    assert_eq!(client_for(&server).await.detail("42", None).await.unwrap(), None);
}

#[tokio::test]
async fn truncated_detail_is_not_found() {
    let server = MockServer::start().await;
    Mock::given(path("/content/news/42"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"id": 42, "titulo": "Corta"#))
        .mount(&server)
        .await;

    assert_eq!(client_for(&server).await.detail("42", None).await.unwrap(), None);
}

#[tokio::test]
async fn non_object_detail_is_not_found() {
    let server = MockServer::start().await;
    Mock::given(path("/content/news/42"))
        .respond_with(ResponseTemplate::new(200).set_body_string("[]"))
        .mount(&server)
        .await;

    assert_eq!(client_for(&server).await.detail("42", None).await.unwrap(), None);
}

#[tokio::test]
async fn detail_is_decoded() {
    let server = MockServer::start().await;
    Mock::given(path("/content/news/42"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"{"id": 42, "titulo": "Cimeira", "lead": "<b>Entrada</b>", "body": "<p>Texto</p>"}"#,
        ))
        .mount(&server)
        .await;

    let article = client_for(&server).await.detail("42", None).await.unwrap().unwrap();
    let view = Normalizer::new().normalize(&article);
    assert_eq!(view.title, "Cimeira");
    assert_eq!(view.lead.as_deref(), Some("Entrada"));
    assert_eq!(view.body.as_deref(), Some("Texto"));
}

#[tokio::test]
async fn cancelled_detail_is_reported_as_cancellation() {
    let server = MockServer::start().await;
    Mock::given(path("/content/news/42"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(r#"{"id": 42}"#)
                .set_delay(std::time::Duration::from_secs(2)),
        )
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let token = CancellationToken::new();
    let canceller = token.clone();
    tokio::spawn(async move {
        tokio::time::sleep(std::time::Duration::from_millis(50)).await;
        canceller.cancel();
    });

    let err = client.detail("42", Some(&token)).await.unwrap_err();
    assert!(err.is_cancelled());
}
