use std::time::Duration;

use pretty_assertions::assert_eq;
use serde_json::json;
use vacancy_core::{FetchFailure, ResponseMapper, SearchRequest};
use vacancy_engine::{ApiSettings, FailureKind, ReqwestVacancyApi, VacancyApi};
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn api_for(server: &MockServer) -> ReqwestVacancyApi {
    ReqwestVacancyApi::new(ApiSettings {
        base_url: server.uri(),
        user_agent: "vacancy-tests/1.0".to_string(),
        ..ApiSettings::default()
    })
    .expect("client builds")
}

fn request(query: &str, page: u32) -> SearchRequest {
    SearchRequest {
        query: query.to_string(),
        industry_id: None,
        page,
    }
}

#[tokio::test]
async fn search_sends_query_and_decodes_page() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/vacancies"))
        .and(query_param("text", "rust"))
        .and(query_param("page", "1"))
        .and(query_param("per_page", "20"))
        .and(header("HH-User-Agent", "vacancy-tests/1.0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [
                { "id": "1", "name": "Engineer", "employer": { "name": "Acme" },
                  "salary": null, "area": { "name": "Remote" } }
            ],
            "found": 1,
            "pages": 3,
            "page": 1,
            "per_page": 20
        })))
        .expect(1)
        .mount(&server)
        .await;

    let raw = api_for(&server)
        .search(&request("rust", 1))
        .await
        .expect("search ok");
    let page = ResponseMapper::default().map(raw).expect("well formed");

    assert_eq!(page.total_pages, 3);
    assert_eq!(page.items[0].employer_name, "Acme");
    assert_eq!(page.items[0].city, "Remote");
}

#[tokio::test]
async fn search_passes_industry_filter() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/vacancies"))
        .and(query_param("industry", "7.540"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "items": [], "pages": 0 })))
        .expect(1)
        .mount(&server)
        .await;

    let mut filtered = request("rust", 0);
    filtered.industry_id = Some("7.540".to_string());
    let raw = api_for(&server).search(&filtered).await.expect("search ok");

    assert_eq!(raw.items, Some(Vec::new()));
}

#[tokio::test]
async fn access_token_is_sent_as_bearer() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/industries"))
        .and(header("Authorization", "Bearer secret"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let api = ReqwestVacancyApi::new(ApiSettings {
        base_url: server.uri(),
        access_token: Some("secret".to_string()),
        ..ApiSettings::default()
    })
    .unwrap();

    assert_eq!(api.industries().await.unwrap(), Vec::new());
}

#[tokio::test]
async fn industries_decode_catalogue() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/industries"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": "7", "name": "IT", "industries": [
                { "id": "7.540", "name": "Software development" }
            ]}
        ])))
        .mount(&server)
        .await;

    let groups = api_for(&server).industries().await.expect("industries ok");

    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].industries.as_ref().map(Vec::len), Some(1));
}

#[tokio::test]
async fn server_error_status_is_a_server_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/vacancies"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let err = api_for(&server)
        .search(&request("rust", 0))
        .await
        .unwrap_err();

    assert_eq!(err.kind, FailureKind::HttpStatus(503));
    assert_eq!(err.kind.to_failure(), FetchFailure::Server);
}

#[tokio::test]
async fn undecodable_body_is_a_server_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/vacancies"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let err = api_for(&server)
        .search(&request("rust", 0))
        .await
        .unwrap_err();

    assert_eq!(err.kind, FailureKind::Decode);
    assert_eq!(err.kind.to_failure(), FetchFailure::Server);
}

#[tokio::test]
async fn slow_response_times_out_as_no_connectivity() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/vacancies"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_millis(250))
                .set_body_json(json!({ "items": [], "pages": 0 })),
        )
        .mount(&server)
        .await;

    let api = ReqwestVacancyApi::new(ApiSettings {
        base_url: server.uri(),
        request_timeout: Duration::from_millis(50),
        ..ApiSettings::default()
    })
    .unwrap();
    let err = api.search(&request("rust", 0)).await.unwrap_err();

    assert_eq!(err.kind, FailureKind::Timeout);
    assert_eq!(err.kind.to_failure(), FetchFailure::NoConnectivity);
}

#[tokio::test]
async fn oversized_response_is_rejected() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/vacancies"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{\"items\":[],\"pages\":0}"))
        .mount(&server)
        .await;

    let api = ReqwestVacancyApi::new(ApiSettings {
        base_url: server.uri(),
        max_bytes: 10,
        ..ApiSettings::default()
    })
    .unwrap();
    let err = api.search(&request("rust", 0)).await.unwrap_err();

    assert!(matches!(
        err.kind,
        FailureKind::TooLarge { max_bytes: 10, .. }
    ));
}
