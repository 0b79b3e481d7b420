//! Currency pass-through against a mocked upstream feed.

use pretty_assertions::assert_eq;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use agro_catalog::error::ApiError;
use agro_catalog::services::currency::CurrencyService;

fn service(server: &MockServer) -> CurrencyService {
    CurrencyService::new(reqwest::Client::new(), format!("{}/rates", server.uri()))
}

#[tokio::test]
async fn usd_rates_are_extracted_and_scaled() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rates"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            r#"{"data":{"offline":[
                {"code":"EUR","buy":"1310000","sell":"1325000"},
                {"code":"USD","buy":"1206000","sell":"1218000"}
            ]}}"#,
            "application/json",
        ))
        .mount(&server)
        .await;

    let rates = service(&server).usd_rates().await.expect("rates");
    assert_eq!(rates.buy, 12060.0);
    assert_eq!(rates.sell, 12180.0);
}

#[tokio::test]
async fn missing_usd_entry_maps_to_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rates"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            r#"{"data":{"offline":[{"code":"EUR","buy":"1310000","sell":"1325000"}]}}"#,
            "application/json",
        ))
        .mount(&server)
        .await;

    let err = service(&server).usd_rates().await.unwrap_err();
    assert!(matches!(err, ApiError::NotFound(_)));
}

#[tokio::test]
async fn upstream_error_status_maps_to_upstream_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rates"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let err = service(&server).usd_rates().await.unwrap_err();
    assert!(matches!(err, ApiError::Upstream(_)));
}

#[tokio::test]
async fn garbage_body_maps_to_upstream_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rates"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("<html>down</html>", "text/html"))
        .mount(&server)
        .await;

    let err = service(&server).usd_rates().await.unwrap_err();
    assert!(matches!(err, ApiError::Upstream(_)));
}
