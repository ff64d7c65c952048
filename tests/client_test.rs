use axum::Router;
use axum::routing::get;
use marketio::domain::envelope::ErrorCode;
use marketio::domain::money::Money;
use marketio::domain::ports::Services;
use marketio::domain::purchase::VoucherRequest;
use marketio::infrastructure::artifacts::SeededArtifacts;
use marketio::infrastructure::mock::MockServices;
use marketio::interfaces::http::client::remote_services;
use marketio::interfaces::http::server::router;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;

async fn spawn(app: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

async fn remote() -> Services {
    let local = MockServices::new(Arc::new(SeededArtifacts::new(3)), Duration::ZERO);
    let base_url = spawn(router(local.into())).await;
    remote_services(&base_url, Duration::from_secs(5)).unwrap()
}

#[tokio::test]
async fn test_remote_catalog_and_purchase() {
    let services = remote().await;

    let brands = services.vouchers.fetch_catalog(None).await;
    assert!(brands.data().is_some_and(|b| b.iter().any(|brand| brand.id == "ikea")));

    let receipt = services
        .vouchers
        .purchase(VoucherRequest {
            brand_id: "ikea".into(),
            amount: Money::from_cents(2500),
        })
        .await;
    let receipt = receipt.data().unwrap();
    assert_eq!(receipt.amount, Money::from_cents(2500));
    assert!(receipt.redemption_code.starts_with("GIFT-"));
}

#[tokio::test]
async fn test_remote_errors_keep_their_code() {
    let services = remote().await;

    let missing = services.parking_zones.zones("").await;
    assert_eq!(missing.error().map(|e| e.code), Some(ErrorCode::MissingParam));

    let unknown = services.vignette_orders.order_status("nope").await;
    assert_eq!(unknown.error().map(|e| e.code), Some(ErrorCode::NotFound));

    let filtered = services.lottery.fetch_catalog(Some("paysafe")).await;
    assert_eq!(filtered.data().map(Vec::len), Some(4));
}

#[tokio::test]
async fn test_non_envelope_body_is_network_error() {
    let app = Router::new().route("/catalog/gaming", get(|| async { "<html>gateway</html>" }));
    let base_url = spawn(app).await;
    let services = remote_services(&base_url, Duration::from_secs(5)).unwrap();

    let response = services.gaming.fetch_catalog(None).await;
    assert_eq!(response.error().map(|e| e.code), Some(ErrorCode::NetworkError));
}
