//! axum router serving the vertical services.
//!
//! Every body is an envelope. Failed envelopes carry an HTTP status derived
//! from their error code.

use crate::domain::envelope::{ErrorCode, Response};
use crate::domain::ports::{ParkingServiceBox, ServiceBox, Services, VignetteServiceBox};
use crate::domain::vertical::Vertical;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

/// Purchase requests are small; anything larger is rejected.
pub const BODY_LIMIT: usize = 64 * 1024;

pub fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::MissingParam | ErrorCode::ValidationError => StatusCode::BAD_REQUEST,
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::Timeout => StatusCode::GATEWAY_TIMEOUT,
        ErrorCode::NetworkError => StatusCode::BAD_GATEWAY,
        ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl<T: Serialize> IntoResponse for Response<T> {
    fn into_response(self) -> axum::response::Response {
        let status = self.error().map_or(StatusCode::OK, |e| status_for(e.code));
        (status, Json(self)).into_response()
    }
}

pub fn router(services: Services) -> Router {
    Router::new()
        .route("/health", get(health))
        .merge(catalog_routes(services.topups))
        .merge(catalog_routes(services.vouchers))
        .merge(catalog_routes(services.gaming))
        .merge(catalog_routes(services.lottery))
        .merge(catalog_routes(services.parking))
        .merge(catalog_routes(services.vignettes))
        .merge(
            Router::new()
                .route("/catalog/parking/zones", get(zones))
                .with_state(services.parking_zones),
        )
        .merge(
            Router::new()
                .route("/catalog/vignettes/:order_id", get(order_status))
                .with_state(services.vignette_orders),
        )
        .layer(RequestBodyLimitLayer::new(BODY_LIMIT))
        .layer(TraceLayer::new_for_http())
}

fn catalog_routes<V: Vertical>(service: ServiceBox<V>) -> Router {
    Router::new()
        .route(
            &format!("/catalog/{}", V::NAME),
            get(fetch_catalog::<V>).post(purchase::<V>),
        )
        .with_state(service)
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

async fn fetch_catalog<V: Vertical>(
    State(service): State<ServiceBox<V>>,
    Query(params): Query<HashMap<String, String>>,
) -> Response<Vec<V::Entity>> {
    let filter = V::FILTER.and_then(|key| params.get(key)).map(String::as_str);
    service.fetch_catalog(filter).await
}

async fn purchase<V: Vertical>(
    State(service): State<ServiceBox<V>>,
    body: Result<Json<V::Request>, JsonRejection>,
) -> Response<V::Receipt> {
    match body {
        Ok(Json(request)) => service.purchase(request).await,
        Err(rejection) => {
            tracing::debug!(vertical = V::NAME, error = %rejection, "Malformed purchase request");
            Response::err(ErrorCode::ValidationError, rejection.body_text())
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ZonesQuery {
    city_id: Option<String>,
}

async fn zones(
    State(service): State<ParkingServiceBox>,
    Query(query): Query<ZonesQuery>,
) -> impl IntoResponse {
    service.zones(query.city_id.as_deref().unwrap_or_default()).await
}

async fn order_status(
    State(service): State<VignetteServiceBox>,
    Path(order_id): Path<String>,
) -> impl IntoResponse {
    service.order_status(&order_id).await
}
