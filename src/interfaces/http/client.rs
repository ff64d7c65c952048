use crate::domain::catalog::ParkingZone;
use crate::domain::envelope::{ErrorCode, Response};
use crate::domain::ports::{ParkingZones, Services, VerticalService, VignetteOrders};
use crate::domain::purchase::OrderStatusResult;
use crate::domain::vertical::{Parking, Vertical, Vignettes};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use std::marker::PhantomData;
use std::sync::Arc;
use std::time::Duration;

/// A vertical service reached over HTTP.
///
/// Transport failures and bodies that are not an envelope are reported as
/// `NETWORK_ERROR`, so callers only ever see envelopes.
pub struct HttpService<V> {
    client: reqwest::Client,
    base_url: String,
    _vertical: PhantomData<fn() -> V>,
}

impl<V: Vertical> HttpService<V> {
    pub fn new(client: reqwest::Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            _vertical: PhantomData,
        }
    }

    fn url(&self, suffix: &str) -> String {
        format!("{}/catalog/{}{}", self.base_url, V::NAME, suffix)
    }
}

async fn read_envelope<T: DeserializeOwned>(
    sent: reqwest::Result<reqwest::Response>,
) -> Response<T> {
    let response = match sent {
        Ok(response) => response,
        Err(e) => {
            tracing::warn!(error = %e, "Request failed");
            return Response::err(ErrorCode::NetworkError, format!("Request failed: {e}"));
        }
    };

    let status = response.status();
    match response.json::<Response<T>>().await {
        Ok(envelope) => envelope,
        Err(e) => {
            tracing::warn!(%status, error = %e, "Unreadable response body");
            Response::err(
                ErrorCode::NetworkError,
                format!("Unexpected response ({status})"),
            )
        }
    }
}

#[async_trait]
impl<V: Vertical> VerticalService<V> for HttpService<V> {
    async fn fetch_catalog(&self, filter: Option<&str>) -> Response<Vec<V::Entity>> {
        let mut request = self.client.get(self.url(""));
        if let (Some(key), Some(value)) = (V::FILTER, filter) {
            request = request.query(&[(key, value)]);
        }
        read_envelope(request.send().await).await
    }

    async fn purchase(&self, request: V::Request) -> Response<V::Receipt> {
        read_envelope(self.client.post(self.url("")).json(&request).send().await).await
    }
}

#[async_trait]
impl ParkingZones for HttpService<Parking> {
    async fn zones(&self, city_id: &str) -> Response<Vec<ParkingZone>> {
        let request = self
            .client
            .get(self.url("/zones"))
            .query(&[("cityId", city_id)]);
        read_envelope(request.send().await).await
    }
}

#[async_trait]
impl VignetteOrders for HttpService<Vignettes> {
    async fn order_status(&self, order_id: &str) -> Response<OrderStatusResult> {
        read_envelope(self.client.get(self.url(&format!("/{order_id}"))).send().await).await
    }
}

/// Every vertical served by the backend at `base_url`.
pub fn remote_services(base_url: &str, timeout: Duration) -> reqwest::Result<Services> {
    let client = reqwest::Client::builder().timeout(timeout).build()?;
    let parking = Arc::new(HttpService::<Parking>::new(client.clone(), base_url));
    let vignettes = Arc::new(HttpService::<Vignettes>::new(client.clone(), base_url));
    Ok(Services {
        topups: Arc::new(HttpService::new(client.clone(), base_url)),
        vouchers: Arc::new(HttpService::new(client.clone(), base_url)),
        gaming: Arc::new(HttpService::new(client.clone(), base_url)),
        lottery: Arc::new(HttpService::new(client, base_url)),
        parking: parking.clone(),
        parking_zones: parking,
        vignettes: vignettes.clone(),
        vignette_orders: vignettes,
    })
}
