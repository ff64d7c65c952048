use super::{data, settle, simulate_latency};
use crate::domain::artifacts::vignette_id;
use crate::domain::catalog::VignetteCountry;
use crate::domain::envelope::Response;
use crate::domain::ports::{CatalogBox, GeneratorBox, VerticalService, VignetteOrders};
use crate::domain::purchase::{OrderStatus, OrderStatusResult, VignetteReceipt, VignetteRequest};
use crate::domain::validation::{is_valid_plate, normalize_plate, validate_start_date};
use crate::domain::vertical::Vignettes;
use crate::error::{MarketError, Result};
use crate::infrastructure::in_memory::StaticCatalog;
use async_trait::async_trait;
use chrono::{Datelike, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use uuid::Uuid;

/// Sells vignettes and remembers every placed order for status lookups.
pub struct MockVignetteService {
    catalog: CatalogBox<VignetteCountry>,
    generator: GeneratorBox,
    latency: Duration,
    /// Every order placed since start-up. Never evicted, so this is only
    /// fit for demo and test processes.
    orders: Arc<RwLock<HashMap<Uuid, VignetteReceipt>>>,
}

impl MockVignetteService {
    pub fn new(generator: GeneratorBox, latency: Duration) -> Self {
        Self {
            catalog: Box::new(StaticCatalog::new(data::countries())),
            generator,
            latency,
            orders: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    async fn place_order(&self, request: VignetteRequest) -> Result<VignetteReceipt> {
        let country = self.catalog.find_by_id(&request.country_id).await?;
        let vehicle = country
            .as_ref()
            .and_then(|c| c.vehicle_type(&request.vehicle_type_id));
        let duration = vehicle.and_then(|v| v.duration(&request.duration_id)).cloned();
        let vehicle_label = vehicle.map(|v| v.label.clone());
        let (Some(country), Some(vehicle_label), Some(duration)) =
            (country, vehicle_label, duration)
        else {
            return Err(MarketError::NotFound(
                "Country, vehicle type or duration not found".to_string(),
            ));
        };

        if !is_valid_plate(&request.license_plate) {
            return Err(MarketError::ValidationError(
                "Invalid license plate".to_string(),
            ));
        }

        let now = Utc::now();
        let start_date = request.start_date.unwrap_or(now);
        validate_start_date(start_date.date_naive(), now.date_naive())
            .map_err(MarketError::ValidationError)?;
        let end_date = duration.validity.end_from(start_date);

        let receipt = VignetteReceipt {
            order_id: self.generator.uuid(),
            vignette_id: vignette_id(self.generator.as_ref(), start_date.year()),
            country: country.name,
            vehicle_type: vehicle_label,
            duration: duration.label,
            license_plate: normalize_plate(&request.license_plate),
            start_date,
            end_date,
            amount: duration.price,
            currency: country.currency,
            status: OrderStatus::at(now, start_date, end_date),
        };

        let mut orders = self.orders.write().await;
        orders.insert(receipt.order_id, receipt.clone());
        tracing::info!(order_id = %receipt.order_id, country = %country.id, "Vignette order placed");
        Ok(receipt)
    }

    async fn lookup(&self, order_id: &str) -> Result<OrderStatusResult> {
        let not_found = || MarketError::NotFound("Order not found".to_string());
        let id = Uuid::parse_str(order_id).map_err(|_| not_found())?;

        let orders = self.orders.read().await;
        let order = orders.get(&id).ok_or_else(not_found)?;
        Ok(OrderStatusResult {
            order_id: order.order_id,
            vignette_id: order.vignette_id.clone(),
            status: OrderStatus::at(Utc::now(), order.start_date, order.end_date),
            start_date: order.start_date,
            end_date: order.end_date,
        })
    }
}

#[async_trait]
impl VerticalService<Vignettes> for MockVignetteService {
    async fn fetch_catalog(&self, _filter: Option<&str>) -> Response<Vec<VignetteCountry>> {
        simulate_latency(self.latency).await;
        self.catalog.list().await.into()
    }

    async fn purchase(&self, request: VignetteRequest) -> Response<VignetteReceipt> {
        simulate_latency(self.latency).await;
        settle("vignettes", self.place_order(request).await)
    }
}

#[async_trait]
impl VignetteOrders for MockVignetteService {
    async fn order_status(&self, order_id: &str) -> Response<OrderStatusResult> {
        simulate_latency(self.latency).await;
        self.lookup(order_id).await.into()
    }
}
