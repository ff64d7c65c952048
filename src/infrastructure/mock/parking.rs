use super::{data, settle, simulate_latency};
use crate::domain::artifacts::parking_ticket;
use crate::domain::catalog::{ParkingCity, ParkingZone};
use crate::domain::envelope::Response;
use crate::domain::money::{DEFAULT_CURRENCY, Money};
use crate::domain::ports::{CatalogBox, GeneratorBox, ParkingZones, VerticalService};
use crate::domain::purchase::{ParkingReceipt, ParkingRequest, SessionStatus};
use crate::domain::validation::{MAX_SESSION_MINUTES, is_valid_plate, normalize_plate};
use crate::domain::vertical::Parking;
use crate::error::{MarketError, Result};
use crate::infrastructure::in_memory::StaticCatalog;
use async_trait::async_trait;
use chrono::Utc;
use std::time::Duration;

pub struct MockParkingService {
    catalog: CatalogBox<ParkingCity>,
    generator: GeneratorBox,
    latency: Duration,
}

impl MockParkingService {
    pub fn new(generator: GeneratorBox, latency: Duration) -> Self {
        Self {
            catalog: Box::new(StaticCatalog::new(data::cities())),
            generator,
            latency,
        }
    }

    async fn city_zones(&self, city_id: &str) -> Result<Vec<ParkingZone>> {
        if city_id.trim().is_empty() {
            return Err(MarketError::MissingParam("cityId is required".to_string()));
        }
        self.catalog
            .find_by_id(city_id)
            .await?
            .map(|city| city.zones)
            .ok_or_else(|| MarketError::NotFound("City not found".to_string()))
    }

    async fn start_session(&self, request: ParkingRequest) -> Result<ParkingReceipt> {
        let city = self.catalog.find_by_id(&request.city_id).await?;
        let zone = city
            .as_ref()
            .and_then(|c| c.zone(&request.zone_id))
            .cloned();
        let (Some(city), Some(zone)) = (city, zone) else {
            return Err(MarketError::NotFound("City or zone not found".to_string()));
        };

        if !is_valid_plate(&request.license_plate) {
            return Err(MarketError::ValidationError(
                "Invalid license plate".to_string(),
            ));
        }
        let minutes = request.duration_minutes;
        if minutes == 0 || minutes > MAX_SESSION_MINUTES {
            return Err(MarketError::ValidationError(format!(
                "Duration must be between 1 and {MAX_SESSION_MINUTES} minutes"
            )));
        }

        let duration_label = data::parking_durations()
            .into_iter()
            .find(|d| d.minutes == minutes)
            .map(|d| d.label)
            .unwrap_or_else(|| format!("{minutes} min"));
        let start_time = Utc::now();
        let end_time = start_time + chrono::Duration::minutes(i64::from(minutes));
        let amount = Money::metered(zone.hourly_rate, minutes);

        tracing::info!(city = %city.id, zone = %zone.id, minutes, %amount, "Parking session started");
        Ok(ParkingReceipt {
            session_id: self.generator.uuid(),
            ticket_number: parking_ticket(self.generator.as_ref()),
            city: city.name,
            zone: zone.name,
            license_plate: normalize_plate(&request.license_plate),
            duration_label,
            start_time,
            end_time,
            amount,
            currency: DEFAULT_CURRENCY.to_string(),
            status: SessionStatus::Active,
        })
    }
}

#[async_trait]
impl VerticalService<Parking> for MockParkingService {
    async fn fetch_catalog(&self, _filter: Option<&str>) -> Response<Vec<ParkingCity>> {
        simulate_latency(self.latency).await;
        self.catalog.list().await.into()
    }

    async fn purchase(&self, request: ParkingRequest) -> Response<ParkingReceipt> {
        simulate_latency(self.latency).await;
        settle("parking", self.start_session(request).await)
    }
}

#[async_trait]
impl ParkingZones for MockParkingService {
    async fn zones(&self, city_id: &str) -> Response<Vec<ParkingZone>> {
        simulate_latency(self.latency).await;
        self.city_zones(city_id).await.into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::envelope::ErrorCode;
    use crate::infrastructure::artifacts::SeededArtifacts;
    use std::sync::Arc;

    fn service() -> MockParkingService {
        MockParkingService::new(Arc::new(SeededArtifacts::new(1)), Duration::ZERO)
    }

    fn request(city_id: &str, zone_id: &str, minutes: u32) -> ParkingRequest {
        ParkingRequest {
            city_id: city_id.into(),
            zone_id: zone_id.into(),
            license_plate: "zg 1234-ab".into(),
            duration_minutes: minutes,
        }
    }

    #[tokio::test]
    async fn test_metered_session() {
        let receipt = service()
            .purchase(request("zagreb", "zg-z2", 120))
            .await
            .into_result()
            .unwrap();

        assert_eq!(receipt.amount.to_string(), "2.20");
        assert_eq!(receipt.status, SessionStatus::Active);
        assert_eq!(receipt.duration_label, "2 hours");
        assert_eq!(receipt.license_plate, "ZG 1234-AB");
        assert_eq!(
            receipt.end_time - receipt.start_time,
            chrono::Duration::minutes(120)
        );
        assert!(receipt.ticket_number.starts_with("PKG-"));
        assert_eq!(receipt.ticket_number.len(), 12);
    }

    #[tokio::test]
    async fn test_custom_duration_label() {
        let receipt = service()
            .purchase(request("zagreb", "zg-z1", 90))
            .await
            .into_result()
            .unwrap();
        assert_eq!(receipt.amount.to_string(), "2.40");
        assert_eq!(receipt.duration_label, "90 min");
    }

    #[tokio::test]
    async fn test_unknown_zone_not_found() {
        let response = service().purchase(request("zagreb", "st-z0", 60)).await;
        assert_eq!(response.error().map(|e| e.code), Some(ErrorCode::NotFound));
    }

    #[tokio::test]
    async fn test_duration_bounds() {
        for minutes in [0, MAX_SESSION_MINUTES + 1] {
            let response = service().purchase(request("split", "st-z1", minutes)).await;
            assert_eq!(
                response.error().map(|e| e.code),
                Some(ErrorCode::ValidationError)
            );
        }
    }

    #[tokio::test]
    async fn test_zones() {
        let service = service();
        let zones = service.zones("pula").await.into_result().unwrap();
        assert_eq!(zones.len(), 2);

        let missing = service.zones("  ").await;
        assert_eq!(
            missing.error().map(|e| e.code),
            Some(ErrorCode::MissingParam)
        );

        let unknown = service.zones("london").await;
        assert_eq!(unknown.error().map(|e| e.code), Some(ErrorCode::NotFound));
    }
}
