use super::{data, settle, simulate_latency};
use crate::domain::artifacts::gaming_code;
use crate::domain::catalog::GamingPlatform;
use crate::domain::envelope::Response;
use crate::domain::ports::{CatalogBox, GeneratorBox, VerticalService};
use crate::domain::purchase::{GamingReceipt, GamingRequest, PurchaseStatus};
use crate::domain::vertical::Gaming;
use crate::error::{MarketError, Result};
use crate::infrastructure::in_memory::StaticCatalog;
use async_trait::async_trait;
use std::time::Duration;

pub struct MockGamingService {
    catalog: CatalogBox<GamingPlatform>,
    generator: GeneratorBox,
    latency: Duration,
}

impl MockGamingService {
    pub fn new(generator: GeneratorBox, latency: Duration) -> Self {
        Self {
            catalog: Box::new(StaticCatalog::new(data::platforms())),
            generator,
            latency,
        }
    }

    async fn redeem(&self, request: GamingRequest) -> Result<GamingReceipt> {
        let platform = self.catalog.find_by_id(&request.platform_id).await?;
        let voucher = platform
            .as_ref()
            .and_then(|p| p.voucher(&request.voucher_id))
            .cloned();
        let (Some(platform), Some(voucher)) = (platform, voucher) else {
            return Err(MarketError::NotFound(
                "Platform or voucher not found".to_string(),
            ));
        };

        tracing::info!(platform = %platform.id, voucher = %voucher.id, "Gaming voucher issued");
        Ok(GamingReceipt {
            transaction_id: self.generator.uuid(),
            platform: platform.name,
            voucher_label: voucher.label,
            code: gaming_code(self.generator.as_ref()),
            amount: voucher.price,
            currency: voucher.currency,
            status: PurchaseStatus::Completed,
        })
    }
}

#[async_trait]
impl VerticalService<Gaming> for MockGamingService {
    async fn fetch_catalog(&self, _filter: Option<&str>) -> Response<Vec<GamingPlatform>> {
        simulate_latency(self.latency).await;
        self.catalog.list().await.into()
    }

    async fn purchase(&self, request: GamingRequest) -> Response<GamingReceipt> {
        simulate_latency(self.latency).await;
        settle("gaming", self.redeem(request).await)
    }
}
