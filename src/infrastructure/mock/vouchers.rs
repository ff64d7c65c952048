use super::{data, settle, simulate_latency};
use crate::domain::artifacts::redemption_code;
use crate::domain::catalog::RetailBrand;
use crate::domain::envelope::Response;
use crate::domain::money::DEFAULT_CURRENCY;
use crate::domain::ports::{CatalogBox, GeneratorBox, VerticalService};
use crate::domain::purchase::{PurchaseStatus, VoucherReceipt, VoucherRequest};
use crate::domain::vertical::Vouchers;
use crate::error::{MarketError, Result};
use crate::infrastructure::in_memory::StaticCatalog;
use async_trait::async_trait;
use std::time::Duration;

pub struct MockVoucherService {
    catalog: CatalogBox<RetailBrand>,
    generator: GeneratorBox,
    latency: Duration,
}

impl MockVoucherService {
    pub fn new(generator: GeneratorBox, latency: Duration) -> Self {
        Self {
            catalog: Box::new(StaticCatalog::new(data::brands())),
            generator,
            latency,
        }
    }

    async fn issue(&self, request: VoucherRequest) -> Result<VoucherReceipt> {
        let brand = self
            .catalog
            .find_by_id(&request.brand_id)
            .await?
            .ok_or_else(|| MarketError::NotFound("Brand not found".to_string()))?;

        if !brand.amounts.contains(&request.amount) {
            return Err(MarketError::ValidationError(format!(
                "{} gift cards are not sold for {}",
                brand.name, request.amount
            )));
        }

        tracing::info!(brand = %brand.id, amount = %request.amount, "Gift card issued");
        Ok(VoucherReceipt {
            transaction_id: self.generator.uuid(),
            brand: brand.name,
            redemption_code: redemption_code(self.generator.as_ref()),
            amount: request.amount,
            currency: DEFAULT_CURRENCY.to_string(),
            status: PurchaseStatus::Completed,
        })
    }
}

#[async_trait]
impl VerticalService<Vouchers> for MockVoucherService {
    async fn fetch_catalog(&self, _filter: Option<&str>) -> Response<Vec<RetailBrand>> {
        simulate_latency(self.latency).await;
        self.catalog.list().await.into()
    }

    async fn purchase(&self, request: VoucherRequest) -> Response<VoucherReceipt> {
        simulate_latency(self.latency).await;
        settle("vouchers", self.issue(request).await)
    }
}
