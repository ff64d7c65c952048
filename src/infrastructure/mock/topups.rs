use super::{data, settle, simulate_latency};
use crate::domain::catalog::TelcoOperator;
use crate::domain::envelope::Response;
use crate::domain::money::DEFAULT_CURRENCY;
use crate::domain::ports::{CatalogBox, GeneratorBox, VerticalService};
use crate::domain::purchase::{PurchaseStatus, TopupReceipt, TopupRequest};
use crate::domain::validation::{format_phone, is_valid_phone};
use crate::domain::vertical::Topups;
use crate::error::{MarketError, Result};
use crate::infrastructure::in_memory::StaticCatalog;
use async_trait::async_trait;
use std::time::Duration;

pub struct MockTopupsService {
    catalog: CatalogBox<TelcoOperator>,
    generator: GeneratorBox,
    latency: Duration,
}

impl MockTopupsService {
    pub fn new(generator: GeneratorBox, latency: Duration) -> Self {
        Self {
            catalog: Box::new(StaticCatalog::new(data::operators())),
            generator,
            latency,
        }
    }

    async fn top_up(&self, request: TopupRequest) -> Result<TopupReceipt> {
        let operator = self
            .catalog
            .find_by_id(&request.operator_id)
            .await?
            .ok_or_else(|| MarketError::NotFound("Operator not found".to_string()))?;

        if !operator.amounts.contains(&request.amount) {
            return Err(MarketError::ValidationError(format!(
                "{} does not offer a {} top-up",
                operator.name, request.amount
            )));
        }
        if !is_valid_phone(&request.phone_number) {
            return Err(MarketError::ValidationError(
                "Invalid phone number".to_string(),
            ));
        }

        tracing::info!(operator = %operator.id, amount = %request.amount, "Top-up completed");
        Ok(TopupReceipt {
            transaction_id: self.generator.uuid(),
            operator: operator.name,
            phone_number: format_phone(&request.phone_number),
            amount: request.amount,
            currency: DEFAULT_CURRENCY.to_string(),
            status: PurchaseStatus::Completed,
        })
    }
}

#[async_trait]
impl VerticalService<Topups> for MockTopupsService {
    async fn fetch_catalog(&self, _filter: Option<&str>) -> Response<Vec<TelcoOperator>> {
        simulate_latency(self.latency).await;
        self.catalog.list().await.into()
    }

    async fn purchase(&self, request: TopupRequest) -> Response<TopupReceipt> {
        simulate_latency(self.latency).await;
        settle("topups", self.top_up(request).await)
    }
}
