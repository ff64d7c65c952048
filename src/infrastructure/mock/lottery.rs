use super::{data, settle, simulate_latency};
use crate::domain::artifacts::{lottery_ticket, paysafe_pin, quick_pick, serial};
use crate::domain::catalog::{LotteryKind, LotteryProduct};
use crate::domain::envelope::Response;
use crate::domain::money::DEFAULT_CURRENCY;
use crate::domain::ports::{CatalogBox, GeneratorBox, VerticalService};
use crate::domain::purchase::{LotteryArtifact, LotteryReceipt, LotteryRequest, PurchaseStatus};
use crate::domain::validation::validate_pick;
use crate::domain::vertical::Lottery;
use crate::error::{MarketError, Result};
use crate::infrastructure::in_memory::StaticCatalog;
use async_trait::async_trait;
use chrono::{Datelike, Days, NaiveDate, Utc, Weekday};
use std::time::Duration;

/// The first day strictly after `today` that falls on one of `draw_days`.
pub fn next_draw(today: NaiveDate, draw_days: &[Weekday]) -> Option<NaiveDate> {
    (1..=7)
        .filter_map(|offset| today.checked_add_days(Days::new(offset)))
        .find(|day| draw_days.contains(&day.weekday()))
}

pub struct MockLotteryService {
    catalog: CatalogBox<LotteryProduct>,
    generator: GeneratorBox,
    latency: Duration,
}

impl MockLotteryService {
    pub fn new(generator: GeneratorBox, latency: Duration) -> Self {
        Self {
            catalog: Box::new(StaticCatalog::new(data::lottery_products())),
            generator,
            latency,
        }
    }

    async fn products(&self, filter: Option<&str>) -> Result<Vec<LotteryProduct>> {
        let products = self.catalog.list().await?;
        match filter {
            None => Ok(products),
            Some(kind) => {
                let kind: LotteryKind = kind.parse().map_err(MarketError::ValidationError)?;
                Ok(products.into_iter().filter(|p| p.kind == kind).collect())
            }
        }
    }

    fn artifact(&self, product: &LotteryProduct, pick: Option<Vec<u8>>) -> Result<LotteryArtifact> {
        let generator = self.generator.as_ref();
        if product.kind == LotteryKind::Paysafe {
            return Ok(LotteryArtifact::Paysafe {
                pin: paysafe_pin(generator),
                serial: serial(generator),
            });
        }

        let quick_pick = match (product.pick, pick) {
            (Some(rule), Some(numbers)) => {
                validate_pick(&numbers, rule.count, rule.max)
                    .map_err(MarketError::ValidationError)?;
                Some(numbers)
            }
            (Some(rule), None) => Some(quick_pick(generator, rule.count, rule.max)),
            (None, _) => None,
        };

        Ok(LotteryArtifact::Ticket {
            ticket_number: lottery_ticket(generator),
            draw_date: next_draw(Utc::now().date_naive(), &product.draw_days),
            quick_pick,
        })
    }

    async fn sell(&self, request: LotteryRequest) -> Result<LotteryReceipt> {
        let product = self
            .catalog
            .find_by_id(&request.product_id)
            .await?
            .ok_or_else(|| MarketError::NotFound("Product not found".to_string()))?;

        let artifact = self.artifact(&product, request.quick_pick)?;

        tracing::info!(product = %product.id, kind = ?product.kind, "Lottery product sold");
        Ok(LotteryReceipt {
            transaction_id: self.generator.uuid(),
            product: product.name,
            kind: product.kind,
            artifact,
            amount: product.price,
            currency: DEFAULT_CURRENCY.to_string(),
            status: PurchaseStatus::Completed,
        })
    }
}

#[async_trait]
impl VerticalService<Lottery> for MockLotteryService {
    async fn fetch_catalog(&self, filter: Option<&str>) -> Response<Vec<LotteryProduct>> {
        simulate_latency(self.latency).await;
        self.products(filter).await.into()
    }

    async fn purchase(&self, request: LotteryRequest) -> Response<LotteryReceipt> {
        simulate_latency(self.latency).await;
        settle("lottery", self.sell(request).await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::envelope::ErrorCode;
    use crate::infrastructure::artifacts::SeededArtifacts;
    use std::sync::Arc;

    fn service() -> MockLotteryService {
        MockLotteryService::new(Arc::new(SeededArtifacts::new(45)), Duration::ZERO)
    }

    fn request(product_id: &str, quick_pick: Option<Vec<u8>>) -> LotteryRequest {
        LotteryRequest {
            product_id: product_id.into(),
            quick_pick,
        }
    }

    #[test]
    fn test_next_draw_is_strictly_after_today() {
        // 2026-10-21 is a Wednesday.
        let wednesday = NaiveDate::from_ymd_opt(2026, 10, 21).unwrap();
        let draws = [Weekday::Wed, Weekday::Sat];
        assert_eq!(
            next_draw(wednesday, &draws),
            NaiveDate::from_ymd_opt(2026, 10, 24)
        );
        assert_eq!(
            next_draw(NaiveDate::from_ymd_opt(2026, 10, 24).unwrap(), &draws),
            NaiveDate::from_ymd_opt(2026, 10, 28)
        );
        assert_eq!(next_draw(wednesday, &[]), None);
    }

    #[tokio::test]
    async fn test_kind_filter() {
        let service = service();
        let paysafe = service
            .fetch_catalog(Some("paysafe"))
            .await
            .into_result()
            .unwrap();
        assert_eq!(paysafe.len(), 4);
        assert!(paysafe.iter().all(|p| p.kind == LotteryKind::Paysafe));

        let all = service.fetch_catalog(None).await.into_result().unwrap();
        assert_eq!(all.len(), data::lottery_products().len());

        let bad = service.fetch_catalog(Some("bingo")).await;
        assert_eq!(bad.error().map(|e| e.code), Some(ErrorCode::ValidationError));
    }

    #[tokio::test]
    async fn test_draw_game_generates_quick_pick() {
        let receipt = service()
            .purchase(request("loto-6-45", None))
            .await
            .into_result()
            .unwrap();

        let LotteryArtifact::Ticket {
            ticket_number,
            draw_date,
            quick_pick,
        } = receipt.artifact
        else {
            panic!("expected a ticket");
        };
        assert!(ticket_number.starts_with("HR-LOT-"));
        assert!(draw_date.is_some_and(|d| d > Utc::now().date_naive()));
        let numbers = quick_pick.unwrap();
        assert!(validate_pick(&numbers, 6, 45).is_ok());
    }

    #[tokio::test]
    async fn test_supplied_pick_is_validated() {
        let response = service()
            .purchase(request("eurojackpot", Some(vec![1, 2, 3, 4, 4])))
            .await;
        assert_eq!(
            response.error().map(|e| e.code),
            Some(ErrorCode::ValidationError)
        );

        let receipt = service()
            .purchase(request("eurojackpot", Some(vec![3, 9, 17, 28, 50])))
            .await
            .into_result()
            .unwrap();
        assert!(matches!(
            receipt.artifact,
            LotteryArtifact::Ticket { quick_pick: Some(ref n), .. } if n == &vec![3, 9, 17, 28, 50]
        ));
    }

    #[tokio::test]
    async fn test_scratch_card_has_no_draw() {
        let receipt = service()
            .purchase(request("scratch-gold", None))
            .await
            .into_result()
            .unwrap();
        assert_eq!(receipt.amount.to_string(), "5.00");
        assert!(matches!(
            receipt.artifact,
            LotteryArtifact::Ticket {
                draw_date: None,
                quick_pick: None,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_paysafe_gets_pin_and_serial() {
        let receipt = service()
            .purchase(request("paysafe-25", None))
            .await
            .into_result()
            .unwrap();
        let LotteryArtifact::Paysafe { pin, serial } = receipt.artifact else {
            panic!("expected a paysafe voucher");
        };
        assert_eq!(pin.len(), 19);
        assert!(serial.starts_with("SER-"));
    }
}
