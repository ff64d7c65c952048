//! In-process mock backends for the six verticals.
//!
//! Each service resolves ids against a
//! [`StaticCatalog`](crate::infrastructure::in_memory::StaticCatalog) built from [`data`],
//! prices the purchase and draws its artifacts from the injected
//! [`GeneratorBox`]. An optional latency simulates a slow network.

pub mod data;
mod gaming;
mod lottery;
mod parking;
mod topups;
mod vignettes;
mod vouchers;

pub use gaming::MockGamingService;
pub use lottery::{MockLotteryService, next_draw};
pub use parking::MockParkingService;
pub use topups::MockTopupsService;
pub use vignettes::MockVignetteService;
pub use vouchers::MockVoucherService;

use crate::domain::envelope::Response;
use crate::domain::ports::{GeneratorBox, Services};
use crate::error::Result;
use std::sync::Arc;
use std::time::Duration;

/// One instance of every mock service, sharing a generator and latency.
#[derive(Clone)]
pub struct MockServices {
    pub topups: Arc<MockTopupsService>,
    pub vouchers: Arc<MockVoucherService>,
    pub gaming: Arc<MockGamingService>,
    pub lottery: Arc<MockLotteryService>,
    pub parking: Arc<MockParkingService>,
    pub vignettes: Arc<MockVignetteService>,
}

impl MockServices {
    pub fn new(generator: GeneratorBox, latency: Duration) -> Self {
        Self {
            topups: Arc::new(MockTopupsService::new(generator.clone(), latency)),
            vouchers: Arc::new(MockVoucherService::new(generator.clone(), latency)),
            gaming: Arc::new(MockGamingService::new(generator.clone(), latency)),
            lottery: Arc::new(MockLotteryService::new(generator.clone(), latency)),
            parking: Arc::new(MockParkingService::new(generator.clone(), latency)),
            vignettes: Arc::new(MockVignetteService::new(generator, latency)),
        }
    }
}

impl From<MockServices> for Services {
    fn from(mock: MockServices) -> Self {
        Services {
            topups: mock.topups,
            vouchers: mock.vouchers,
            gaming: mock.gaming,
            lottery: mock.lottery,
            parking: mock.parking.clone(),
            parking_zones: mock.parking,
            vignettes: mock.vignettes.clone(),
            vignette_orders: mock.vignettes,
        }
    }
}

async fn simulate_latency(latency: Duration) {
    if !latency.is_zero() {
        tokio::time::sleep(latency).await;
    }
}

/// Wraps a purchase outcome in the envelope, logging failures.
fn settle<T>(vertical: &'static str, result: Result<T>) -> Response<T> {
    if let Err(e) = &result {
        tracing::warn!(vertical, code = ?e.code(), error = %e, "Purchase rejected");
    }
    Response::from(result)
}
