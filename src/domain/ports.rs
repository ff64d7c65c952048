use super::catalog::{CatalogEntity, ParkingZone};
use super::envelope::Response;
use super::purchase::OrderStatusResult;
use super::vertical::{Gaming, Lottery, Parking, Topups, Vertical, Vignettes, Vouchers};
use crate::error::Result;
use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

/// "What can be bought" and "buy this" for one vertical.
///
/// Implementations never fail outside the envelope: every error is reported
/// as `Response::Err`.
#[async_trait]
pub trait VerticalService<V: Vertical>: Send + Sync {
    /// Lists the purchasable entities. Verticals without a filter ignore it.
    async fn fetch_catalog(&self, filter: Option<&str>) -> Response<Vec<V::Entity>>;
    async fn purchase(&self, request: V::Request) -> Response<V::Receipt>;
}

#[async_trait]
pub trait ParkingZones: VerticalService<Parking> {
    /// Zones of one city. An empty id is `MISSING_PARAM`, an unknown one `NOT_FOUND`.
    async fn zones(&self, city_id: &str) -> Response<Vec<ParkingZone>>;
}

#[async_trait]
pub trait VignetteOrders: VerticalService<Vignettes> {
    async fn order_status(&self, order_id: &str) -> Response<OrderStatusResult>;
}

/// Read-only access to a catalog table.
#[async_trait]
pub trait CatalogRepository<E: CatalogEntity + Clone + Send + Sync>: Send + Sync {
    async fn list(&self) -> Result<Vec<E>>;

    async fn find_by_id(&self, id: &str) -> Result<Option<E>> {
        Ok(self.list().await?.into_iter().find(|e| e.id() == id))
    }
}

/// Source of randomness for purchase artifacts.
///
/// Artifacts are demo credentials; uniqueness is best effort.
pub trait ArtifactIdGenerator: Send + Sync {
    /// A value in `0..bound`.
    fn index(&self, bound: usize) -> usize;
    fn uuid(&self) -> Uuid;
}

/// String key-value storage for locally persisted collections.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>>;
    async fn set(&self, key: &str, value: String) -> Result<()>;
}

pub type ServiceBox<V> = Arc<dyn VerticalService<V>>;
pub type ParkingServiceBox = Arc<dyn ParkingZones>;
pub type VignetteServiceBox = Arc<dyn VignetteOrders>;
pub type CatalogBox<E> = Box<dyn CatalogRepository<E>>;
pub type GeneratorBox = Arc<dyn ArtifactIdGenerator>;
pub type KeyValueStoreBox = Arc<dyn KeyValueStore>;

/// One service per vertical, as consumed by the HTTP router and the CLI.
///
/// Parking and vignettes are held twice: once for the common catalog and
/// purchase calls and once for their extra lookups.
#[derive(Clone)]
pub struct Services {
    pub topups: ServiceBox<Topups>,
    pub vouchers: ServiceBox<Vouchers>,
    pub gaming: ServiceBox<Gaming>,
    pub lottery: ServiceBox<Lottery>,
    pub parking: ServiceBox<Parking>,
    pub parking_zones: ParkingServiceBox,
    pub vignettes: ServiceBox<Vignettes>,
    pub vignette_orders: VignetteServiceBox,
}
