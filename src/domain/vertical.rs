use super::catalog::{
    CatalogEntity, GamingPlatform, LotteryProduct, ParkingCity, RetailBrand, TelcoOperator,
    VignetteCountry,
};
use super::purchase::{
    GamingReceipt, GamingRequest, LotteryReceipt, LotteryRequest, ParkingReceipt, ParkingRequest,
    TopupReceipt, TopupRequest, VignetteReceipt, VignetteRequest, VoucherReceipt, VoucherRequest,
};
use serde::Serialize;
use serde::de::DeserializeOwned;

/// Binds together the types of one marketplace vertical.
///
/// Implementors are zero-sized markers; services, wizards and HTTP routes are
/// all generic over them.
pub trait Vertical: Send + Sync + 'static {
    /// Path segment and transaction type, e.g. `parking`.
    const NAME: &'static str;
    /// Category label shown in history.
    const CATEGORY: &'static str;
    /// Query parameter carrying the catalog filter, if the vertical has one.
    const FILTER: Option<&'static str> = None;

    type Entity: CatalogEntity + Clone + Serialize + DeserializeOwned + Send + Sync + 'static;
    type Request: Clone + Serialize + DeserializeOwned + Send + Sync + 'static;
    type Receipt: Clone + Serialize + DeserializeOwned + Send + Sync + 'static;
}

pub struct Topups;
pub struct Vouchers;
pub struct Gaming;
pub struct Lottery;
pub struct Parking;
pub struct Vignettes;

impl Vertical for Topups {
    const NAME: &'static str = "topups";
    const CATEGORY: &'static str = "Telco Top-ups";
    type Entity = TelcoOperator;
    type Request = TopupRequest;
    type Receipt = TopupReceipt;
}

impl Vertical for Vouchers {
    const NAME: &'static str = "vouchers";
    const CATEGORY: &'static str = "Gift Cards";
    type Entity = RetailBrand;
    type Request = VoucherRequest;
    type Receipt = VoucherReceipt;
}

impl Vertical for Gaming {
    const NAME: &'static str = "gaming";
    const CATEGORY: &'static str = "Gaming Vouchers";
    type Entity = GamingPlatform;
    type Request = GamingRequest;
    type Receipt = GamingReceipt;
}

impl Vertical for Lottery {
    const NAME: &'static str = "lottery";
    const CATEGORY: &'static str = "Lottery & Paysafe";
    const FILTER: Option<&'static str> = Some("kind");
    type Entity = LotteryProduct;
    type Request = LotteryRequest;
    type Receipt = LotteryReceipt;
}

impl Vertical for Parking {
    const NAME: &'static str = "parking";
    const CATEGORY: &'static str = "Parking";
    type Entity = ParkingCity;
    type Request = ParkingRequest;
    type Receipt = ParkingReceipt;
}

impl Vertical for Vignettes {
    const NAME: &'static str = "vignettes";
    const CATEGORY: &'static str = "Highway Vignettes";
    type Entity = VignetteCountry;
    type Request = VignetteRequest;
    type Receipt = VignetteReceipt;
}
