//! Step configuration of the six verticals.
//!
//! Drafts hold whole catalog entities rather than ids so later steps can check
//! their selection against earlier ones (a zone must belong to the chosen
//! city) without another catalog lookup.

use super::wizard::{Flow, StepSpec};
use crate::domain::catalog::{
    GamingPlatform, LotteryProduct, ParkingCity, ParkingDuration, ParkingZone, RetailBrand,
    TelcoOperator, VehicleType, VignetteCountry, VignetteDuration, VoucherDenomination,
};
use crate::domain::money::Money;
use crate::domain::purchase::{
    GamingReceipt, GamingRequest, LotteryArtifact, LotteryReceipt, LotteryRequest, ParkingReceipt,
    ParkingRequest, TopupReceipt, TopupRequest, VignetteReceipt, VignetteRequest, VoucherReceipt,
    VoucherRequest,
};
use crate::domain::records::NewTransaction;
use crate::domain::validation::{
    MAX_SESSION_MINUTES, format_phone, is_valid_phone, is_valid_plate, normalize_plate,
    validate_pick, validate_start_date,
};
use crate::domain::vertical::{Gaming, Lottery, Parking, Topups, Vertical, Vignettes, Vouchers};
use crate::error::{MarketError, Result};
use chrono::{NaiveDate, NaiveTime, Utc};

fn unexpected(step: &str) -> MarketError {
    MarketError::InvalidState(format!("expected a {step} selection"))
}

fn unset(step: &str) -> MarketError {
    MarketError::InvalidState(format!("{step} is not set"))
}

fn invalid(message: impl Into<String>) -> MarketError {
    MarketError::ValidationError(message.into())
}

fn accept_plate(input: &str) -> Result<String> {
    let plate = normalize_plate(input);
    if !is_valid_plate(&plate) {
        return Err(invalid("Invalid license plate"));
    }
    Ok(plate)
}

fn transaction<V: Vertical>(
    title: String,
    description: String,
    amount: Money,
    currency: &str,
) -> NewTransaction {
    NewTransaction {
        vertical: V::NAME,
        category: V::CATEGORY,
        title,
        description,
        amount,
        currency: currency.to_string(),
    }
}

// Top-ups

#[derive(Debug, Clone, Default)]
pub struct TopupDraft {
    pub operator: Option<TelcoOperator>,
    pub amount: Option<Money>,
    pub phone: Option<String>,
}

pub enum TopupSelection {
    Operator(TelcoOperator),
    Amount(Money),
    Phone(String),
}

impl Flow for Topups {
    type Draft = TopupDraft;
    type Selection = TopupSelection;

    fn steps() -> Vec<StepSpec<TopupDraft, TopupSelection>> {
        type Step = StepSpec<TopupDraft, TopupSelection>;
        vec![
            Step::new(
                "operator",
                |d, s| match s {
                    TopupSelection::Operator(operator) => {
                        d.operator = Some(operator);
                        Ok(())
                    }
                    _ => Err(unexpected("operator")),
                },
                |d| d.operator = None,
                |d| d.operator.is_some(),
            ),
            Step::new(
                "amount",
                |d, s| {
                    let TopupSelection::Amount(amount) = s else {
                        return Err(unexpected("amount"));
                    };
                    let operator = d.operator.as_ref().ok_or_else(|| unset("operator"))?;
                    if !operator.amounts.contains(&amount) {
                        return Err(invalid(format!("{} has no {amount} top-up", operator.name)));
                    }
                    d.amount = Some(amount);
                    Ok(())
                },
                |d| d.amount = None,
                |d| d.amount.is_some(),
            ),
            Step::new(
                "phone",
                |d, s| {
                    let TopupSelection::Phone(phone) = s else {
                        return Err(unexpected("phone"));
                    };
                    if !is_valid_phone(&phone) {
                        return Err(invalid("Phone number must have 6-15 digits"));
                    }
                    d.phone = Some(phone.trim().to_string());
                    Ok(())
                },
                |d| d.phone = None,
                |d| d.phone.is_some(),
            ),
        ]
    }

    fn request(draft: &TopupDraft) -> Result<TopupRequest> {
        Ok(TopupRequest {
            operator_id: draft.operator.as_ref().ok_or_else(|| unset("operator"))?.id.clone(),
            amount: draft.amount.ok_or_else(|| unset("amount"))?,
            phone_number: draft.phone.clone().ok_or_else(|| unset("phone"))?,
        })
    }

    fn describe(_draft: &TopupDraft, receipt: &TopupReceipt) -> NewTransaction {
        transaction::<Self>(
            format!("{} Top-up", receipt.operator),
            format_phone(&receipt.phone_number),
            receipt.amount,
            &receipt.currency,
        )
    }
}

// Gift cards

#[derive(Debug, Clone, Default)]
pub struct VoucherDraft {
    pub brand: Option<RetailBrand>,
    pub amount: Option<Money>,
}

pub enum VoucherSelection {
    Brand(RetailBrand),
    Amount(Money),
}

impl Flow for Vouchers {
    type Draft = VoucherDraft;
    type Selection = VoucherSelection;

    fn steps() -> Vec<StepSpec<VoucherDraft, VoucherSelection>> {
        type Step = StepSpec<VoucherDraft, VoucherSelection>;
        vec![
            Step::new(
                "brand",
                |d, s| match s {
                    VoucherSelection::Brand(brand) => {
                        d.brand = Some(brand);
                        Ok(())
                    }
                    _ => Err(unexpected("brand")),
                },
                |d| d.brand = None,
                |d| d.brand.is_some(),
            ),
            Step::new(
                "amount",
                |d, s| {
                    let VoucherSelection::Amount(amount) = s else {
                        return Err(unexpected("amount"));
                    };
                    let brand = d.brand.as_ref().ok_or_else(|| unset("brand"))?;
                    if !brand.amounts.contains(&amount) {
                        return Err(invalid(format!(
                            "{} gift cards are not sold for {amount}",
                            brand.name
                        )));
                    }
                    d.amount = Some(amount);
                    Ok(())
                },
                |d| d.amount = None,
                |d| d.amount.is_some(),
            ),
        ]
    }

    fn request(draft: &VoucherDraft) -> Result<VoucherRequest> {
        Ok(VoucherRequest {
            brand_id: draft.brand.as_ref().ok_or_else(|| unset("brand"))?.id.clone(),
            amount: draft.amount.ok_or_else(|| unset("amount"))?,
        })
    }

    fn describe(_draft: &VoucherDraft, receipt: &VoucherReceipt) -> NewTransaction {
        transaction::<Self>(
            format!("{} Gift Card", receipt.brand),
            receipt.redemption_code.clone(),
            receipt.amount,
            &receipt.currency,
        )
    }
}

// Gaming

#[derive(Debug, Clone, Default)]
pub struct GamingDraft {
    pub platform: Option<GamingPlatform>,
    pub voucher: Option<VoucherDenomination>,
}

pub enum GamingSelection {
    Platform(GamingPlatform),
    Voucher(VoucherDenomination),
}

impl Flow for Gaming {
    type Draft = GamingDraft;
    type Selection = GamingSelection;

    fn steps() -> Vec<StepSpec<GamingDraft, GamingSelection>> {
        type Step = StepSpec<GamingDraft, GamingSelection>;
        vec![
            Step::new(
                "platform",
                |d, s| match s {
                    GamingSelection::Platform(platform) => {
                        d.platform = Some(platform);
                        Ok(())
                    }
                    _ => Err(unexpected("platform")),
                },
                |d| d.platform = None,
                |d| d.platform.is_some(),
            ),
            Step::new(
                "voucher",
                |d, s| {
                    let GamingSelection::Voucher(voucher) = s else {
                        return Err(unexpected("voucher"));
                    };
                    let platform = d.platform.as_ref().ok_or_else(|| unset("platform"))?;
                    if platform.voucher(&voucher.id).is_none() {
                        return Err(invalid(format!(
                            "{} is not sold for {}",
                            voucher.label, platform.name
                        )));
                    }
                    d.voucher = Some(voucher);
                    Ok(())
                },
                |d| d.voucher = None,
                |d| d.voucher.is_some(),
            ),
        ]
    }

    fn request(draft: &GamingDraft) -> Result<GamingRequest> {
        Ok(GamingRequest {
            platform_id: draft.platform.as_ref().ok_or_else(|| unset("platform"))?.id.clone(),
            voucher_id: draft.voucher.as_ref().ok_or_else(|| unset("voucher"))?.id.clone(),
        })
    }

    fn describe(_draft: &GamingDraft, receipt: &GamingReceipt) -> NewTransaction {
        transaction::<Self>(
            format!("{} - {}", receipt.platform, receipt.voucher_label),
            receipt.code.clone(),
            receipt.amount,
            &receipt.currency,
        )
    }
}

// Lottery & paysafe

/// How the numbers of a draw game are chosen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Pick {
    /// Let the service draw them. Also used for products without a pick.
    Quick,
    Numbers(Vec<u8>),
}

#[derive(Debug, Clone, Default)]
pub struct LotteryDraft {
    pub product: Option<LotteryProduct>,
    pub pick: Option<Pick>,
}

pub enum LotterySelection {
    Product(LotteryProduct),
    Pick(Pick),
}

impl Flow for Lottery {
    type Draft = LotteryDraft;
    type Selection = LotterySelection;

    fn steps() -> Vec<StepSpec<LotteryDraft, LotterySelection>> {
        type Step = StepSpec<LotteryDraft, LotterySelection>;
        vec![
            Step::new(
                "product",
                |d, s| match s {
                    LotterySelection::Product(product) => {
                        d.product = Some(product);
                        Ok(())
                    }
                    _ => Err(unexpected("product")),
                },
                |d| d.product = None,
                |d| d.product.is_some(),
            ),
            Step::new(
                "numbers",
                |d, s| {
                    let LotterySelection::Pick(pick) = s else {
                        return Err(unexpected("numbers"));
                    };
                    let product = d.product.as_ref().ok_or_else(|| unset("product"))?;
                    if let (Pick::Numbers(numbers), Some(rule)) = (&pick, product.pick) {
                        validate_pick(numbers, rule.count, rule.max).map_err(invalid)?;
                    }
                    d.pick = Some(pick);
                    Ok(())
                },
                |d| d.pick = None,
                |d| d.pick.is_some(),
            )
            .with_autofill(|d| {
                let no_pick = d.product.as_ref().is_some_and(|p| p.pick.is_none());
                if no_pick {
                    d.pick = Some(Pick::Quick);
                }
                no_pick
            }),
        ]
    }

    fn request(draft: &LotteryDraft) -> Result<LotteryRequest> {
        let product = draft.product.as_ref().ok_or_else(|| unset("product"))?;
        let quick_pick = match draft.pick.as_ref().ok_or_else(|| unset("numbers"))? {
            Pick::Numbers(numbers) if product.pick.is_some() => Some(numbers.clone()),
            _ => None,
        };
        Ok(LotteryRequest {
            product_id: product.id.clone(),
            quick_pick,
        })
    }

    fn describe(_draft: &LotteryDraft, receipt: &LotteryReceipt) -> NewTransaction {
        let description = match &receipt.artifact {
            LotteryArtifact::Ticket {
                ticket_number,
                draw_date: Some(draw),
                ..
            } => format!("{ticket_number} - draw {draw}"),
            LotteryArtifact::Ticket { ticket_number, .. } => ticket_number.clone(),
            LotteryArtifact::Paysafe { serial, .. } => serial.clone(),
        };
        transaction::<Self>(
            receipt.product.clone(),
            description,
            receipt.amount,
            &receipt.currency,
        )
    }
}

// Parking

#[derive(Debug, Clone, Default)]
pub struct ParkingDraft {
    pub city: Option<ParkingCity>,
    pub zone: Option<ParkingZone>,
    pub plate: Option<String>,
    pub duration: Option<ParkingDuration>,
}

pub enum ParkingSelection {
    City(ParkingCity),
    Zone(ParkingZone),
    Plate(String),
    Duration(ParkingDuration),
}

impl Flow for Parking {
    type Draft = ParkingDraft;
    type Selection = ParkingSelection;

    fn steps() -> Vec<StepSpec<ParkingDraft, ParkingSelection>> {
        type Step = StepSpec<ParkingDraft, ParkingSelection>;
        vec![
            Step::new(
                "city",
                |d, s| match s {
                    ParkingSelection::City(city) => {
                        d.city = Some(city);
                        Ok(())
                    }
                    _ => Err(unexpected("city")),
                },
                |d| d.city = None,
                |d| d.city.is_some(),
            ),
            Step::new(
                "zone",
                |d, s| {
                    let ParkingSelection::Zone(zone) = s else {
                        return Err(unexpected("zone"));
                    };
                    let city = d.city.as_ref().ok_or_else(|| unset("city"))?;
                    if city.zone(&zone.id).is_none() {
                        return Err(invalid(format!("{} is not in {}", zone.name, city.name)));
                    }
                    d.zone = Some(zone);
                    Ok(())
                },
                |d| d.zone = None,
                |d| d.zone.is_some(),
            ),
            Step::new(
                "plate",
                |d, s| match s {
                    ParkingSelection::Plate(plate) => {
                        d.plate = Some(accept_plate(&plate)?);
                        Ok(())
                    }
                    _ => Err(unexpected("plate")),
                },
                |d| d.plate = None,
                |d| d.plate.is_some(),
            ),
            Step::new(
                "duration",
                |d, s| {
                    let ParkingSelection::Duration(duration) = s else {
                        return Err(unexpected("duration"));
                    };
                    if !(1..=MAX_SESSION_MINUTES).contains(&duration.minutes) {
                        return Err(invalid(format!(
                            "Duration must be between 1 and {MAX_SESSION_MINUTES} minutes"
                        )));
                    }
                    d.duration = Some(duration);
                    Ok(())
                },
                |d| d.duration = None,
                |d| d.duration.is_some(),
            ),
        ]
    }

    fn request(draft: &ParkingDraft) -> Result<ParkingRequest> {
        Ok(ParkingRequest {
            city_id: draft.city.as_ref().ok_or_else(|| unset("city"))?.id.clone(),
            zone_id: draft.zone.as_ref().ok_or_else(|| unset("zone"))?.id.clone(),
            license_plate: draft.plate.clone().ok_or_else(|| unset("plate"))?,
            duration_minutes: draft.duration.as_ref().ok_or_else(|| unset("duration"))?.minutes,
        })
    }

    fn describe(_draft: &ParkingDraft, receipt: &ParkingReceipt) -> NewTransaction {
        transaction::<Self>(
            format!("Parking - {}", receipt.zone),
            format!(
                "{} - {} - {}",
                receipt.license_plate, receipt.duration_label, receipt.city
            ),
            receipt.amount,
            &receipt.currency,
        )
    }

    fn plate(draft: &ParkingDraft) -> Option<String> {
        draft.plate.clone()
    }
}

// Vignettes

#[derive(Debug, Clone, Default)]
pub struct VignetteDraft {
    pub country: Option<VignetteCountry>,
    pub vehicle: Option<VehicleType>,
    pub duration: Option<VignetteDuration>,
    pub plate: Option<String>,
    pub start: Option<NaiveDate>,
}

pub enum VignetteSelection {
    Country(VignetteCountry),
    Vehicle(VehicleType),
    Duration(VignetteDuration),
    Plate(String),
    Start(NaiveDate),
}

impl Flow for Vignettes {
    type Draft = VignetteDraft;
    type Selection = VignetteSelection;

    fn steps() -> Vec<StepSpec<VignetteDraft, VignetteSelection>> {
        type Step = StepSpec<VignetteDraft, VignetteSelection>;
        vec![
            Step::new(
                "country",
                |d, s| match s {
                    VignetteSelection::Country(country) => {
                        d.country = Some(country);
                        Ok(())
                    }
                    _ => Err(unexpected("country")),
                },
                |d| d.country = None,
                |d| d.country.is_some(),
            ),
            Step::new(
                "vehicle",
                |d, s| {
                    let VignetteSelection::Vehicle(vehicle) = s else {
                        return Err(unexpected("vehicle"));
                    };
                    let country = d.country.as_ref().ok_or_else(|| unset("country"))?;
                    if country.vehicle_type(&vehicle.id).is_none() {
                        return Err(invalid(format!(
                            "{} does not sell vignettes for {}",
                            country.name, vehicle.label
                        )));
                    }
                    d.vehicle = Some(vehicle);
                    Ok(())
                },
                |d| d.vehicle = None,
                |d| d.vehicle.is_some(),
            )
            .with_autofill(|d| {
                let sole = d
                    .country
                    .as_ref()
                    .and_then(VignetteCountry::sole_vehicle_type)
                    .cloned();
                let filled = sole.is_some();
                if filled {
                    d.vehicle = sole;
                }
                filled
            }),
            Step::new(
                "duration",
                |d, s| {
                    let VignetteSelection::Duration(duration) = s else {
                        return Err(unexpected("duration"));
                    };
                    let vehicle = d.vehicle.as_ref().ok_or_else(|| unset("vehicle"))?;
                    if vehicle.duration(&duration.id).is_none() {
                        return Err(invalid(format!(
                            "{} is not offered for {}",
                            duration.label, vehicle.label
                        )));
                    }
                    d.duration = Some(duration);
                    Ok(())
                },
                |d| d.duration = None,
                |d| d.duration.is_some(),
            ),
            Step::new(
                "plate",
                |d, s| match s {
                    VignetteSelection::Plate(plate) => {
                        d.plate = Some(accept_plate(&plate)?);
                        Ok(())
                    }
                    _ => Err(unexpected("plate")),
                },
                |d| d.plate = None,
                |d| d.plate.is_some(),
            ),
            Step::new(
                "start",
                |d, s| {
                    let VignetteSelection::Start(start) = s else {
                        return Err(unexpected("start"));
                    };
                    validate_start_date(start, Utc::now().date_naive()).map_err(invalid)?;
                    d.start = Some(start);
                    Ok(())
                },
                |d| d.start = None,
                |d| d.start.is_some(),
            ),
        ]
    }

    fn request(draft: &VignetteDraft) -> Result<VignetteRequest> {
        let start = draft.start.ok_or_else(|| unset("start"))?;
        // A vignette for today is valid from the moment of purchase.
        let start_date = (start > Utc::now().date_naive())
            .then(|| start.and_time(NaiveTime::MIN).and_utc());
        Ok(VignetteRequest {
            country_id: draft.country.as_ref().ok_or_else(|| unset("country"))?.id.clone(),
            vehicle_type_id: draft.vehicle.as_ref().ok_or_else(|| unset("vehicle"))?.id.clone(),
            duration_id: draft.duration.as_ref().ok_or_else(|| unset("duration"))?.id.clone(),
            license_plate: draft.plate.clone().ok_or_else(|| unset("plate"))?,
            start_date,
        })
    }

    fn describe(_draft: &VignetteDraft, receipt: &VignetteReceipt) -> NewTransaction {
        transaction::<Self>(
            format!("{} Vignette", receipt.country),
            format!(
                "{} - {} - {}",
                receipt.license_plate, receipt.duration, receipt.vignette_id
            ),
            receipt.amount,
            &receipt.currency,
        )
    }

    fn plate(draft: &VignetteDraft) -> Option<String> {
        draft.plate.clone()
    }
}
