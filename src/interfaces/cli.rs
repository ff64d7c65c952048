//! Command handlers behind the binary.
//!
//! A purchase resolves its ids against the vertical's catalog, then feeds the
//! resulting entities through the same [`Wizard`] an interactive front end
//! would use.

use crate::application::catalog::{CatalogLoader, CatalogState};
use crate::application::flows::{
    GamingSelection, LotterySelection, ParkingSelection, Pick, TopupSelection, VignetteSelection,
    VoucherSelection,
};
use crate::application::ledger::Ledger;
use crate::application::wizard::{Completion, Flow, Wizard};
use crate::config::{BuyCommand, CardCommand, ParkingArgs, VehicleCommand, VignetteArgs};
use crate::domain::catalog::{CatalogEntity, ParkingDuration};
use crate::domain::money::Money;
use crate::domain::ports::{ServiceBox, Services};
use crate::domain::vertical::Vertical;
use crate::error::{MarketError, Result};
use crate::infrastructure::mock::data;
use crate::interfaces::csv::transaction_writer::TransactionWriter;
use serde::Serialize;
use std::io::Write;
use std::time::Duration;

/// Runs `buy <vertical>` and prints the receipt.
pub async fn buy(
    services: &Services,
    ledger: &Ledger,
    timeout: Duration,
    command: BuyCommand,
    out: &mut impl Write,
) -> Result<()> {
    match command {
        BuyCommand::Topup {
            operator,
            amount,
            phone,
        } => {
            let catalog = load_catalog(services.topups.clone(), timeout).await?;
            let operator = find(&catalog, &operator, "Operator")?;
            let selections = vec![
                ("operator", TopupSelection::Operator(operator)),
                ("amount", TopupSelection::Amount(Money::new(amount)?)),
                ("phone", TopupSelection::Phone(phone)),
            ];
            let done = purchase(services.topups.clone(), ledger, timeout, selections).await?;
            print_completion(out, &done)
        }
        BuyCommand::Voucher { brand, amount } => {
            let catalog = load_catalog(services.vouchers.clone(), timeout).await?;
            let brand = find(&catalog, &brand, "Brand")?;
            let selections = vec![
                ("brand", VoucherSelection::Brand(brand)),
                ("amount", VoucherSelection::Amount(Money::new(amount)?)),
            ];
            let done = purchase(services.vouchers.clone(), ledger, timeout, selections).await?;
            print_completion(out, &done)
        }
        BuyCommand::Gaming { platform, voucher } => {
            let catalog = load_catalog(services.gaming.clone(), timeout).await?;
            let platform = find(&catalog, &platform, "Platform")?;
            let voucher = find(&platform.vouchers, &voucher, "Voucher")?;
            let selections = vec![
                ("platform", GamingSelection::Platform(platform)),
                ("voucher", GamingSelection::Voucher(voucher)),
            ];
            let done = purchase(services.gaming.clone(), ledger, timeout, selections).await?;
            print_completion(out, &done)
        }
        BuyCommand::Lottery { product, numbers } => {
            let catalog = load_catalog(services.lottery.clone(), timeout).await?;
            let product = find(&catalog, &product, "Product")?;
            let pick = numbers.map_or(Pick::Quick, Pick::Numbers);
            let selections = vec![
                ("product", LotterySelection::Product(product)),
                ("numbers", LotterySelection::Pick(pick)),
            ];
            let done = purchase(services.lottery.clone(), ledger, timeout, selections).await?;
            print_completion(out, &done)
        }
        BuyCommand::Parking(args) => buy_parking(services, ledger, timeout, args, out).await,
        BuyCommand::Vignette(args) => buy_vignette(services, ledger, timeout, args, out).await,
    }
}

async fn buy_parking(
    services: &Services,
    ledger: &Ledger,
    timeout: Duration,
    args: ParkingArgs,
    out: &mut impl Write,
) -> Result<()> {
    let catalog = load_catalog(services.parking.clone(), timeout).await?;
    let city = find(&catalog, &args.city, "City")?;
    let zone = find(&city.zones, &args.zone, "Zone")?;
    let selections = vec![
        ("city", ParkingSelection::City(city)),
        ("zone", ParkingSelection::Zone(zone)),
        ("plate", ParkingSelection::Plate(args.plate)),
        ("duration", ParkingSelection::Duration(parking_duration(args.minutes))),
    ];
    let done = purchase(services.parking.clone(), ledger, timeout, selections).await?;
    print_completion(out, &done)
}

/// A preset duration when one matches, a custom one otherwise.
fn parking_duration(minutes: u32) -> ParkingDuration {
    data::parking_durations()
        .into_iter()
        .find(|d| d.minutes == minutes)
        .unwrap_or_else(|| ParkingDuration {
            id: format!("{minutes}min"),
            label: format!("{minutes} min"),
            minutes,
        })
}

async fn buy_vignette(
    services: &Services,
    ledger: &Ledger,
    timeout: Duration,
    args: VignetteArgs,
    out: &mut impl Write,
) -> Result<()> {
    let catalog = load_catalog(services.vignettes.clone(), timeout).await?;
    let country = find(&catalog, &args.country, "Country")?;
    let vehicle = match (&args.vehicle, country.sole_vehicle_type()) {
        (Some(id), _) => find(&country.vehicle_types, id, "Vehicle type")?,
        (None, Some(only)) => only.clone(),
        (None, None) => {
            return Err(MarketError::MissingParam(format!(
                "--vehicle is required for {}",
                country.name
            )));
        }
    };
    let duration = find(&vehicle.durations, &args.duration, "Duration")?;
    let start = args
        .start
        .unwrap_or_else(|| chrono::Utc::now().date_naive());
    let selections = vec![
        ("country", VignetteSelection::Country(country)),
        ("vehicle", VignetteSelection::Vehicle(vehicle)),
        ("duration", VignetteSelection::Duration(duration)),
        ("plate", VignetteSelection::Plate(args.plate)),
        ("start", VignetteSelection::Start(start)),
    ];
    let done = purchase(services.vignettes.clone(), ledger, timeout, selections).await?;
    print_completion(out, &done)
}

async fn load_catalog<V: Vertical>(
    service: ServiceBox<V>,
    timeout: Duration,
) -> Result<Vec<V::Entity>> {
    let mut loader = CatalogLoader::<V>::new(service).with_timeout(timeout);
    match loader.load().await {
        CatalogState::Ready(entities) => Ok(entities.clone()),
        CatalogState::Failed(body) => Err(body.clone().into()),
        CatalogState::Idle => Err(MarketError::InvalidState(format!(
            "{} catalog was not loaded",
            V::NAME
        ))),
    }
}

fn find<E: CatalogEntity + Clone>(entities: &[E], id: &str, what: &str) -> Result<E> {
    entities
        .iter()
        .find(|e| e.id() == id)
        .cloned()
        .ok_or_else(|| MarketError::NotFound(format!("{what} '{id}' not found")))
}

/// Walks the wizard through `selections` and submits.
///
/// Selections for steps the wizard filled on its own are dropped.
async fn purchase<F: Flow>(
    service: ServiceBox<F>,
    ledger: &Ledger,
    timeout: Duration,
    selections: Vec<(&'static str, F::Selection)>,
) -> Result<Completion<F::Receipt>> {
    let mut wizard = Wizard::<F>::new(service, ledger.clone()).with_timeout(timeout);
    for (step, selection) in selections {
        if wizard.is_skipped(step) {
            tracing::debug!(vertical = F::NAME, step, "Ignoring selection for a filled step");
            continue;
        }
        wizard.advance(selection)?;
    }
    let completion = wizard.submit().await?;
    Ok(completion.clone())
}

fn print_completion<R: Serialize>(out: &mut impl Write, done: &Completion<R>) -> Result<()> {
    writeln!(
        out,
        "{}: {} {}",
        done.record.title, done.record.amount, done.record.currency
    )?;
    writeln!(out, "{}", serde_json::to_string_pretty(&done.receipt)?)?;
    if let Some(plate) = &done.save_vehicle_prompt {
        writeln!(
            out,
            "{plate} is not a saved vehicle. Save it with `marketio vehicles add \"{plate}\"`."
        )?;
    }
    Ok(())
}

pub async fn history(ledger: &Ledger, csv: bool, out: &mut impl Write) -> Result<()> {
    let records = ledger.transactions().await?;
    if csv {
        return TransactionWriter::new(out).write_transactions(&records);
    }
    if records.is_empty() {
        writeln!(out, "No purchases yet")?;
    }
    for record in &records {
        writeln!(
            out,
            "{}  {:<18} {:<40} {:>8} {}",
            record.date.format("%Y-%m-%d %H:%M"),
            record.category,
            record.title,
            record.amount,
            record.currency
        )?;
    }
    Ok(())
}

pub async fn vehicles(ledger: &Ledger, action: VehicleCommand, out: &mut impl Write) -> Result<()> {
    match action {
        VehicleCommand::List => {
            for vehicle in ledger.vehicles().await? {
                writeln!(
                    out,
                    "{}  {:<12} {:<20} {:?}",
                    vehicle.id, vehicle.plate, vehicle.nickname, vehicle.kind
                )?;
            }
        }
        VehicleCommand::Add {
            plate,
            nickname,
            kind,
        } => {
            let vehicle = ledger.save_vehicle(&plate, nickname.as_deref(), kind).await?;
            writeln!(out, "Saved {} as {}", vehicle.plate, vehicle.id)?;
        }
        VehicleCommand::Remove { id } => {
            if !ledger.delete_vehicle(id).await? {
                return Err(MarketError::NotFound(format!("Vehicle '{id}' not found")));
            }
            writeln!(out, "Removed {id}")?;
        }
    }
    Ok(())
}

pub async fn cards(ledger: &Ledger, action: CardCommand, out: &mut impl Write) -> Result<()> {
    match action {
        CardCommand::List => {
            for card in ledger.ensure_default_cards().await? {
                writeln!(
                    out,
                    "{:<16} {:<16} {}",
                    card.id, card.store_name, card.card_number
                )?;
            }
        }
        CardCommand::Add {
            store,
            number,
            color,
        } => {
            let card = ledger.add_loyalty_card(&store, &number, &color).await?;
            writeln!(out, "Added {} card {}", card.store_name, card.id)?;
        }
        CardCommand::Remove { id } => {
            if !ledger.delete_loyalty_card(&id).await? {
                return Err(MarketError::NotFound(format!("Card '{id}' not found")));
            }
            writeln!(out, "Removed {id}")?;
        }
    }
    Ok(())
}

pub async fn theme(ledger: &Ledger, id: Option<String>, out: &mut impl Write) -> Result<()> {
    match id {
        Some(id) => {
            ledger.set_theme(&id).await?;
            writeln!(out, "Theme set to {id}")?;
        }
        None => {
            let current = ledger.theme().await?;
            writeln!(out, "{}", current.as_deref().unwrap_or("marketio"))?;
        }
    }
    Ok(())
}
