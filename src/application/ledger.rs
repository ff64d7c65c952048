//! Locally persisted collections: purchase history, saved vehicles, loyalty
//! cards and the selected theme.
//!
//! Each collection is a JSON array under its own key. Every mutation reads the
//! whole array, changes it and writes it back, so the last writer wins.

use crate::domain::ports::{GeneratorBox, KeyValueStoreBox};
use crate::domain::records::{LoyaltyCard, NewTransaction, SavedVehicle, TransactionRecord, VehicleKind};
use crate::domain::validation::{is_valid_plate, normalize_plate};
use crate::error::{MarketError, Result};
use chrono::Utc;
use serde::Serialize;
use serde::de::DeserializeOwned;
use uuid::Uuid;

pub const TRANSACTIONS_KEY: &str = "marketio_transactions";
pub const VEHICLES_KEY: &str = "marketio_vehicles";
pub const LOYALTY_CARDS_KEY: &str = "marketio_loyalty_cards";
pub const THEME_KEY: &str = "marketio_theme";

/// Theme ids a client may select.
pub const THEMES: &[&str] = &["marketio", "croatia-banka", "erste", "pbz", "rba"];

#[derive(Clone)]
pub struct Ledger {
    store: KeyValueStoreBox,
    generator: GeneratorBox,
}

impl Ledger {
    pub fn new(store: KeyValueStoreBox, generator: GeneratorBox) -> Self {
        Self { store, generator }
    }

    async fn load<T: DeserializeOwned>(&self, key: &str) -> Result<Vec<T>> {
        match self.store.get(key).await? {
            Some(json) => Ok(serde_json::from_str(&json)?),
            None => Ok(Vec::new()),
        }
    }

    async fn save<T: Serialize>(&self, key: &str, items: &[T]) -> Result<()> {
        self.store.set(key, serde_json::to_string(items)?).await
    }

    /// Stamps a completed purchase with an id and the current time and puts
    /// it at the head of the history.
    pub async fn record_purchase(&self, tx: NewTransaction) -> Result<TransactionRecord> {
        let record = TransactionRecord::completed(tx, self.generator.uuid(), Utc::now());
        let mut history: Vec<TransactionRecord> = self.load(TRANSACTIONS_KEY).await?;
        history.insert(0, record.clone());
        self.save(TRANSACTIONS_KEY, &history).await?;
        tracing::debug!(id = %record.id, vertical = %record.vertical, "Transaction recorded");
        Ok(record)
    }

    /// Purchase history, newest first.
    pub async fn transactions(&self) -> Result<Vec<TransactionRecord>> {
        self.load(TRANSACTIONS_KEY).await
    }

    pub async fn vehicles(&self) -> Result<Vec<SavedVehicle>> {
        self.load(VEHICLES_KEY).await
    }

    /// Saves a plate under a nickname. The nickname defaults to the plate.
    pub async fn save_vehicle(
        &self,
        plate: &str,
        nickname: Option<&str>,
        kind: VehicleKind,
    ) -> Result<SavedVehicle> {
        if !is_valid_plate(plate) {
            return Err(MarketError::ValidationError(
                "Invalid license plate".to_string(),
            ));
        }
        let plate = normalize_plate(plate);
        let mut vehicles = self.vehicles().await?;
        if vehicles.iter().any(|v| normalize_plate(&v.plate) == plate) {
            return Err(MarketError::ValidationError(format!(
                "Vehicle {plate} is already saved"
            )));
        }

        let vehicle = SavedVehicle {
            id: self.generator.uuid(),
            nickname: nickname
                .map(str::trim)
                .filter(|n| !n.is_empty())
                .unwrap_or(&plate)
                .to_string(),
            plate,
            kind,
            created_at: Utc::now(),
        };
        vehicles.push(vehicle.clone());
        self.save(VEHICLES_KEY, &vehicles).await?;
        Ok(vehicle)
    }

    /// Returns whether a vehicle was removed.
    pub async fn delete_vehicle(&self, id: Uuid) -> Result<bool> {
        let mut vehicles = self.vehicles().await?;
        let before = vehicles.len();
        vehicles.retain(|v| v.id != id);
        if vehicles.len() == before {
            return Ok(false);
        }
        self.save(VEHICLES_KEY, &vehicles).await?;
        Ok(true)
    }

    /// Exact match on the normalized plate.
    pub async fn has_vehicle(&self, plate: &str) -> Result<bool> {
        let plate = normalize_plate(plate);
        Ok(self
            .vehicles()
            .await?
            .iter()
            .any(|v| normalize_plate(&v.plate) == plate))
    }

    pub async fn loyalty_cards(&self) -> Result<Vec<LoyaltyCard>> {
        self.load(LOYALTY_CARDS_KEY).await
    }

    pub async fn add_loyalty_card(
        &self,
        store_name: &str,
        card_number: &str,
        color: &str,
    ) -> Result<LoyaltyCard> {
        let (store_name, card_number) = (store_name.trim(), card_number.trim());
        if store_name.is_empty() || card_number.is_empty() {
            return Err(MarketError::ValidationError(
                "Store name and card number are required".to_string(),
            ));
        }

        let card = LoyaltyCard {
            id: self.generator.uuid().to_string(),
            store_name: store_name.to_string(),
            card_number: card_number.to_string(),
            color: color.to_string(),
            created_at: Utc::now(),
        };
        let mut cards = self.loyalty_cards().await?;
        cards.push(card.clone());
        self.save(LOYALTY_CARDS_KEY, &cards).await?;
        Ok(card)
    }

    /// Returns whether a card was removed.
    pub async fn delete_loyalty_card(&self, id: &str) -> Result<bool> {
        let mut cards = self.loyalty_cards().await?;
        let before = cards.len();
        cards.retain(|c| c.id != id);
        if cards.len() == before {
            return Ok(false);
        }
        self.save(LOYALTY_CARDS_KEY, &cards).await?;
        Ok(true)
    }

    /// Seeds the two demo cards when the wallet is empty and returns the
    /// wallet.
    pub async fn ensure_default_cards(&self) -> Result<Vec<LoyaltyCard>> {
        let cards = self.loyalty_cards().await?;
        if !cards.is_empty() {
            return Ok(cards);
        }

        let now = Utc::now();
        let defaults = vec![
            LoyaltyCard {
                id: "default-konzum".to_string(),
                store_name: "Konzum".to_string(),
                card_number: "2300 4567 8901 2345".to_string(),
                color: "#E30613".to_string(),
                created_at: now,
            },
            LoyaltyCard {
                id: "default-muller".to_string(),
                store_name: "Muller".to_string(),
                card_number: "9120 0033 4455 6677".to_string(),
                color: "#1E3A8A".to_string(),
                created_at: now,
            },
        ];
        self.save(LOYALTY_CARDS_KEY, &defaults).await?;
        Ok(defaults)
    }

    pub async fn theme(&self) -> Result<Option<String>> {
        self.store.get(THEME_KEY).await
    }

    pub async fn set_theme(&self, id: &str) -> Result<()> {
        if !THEMES.contains(&id) {
            return Err(MarketError::ValidationError(format!(
                "Unknown theme '{id}', expected one of: {}",
                THEMES.join(", ")
            )));
        }
        self.store.set(THEME_KEY, id.to_string()).await
    }
}
