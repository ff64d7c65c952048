use super::money::Money;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Copy)]
#[serde(rename_all = "lowercase")]
pub enum TransactionStatus {
    Completed,
    /// Reserved for asynchronous settlement; never written today.
    Pending,
    /// Reserved for asynchronous settlement; never written today.
    Failed,
}

/// What a wizard knows about a purchase before the ledger assigns identity.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTransaction {
    pub vertical: &'static str,
    pub category: &'static str,
    pub title: String,
    pub description: String,
    pub amount: Money,
    pub currency: String,
}

/// A completed purchase as kept in local history.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRecord {
    pub id: Uuid,
    #[serde(rename = "type")]
    pub vertical: String,
    pub category: String,
    pub title: String,
    pub description: String,
    pub amount: Money,
    pub currency: String,
    pub date: DateTime<Utc>,
    pub status: TransactionStatus,
}

impl TransactionRecord {
    pub fn completed(tx: NewTransaction, id: Uuid, date: DateTime<Utc>) -> Self {
        Self {
            id,
            vertical: tx.vertical.to_string(),
            category: tx.category.to_string(),
            title: tx.title,
            description: tx.description,
            amount: tx.amount,
            currency: tx.currency,
            date,
            status: TransactionStatus::Completed,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Copy, Default)]
#[serde(rename_all = "lowercase")]
pub enum VehicleKind {
    #[default]
    Car,
    Motorcycle,
}

impl std::str::FromStr for VehicleKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "car" => Ok(VehicleKind::Car),
            "motorcycle" => Ok(VehicleKind::Motorcycle),
            other => Err(format!("Unknown vehicle kind '{other}'")),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
#[serde(rename_all = "camelCase")]
pub struct SavedVehicle {
    pub id: Uuid,
    pub plate: String,
    pub nickname: String,
    pub kind: VehicleKind,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
#[serde(rename_all = "camelCase")]
pub struct LoyaltyCard {
    pub id: String,
    pub store_name: String,
    pub card_number: String,
    pub color: String,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_completed_record_wire_format() {
        let record = TransactionRecord::completed(
            NewTransaction {
                vertical: "parking",
                category: "Parking",
                title: "Parking - Zone 2".into(),
                description: "ZG1234AB - 2 hours".into(),
                amount: Money::new(dec!(2.2)).unwrap(),
                currency: "EUR".into(),
            },
            Uuid::nil(),
            Utc::now(),
        );
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["type"], "parking");
        assert_eq!(value["status"], "completed");
        assert_eq!(value["amount"], "2.20");
    }
}
