//! Purchase requests and the receipts the services return for them.

use super::catalog::LotteryKind;
use super::money::Money;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Status of an instant purchase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PurchaseStatus {
    Completed,
}

/// Status of a parking session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionStatus {
    Active,
}

/// Temporal status of a vignette order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    Pending,
    Active,
    Expired,
}

impl OrderStatus {
    pub fn at(now: DateTime<Utc>, start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        if now < start {
            OrderStatus::Pending
        } else if now < end {
            OrderStatus::Active
        } else {
            OrderStatus::Expired
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopupRequest {
    pub operator_id: String,
    pub amount: Money,
    pub phone_number: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopupReceipt {
    pub transaction_id: Uuid,
    pub operator: String,
    pub phone_number: String,
    pub amount: Money,
    pub currency: String,
    pub status: PurchaseStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoucherRequest {
    pub brand_id: String,
    pub amount: Money,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoucherReceipt {
    pub transaction_id: Uuid,
    pub brand: String,
    pub redemption_code: String,
    pub amount: Money,
    pub currency: String,
    pub status: PurchaseStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GamingRequest {
    pub platform_id: String,
    pub voucher_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GamingReceipt {
    pub transaction_id: Uuid,
    pub platform: String,
    pub voucher_label: String,
    pub code: String,
    pub amount: Money,
    pub currency: String,
    pub status: PurchaseStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LotteryRequest {
    pub product_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quick_pick: Option<Vec<u8>>,
}

/// What the buyer walks away with from a lottery purchase.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "type")]
pub enum LotteryArtifact {
    #[serde(rename_all = "camelCase")]
    Ticket {
        ticket_number: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        draw_date: Option<NaiveDate>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        quick_pick: Option<Vec<u8>>,
    },
    #[serde(rename_all = "camelCase")]
    Paysafe { pin: String, serial: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LotteryReceipt {
    pub transaction_id: Uuid,
    pub product: String,
    pub kind: LotteryKind,
    pub artifact: LotteryArtifact,
    pub amount: Money,
    pub currency: String,
    pub status: PurchaseStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParkingRequest {
    pub city_id: String,
    pub zone_id: String,
    pub license_plate: String,
    pub duration_minutes: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParkingReceipt {
    pub session_id: Uuid,
    pub ticket_number: String,
    pub city: String,
    pub zone: String,
    pub license_plate: String,
    pub duration_label: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub amount: Money,
    pub currency: String,
    pub status: SessionStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VignetteRequest {
    pub country_id: String,
    pub vehicle_type_id: String,
    pub duration_id: String,
    pub license_plate: String,
    /// Defaults to the moment of purchase.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VignetteReceipt {
    pub order_id: Uuid,
    pub vignette_id: String,
    pub country: String,
    pub vehicle_type: String,
    pub duration: String,
    pub license_plate: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub amount: Money,
    pub currency: String,
    pub status: OrderStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderStatusResult {
    pub order_id: Uuid,
    pub vignette_id: String,
    pub status: OrderStatus,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
}
