use super::money::Money;
use chrono::{DateTime, Duration, Months, Utc, Weekday};
use serde::{Deserialize, Serialize};

/// Something that can be listed in a catalog and referenced by id.
pub trait CatalogEntity {
    fn id(&self) -> &str;
    fn name(&self) -> &str;
}

macro_rules! catalog_entity {
    ($ty:ty, $name:ident) => {
        impl CatalogEntity for $ty {
            fn id(&self) -> &str {
                &self.id
            }

            fn name(&self) -> &str {
                &self.$name
            }
        }
    };
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TelcoOperator {
    pub id: String,
    pub name: String,
    pub logo: String,
    pub color: String,
    pub amounts: Vec<Money>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RetailBrand {
    pub id: String,
    pub name: String,
    pub icon: String,
    pub color: String,
    pub amounts: Vec<Money>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoucherDenomination {
    pub id: String,
    pub label: String,
    pub price: Money,
    pub currency: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GamingPlatform {
    pub id: String,
    pub name: String,
    pub icon: String,
    pub color: String,
    pub vouchers: Vec<VoucherDenomination>,
}

impl GamingPlatform {
    pub fn voucher(&self, id: &str) -> Option<&VoucherDenomination> {
        self.vouchers.iter().find(|v| v.id == id)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LotteryKind {
    Lottery,
    Paysafe,
}

impl std::str::FromStr for LotteryKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "lottery" => Ok(LotteryKind::Lottery),
            "paysafe" => Ok(LotteryKind::Paysafe),
            other => Err(format!("Unknown product kind '{other}'")),
        }
    }
}

/// How many numbers a draw game takes and from which range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PickRule {
    pub count: u8,
    pub max: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LotteryProduct {
    pub id: String,
    pub name: String,
    pub icon: String,
    pub description: String,
    pub price: Money,
    pub kind: LotteryKind,
    /// Present for draw games that take a number pick.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pick: Option<PickRule>,
    /// Weekdays with a draw. Empty for instant products.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub draw_days: Vec<Weekday>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParkingZone {
    pub id: String,
    pub name: String,
    pub color: String,
    pub hourly_rate: Money,
    pub operating_hours: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParkingCity {
    pub id: String,
    pub name: String,
    pub region: String,
    pub zones: Vec<ParkingZone>,
}

impl ParkingCity {
    pub fn zone(&self, id: &str) -> Option<&ParkingZone> {
        self.zones.iter().find(|z| z.id == id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParkingDuration {
    pub id: String,
    pub label: String,
    pub minutes: u32,
}

/// How long a vignette stays valid after its start date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", tag = "unit", content = "count")]
pub enum Validity {
    Days(u32),
    Months(u32),
    Years(u32),
}

impl Validity {
    /// The instant a vignette starting at `start` stops being valid.
    pub fn end_from(self, start: DateTime<Utc>) -> DateTime<Utc> {
        let end = match self {
            Validity::Days(days) => start.checked_add_signed(Duration::days(i64::from(days))),
            Validity::Months(months) => start.checked_add_months(Months::new(months)),
            Validity::Years(years) => start.checked_add_months(Months::new(years * 12)),
        };
        end.unwrap_or(DateTime::<Utc>::MAX_UTC)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VignetteDuration {
    pub id: String,
    pub label: String,
    pub price: Money,
    pub validity: Validity,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleType {
    pub id: String,
    pub label: String,
    pub icon: String,
    pub durations: Vec<VignetteDuration>,
}

impl VehicleType {
    pub fn duration(&self, id: &str) -> Option<&VignetteDuration> {
        self.durations.iter().find(|d| d.id == id)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VignetteCountry {
    pub id: String,
    pub name: String,
    pub flag: String,
    pub currency: String,
    pub vehicle_types: Vec<VehicleType>,
}

impl VignetteCountry {
    pub fn vehicle_type(&self, id: &str) -> Option<&VehicleType> {
        self.vehicle_types.iter().find(|v| v.id == id)
    }

    /// The only vehicle type, when the country offers exactly one.
    pub fn sole_vehicle_type(&self) -> Option<&VehicleType> {
        match self.vehicle_types.as_slice() {
            [only] => Some(only),
            _ => None,
        }
    }
}

catalog_entity!(TelcoOperator, name);
catalog_entity!(RetailBrand, name);
catalog_entity!(VoucherDenomination, label);
catalog_entity!(GamingPlatform, name);
catalog_entity!(LotteryProduct, name);
catalog_entity!(ParkingZone, name);
catalog_entity!(ParkingCity, name);
catalog_entity!(ParkingDuration, label);
catalog_entity!(VignetteDuration, label);
catalog_entity!(VehicleType, label);
catalog_entity!(VignetteCountry, name);

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn zone(id: &str) -> ParkingZone {
        ParkingZone {
            id: id.into(),
            name: format!("Zone {id}"),
            color: "#EF4444".into(),
            hourly_rate: Money::new(dec!(1.10)).unwrap(),
            operating_hours: "Mon-Sat 07:00-22:00".into(),
        }
    }

    #[test]
    fn test_city_zone_lookup() {
        let city = ParkingCity {
            id: "zagreb".into(),
            name: "Zagreb".into(),
            region: "Central Croatia".into(),
            zones: vec![zone("zg-z1"), zone("zg-z2")],
        };
        assert_eq!(city.zone("zg-z2").map(|z| z.id()), Some("zg-z2"));
        assert!(city.zone("zg-z9").is_none());
    }

    #[test]
    fn test_zone_serializes_camel_case() {
        let value = serde_json::to_value(zone("zg-z2")).unwrap();
        assert_eq!(value["hourlyRate"], "1.10");
        assert_eq!(value["operatingHours"], "Mon-Sat 07:00-22:00");
    }

    #[test]
    fn test_validity_serialization() {
        let value = serde_json::to_value(Validity::Months(2)).unwrap();
        assert_eq!(value, serde_json::json!({"unit": "months", "count": 2}));
    }

    #[test]
    fn test_validity_end() {
        let start = DateTime::parse_from_rfc3339("2026-01-31T10:00:00Z")
            .unwrap()
            .with_timezone(&Utc);
        assert_eq!(
            Validity::Days(10).end_from(start).to_rfc3339(),
            "2026-02-10T10:00:00+00:00"
        );
        // Month arithmetic clamps to the last day of the month.
        assert_eq!(
            Validity::Months(1).end_from(start).to_rfc3339(),
            "2026-02-28T10:00:00+00:00"
        );
        assert_eq!(
            Validity::Years(1).end_from(start).to_rfc3339(),
            "2027-01-31T10:00:00+00:00"
        );
    }

    #[test]
    fn test_lottery_kind_parse() {
        assert_eq!("paysafe".parse::<LotteryKind>(), Ok(LotteryKind::Paysafe));
        assert!("bingo".parse::<LotteryKind>().is_err());
    }
}
