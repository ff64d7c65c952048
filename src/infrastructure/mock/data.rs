//! Built-in demo catalog tables.

use crate::domain::catalog::{
    GamingPlatform, LotteryKind, LotteryProduct, ParkingCity, ParkingDuration, ParkingZone,
    PickRule, RetailBrand, TelcoOperator, Validity, VehicleType, VignetteCountry,
    VignetteDuration, VoucherDenomination,
};
use crate::domain::money::{DEFAULT_CURRENCY, Money};
use chrono::Weekday;

fn eur(cents: u32) -> Money {
    Money::from_cents(cents)
}

fn amounts(whole: &[u32]) -> Vec<Money> {
    whole.iter().map(|w| eur(w * 100)).collect()
}

pub fn operators() -> Vec<TelcoOperator> {
    [
        ("a1", "A1 Hrvatska", "A1", "#E4002B"),
        ("t-mobile", "T-Mobile", "TM", "#E20074"),
        ("telemach", "Telemach", "TE", "#78BE20"),
    ]
    .into_iter()
    .map(|(id, name, logo, color)| TelcoOperator {
        id: id.into(),
        name: name.into(),
        logo: logo.into(),
        color: color.into(),
        amounts: amounts(&[2, 5, 10, 15, 20, 25, 50]),
    })
    .collect()
}

pub fn brands() -> Vec<RetailBrand> {
    let brand = |id: &str, name: &str, icon: &str, color: &str, values: &[u32]| RetailBrand {
        id: id.into(),
        name: name.into(),
        icon: icon.into(),
        color: color.into(),
        amounts: amounts(values),
    };
    vec![
        brand("ikea", "IKEA", "IK", "#0058A3", &[10, 25, 50, 100]),
        brand("hm", "H&M", "HM", "#E50010", &[10, 25, 50]),
        brand("zara", "Zara", "ZA", "#000000", &[25, 50, 100]),
        brand("spotify", "Spotify", "SP", "#1DB954", &[10, 30, 60]),
        brand("netflix", "Netflix", "NF", "#E50914", &[15, 25, 50]),
        brand("amazon", "Amazon", "AZ", "#FF9900", &[10, 25, 50, 100]),
        brand("google-play", "Google Play", "GP", "#01875F", &[10, 15, 25, 50]),
        brand("apple", "Apple / App Store", "AP", "#555555", &[10, 15, 25, 50, 100]),
    ]
}

pub fn platforms() -> Vec<GamingPlatform> {
    let vouchers = |items: &[(&str, &str, u32)]| -> Vec<VoucherDenomination> {
        items
            .iter()
            .map(|(id, label, cents)| VoucherDenomination {
                id: (*id).into(),
                label: (*label).into(),
                price: eur(*cents),
                currency: DEFAULT_CURRENCY.into(),
            })
            .collect()
    };
    let platform = |id: &str,
                    name: &str,
                    icon: &str,
                    color: &str,
                    items: Vec<VoucherDenomination>| GamingPlatform {
        id: id.into(),
        name: name.into(),
        icon: icon.into(),
        color: color.into(),
        vouchers: items,
    };
    vec![
        platform(
            "playstation",
            "PlayStation",
            "PS",
            "#003087",
            vouchers(&[
                ("psn-10", "PSN €10", 1000),
                ("psn-20", "PSN €20", 2000),
                ("psn-50", "PSN €50", 5000),
                ("psn-100", "PSN €100", 10000),
                ("ps-plus-1m", "PS Plus 1 Month", 899),
                ("ps-plus-3m", "PS Plus 3 Months", 2499),
                ("ps-plus-12m", "PS Plus 12 Months", 5999),
            ]),
        ),
        platform(
            "xbox",
            "Xbox",
            "XB",
            "#107C10",
            vouchers(&[
                ("xbox-10", "Xbox €10", 1000),
                ("xbox-20", "Xbox €20", 2000),
                ("xbox-50", "Xbox €50", 5000),
                ("gamepass-1m", "Game Pass 1 Month", 1499),
                ("gamepass-3m", "Game Pass 3 Months", 3999),
            ]),
        ),
        platform(
            "steam",
            "Steam",
            "ST",
            "#1B2838",
            vouchers(&[
                ("steam-10", "Steam €10", 1000),
                ("steam-20", "Steam €20", 2000),
                ("steam-50", "Steam €50", 5000),
                ("steam-100", "Steam €100", 10000),
            ]),
        ),
        platform(
            "nintendo",
            "Nintendo",
            "NI",
            "#E4000F",
            vouchers(&[
                ("nin-15", "Nintendo €15", 1500),
                ("nin-25", "Nintendo €25", 2500),
                ("nin-50", "Nintendo €50", 5000),
                ("nso-1m", "NSO 1 Month", 399),
                ("nso-12m", "NSO 12 Months", 1999),
            ]),
        ),
    ]
}

pub fn lottery_products() -> Vec<LotteryProduct> {
    let draw = |id: &str,
                name: &str,
                icon: &str,
                description: &str,
                cents: u32,
                pick: Option<PickRule>,
                days: &[Weekday]| LotteryProduct {
        id: id.into(),
        name: name.into(),
        icon: icon.into(),
        description: description.into(),
        price: eur(cents),
        kind: LotteryKind::Lottery,
        pick,
        draw_days: days.to_vec(),
    };
    let paysafe = |value: u32| LotteryProduct {
        id: format!("paysafe-{value}"),
        name: format!("Paysafecard €{value}"),
        icon: "CreditCard".into(),
        description: "Prepaid online payment voucher. Use anywhere Paysafecard is accepted."
            .into(),
        price: eur(value * 100),
        kind: LotteryKind::Paysafe,
        pick: None,
        draw_days: Vec::new(),
    };

    vec![
        draw(
            "loto-6-45",
            "Loto 6/45",
            "CircleDot",
            "Pick 6 numbers from 1-45. Draws every Wednesday and Saturday.",
            150,
            Some(PickRule { count: 6, max: 45 }),
            &[Weekday::Wed, Weekday::Sat],
        ),
        draw(
            "eurojackpot",
            "EuroJackpot",
            "Star",
            "European lottery with jackpots up to €120 million. Draws Tue & Fri.",
            200,
            Some(PickRule { count: 5, max: 50 }),
            &[Weekday::Tue, Weekday::Fri],
        ),
        draw(
            "bingo",
            "TV Bingo",
            "Tv",
            "Classic bingo game, live draw on TV. Every Monday at 19:15.",
            100,
            None,
            &[Weekday::Mon],
        ),
        draw(
            "scratch-luck",
            "Scratch Card - Lucky 7",
            "Clover",
            "Instant scratch card. Match 3 symbols to win up to €10,000.",
            200,
            None,
            &[],
        ),
        draw(
            "scratch-gold",
            "Scratch Card - Gold Rush",
            "Coins",
            "Premium scratch card. Win up to €50,000 instantly.",
            500,
            None,
            &[],
        ),
        paysafe(10),
        paysafe(25),
        paysafe(50),
        paysafe(100),
    ]
}

fn zone(id: &str, name: &str, color: &str, rate_cents: u32, hours: &str) -> ParkingZone {
    ParkingZone {
        id: id.into(),
        name: name.into(),
        color: color.into(),
        hourly_rate: eur(rate_cents),
        operating_hours: hours.into(),
    }
}

pub fn cities() -> Vec<ParkingCity> {
    let city = |id: &str, name: &str, region: &str, zones: Vec<ParkingZone>| ParkingCity {
        id: id.into(),
        name: name.into(),
        region: region.into(),
        zones,
    };
    vec![
        city(
            "zagreb",
            "Zagreb",
            "Central Croatia",
            vec![
                zone("zg-z1", "Zone 1 - Strict Centre", "#EF4444", 160, "Mon-Sat 07:00-22:00"),
                zone("zg-z2", "Zone 2 - Centre", "#F59E0B", 110, "Mon-Sat 07:00-22:00"),
                zone("zg-z3", "Zone 3 - Wider Centre", "#3B82F6", 60, "Mon-Sat 07:00-22:00"),
                zone("zg-z4", "Zone 4 - Suburbs", "#22C55E", 30, "Mon-Fri 07:00-19:00"),
            ],
        ),
        city(
            "split",
            "Split",
            "Dalmatia",
            vec![
                zone("st-z0", "Zone 0 - Diocletian's Palace", "#991B1B", 200, "Mon-Sun 00:00-24:00"),
                zone("st-z1", "Zone 1 - City Centre", "#EF4444", 160, "Mon-Sat 07:00-22:00"),
                zone("st-z2", "Zone 2 - Bacvice & Firule", "#F59E0B", 110, "Mon-Sat 07:00-22:00"),
                zone("st-z3", "Zone 3 - Suburban", "#3B82F6", 60, "Mon-Sat 07:00-20:00"),
            ],
        ),
        city(
            "dubrovnik",
            "Dubrovnik",
            "Dalmatia",
            vec![
                zone("du-z1", "Zone 1 - Old Town / Pile", "#EF4444", 250, "Mon-Sun 00:00-24:00"),
                zone("du-z2", "Zone 2 - Gruz & Lapad", "#F59E0B", 130, "Mon-Sun 06:00-22:00"),
                zone("du-z3", "Zone 3 - Wider Area", "#3B82F6", 80, "Mon-Sat 07:00-20:00"),
            ],
        ),
        city(
            "rijeka",
            "Rijeka",
            "Kvarner",
            vec![
                zone("ri-z1", "Zone 1 - Korzo / Centre", "#EF4444", 140, "Mon-Sat 07:00-21:00"),
                zone("ri-z2", "Zone 2 - Inner City", "#F59E0B", 90, "Mon-Sat 07:00-21:00"),
                zone("ri-z3", "Zone 3 - Wider Area", "#3B82F6", 50, "Mon-Fri 07:00-17:00"),
            ],
        ),
        city(
            "pula",
            "Pula",
            "Istria",
            vec![
                zone("pu-z1", "Zone 1 - Arena / Forum", "#EF4444", 130, "Mon-Sat 07:00-22:00"),
                zone("pu-z2", "Zone 2 - City Centre", "#F59E0B", 80, "Mon-Sat 07:00-21:00"),
            ],
        ),
        city(
            "osijek",
            "Osijek",
            "Slavonia",
            vec![
                zone("os-z1", "Zone 1 - Upper Town", "#EF4444", 80, "Mon-Fri 07:00-19:00, Sat 07:00-14:00"),
                zone("os-z2", "Zone 2 - Lower Town", "#F59E0B", 50, "Mon-Fri 07:00-17:00"),
            ],
        ),
    ]
}

pub fn parking_durations() -> Vec<ParkingDuration> {
    [
        ("30min", "30 min", 30),
        ("1h", "1 hour", 60),
        ("2h", "2 hours", 120),
        ("3h", "3 hours", 180),
        ("all-day", "All Day", 480),
    ]
    .into_iter()
    .map(|(id, label, minutes)| ParkingDuration {
        id: id.into(),
        label: label.into(),
        minutes,
    })
    .collect()
}

fn duration(id: &str, label: &str, cents: u32, validity: Validity) -> VignetteDuration {
    VignetteDuration {
        id: id.into(),
        label: label.into(),
        price: eur(cents),
        validity,
    }
}

fn car(durations: Vec<VignetteDuration>) -> VehicleType {
    VehicleType {
        id: "car".into(),
        label: "Car (up to 3.5t)".into(),
        icon: "car".into(),
        durations,
    }
}

fn motorcycle(durations: Vec<VignetteDuration>) -> VehicleType {
    VehicleType {
        id: "motorcycle".into(),
        label: "Motorcycle".into(),
        icon: "motorcycle".into(),
        durations,
    }
}

pub fn countries() -> Vec<VignetteCountry> {
    use Validity::{Days, Months, Years};

    let country = |id: &str, name: &str, flag: &str, vehicle_types: Vec<VehicleType>| VignetteCountry {
        id: id.into(),
        name: name.into(),
        flag: flag.into(),
        currency: DEFAULT_CURRENCY.into(),
        vehicle_types,
    };
    vec![
        country(
            "slovenia",
            "Slovenia",
            "SI",
            vec![
                car(vec![
                    duration("7d", "7 Days", 1600, Days(7)),
                    duration("1m", "1 Month", 3200, Months(1)),
                    duration("1y", "1 Year", 11700, Years(1)),
                ]),
                motorcycle(vec![
                    duration("7d", "7 Days", 800, Days(7)),
                    duration("1m", "1 Month", 1650, Months(1)),
                    duration("1y", "1 Year", 6000, Years(1)),
                ]),
            ],
        ),
        country(
            "austria",
            "Austria",
            "AT",
            vec![
                car(vec![
                    duration("10d", "10 Days", 1150, Days(10)),
                    duration("2m", "2 Months", 2890, Months(2)),
                    duration("1y", "1 Year", 9640, Years(1)),
                ]),
                motorcycle(vec![
                    duration("10d", "10 Days", 580, Days(10)),
                    duration("2m", "2 Months", 1450, Months(2)),
                    duration("1y", "1 Year", 3820, Years(1)),
                ]),
            ],
        ),
        country(
            "czech",
            "Czech Republic",
            "CZ",
            vec![car(vec![
                duration("10d", "10 Days", 1520, Days(10)),
                duration("1m", "1 Month", 2150, Months(1)),
                duration("1y", "1 Year", 5700, Years(1)),
            ])],
        ),
        country(
            "switzerland",
            "Switzerland",
            "CH",
            vec![car(vec![duration("1y", "1 Year", 4150, Years(1))])],
        ),
        country(
            "hungary",
            "Hungary",
            "HU",
            vec![VehicleType {
                label: "Car (D1 category)".into(),
                ..car(vec![
                    duration("10d", "10 Days", 1490, Days(10)),
                    duration("1m", "1 Month", 2090, Months(1)),
                    duration("1y", "1 Year", 15500, Years(1)),
                ])
            }],
        ),
        country(
            "bulgaria",
            "Bulgaria",
            "BG",
            vec![car(vec![
                duration("7d", "Weekend (7 Days)", 800, Days(7)),
                duration("1m", "1 Month", 1500, Months(1)),
                duration("3m", "3 Months", 2800, Months(3)),
                duration("1y", "1 Year", 4800, Years(1)),
            ])],
        ),
        country(
            "moldova",
            "Moldova",
            "MD",
            vec![car(vec![
                duration("7d", "7 Days", 400, Days(7)),
                duration("15d", "15 Days", 700, Days(15)),
                duration("1m", "1 Month", 1400, Months(1)),
                duration("1y", "1 Year", 3200, Years(1)),
            ])],
        ),
    ]
}
