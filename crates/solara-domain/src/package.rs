//! Static purchase-package catalog.

use std::sync::LazyLock;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Service category a package grants sessions for.
///
/// Matches the membership `kind`: a purchase of a package credits the
/// customer's membership of the same kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ServiceKind {
    SunBeds,
    SprayTan,
}

impl ServiceKind {
    /// Database and wire representation.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::SunBeds => "sun-beds",
            Self::SprayTan => "spray-tan",
        }
    }

    /// Parse the wire representation. Returns `None` for unknown values.
    pub fn from_kebab_case(s: &str) -> Option<Self> {
        match s {
            "sun-beds" => Some(Self::SunBeds),
            "spray-tan" => Some(Self::SprayTan),
            _ => None,
        }
    }
}

/// A purchasable offering.
#[derive(Debug, Clone, Serialize)]
pub struct Package {
    pub id: String,
    pub name_en: String,
    pub name_he: String,
    pub kind: ServiceKind,
    pub sessions: u32,
    pub price: Decimal,
    pub currency: String,
}

/// All catalog prices are in this currency.
pub const CURRENCY: &str = "ILS";

/// Session bounds for the synthesized `custom-tan` package.
pub const CUSTOM_TAN_MIN_SESSIONS: u32 = 4;
pub const CUSTOM_TAN_MAX_SESSIONS: u32 = 20;

/// Per-session rate for `custom-tan`, in whole ILS.
const CUSTOM_TAN_RATE: u32 = 35;

fn entry(
    id: &str,
    name_en: &str,
    name_he: &str,
    kind: ServiceKind,
    sessions: u32,
    price_ils: u32,
) -> Package {
    Package {
        id: id.to_owned(),
        name_en: name_en.to_owned(),
        name_he: name_he.to_owned(),
        kind,
        sessions,
        price: Decimal::from(price_ils),
        currency: CURRENCY.to_owned(),
    }
}

static CATALOG: LazyLock<Vec<Package>> = LazyLock::new(|| {
    vec![
        entry(
            "sunbed-1",
            "Single Sun-Bed Session",
            "מפגש שיזוף בודד",
            ServiceKind::SunBeds,
            1,
            49,
        ),
        entry(
            "sunbed-5",
            "5 Sun-Bed Sessions",
            "5 מפגשי שיזוף",
            ServiceKind::SunBeds,
            5,
            179,
        ),
        entry(
            "sunbed-10",
            "10 Sun-Bed Sessions",
            "10 מפגשי שיזוף",
            ServiceKind::SunBeds,
            10,
            299,
        ),
        entry(
            "sunbed-20",
            "20 Sun-Bed Sessions",
            "20 מפגשי שיזוף",
            ServiceKind::SunBeds,
            20,
            499,
        ),
        entry(
            "spray-1",
            "Single Spray Tan",
            "שיזוף בהתזה בודד",
            ServiceKind::SprayTan,
            1,
            89,
        ),
        entry(
            "spray-5",
            "5 Spray Tans",
            "5 שיזופי התזה",
            ServiceKind::SprayTan,
            5,
            349,
        ),
    ]
});

/// The full static catalog, in declaration order.
pub fn packages() -> &'static [Package] {
    &CATALOG
}

/// Exact-match lookup by package id.
pub fn package_by_id(id: &str) -> Option<&'static Package> {
    CATALOG.iter().find(|p| p.id == id)
}

/// All catalog entries of one kind, in declaration order.
pub fn packages_by_kind(kind: ServiceKind) -> Vec<&'static Package> {
    CATALOG.iter().filter(|p| p.kind == kind).collect()
}

/// Synthesize the `custom-tan` package for a caller-supplied session
/// count, priced linearly at the per-session rate.
///
/// Counts outside [`CUSTOM_TAN_MIN_SESSIONS`, `CUSTOM_TAN_MAX_SESSIONS`]
/// are rejected, never clamped.
pub fn custom_tan(sessions: u32) -> Option<Package> {
    if !(CUSTOM_TAN_MIN_SESSIONS..=CUSTOM_TAN_MAX_SESSIONS).contains(&sessions) {
        return None;
    }
    Some(Package {
        id: "custom-tan".to_owned(),
        name_en: format!("{sessions} Sun-Bed Sessions (Custom)"),
        name_he: format!("{sessions} מפגשי שיזוף בהתאמה אישית"),
        kind: ServiceKind::SunBeds,
        sessions,
        price: Decimal::from(sessions * CUSTOM_TAN_RATE),
        currency: CURRENCY.to_owned(),
    })
}
