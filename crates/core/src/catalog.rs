//! Static catalog data for the order form.
//!
//! Package options, treat options and pickup time slots are fixed at build
//! time and served read-only. Nothing in the intake workflow writes to them.

use serde::Serialize;

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Packages
// ---------------------------------------------------------------------------

/// Package identifier for ordering individual treats by the dozen.
///
/// Selecting this package is what makes the `by-dozen` step applicable.
pub const UNIT_ORDER_PACKAGE: &str = "by-dozen";

/// A selectable package on the `package` step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PackageOption {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    /// Starting price in cents. `None` when priced per treat.
    pub base_price_cents: Option<u32>,
}

pub const PACKAGES: &[PackageOption] = &[
    PackageOption {
        id: "small",
        name: "Small Box",
        description: "A dozen assorted treats for small gatherings",
        base_price_cents: Some(4_500),
    },
    PackageOption {
        id: "medium",
        name: "Medium Box",
        description: "Two dozen assorted treats with a custom color scheme",
        base_price_cents: Some(8_500),
    },
    PackageOption {
        id: "large",
        name: "Large Spread",
        description: "Four dozen assorted treats styled to your event theme",
        base_price_cents: Some(16_000),
    },
    PackageOption {
        id: UNIT_ORDER_PACKAGE,
        name: "Order by the Dozen",
        description: "Pick exactly how many dozen of each treat you want",
        base_price_cents: None,
    },
];

/// Check whether a package id is part of the catalog.
pub fn is_known_package(id: &str) -> bool {
    PACKAGES.iter().any(|p| p.id == id)
}

/// Validate a package selection. The empty string clears the selection.
pub fn validate_package_type(id: &str) -> Result<(), CoreError> {
    if id.is_empty() || is_known_package(id) {
        return Ok(());
    }
    let known: Vec<&str> = PACKAGES.iter().map(|p| p.id).collect();
    Err(CoreError::Validation(format!(
        "Unknown package '{id}'. Must be one of: {}",
        known.join(", ")
    )))
}

// ---------------------------------------------------------------------------
// Treats
// ---------------------------------------------------------------------------

/// A treat that can be ordered by the dozen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TreatOption {
    pub id: &'static str,
    pub name: &'static str,
    pub price_per_dozen_cents: u32,
}

pub const TREATS: &[TreatOption] = &[
    TreatOption {
        id: "cake_pops",
        name: "Cake Pops",
        price_per_dozen_cents: 3_600,
    },
    TreatOption {
        id: "cupcakes",
        name: "Cupcakes",
        price_per_dozen_cents: 3_000,
    },
    TreatOption {
        id: "cookies",
        name: "Decorated Cookies",
        price_per_dozen_cents: 4_200,
    },
    TreatOption {
        id: "pretzel_rods",
        name: "Chocolate Pretzel Rods",
        price_per_dozen_cents: 2_400,
    },
];

// ---------------------------------------------------------------------------
// Pickup
// ---------------------------------------------------------------------------

/// Pickup windows offered on the `pickup` step.
pub const TIME_SLOTS: &[&str] = &[
    "10:00 AM - 11:00 AM",
    "11:00 AM - 12:00 PM",
    "12:00 PM - 1:00 PM",
    "2:00 PM - 3:00 PM",
    "3:00 PM - 4:00 PM",
    "4:00 PM - 5:00 PM",
];

/// Validate a pickup time. The empty string clears the selection.
pub fn validate_pickup_time(slot: &str) -> Result<(), CoreError> {
    if slot.is_empty() || TIME_SLOTS.contains(&slot) {
        return Ok(());
    }
    Err(CoreError::Validation(format!(
        "Unknown pickup time '{slot}'"
    )))
}

/// Validate a pickup date. Accepts an ISO `YYYY-MM-DD` date or the empty string.
pub fn validate_pickup_date(date: &str) -> Result<(), CoreError> {
    if date.is_empty() {
        return Ok(());
    }
    let invalid = || {
        CoreError::Validation(format!(
            "Invalid pickup date '{date}'. Expected YYYY-MM-DD"
        ))
    };
    let parsed = chrono::NaiveDate::parse_from_str(date, "%Y-%m-%d").map_err(|_| invalid())?;
    // chrono accepts unpadded fields; only the canonical form survives a reload.
    if parsed.format("%Y-%m-%d").to_string() != date {
        return Err(invalid());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unit_order_package_is_in_catalog() {
        assert!(is_known_package(UNIT_ORDER_PACKAGE));
    }

    #[test]
    fn package_validation_accepts_empty_and_known() {
        assert!(validate_package_type("").is_ok());
        assert!(validate_package_type("medium").is_ok());
        assert!(validate_package_type("enormous").is_err());
    }

    #[test]
    fn pickup_time_must_be_a_listed_slot() {
        assert!(validate_pickup_time("").is_ok());
        assert!(validate_pickup_time(TIME_SLOTS[0]).is_ok());
        assert!(validate_pickup_time("midnight").is_err());
    }

    #[test]
    fn pickup_date_must_be_iso() {
        assert!(validate_pickup_date("").is_ok());
        assert!(validate_pickup_date("2026-10-31").is_ok());
        assert!(validate_pickup_date("10/31/2026").is_err());
        assert!(validate_pickup_date("2026-02-30").is_err());
        assert!(validate_pickup_date("2026-1-5").is_err());
        assert!(validate_pickup_date("2026-01-05").is_ok());
    }
}
