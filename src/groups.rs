//! Discount groups and stock state

use std::fmt;

use rust_decimal::Decimal;

/// A named discount tier that product categories are mapped to.
///
/// Customers carry their own overrides for the three built-in groups only.
/// Any other key is kept as [`DiscountGroup::Other`] and can still carry a
/// category-default rule.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DiscountGroup {
    /// `LP`
    Lp,

    /// `CP`
    Cp,

    /// `LIGHTING`
    Lighting,

    /// Any other group key.
    Other(String),
}

impl DiscountGroup {
    /// Parse a group key. Keys match exactly; an empty key means "no group".
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "" => None,
            "LP" => Some(Self::Lp),
            "CP" => Some(Self::Cp),
            "LIGHTING" => Some(Self::Lighting),
            other => Some(Self::Other(other.to_string())),
        }
    }

    /// The group key as stored in rule and mapping tables.
    pub fn key(&self) -> &str {
        match self {
            Self::Lp => "LP",
            Self::Cp => "CP",
            Self::Lighting => "LIGHTING",
            Self::Other(key) => key,
        }
    }
}

impl fmt::Display for DiscountGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Whether a product can ship now or has to be back-ordered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StockState {
    /// Available to sell is above zero.
    Ready,

    /// Nothing available; the order is placed on indent.
    Indent,
}

impl StockState {
    /// Derive the stock state from an available-to-sell quantity.
    pub fn from_available(available_to_sell: Decimal) -> Self {
        if available_to_sell > Decimal::ZERO {
            Self::Ready
        } else {
            Self::Indent
        }
    }

    /// Label used in rule names.
    pub fn label(self) -> &'static str {
        match self {
            Self::Ready => "Stock",
            Self::Indent => "Indent",
        }
    }
}

impl fmt::Display for StockState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
