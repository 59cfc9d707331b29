//! Product Fixtures

use rust_decimal::Decimal;
use rusty_money::iso::Currency;
use serde::Deserialize;

use crate::{
    fixtures::{FixtureError, currency_from_code, decimal_from_f64},
    products::Product,
};

/// A price written as text (`"12500 IDR"`, `"12500"`) or as a bare number.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum PriceFixture {
    /// Price text
    Text(String),

    /// Price number, in the catalog currency
    Number(f64),
}

/// Product fixture from YAML
#[derive(Debug, Deserialize)]
pub struct ProductFixture {
    /// Stock keeping unit
    pub sku: String,

    /// Product name
    pub name: String,

    /// Category label
    #[serde(default)]
    pub category: Option<String>,

    /// List price
    pub price: PriceFixture,

    /// Quantity available to sell
    #[serde(default)]
    pub available: f64,
}

impl ProductFixture {
    /// Convert to a [`Product`] priced in `currency`.
    ///
    /// # Errors
    ///
    /// Returns an error if the price or available quantity is invalid, or if
    /// the price names a different currency.
    pub fn try_into_product(self, currency: &'static Currency) -> Result<Product, FixtureError> {
        let price = match self.price {
            PriceFixture::Text(text) => parse_price(&text, currency)?,
            PriceFixture::Number(number) => decimal_from_f64(number)?,
        };

        Ok(Product {
            sku: self.sku,
            name: self.name,
            category: self.category,
            price,
            available_to_sell: decimal_from_f64(self.available)?,
        })
    }
}

/// Parse a price string (e.g. `"12500 IDR"` or `"12500"`) in the given currency.
///
/// # Errors
///
/// Returns an error if the string is not `AMOUNT` or `AMOUNT CURRENCY`, if the
/// amount is not a number, or if the currency is unknown or differs from
/// `currency`.
pub fn parse_price(s: &str, currency: &'static Currency) -> Result<Decimal, FixtureError> {
    let parts: Vec<&str> = s.split_whitespace().collect();

    let (amount, code) = match parts.as_slice() {
        [amount] => (*amount, None),
        [amount, code] => (*amount, Some(*code)),
        _ => {
            return Err(FixtureError::InvalidPrice(format!(
                "Expected format 'AMOUNT [CURRENCY]', got: {s}"
            )));
        }
    };

    if let Some(code) = code {
        let found = currency_from_code(code)?;

        if found != currency {
            return Err(FixtureError::CurrencyMismatch(
                currency.iso_alpha_code.to_string(),
                found.iso_alpha_code.to_string(),
            ));
        }
    }

    amount
        .parse::<Decimal>()
        .map_err(|_err| FixtureError::InvalidPrice(s.to_string()))
}
