//! Products

use rust_decimal::Decimal;

use crate::{groups::StockState, pricing::PriceRequest};

/// Product
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    /// Stock keeping unit
    pub sku: String,

    /// Product name
    pub name: String,

    /// Product category label
    pub category: Option<String>,

    /// List price, before discounts and tax
    pub price: Decimal,

    /// Quantity available to sell
    pub available_to_sell: Decimal,
}

impl Product {
    /// Create an uncategorised product with nothing in stock.
    pub fn new(sku: impl Into<String>, name: impl Into<String>, price: Decimal) -> Self {
        Self {
            sku: sku.into(),
            name: name.into(),
            category: None,
            price,
            available_to_sell: Decimal::ZERO,
        }
    }

    /// Set the category.
    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Set the quantity available to sell.
    #[must_use]
    pub fn with_available(mut self, available_to_sell: Decimal) -> Self {
        self.available_to_sell = available_to_sell;
        self
    }

    /// Stock state of the product.
    pub fn stock(&self) -> StockState {
        StockState::from_available(self.available_to_sell)
    }

    /// Pricing input for this product.
    pub fn price_request(&self) -> PriceRequest<'_> {
        PriceRequest {
            price: self.price,
            category: self.category.as_deref(),
            available_to_sell: self.available_to_sell,
        }
    }
}
