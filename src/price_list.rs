//! Price list
//!
//! A priced product listing for one customer, rendered as a terminal table.

use std::io;

use rust_decimal::{Decimal, prelude::ToPrimitive};
use rusty_money::{Money, iso::Currency};
use tabled::{
    builder::Builder,
    settings::{
        Alignment, Style,
        object::{Columns, Rows},
    },
};
use thiserror::Error;

use crate::{
    customers::CustomerTier,
    groups::StockState,
    pricing::{PriceInfo, Pricer},
    products::Product,
};

/// Errors that can occur when writing a price list.
#[derive(Debug, Error)]
pub enum PriceListError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// One priced product.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriceListRow {
    /// Stock keeping unit
    pub sku: String,

    /// Product name
    pub name: String,

    /// Stock state the price was computed for
    pub stock: StockState,

    /// Price breakdown
    pub price: PriceInfo,
}

/// Priced products in listing order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PriceList {
    rows: Vec<PriceListRow>,
}

impl PriceList {
    /// Price every product for the given customer, or anonymously.
    pub fn build(pricer: &Pricer, products: &[Product], customer: Option<&CustomerTier>) -> Self {
        let rows = products
            .iter()
            .zip(pricer.price_all(products, customer))
            .map(|(product, price)| PriceListRow {
                sku: product.sku.clone(),
                name: product.name.clone(),
                stock: product.stock(),
                price,
            })
            .collect();

        Self { rows }
    }

    /// Rows in listing order.
    pub fn rows(&self) -> &[PriceListRow] {
        &self.rows
    }

    /// Sum of list prices including PPN.
    pub fn total_list_with_ppn(&self) -> Decimal {
        self.rows
            .iter()
            .fold(Decimal::ZERO, |acc, row| {
                acc.saturating_add(row.price.original_price_with_ppn)
            })
    }

    /// Sum of net prices including PPN.
    pub fn total_net_with_ppn(&self) -> Decimal {
        self.rows
            .iter()
            .fold(Decimal::ZERO, |acc, row| {
                acc.saturating_add(row.price.discounted_price_with_ppn)
            })
    }

    /// Write the list as a table followed by totals.
    ///
    /// # Errors
    ///
    /// Returns a [`PriceListError`] if writing to `out` fails.
    pub fn write_to(
        &self,
        mut out: impl io::Write,
        currency: &Currency,
    ) -> Result<(), PriceListError> {
        let mut builder = Builder::default();

        builder.push_record([
            "SKU",
            "Product",
            "Stock",
            "List Price",
            "Discount",
            "Net Price",
            "Net + PPN",
            "Rule",
        ]);

        for row in &self.rows {
            builder.push_record([
                row.sku.clone(),
                row.name.clone(),
                row.stock.to_string(),
                format_money(row.price.original_price, currency),
                discount_cell(&row.price),
                format_money(row.price.discounted_price, currency),
                format_money(row.price.discounted_price_with_ppn, currency),
                row.price.rule_name().unwrap_or_else(|| "-".to_string()),
            ]);
        }

        let mut table = builder.build();

        table.with(Style::modern_rounded());
        table.modify(Rows::first(), Alignment::center());
        table.modify(Columns::new(3..7), Alignment::right());

        writeln!(out, "{table}")?;

        let list = self.total_list_with_ppn();
        let net = self.total_net_with_ppn();

        writeln!(out, " List total (incl. PPN): {}", format_money(list, currency))?;
        writeln!(out, " Net total (incl. PPN):  {}", format_money(net, currency))?;
        writeln!(
            out,
            " You save:               {}",
            format_money(list.saturating_sub(net), currency)
        )?;

        Ok(())
    }
}

fn discount_cell(price: &PriceInfo) -> String {
    if price.has_discount {
        price.discounts.to_string()
    } else {
        "-".to_string()
    }
}

/// Format an amount in minor units of `currency`, falling back to the bare decimal on overflow.
fn format_money(amount: Decimal, currency: &Currency) -> String {
    10_i64
        .checked_pow(currency.exponent)
        .and_then(|scale| amount.checked_mul(Decimal::from(scale)))
        .and_then(|minor| minor.round_dp(0).to_i64())
        .map_or_else(
            || format!("{} {}", amount.round_dp(currency.exponent), currency.iso_alpha_code),
            |minor| Money::from_minor(minor, currency).to_string(),
        )
}

#[cfg(test)]
mod tests {
    use rusty_money::iso::{BHD, IDR, JPY};
    use testresult::TestResult;

    use crate::{
        categories::CategoryMapping,
        customers::CustomerDiscount,
        groups::DiscountGroup,
        rules::DiscountRule,
    };

    use super::*;

    fn pricer() -> Pricer {
        Pricer::new(
            [CategoryMapping::new("Kabel NYM", "CP")].into_iter().collect(),
            [DiscountRule::new(DiscountGroup::Cp, "30+5", "20")]
                .into_iter()
                .collect(),
        )
    }

    fn products() -> Vec<Product> {
        vec![
            Product::new("NYM-2x1.5", "Kabel NYM 2x1.5mm", Decimal::from(1000))
                .with_category("Kabel NYM")
                .with_available(Decimal::from(3)),
            Product::new("OBENG", "Obeng Plus", Decimal::from(500)),
        ]
    }

    #[test]
    fn build_prices_each_product_in_order() {
        let list = PriceList::build(&pricer(), &products(), None);

        let skus: Vec<&str> = list.rows().iter().map(|row| row.sku.as_str()).collect();

        assert_eq!(skus, vec!["NYM-2x1.5", "OBENG"]);
        assert_eq!(
            list.rows().first().map(|row| row.price.discounted_price),
            Some(Decimal::from(665))
        );
        assert_eq!(
            list.rows().get(1).map(|row| row.stock),
            Some(StockState::Indent)
        );
    }

    #[test]
    fn totals_include_ppn() {
        let list = PriceList::build(&pricer(), &products(), None);

        assert_eq!(list.total_list_with_ppn(), Decimal::from(1665));
        assert_eq!(list.total_net_with_ppn(), Decimal::new(129315, 2));
    }

    #[test]
    fn build_uses_customer_tier() {
        let tier = CustomerDiscount {
            discount1: Decimal::from(10),
            ..CustomerDiscount::default()
        }
        .tier();

        let list = PriceList::build(&pricer(), &products(), Some(&tier));

        let rules: Vec<Option<String>> = list.rows().iter().map(|row| row.price.rule_name()).collect();

        assert_eq!(
            rules,
            vec![
                Some("Customer Discount".to_string()),
                Some("Customer Discount".to_string())
            ]
        );
    }

    #[test]
    fn write_to_renders_rows_and_totals() -> TestResult {
        let list = PriceList::build(&pricer(), &products(), None);
        let mut out = Vec::new();

        list.write_to(&mut out, IDR)?;

        let rendered = String::from_utf8(out)?;

        assert!(rendered.contains("NYM-2x1.5"), "missing sku:\n{rendered}");
        assert!(rendered.contains("30+5"), "missing discount chain:\n{rendered}");
        assert!(rendered.contains("CP (Stock)"), "missing rule:\n{rendered}");
        assert!(rendered.contains("Net total (incl. PPN)"), "missing totals:\n{rendered}");

        Ok(())
    }

    #[test]
    fn format_money_scales_by_currency_exponent() {
        assert_eq!(
            format_money(Decimal::new(12_345, 2), IDR),
            Money::from_minor(12_345, IDR).to_string()
        );
        assert_eq!(
            format_money(Decimal::from(1234), JPY),
            Money::from_minor(1234, JPY).to_string()
        );
        assert_eq!(
            format_money(Decimal::new(1234, 3), BHD),
            Money::from_minor(1234, BHD).to_string()
        );
    }

    #[test]
    fn empty_list_renders_header_only() -> TestResult {
        let list = PriceList::default();
        let mut out = Vec::new();

        list.write_to(&mut out, IDR)?;

        let rendered = String::from_utf8(out)?;

        assert!(rendered.contains("SKU"), "missing header:\n{rendered}");
        assert_eq!(list.total_net_with_ppn(), Decimal::ZERO);

        Ok(())
    }
}
