//! Customers

use rust_decimal::Decimal;

use crate::{
    discounts::CompoundDiscount,
    groups::{DiscountGroup, StockState},
};

/// Discount settings attached to a customer account.
///
/// Group fields hold compound discount specs (`"30+5"`). Indent fields are
/// optional; when unset or empty the stock spec for the same group is used.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CustomerDiscount {
    /// First flat percentage discount.
    pub discount1: Decimal,

    /// Second flat percentage discount, applied after `discount1`.
    pub discount2: Decimal,

    /// `LP` discount while in stock.
    pub discount_lp: String,

    /// `LP` discount on indent.
    pub discount_lp_indent: Option<String>,

    /// `CP` discount while in stock.
    pub discount_cp: String,

    /// `CP` discount on indent.
    pub discount_cp_indent: Option<String>,

    /// `LIGHTING` discount while in stock.
    pub discount_lighting: String,

    /// `LIGHTING` discount on indent.
    pub discount_lighting_indent: Option<String>,
}

impl CustomerDiscount {
    /// Parse these settings into a [`CustomerTier`].
    pub fn tier(&self) -> CustomerTier {
        CustomerTier::from(self)
    }
}

/// Parsed stock and indent discounts for one group.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupDiscounts {
    stock: CompoundDiscount,
    indent: Option<CompoundDiscount>,
}

impl GroupDiscounts {
    /// Parse a stock spec and an optional indent spec.
    pub fn parse(stock: &str, indent: Option<&str>) -> Self {
        Self {
            stock: CompoundDiscount::parse(stock),
            indent: indent
                .filter(|spec| !spec.is_empty())
                .map(CompoundDiscount::parse),
        }
    }

    /// Discount for the given stock state, falling back to the stock discount on indent.
    pub fn for_stock(&self, stock: StockState) -> &CompoundDiscount {
        match stock {
            StockState::Ready => &self.stock,
            StockState::Indent => self.indent.as_ref().unwrap_or(&self.stock),
        }
    }
}

/// A customer's discount settings, parsed once.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CustomerTier {
    flat: CompoundDiscount,
    lp: GroupDiscounts,
    cp: GroupDiscounts,
    lighting: GroupDiscounts,
}

impl CustomerTier {
    /// Flat discounts from `discount1` and `discount2`, whichever are above zero.
    pub fn flat(&self) -> &CompoundDiscount {
        &self.flat
    }

    /// Customer discount for a group and stock state.
    ///
    /// Returns `None` for groups customers carry no overrides for.
    pub fn group(&self, group: &DiscountGroup, stock: StockState) -> Option<&CompoundDiscount> {
        let discounts = match group {
            DiscountGroup::Lp => &self.lp,
            DiscountGroup::Cp => &self.cp,
            DiscountGroup::Lighting => &self.lighting,
            DiscountGroup::Other(_) => return None,
        };

        Some(discounts.for_stock(stock))
    }
}

impl From<&CustomerDiscount> for CustomerTier {
    fn from(customer: &CustomerDiscount) -> Self {
        Self {
            flat: [customer.discount1, customer.discount2].into_iter().collect(),
            lp: GroupDiscounts::parse(&customer.discount_lp, customer.discount_lp_indent.as_deref()),
            cp: GroupDiscounts::parse(&customer.discount_cp, customer.discount_cp_indent.as_deref()),
            lighting: GroupDiscounts::parse(
                &customer.discount_lighting,
                customer.discount_lighting_indent.as_deref(),
            ),
        }
    }
}

impl From<CustomerDiscount> for CustomerTier {
    fn from(customer: CustomerDiscount) -> Self {
        Self::from(&customer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flat_keeps_positive_discounts_in_order() {
        let customer = CustomerDiscount {
            discount1: Decimal::ZERO,
            discount2: Decimal::from(5),
            ..CustomerDiscount::default()
        };

        assert_eq!(customer.tier().flat().steps(), &[Decimal::from(5)]);

        let customer = CustomerDiscount {
            discount1: Decimal::from(10),
            discount2: Decimal::from(5),
            ..CustomerDiscount::default()
        };

        assert_eq!(
            customer.tier().flat().steps(),
            &[Decimal::from(10), Decimal::from(5)]
        );
    }

    #[test]
    fn indent_falls_back_to_stock_when_unset_or_empty() {
        let customer = CustomerDiscount {
            discount_lp: "15".to_string(),
            discount_cp: "20".to_string(),
            discount_cp_indent: Some(String::new()),
            ..CustomerDiscount::default()
        };
        let tier = customer.tier();

        assert_eq!(
            tier.group(&DiscountGroup::Lp, StockState::Indent),
            Some(&CompoundDiscount::parse("15"))
        );
        assert_eq!(
            tier.group(&DiscountGroup::Cp, StockState::Indent),
            Some(&CompoundDiscount::parse("20"))
        );
    }

    #[test]
    fn explicit_zero_indent_does_not_fall_back() {
        let customer = CustomerDiscount {
            discount_lighting: "25".to_string(),
            discount_lighting_indent: Some("0".to_string()),
            ..CustomerDiscount::default()
        };
        let tier = customer.tier();

        assert_eq!(
            tier.group(&DiscountGroup::Lighting, StockState::Indent),
            Some(&CompoundDiscount::none())
        );
        assert_eq!(
            tier.group(&DiscountGroup::Lighting, StockState::Ready),
            Some(&CompoundDiscount::parse("25"))
        );
    }

    #[test]
    fn other_groups_have_no_customer_discount() {
        let tier = CustomerDiscount::default().tier();

        assert_eq!(
            tier.group(&DiscountGroup::Other("CABLE".to_string()), StockState::Ready),
            None
        );
    }
}
