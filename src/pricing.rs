//! Pricing
//!
//! Turns a product's list price into the price a given customer pays.

use decimal_percentage::Percentage;
use rust_decimal::Decimal;
use tracing::{debug, trace};

use crate::{
    categories::{CategoryMapping, CategoryMappings},
    customers::{CustomerDiscount, CustomerTier},
    discounts::CompoundDiscount,
    groups::StockState,
    products::Product,
    resolvers::{AppliedRule, DiscountResolver, Resolution, ResolutionContext, default_resolvers},
    rules::{DiscountRule, DiscountRules},
};

/// PPN multiplier (11% VAT) applied to displayed prices.
pub const PPN_FACTOR: Decimal = Decimal::from_parts(111, 0, 0, false, 2);

/// Price, category and stock of the product being priced.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceRequest<'a> {
    /// List price before discounts and tax.
    ///
    /// Zero or negative prices are never discounted. PPN saturates at
    /// [`Decimal::MAX`], so `price × 1.11` only holds below `Decimal::MAX / 1.11`.
    pub price: Decimal,

    /// Category label of the product.
    pub category: Option<&'a str>,

    /// Quantity available to sell; zero or less means indent.
    pub available_to_sell: Decimal,
}

impl<'a> PriceRequest<'a> {
    /// A request for an uncategorised product with nothing in stock.
    pub fn new(price: Decimal) -> Self {
        Self {
            price,
            category: None,
            available_to_sell: Decimal::ZERO,
        }
    }

    /// Set the product category.
    #[must_use]
    pub fn with_category(mut self, category: &'a str) -> Self {
        self.category = Some(category);
        self
    }

    /// Set the quantity available to sell.
    #[must_use]
    pub fn with_available(mut self, available_to_sell: Decimal) -> Self {
        self.available_to_sell = available_to_sell;
        self
    }

    /// Stock state derived from the available quantity.
    pub fn stock(&self) -> StockState {
        StockState::from_available(self.available_to_sell)
    }
}

/// Price breakdown for one product.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriceInfo {
    /// List price.
    pub original_price: Decimal,

    /// List price including PPN.
    pub original_price_with_ppn: Decimal,

    /// Price after every discount step.
    pub discounted_price: Decimal,

    /// Discounted price including PPN.
    pub discounted_price_with_ppn: Decimal,

    /// Whether any discount applied.
    pub has_discount: bool,

    /// Whether the rule name marks a customer-specific price.
    pub is_customer_discount: bool,

    /// Discount steps actually applied.
    pub discounts: CompoundDiscount,

    /// Rule that produced the discounts.
    pub rule: Option<AppliedRule>,
}

impl PriceInfo {
    /// Build the breakdown for a list price and the resolved discount, if any.
    pub fn new(price: Decimal, resolution: Option<Resolution>) -> Self {
        let (discounts, rule) = match resolution {
            Some(resolution) => {
                let (discounts, rule) = resolution.into_parts();

                (discounts, Some(rule))
            }
            None => (CompoundDiscount::none(), None),
        };

        let discounted_price = discounts.apply(price);

        Self {
            original_price: price,
            original_price_with_ppn: with_ppn(price),
            discounted_price,
            discounted_price_with_ppn: with_ppn(discounted_price),
            has_discount: !discounts.is_empty(),
            is_customer_discount: rule.as_ref().is_some_and(AppliedRule::is_customer),
            discounts,
            rule,
        }
    }

    /// Rule label, e.g. `Customer CP (Stock)`.
    pub fn rule_name(&self) -> Option<String> {
        self.rule.as_ref().map(ToString::to_string)
    }

    /// Amount taken off the list price, before tax.
    pub fn savings(&self) -> Decimal {
        self.original_price.saturating_sub(self.discounted_price)
    }

    /// Amount taken off the list price, including tax.
    pub fn savings_with_ppn(&self) -> Decimal {
        self.original_price_with_ppn
            .saturating_sub(self.discounted_price_with_ppn)
    }

    /// The single percentage equivalent to the whole discount chain.
    ///
    /// `30+5` is equivalent to 33.5%. Zero when the list price is not positive.
    pub fn effective_discount(&self) -> Percentage {
        if self.original_price <= Decimal::ZERO {
            return Percentage::from(Decimal::ZERO);
        }

        let ratio = self
            .savings()
            .checked_div(self.original_price)
            .unwrap_or(Decimal::ZERO);

        Percentage::from(ratio)
    }
}

/// Add PPN to a price, saturating at [`Decimal::MAX`].
pub fn with_ppn(price: Decimal) -> Decimal {
    price.saturating_mul(PPN_FACTOR)
}

/// Pricing engine holding the mapping and rule tables.
///
/// Pricing never fails: bad specs, unmapped categories and missing rules all
/// degrade to the list price.
#[derive(Debug)]
pub struct Pricer {
    mappings: CategoryMappings,
    rules: DiscountRules,
    resolvers: Vec<Box<dyn DiscountResolver>>,
}

impl Pricer {
    /// Create a pricer with the built-in tiers.
    pub fn new(mappings: CategoryMappings, rules: DiscountRules) -> Self {
        Self {
            mappings,
            rules,
            resolvers: default_resolvers(),
        }
    }

    /// Replace the tiers. Resolvers are asked in the given order.
    #[must_use]
    pub fn with_resolvers(mut self, resolvers: Vec<Box<dyn DiscountResolver>>) -> Self {
        self.resolvers = resolvers;
        self
    }

    /// Category mapping table.
    pub fn mappings(&self) -> &CategoryMappings {
        &self.mappings
    }

    /// Discount rule table.
    pub fn rules(&self) -> &DiscountRules {
        &self.rules
    }

    /// Find the discount for a product; the first tier with a non-empty chain wins.
    pub fn resolve(
        &self,
        request: &PriceRequest<'_>,
        customer: Option<&CustomerTier>,
    ) -> Option<Resolution> {
        let context = ResolutionContext {
            category_group: request
                .category
                .and_then(|category| self.mappings.discount_group(category)),
            stock: request.stock(),
            customer,
            rules: &self.rules,
        };

        let resolution = self
            .resolvers
            .iter()
            .find_map(|resolver| resolver.resolve(&context));

        match &resolution {
            Some(resolution) => debug!(
                category = ?request.category,
                stock = %context.stock,
                rule = %resolution.rule(),
                discounts = %resolution.discounts(),
                "resolved discount"
            ),
            None => trace!(category = ?request.category, stock = %context.stock, "no discount applies"),
        }

        resolution
    }

    /// Price one product.
    ///
    /// Zero and negative list prices are never discounted.
    pub fn price(&self, request: &PriceRequest<'_>, customer: Option<&CustomerTier>) -> PriceInfo {
        if request.price <= Decimal::ZERO {
            debug!(price = %request.price, "not discounting non-positive price");

            return PriceInfo::new(request.price, None);
        }

        PriceInfo::new(request.price, self.resolve(request, customer))
    }

    /// Price a listing of products, in order.
    pub fn price_all<'p>(
        &self,
        products: impl IntoIterator<Item = &'p Product>,
        customer: Option<&CustomerTier>,
    ) -> Vec<PriceInfo> {
        products
            .into_iter()
            .map(|product| self.price(&product.price_request(), customer))
            .collect()
    }
}

/// Price a single product from raw tables.
///
/// Builds the lookup tables and parses the customer's settings on every call;
/// use a [`Pricer`] when pricing more than one product.
pub fn compute_price(
    price: Decimal,
    category: Option<&str>,
    customer: Option<&CustomerDiscount>,
    mappings: &[CategoryMapping],
    available_to_sell: Decimal,
    rules: &[DiscountRule],
) -> PriceInfo {
    let pricer = Pricer::new(mappings.iter().collect(), rules.iter().collect());
    let tier = customer.map(CustomerTier::from);

    let request = PriceRequest {
        price,
        category,
        available_to_sell,
    };

    pricer.price(&request, tier.as_ref())
}
