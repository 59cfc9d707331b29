//! Discount resolvers
//!
//! Each resolver is one pricing tier. A [`Pricer`](crate::pricing::Pricer)
//! asks its resolvers in priority order and keeps the first non-empty
//! discount chain; later tiers are never consulted once one has matched.

use std::fmt;

use crate::{
    customers::CustomerTier,
    discounts::CompoundDiscount,
    groups::{DiscountGroup, StockState},
    rules::DiscountRules,
};

pub mod category;
pub mod customer;

pub use category::CategoryDefaultResolver;
pub use customer::CustomerResolver;

/// Everything a resolver may look at for one product.
#[derive(Debug, Clone, Copy)]
pub struct ResolutionContext<'a> {
    /// Group the product's category is mapped to, if any.
    pub category_group: Option<&'a DiscountGroup>,

    /// Stock state of the product.
    pub stock: StockState,

    /// Customer being priced for; `None` when anonymous.
    pub customer: Option<&'a CustomerTier>,

    /// Category-default rules.
    pub rules: &'a DiscountRules,
}

/// Which rule produced a discount.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum AppliedRule {
    /// The customer's flat `discount1`/`discount2`.
    CustomerFlat,

    /// The customer's own discount for a group.
    CustomerGroup {
        /// Group the product belongs to.
        group: DiscountGroup,

        /// Stock state the discount was chosen for.
        stock: StockState,
    },

    /// The default rule for a group.
    CategoryDefault {
        /// Group the product belongs to.
        group: DiscountGroup,

        /// Stock state the discount was chosen for.
        stock: StockState,
    },

    /// A rule from a resolver outside this crate.
    Custom(String),
}

impl AppliedRule {
    /// Returns true if the rule name marks a customer-specific price.
    ///
    /// Derived from the displayed name: any name containing "customer", in any
    /// case, counts.
    pub fn is_customer(&self) -> bool {
        self.to_string().to_lowercase().contains("customer")
    }
}

impl fmt::Display for AppliedRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CustomerFlat => f.write_str("Customer Discount"),
            Self::CustomerGroup { group, stock } => write!(f, "Customer {group} ({stock})"),
            Self::CategoryDefault { group, stock } => write!(f, "{group} ({stock})"),
            Self::Custom(name) => f.write_str(name),
        }
    }
}

/// A non-empty discount chain and the rule that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    discounts: CompoundDiscount,
    rule: AppliedRule,
}

impl Resolution {
    /// Pair a discount chain with its rule. Returns `None` for an empty chain.
    pub fn new(discounts: CompoundDiscount, rule: AppliedRule) -> Option<Self> {
        if discounts.is_empty() {
            return None;
        }

        Some(Self { discounts, rule })
    }

    /// The discount chain.
    pub fn discounts(&self) -> &CompoundDiscount {
        &self.discounts
    }

    /// The rule that produced the chain.
    pub fn rule(&self) -> &AppliedRule {
        &self.rule
    }

    /// Split into the chain and the rule.
    pub fn into_parts(self) -> (CompoundDiscount, AppliedRule) {
        (self.discounts, self.rule)
    }
}

/// One pricing tier.
pub trait DiscountResolver: fmt::Debug + Send + Sync {
    /// Resolve a discount for the product described by `context`, or `None` to defer to the next tier.
    fn resolve(&self, context: &ResolutionContext<'_>) -> Option<Resolution>;
}

/// The built-in tiers in priority order: customer-specific, then category default.
pub fn default_resolvers() -> Vec<Box<dyn DiscountResolver>> {
    vec![Box::new(CustomerResolver), Box::new(CategoryDefaultResolver)]
}
