//! Category-default discount rules

use std::collections::hash_map::Entry;

use rustc_hash::FxHashMap;
use tracing::debug;

use crate::{
    discounts::CompoundDiscount,
    groups::{DiscountGroup, StockState},
};

/// Default discounts for every category in a group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscountRule {
    /// Group the rule applies to.
    pub category_group: DiscountGroup,

    /// Compound discount spec used while in stock.
    pub stock_discount: String,

    /// Compound discount spec used on indent.
    pub indent_discount: String,
}

impl DiscountRule {
    /// Create a rule for a group.
    pub fn new(
        category_group: DiscountGroup,
        stock_discount: impl Into<String>,
        indent_discount: impl Into<String>,
    ) -> Self {
        Self {
            category_group,
            stock_discount: stock_discount.into(),
            indent_discount: indent_discount.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct ParsedRule {
    stock: CompoundDiscount,
    indent: CompoundDiscount,
}

/// Lookup table of parsed rules, keyed by group.
#[derive(Debug, Clone, Default)]
pub struct DiscountRules {
    rules: FxHashMap<String, ParsedRule>,
}

impl DiscountRules {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse and add a rule. The first rule for a group wins; returns false if the group already had one.
    pub fn insert(&mut self, rule: &DiscountRule) -> bool {
        match self.rules.entry(rule.category_group.key().to_string()) {
            Entry::Occupied(entry) => {
                debug!(group = %entry.key(), "ignoring duplicate discount rule");

                false
            }
            Entry::Vacant(entry) => {
                entry.insert(ParsedRule {
                    stock: CompoundDiscount::parse(&rule.stock_discount),
                    indent: CompoundDiscount::parse(&rule.indent_discount),
                });

                true
            }
        }
    }

    /// Default discount for a group and stock state.
    ///
    /// The indent discount is used exactly as configured, with no fallback to
    /// the stock discount.
    pub fn discount(&self, group: &DiscountGroup, stock: StockState) -> Option<&CompoundDiscount> {
        let rule = self.rules.get(group.key())?;

        Some(match stock {
            StockState::Ready => &rule.stock,
            StockState::Indent => &rule.indent,
        })
    }

    /// Number of groups with a rule.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Returns true if the table has no rules.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl<'a> FromIterator<&'a DiscountRule> for DiscountRules {
    fn from_iter<I: IntoIterator<Item = &'a DiscountRule>>(iter: I) -> Self {
        let mut rules = Self::new();

        for rule in iter {
            rules.insert(rule);
        }

        rules
    }
}

impl FromIterator<DiscountRule> for DiscountRules {
    fn from_iter<I: IntoIterator<Item = DiscountRule>>(iter: I) -> Self {
        let mut rules = Self::new();

        for rule in iter {
            rules.insert(&rule);
        }

        rules
    }
}
