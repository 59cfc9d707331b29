//! Customer-specific tier

use crate::resolvers::{AppliedRule, DiscountResolver, Resolution, ResolutionContext};

/// Prices from the customer's own settings.
///
/// A non-empty group discount for the product's group and stock state wins
/// outright. Otherwise the customer's flat discounts apply, if any. The two
/// are never combined.
#[derive(Debug, Clone, Copy, Default)]
pub struct CustomerResolver;

impl DiscountResolver for CustomerResolver {
    fn resolve(&self, context: &ResolutionContext<'_>) -> Option<Resolution> {
        let customer = context.customer?;

        let group_discount = context.category_group.and_then(|group| {
            let discounts = customer.group(group, context.stock)?;

            Resolution::new(
                discounts.clone(),
                AppliedRule::CustomerGroup {
                    group: group.clone(),
                    stock: context.stock,
                },
            )
        });

        group_discount
            .or_else(|| Resolution::new(customer.flat().clone(), AppliedRule::CustomerFlat))
    }
}
