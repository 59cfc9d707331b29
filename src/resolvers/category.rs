//! Category-default tier

use crate::resolvers::{AppliedRule, DiscountResolver, Resolution, ResolutionContext};

/// Prices from the default rule of the product's group.
#[derive(Debug, Clone, Copy, Default)]
pub struct CategoryDefaultResolver;

impl DiscountResolver for CategoryDefaultResolver {
    fn resolve(&self, context: &ResolutionContext<'_>) -> Option<Resolution> {
        let group = context.category_group?;
        let discounts = context.rules.discount(group, context.stock)?;

        Resolution::new(
            discounts.clone(),
            AppliedRule::CategoryDefault {
                group: group.clone(),
                stock: context.stock,
            },
        )
    }
}
