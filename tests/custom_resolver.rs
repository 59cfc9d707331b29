//! Integration test proving the pricing cascade accepts resolvers defined outside the crate.

use rust_decimal::Decimal;

use ampere::{
    categories::CategoryMapping,
    customers::CustomerDiscount,
    discounts::CompoundDiscount,
    groups::{DiscountGroup, StockState},
    pricing::{PriceRequest, Pricer},
    resolvers::{
        AppliedRule, CategoryDefaultResolver, CustomerResolver, DiscountResolver, Resolution,
        ResolutionContext,
    },
    rules::DiscountRule,
};

/// Clears out indent stock of one group at a fixed discount, ahead of every other tier.
#[derive(Debug)]
struct ClearanceResolver {
    group: DiscountGroup,
    discount: CompoundDiscount,
}

impl DiscountResolver for ClearanceResolver {
    fn resolve(&self, context: &ResolutionContext<'_>) -> Option<Resolution> {
        if context.category_group != Some(&self.group) || context.stock != StockState::Indent {
            return None;
        }

        Resolution::new(
            self.discount.clone(),
            AppliedRule::Custom(format!("Clearance {}", self.group)),
        )
    }
}

fn pricer() -> Pricer {
    Pricer::new(
        [
            CategoryMapping::new("Lampu LED", "LIGHTING"),
            CategoryMapping::new("MCB", "LP"),
        ]
        .into_iter()
        .collect(),
        [
            DiscountRule::new(DiscountGroup::Lighting, "25", "10"),
            DiscountRule::new(DiscountGroup::Lp, "20", "15"),
        ]
        .into_iter()
        .collect(),
    )
    .with_resolvers(vec![
        Box::new(ClearanceResolver {
            group: DiscountGroup::Lighting,
            discount: CompoundDiscount::parse("50"),
        }),
        Box::new(CustomerResolver),
        Box::new(CategoryDefaultResolver),
    ])
}

#[test]
fn custom_resolver_runs_first() {
    let customer = CustomerDiscount {
        discount_lighting: "35".to_string(),
        ..CustomerDiscount::default()
    }
    .tier();

    let request = PriceRequest::new(Decimal::from(1000)).with_category("Lampu LED");

    let info = pricer().price(&request, Some(&customer));

    assert_eq!(info.discounted_price, Decimal::from(500));
    assert_eq!(info.rule_name().as_deref(), Some("Clearance LIGHTING"));
    assert!(!info.is_customer_discount);
}

#[test]
fn built_in_tiers_still_apply_when_custom_resolver_defers() {
    let customer = CustomerDiscount {
        discount_lighting: "35".to_string(),
        ..CustomerDiscount::default()
    }
    .tier();

    let in_stock = PriceRequest::new(Decimal::from(1000))
        .with_category("Lampu LED")
        .with_available(Decimal::from(8));

    let info = pricer().price(&in_stock, Some(&customer));

    assert_eq!(info.discounted_price, Decimal::from(650));
    assert_eq!(info.rule_name().as_deref(), Some("Customer LIGHTING (Stock)"));

    let breaker = PriceRequest::new(Decimal::from(1000)).with_category("MCB");

    let info = pricer().price(&breaker, None);

    assert_eq!(info.discounted_price, Decimal::from(850));
    assert_eq!(info.rule_name().as_deref(), Some("LP (Indent)"));
}

#[test]
fn empty_resolver_list_prices_at_list_price() {
    let request = PriceRequest::new(Decimal::from(1000))
        .with_category("MCB")
        .with_available(Decimal::ONE);

    let info = pricer().with_resolvers(Vec::new()).price(&request, None);

    assert_eq!(info.discounted_price, Decimal::from(1000));
    assert!(!info.has_discount);
}
