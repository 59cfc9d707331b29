//! Ampere prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    categories::{CategoryMapping, CategoryMappings},
    customers::{CustomerDiscount, CustomerTier},
    discounts::CompoundDiscount,
    fixtures::{Catalog, FixtureError},
    groups::{DiscountGroup, StockState},
    price_list::{PriceList, PriceListError},
    pricing::{PPN_FACTOR, PriceInfo, PriceRequest, Pricer, compute_price},
    products::Product,
    resolvers::{
        AppliedRule, CategoryDefaultResolver, CustomerResolver, DiscountResolver, Resolution,
        ResolutionContext,
    },
    rules::{DiscountRule, DiscountRules},
};
