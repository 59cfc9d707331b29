//! Ampere
//!
//! Ampere prices an electrical-products catalog for each customer. A product's
//! list price passes through a short cascade of discount tiers (the
//! customer's own discounts first, then the default rule of the product's
//! category group) and comes out as a net price with and without PPN.
//!
//! Pricing is pure and never fails: bad discount specs, unmapped categories
//! and missing rules all fall back to the list price.

pub mod categories;
pub mod customers;
pub mod discounts;
pub mod fixtures;
pub mod groups;
pub mod prelude;
pub mod price_list;
pub mod pricing;
pub mod products;
pub mod resolvers;
pub mod rules;
