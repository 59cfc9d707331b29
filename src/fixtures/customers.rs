//! Customer Fixtures

use serde::Deserialize;

use crate::{
    customers::CustomerDiscount,
    fixtures::{DiscountSpecFixture, FixtureError, decimal_from_f64, spec_or_empty},
};

/// Customer discount settings from YAML
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CustomerFixture {
    /// First flat discount, in percent points
    pub discount1: f64,

    /// Second flat discount, in percent points
    pub discount2: f64,

    /// `LP` discount while in stock
    pub lp: Option<DiscountSpecFixture>,

    /// `LP` discount on indent
    pub lp_indent: Option<DiscountSpecFixture>,

    /// `CP` discount while in stock
    pub cp: Option<DiscountSpecFixture>,

    /// `CP` discount on indent
    pub cp_indent: Option<DiscountSpecFixture>,

    /// `LIGHTING` discount while in stock
    pub lighting: Option<DiscountSpecFixture>,

    /// `LIGHTING` discount on indent
    pub lighting_indent: Option<DiscountSpecFixture>,
}

impl TryFrom<CustomerFixture> for CustomerDiscount {
    type Error = FixtureError;

    fn try_from(fixture: CustomerFixture) -> Result<Self, Self::Error> {
        Ok(CustomerDiscount {
            discount1: decimal_from_f64(fixture.discount1)?,
            discount2: decimal_from_f64(fixture.discount2)?,
            discount_lp: spec_or_empty(fixture.lp),
            discount_lp_indent: fixture.lp_indent.map(DiscountSpecFixture::into_spec),
            discount_cp: spec_or_empty(fixture.cp),
            discount_cp_indent: fixture.cp_indent.map(DiscountSpecFixture::into_spec),
            discount_lighting: spec_or_empty(fixture.lighting),
            discount_lighting_indent: fixture.lighting_indent.map(DiscountSpecFixture::into_spec),
        })
    }
}
