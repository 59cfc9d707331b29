//! Fixtures
//!
//! Pricing catalogs described in YAML: currency, category mappings, discount
//! rules, customers and products.

use std::{fs, path::Path};

use rust_decimal::Decimal;
use rustc_hash::FxHashMap;
use rusty_money::iso::{self, Currency};
use serde::Deserialize;
use thiserror::Error;

use crate::{
    categories::CategoryMapping,
    customers::CustomerDiscount,
    fixtures::{customers::CustomerFixture, products::ProductFixture},
    groups::DiscountGroup,
    pricing::Pricer,
    products::Product,
    rules::DiscountRule,
};

pub mod customers;
pub mod products;

/// Fixture Parsing Errors
#[derive(Debug, Error)]
pub enum FixtureError {
    /// IO error reading fixture files
    #[error("Failed to read fixture file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Invalid price format
    #[error("Invalid price format: {0}")]
    InvalidPrice(String),

    /// Invalid number
    #[error("Invalid number: {0}")]
    InvalidNumber(String),

    /// Unknown currency code
    #[error("Unknown currency code: {0}")]
    UnknownCurrency(String),

    /// Currency mismatch between the catalog and a product
    #[error("Currency mismatch: expected {0}, found {1}")]
    CurrencyMismatch(String, String),

    /// Discount rule without a group key
    #[error("Discount rule is missing its group")]
    MissingRuleGroup,

    /// Customer not found
    #[error("Customer not found: {0}")]
    CustomerNotFound(String),
}

/// A compound discount spec, written either as text (`"30+5"`) or as a bare number (`25`).
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum DiscountSpecFixture {
    /// Spec text
    Text(String),

    /// Single number
    Number(f64),
}

impl DiscountSpecFixture {
    /// The spec as text.
    pub fn into_spec(self) -> String {
        match self {
            DiscountSpecFixture::Text(text) => text,
            DiscountSpecFixture::Number(number) => number.to_string(),
        }
    }
}

/// Category mapping from YAML
#[derive(Debug, Deserialize)]
pub struct CategoryMappingFixture {
    /// Category label
    pub category: String,

    /// Group key; omitted or empty leaves the category unmapped
    #[serde(default)]
    pub discount_type: Option<String>,
}

impl From<CategoryMappingFixture> for CategoryMapping {
    fn from(fixture: CategoryMappingFixture) -> Self {
        CategoryMapping::new(
            fixture.category,
            fixture.discount_type.as_deref().unwrap_or_default(),
        )
    }
}

/// Discount rule from YAML
#[derive(Debug, Deserialize)]
pub struct DiscountRuleFixture {
    /// Group key
    pub group: String,

    /// Discount while in stock
    #[serde(default)]
    pub stock: Option<DiscountSpecFixture>,

    /// Discount on indent
    #[serde(default)]
    pub indent: Option<DiscountSpecFixture>,
}

impl TryFrom<DiscountRuleFixture> for DiscountRule {
    type Error = FixtureError;

    fn try_from(fixture: DiscountRuleFixture) -> Result<Self, Self::Error> {
        let group = DiscountGroup::from_key(&fixture.group).ok_or(FixtureError::MissingRuleGroup)?;

        Ok(DiscountRule::new(
            group,
            spec_or_empty(fixture.stock),
            spec_or_empty(fixture.indent),
        ))
    }
}

/// Whole catalog document
#[derive(Debug, Deserialize)]
pub struct CatalogFixture {
    /// ISO currency code for every price in the catalog
    pub currency: String,

    /// Category mappings, first match wins
    #[serde(default)]
    pub category_mappings: Vec<CategoryMappingFixture>,

    /// Discount rules, first rule per group wins
    #[serde(default)]
    pub discount_rules: Vec<DiscountRuleFixture>,

    /// Customer key -> discount settings
    #[serde(default)]
    pub customers: FxHashMap<String, CustomerFixture>,

    /// Products in listing order
    #[serde(default)]
    pub products: Vec<ProductFixture>,
}

/// A loaded pricing catalog.
#[derive(Debug)]
pub struct Catalog {
    currency: &'static Currency,
    mappings: Vec<CategoryMapping>,
    rules: Vec<DiscountRule>,
    customers: FxHashMap<String, CustomerDiscount>,
    products: Vec<Product>,
}

impl Catalog {
    /// Load a catalog from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or if it holds
    /// invalid prices, numbers or currencies.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, FixtureError> {
        let contents = fs::read_to_string(path)?;

        Self::from_yaml(&contents)
    }

    /// Parse a catalog from YAML text.
    ///
    /// # Errors
    ///
    /// Returns an error if the YAML cannot be parsed, or if it holds invalid
    /// prices, numbers or currencies.
    pub fn from_yaml(contents: &str) -> Result<Self, FixtureError> {
        let fixture: CatalogFixture = serde_norway::from_str(contents)?;

        Self::try_from(fixture)
    }

    /// Catalog currency.
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }

    /// Category mappings in document order.
    pub fn mappings(&self) -> &[CategoryMapping] {
        &self.mappings
    }

    /// Discount rules in document order.
    pub fn rules(&self) -> &[DiscountRule] {
        &self.rules
    }

    /// Products in listing order.
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Look up a customer by key.
    ///
    /// # Errors
    ///
    /// Returns [`FixtureError::CustomerNotFound`] if no customer has this key.
    pub fn customer(&self, key: &str) -> Result<&CustomerDiscount, FixtureError> {
        self.customers
            .get(key)
            .ok_or_else(|| FixtureError::CustomerNotFound(key.to_string()))
    }

    /// Customer keys, sorted.
    pub fn customer_keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.customers.keys().map(String::as_str).collect();
        keys.sort_unstable();
        keys
    }

    /// Build a pricer from the catalog's mappings and rules.
    pub fn pricer(&self) -> Pricer {
        Pricer::new(self.mappings.iter().collect(), self.rules.iter().collect())
    }
}

impl TryFrom<CatalogFixture> for Catalog {
    type Error = FixtureError;

    fn try_from(fixture: CatalogFixture) -> Result<Self, Self::Error> {
        let currency = currency_from_code(&fixture.currency)?;

        let rules = fixture
            .discount_rules
            .into_iter()
            .map(DiscountRule::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        let customers = fixture
            .customers
            .into_iter()
            .map(|(key, customer)| Ok((key, CustomerDiscount::try_from(customer)?)))
            .collect::<Result<FxHashMap<_, _>, FixtureError>>()?;

        let products = fixture
            .products
            .into_iter()
            .map(|product| product.try_into_product(currency))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            currency,
            mappings: fixture
                .category_mappings
                .into_iter()
                .map(CategoryMapping::from)
                .collect(),
            rules,
            customers,
            products,
        })
    }
}

/// Resolve an ISO currency code.
///
/// # Errors
///
/// Returns [`FixtureError::UnknownCurrency`] for codes outside the supported set.
pub fn currency_from_code(code: &str) -> Result<&'static Currency, FixtureError> {
    match code {
        "IDR" => Ok(iso::IDR),
        "SGD" => Ok(iso::SGD),
        "USD" => Ok(iso::USD),
        "EUR" => Ok(iso::EUR),
        "GBP" => Ok(iso::GBP),
        other => Err(FixtureError::UnknownCurrency(other.to_string())),
    }
}

/// Convert a YAML number to a decimal through its shortest text form.
///
/// # Errors
///
/// Returns [`FixtureError::InvalidNumber`] for values without a decimal form (NaN, infinity).
pub fn decimal_from_f64(value: f64) -> Result<Decimal, FixtureError> {
    let text = value.to_string();

    text.parse::<Decimal>()
        .map_err(|_err| FixtureError::InvalidNumber(text))
}

fn spec_or_empty(spec: Option<DiscountSpecFixture>) -> String {
    spec.map(DiscountSpecFixture::into_spec).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::groups::StockState;

    use super::*;

    const CATALOG: &str = r#"
currency: IDR
category_mappings:
  - category: Kabel NYM
    discount_type: CP
  - category: Lampu LED
    discount_type: LIGHTING
  - category: Tools
discount_rules:
  - group: CP
    stock: "30+5"
    indent: 20
  - group: LIGHTING
    stock: 25
customers:
  toko-terang:
    discount1: 10
    lighting: "35"
products:
  - sku: NYM-2x1.5
    name: Kabel NYM 2x1.5mm
    category: Kabel NYM
    price: "1000 IDR"
    available: 12
  - sku: LED-9W
    name: Lampu LED 9W
    category: Lampu LED
    price: 45000
"#;

    #[test]
    fn from_yaml_loads_every_section() -> TestResult {
        let catalog = Catalog::from_yaml(CATALOG)?;

        assert_eq!(catalog.currency(), iso::IDR);
        assert_eq!(catalog.mappings().len(), 3);
        assert_eq!(catalog.rules().len(), 2);
        assert_eq!(catalog.products().len(), 2);
        assert_eq!(catalog.customer_keys(), vec!["toko-terang"]);

        Ok(())
    }

    #[test]
    fn numeric_rule_specs_become_text() -> TestResult {
        let catalog = Catalog::from_yaml(CATALOG)?;

        assert_eq!(
            catalog.rules().first().map(|rule| rule.indent_discount.as_str()),
            Some("20")
        );
        assert_eq!(
            catalog.rules().get(1).map(|rule| rule.indent_discount.as_str()),
            Some("")
        );

        Ok(())
    }

    #[test]
    fn mapping_without_type_is_unmapped() -> TestResult {
        let catalog = Catalog::from_yaml(CATALOG)?;
        let pricer = catalog.pricer();

        assert_eq!(pricer.mappings().discount_group("Tools"), None);
        assert_eq!(
            pricer.rules().discount(&DiscountGroup::Cp, StockState::Ready).map(ToString::to_string),
            Some("30+5".to_string())
        );

        Ok(())
    }

    #[test]
    fn unknown_customer_is_an_error() -> TestResult {
        let catalog = Catalog::from_yaml(CATALOG)?;

        assert!(matches!(
            catalog.customer("nobody"),
            Err(FixtureError::CustomerNotFound(key)) if key == "nobody"
        ));

        Ok(())
    }

    #[test]
    fn unknown_currency_is_an_error() {
        let result = Catalog::from_yaml("currency: XYZ\n");

        assert!(matches!(result, Err(FixtureError::UnknownCurrency(code)) if code == "XYZ"));
    }

    #[test]
    fn rule_without_group_is_an_error() {
        let yaml = r#"
currency: IDR
discount_rules:
  - group: ""
    stock: "10"
"#;

        assert!(matches!(
            Catalog::from_yaml(yaml),
            Err(FixtureError::MissingRuleGroup)
        ));
    }

    #[test]
    fn malformed_yaml_is_an_error() {
        assert!(matches!(
            Catalog::from_yaml("currency: [IDR"),
            Err(FixtureError::Yaml(_))
        ));
    }

    #[test]
    fn decimal_from_f64_uses_shortest_form() -> TestResult {
        assert_eq!(decimal_from_f64(0.1)?, Decimal::new(1, 1));
        assert_eq!(decimal_from_f64(25.0)?, Decimal::from(25));
        assert!(matches!(
            decimal_from_f64(f64::NAN),
            Err(FixtureError::InvalidNumber(_))
        ));

        Ok(())
    }
}
