//! Discounts
//!
//! Compound discount chains such as `30+5`: thirty percent off the price, then
//! five percent off whatever is left.

use std::{convert::Infallible, fmt, str::FromStr};

use decimal_percentage::Percentage;
use rust_decimal::Decimal;
use smallvec::SmallVec;
use tracing::debug;

/// Largest accepted step, in percent points. A single step can at most bring the price to zero.
const MAX_STEP_POINTS: Decimal = Decimal::ONE_HUNDRED;

/// An ordered chain of percentage reductions, applied one after another.
///
/// Steps are stored in percent points (`30` for 30%). Every stored step is
/// strictly positive and at most 100. An empty chain means no discount.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct CompoundDiscount {
    steps: SmallVec<[Decimal; 4]>,
}

impl CompoundDiscount {
    /// A chain with no steps.
    pub fn none() -> Self {
        Self::default()
    }

    /// Parse a compound discount spec such as `"30+5"`.
    ///
    /// Parsing never fails. `"0"` and the empty string mean no discount, and
    /// any token that is not a positive number is dropped. Tokens may carry a
    /// trailing `%`.
    pub fn parse(spec: &str) -> Self {
        let spec = spec.trim();

        if spec.is_empty() || spec == "0" {
            return Self::none();
        }

        spec.split('+').filter_map(parse_token).collect()
    }

    /// Steps in the order they are applied, in percent points.
    pub fn steps(&self) -> &[Decimal] {
        &self.steps
    }

    /// Number of steps in the chain.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Returns true if the chain applies no discount.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Steps as fractional percentages (`0.30` for 30%).
    pub fn percentages(&self) -> impl Iterator<Item = Percentage> + '_ {
        self.steps
            .iter()
            .map(|points| Percentage::from(*points / Decimal::ONE_HUNDRED))
    }

    /// Apply every step to the running price, in order.
    ///
    /// `[30, 5]` on 1000 gives `1000 × 0.70 × 0.95 = 665`.
    pub fn apply(&self, price: Decimal) -> Decimal {
        self.percentages()
            .fold(price, |running, percent| running - percent * running)
    }
}

impl FromIterator<Decimal> for CompoundDiscount {
    fn from_iter<I: IntoIterator<Item = Decimal>>(iter: I) -> Self {
        Self {
            steps: iter.into_iter().filter_map(normalise_step).collect(),
        }
    }
}

impl FromStr for CompoundDiscount {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl fmt::Display for CompoundDiscount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut steps = self.steps.iter();

        let Some(first) = steps.next() else {
            return f.write_str("0");
        };

        write!(f, "{}", first.normalize())?;

        for step in steps {
            write!(f, "+{}", step.normalize())?;
        }

        Ok(())
    }
}

fn parse_token(token: &str) -> Option<Decimal> {
    let trimmed = token.trim();
    let number = trimmed.strip_suffix('%').map_or(trimmed, str::trim_end);

    // `Decimal` accepts digit separators like `1_0`; plain numbers only.
    match number.parse::<Decimal>() {
        Ok(points) if !number.contains('_') => Some(points),
        _ => {
            debug!(token, "ignoring malformed discount token");

            None
        }
    }
}

fn normalise_step(points: Decimal) -> Option<Decimal> {
    if points <= Decimal::ZERO {
        debug!(%points, "ignoring non-positive discount step");

        return None;
    }

    Some(points.min(MAX_STEP_POINTS))
}
